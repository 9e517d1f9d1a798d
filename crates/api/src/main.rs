// Eventhub API server
// Decision: Configuration errors abort startup before the listener binds
// Decision: Postgres when DATABASE_URL is set, otherwise the in-memory dev store

use anyhow::{Context, Result};
use eventhub_api::storage::StorageBackend;
use eventhub_api::{build_app, AppConfig};
use eventhub_core::telemetry::{init_telemetry, TelemetryConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; real environment variables take precedence
    let _ = dotenvy::dotenv();

    // Configure via environment variables:
    // - RUST_LOG: Log filter (default: "eventhub_api=debug,tower_http=debug")
    // - LOG_FORMAT=json: Structured JSON output
    let mut telemetry_config = TelemetryConfig::from_env();
    if telemetry_config.service_name == "eventhub" {
        telemetry_config.service_name = "eventhub-api".to_string();
    }
    if telemetry_config.log_filter.is_none() {
        telemetry_config.log_filter = Some("eventhub_api=debug,tower_http=debug".to_string());
    }
    telemetry_config.service_version = Some(env!("CARGO_PKG_VERSION").to_string());
    init_telemetry(telemetry_config);

    let config = AppConfig::from_env().context("Invalid configuration")?;
    tracing::info!(
        environment = config.environment.as_str(),
        algorithm = ?config.auth.jwt.algorithm,
        hash_cost = config.auth.hash_cost,
        "Configuration loaded"
    );

    let db = match &config.database_url {
        Some(url) => StorageBackend::postgres(url)
            .await
            .context("Failed to connect to database")?,
        None => StorageBackend::in_memory(),
    };
    if db.is_dev_mode() {
        tracing::warn!("DATABASE_URL not set, using in-memory storage (data is lost on restart)");
    } else {
        tracing::info!("Connected to database");
    }

    let app = build_app(&config, Arc::new(db));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
