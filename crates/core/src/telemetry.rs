// Telemetry Module
//
// Installs the process-wide tracing subscriber. Only binaries call
// `init_telemetry`; library code emits spans and events through the
// `tracing` macros and never touches subscriber state.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

// ============================================================================
// Telemetry Configuration
// ============================================================================

/// Configuration for the tracing subscriber
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name, attached to the startup log line
    pub service_name: String,
    /// Service version
    pub service_version: Option<String>,
    /// Environment (e.g., "development", "production")
    pub environment: Option<String>,
    /// Whether to enable console logging
    pub enable_console: bool,
    /// Log filter (e.g., "info", "debug", "eventhub_api=debug")
    pub log_filter: Option<String>,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "eventhub".to_string(),
            service_version: None,
            environment: None,
            enable_console: true,
            log_filter: None,
            json: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables
    ///
    /// Environment variables:
    /// - `SERVICE_NAME`: Service name (default: "eventhub")
    /// - `APP_ENV`: Deployment environment
    /// - `RUST_LOG` or `LOG_LEVEL`: Log filter
    /// - `LOG_FORMAT`: "json" for structured output
    pub fn from_env() -> Self {
        Self {
            service_name: std::env::var("SERVICE_NAME").unwrap_or_else(|_| "eventhub".to_string()),
            service_version: None,
            environment: std::env::var("APP_ENV").ok(),
            enable_console: true,
            log_filter: std::env::var("RUST_LOG")
                .ok()
                .or_else(|| std::env::var("LOG_LEVEL").ok()),
            json: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }

    fn env_filter(&self) -> EnvFilter {
        self.log_filter
            .as_ref()
            .and_then(|f| EnvFilter::try_new(f).ok())
            .unwrap_or_else(|| EnvFilter::new("info"))
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Initialize the global tracing subscriber with the given configuration
///
/// Call once from `main`. Subsequent calls are ignored.
///
/// # Example
///
/// ```ignore
/// use eventhub_core::telemetry::{init_telemetry, TelemetryConfig};
///
/// #[tokio::main]
/// async fn main() {
///     init_telemetry(TelemetryConfig::from_env());
///     // ... your application code
/// }
/// ```
pub fn init_telemetry(config: TelemetryConfig) {
    let console_layer = if config.enable_console {
        let layer = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_filter(config.env_filter())
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_filter(config.env_filter())
                .boxed()
        };
        Some(layer)
    } else {
        None
    };

    if tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .is_err()
    {
        return;
    }

    tracing::info!(
        service = %config.service_name,
        version = config.service_version.as_deref().unwrap_or("unknown"),
        environment = config.environment.as_deref().unwrap_or("development"),
        "Telemetry initialized"
    );
}
