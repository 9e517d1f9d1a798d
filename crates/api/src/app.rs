// Router assembly
// Decision: Wiring lives in the library so the binary and the integration tests build the same app
// Decision: Health is unauthenticated and outside /api

use axum::http::{header, Method};
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::auth::{self, AuthRoutesState, AuthService, AuthState, PasswordHasher, TokenService};
use crate::config::{AppConfig, CorsOrigins};
use crate::openapi::ApiDoc;
use crate::services::EventService;
use crate::storage::StorageBackend;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: &'static str,
}

/// State for health endpoint
#[derive(Clone)]
struct HealthState {
    environment: &'static str,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.environment,
    })
}

/// Build the complete application router
pub fn build_app(config: &AppConfig, db: Arc<StorageBackend>) -> Router {
    let tokens = Arc::new(TokenService::new(config.auth.jwt.clone()));
    let auth_state = AuthState::new(tokens.clone());

    let auth_service = Arc::new(AuthService::new(
        db.clone(),
        tokens,
        PasswordHasher::new(config.auth.hash_cost),
    ));
    let auth_routes_state = AuthRoutesState {
        service: auth_service,
        auth: auth_state.clone(),
        secure_cookies: config.auth.secure_cookies,
    };

    let event_service = Arc::new(EventService::new(db));
    let events_state = api::events::AppState::new(event_service, auth_state);

    let health_state = HealthState {
        environment: config.environment.as_str(),
    };

    let app = Router::new()
        .route("/health", get(health).with_state(health_state))
        .merge(auth::routes(auth_routes_state))
        .merge(api::events::routes(events_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    app.layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ORIGIN,
        ]);

    match origins {
        // Credentialed requests cannot use a wildcard origin
        CorsOrigins::Any => layer.allow_origin(Any),
        CorsOrigins::List(list) => layer
            .allow_origin(AllowOrigin::list(list.clone()))
            .allow_credentials(true),
    }
}
