// OpenAPI specification generation
//
// This module defines the OpenAPI document for the Eventhub API.
// It is used by both the API server (for Swagger UI)
// and the export-openapi binary (for static spec generation).

use crate::api;
use crate::api::{ErrorResponse, ListResponse, MessageResponse};
use crate::auth;
use eventhub_core::{Event, EventCategory, EventStatus, User};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the bearer token scheme referenced by protected routes
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation for the Eventhub API
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::routes::register,
        auth::routes::login,
        auth::routes::logout,
        auth::routes::me,
        api::events::list_events,
        api::events::get_event,
        api::events::create_event,
        api::events::update_event,
        api::events::delete_event,
    ),
    components(
        schemas(
            User,
            Event, EventCategory, EventStatus,
            auth::routes::RegisterRequest, auth::routes::LoginRequest,
            auth::AuthResponse, auth::TokenPair,
            api::events::CreateEventRequest, api::events::UpdateEventRequest,
            ListResponse<Event>,
            ErrorResponse, MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login and session cookie endpoints"),
        (name = "events", description = "Event management endpoints")
    ),
    info(
        title = "Eventhub API",
        version = "0.1.0",
        description = "API for registering users and managing events",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> Result<String, serde_json::Error> {
        Self::openapi().to_pretty_json()
    }
}
