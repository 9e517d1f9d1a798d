// Events HTTP routes
// Decision: Reads are public, writes require authentication
// Decision: Ownership failures answer 404, same as a missing event

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use eventhub_core::{Event, EventCategory, EventStatus};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::{ErrorResponse, ListResponse};
use super::error::ApiError;
use super::validation::{
    check_length, Validate, ValidatedJson, ValidatedPath, MAX_DESCRIPTION_CHARS,
    MAX_TITLE_CHARS,
};
use crate::auth::middleware::{AuthState, AuthUser, FromRef};
use crate::services::EventService;

/// Request to create a new event.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[schema(example = "RustConf Meetup")]
    pub title: String,
    #[schema(example = "An evening of lightning talks")]
    pub description: String,
    /// Must lie in the future.
    pub date: DateTime<Utc>,
    #[schema(example = "Amsterdam")]
    pub location: String,
    /// Unlimited when omitted.
    #[serde(default)]
    pub max_attendees: Option<i32>,
    /// Defaults to `other`.
    #[serde(default)]
    pub category: Option<EventCategory>,
}

impl Validate for CreateEventRequest {
    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        check_length(&mut problems, "title", &self.title, 1, Some(MAX_TITLE_CHARS));
        check_length(
            &mut problems,
            "description",
            &self.description,
            1,
            Some(MAX_DESCRIPTION_CHARS),
        );
        check_length(&mut problems, "location", &self.location, 1, None);
        check_max_attendees(&mut problems, self.max_attendees);
        if self.date <= Utc::now() {
            problems.push("date must be in the future".to_string());
        }
        problems
    }
}

/// Request to update an event. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub max_attendees: Option<i32>,
    #[serde(default)]
    pub category: Option<EventCategory>,
    #[serde(default)]
    pub status: Option<EventStatus>,
}

impl Validate for UpdateEventRequest {
    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if let Some(title) = &self.title {
            check_length(&mut problems, "title", title, 1, Some(MAX_TITLE_CHARS));
        }
        if let Some(description) = &self.description {
            check_length(
                &mut problems,
                "description",
                description,
                1,
                Some(MAX_DESCRIPTION_CHARS),
            );
        }
        if let Some(location) = &self.location {
            check_length(&mut problems, "location", location, 1, None);
        }
        check_max_attendees(&mut problems, self.max_attendees);
        problems
    }
}

fn check_max_attendees(problems: &mut Vec<String>, max_attendees: Option<i32>) {
    if matches!(max_attendees, Some(n) if n < 1) {
        problems.push("maxAttendees must be at least 1".to_string());
    }
}

// ============================================
// App State and Routes
// ============================================

/// App state for events routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EventService>,
    pub auth: AuthState,
}

impl AppState {
    pub fn new(service: Arc<EventService>, auth: AuthState) -> Self {
        Self { service, auth }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(input: &AppState) -> Self {
        input.auth.clone()
    }
}

/// Create events routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route(
            "/api/events/:id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .with_state(state)
}

/// GET /api/events - List published events
#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "Published events, soonest first", body = ListResponse<Event>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Event>>, ApiError> {
    let events = state.service.list_published().await?;
    Ok(Json(ListResponse::new(events)))
}

/// GET /api/events/{id} - Get an event
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn get_event(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<Event>, ApiError> {
    let event = state.service.get(id).await?;
    Ok(Json(event))
}

/// POST /api/events - Create an event
#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created as draft", body = Event),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let event = state.service.create(auth.id, req).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /api/events/{id} - Update an event
#[utoipa::path(
    put,
    path = "/api/events/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Event not found or not owned by caller", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "events"
)]
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateEventRequest>,
) -> Result<Json<Event>, ApiError> {
    let event = state.service.update(id, auth.id, req).await?;
    Ok(Json(event))
}

/// DELETE /api/events/{id} - Delete an event
#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Event not found or not owned by caller", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "events"
)]
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(id, auth.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
