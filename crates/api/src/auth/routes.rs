// Authentication HTTP routes
// Decision: Use /api/auth/* prefix for all auth endpoints (consistent with other API routes)
// Decision: Tokens are returned in the body and the access token is also set as the `token` cookie
// Decision: Logout only clears the cookie; issued tokens stay valid until they expire

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use eventhub_core::User;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::{
    config::TOKEN_COOKIE,
    middleware::{AuthState, AuthUser, FromRef},
    service::{AuthResponse, AuthService},
};
use crate::api::{
    common::{ErrorResponse, MessageResponse},
    error::ApiError,
    validation::{
        check_email, check_length, check_password, Validate, ValidatedJson, MIN_NAME_CHARS,
    },
};

/// Register request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Jo Lee")]
    pub name: String,
    #[schema(example = "jo@x.com")]
    pub email: String,
    #[schema(example = "password123")]
    pub password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        check_length(&mut problems, "name", &self.name, MIN_NAME_CHARS, None);
        check_email(&mut problems, &self.email);
        check_password(&mut problems, &self.password);
        problems
    }
}

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "jo@x.com")]
    pub email: String,
    #[schema(example = "password123")]
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        check_email(&mut problems, &self.email);
        check_password(&mut problems, &self.password);
        problems
    }
}

/// App state for auth routes
#[derive(Clone)]
pub struct AuthRoutesState {
    pub service: Arc<AuthService>,
    pub auth: AuthState,
    pub secure_cookies: bool,
}

impl FromRef<AuthRoutesState> for AuthState {
    fn from_ref(input: &AuthRoutesState) -> Self {
        input.auth.clone()
    }
}

impl AuthRoutesState {
    fn token_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((TOKEN_COOKIE, token))
            .path("/")
            .http_only(true)
            .secure(self.secure_cookies)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(
                self.auth.tokens.access_token_lifetime_secs(),
            ))
            .build()
    }
}

/// Create auth routes
pub fn routes(state: AuthRoutesState) -> Router {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        .with_state(state)
}

/// POST /api/auth/register - Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AuthRoutesState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>), ApiError> {
    let response = state
        .service
        .register(&req.name, &req.email, &req.password)
        .await?;

    let jar = jar.add(state.token_cookie(response.tokens.access_token.clone()));
    Ok((StatusCode::CREATED, jar, Json(response)))
}

/// POST /api/auth/login - Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AuthRoutesState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), ApiError> {
    let response = state.service.login(&req.email, &req.password).await?;

    let jar = jar.add(state.token_cookie(response.tokens.access_token.clone()));
    Ok((jar, Json(response)))
}

/// POST /api/auth/logout - Clear the token cookie
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    tag = "auth"
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    (
        jar.remove(Cookie::build(TOKEN_COOKIE).path("/")),
        Json(MessageResponse::new("Logged out successfully")),
    )
}

/// GET /api/auth/me - Current user profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn me(
    State(state): State<AuthRoutesState>,
    auth: AuthUser,
) -> Result<Json<User>, ApiError> {
    let user = state.service.me(auth.id).await?;
    Ok(Json(user))
}
