// Input validation for API requests
//
// Requests are checked before any service call. Every failing rule is reported
// in the `details` array of the 400 response, not just the first one.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use eventhub_core::Error;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::LazyLock;

use super::error::ApiError;

// =============================================================================
// Limits
// =============================================================================

/// Minimum length of a user's display name
pub const MIN_NAME_CHARS: usize = 2;

/// Minimum password length
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Maximum length of an event title
pub const MAX_TITLE_CHARS: usize = 100;

/// Maximum length of an event description
pub const MAX_DESCRIPTION_CHARS: usize = 500;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w-]+(\.[\w-]+)*@([\w-]+\.)+[a-zA-Z]{2,7}$").expect("email pattern is valid")
});

// =============================================================================
// Validation Functions
// =============================================================================

/// Request bodies that can check their own fields
pub trait Validate {
    /// Collect every rule violation; empty means valid
    fn validate(&self) -> Vec<String>;
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Check a required text field's length in characters
pub fn check_length(
    problems: &mut Vec<String>,
    field: &str,
    value: &str,
    min: usize,
    max: Option<usize>,
) {
    let len = value.trim().chars().count();
    if len < min {
        if min <= 1 {
            problems.push(format!("{} is required", field));
        } else {
            problems.push(format!("{} must be at least {} characters", field, min));
        }
    } else if let Some(max) = max.filter(|max| len > *max) {
        problems.push(format!("{} must be at most {} characters", field, max));
    }
}

pub fn check_email(problems: &mut Vec<String>, email: &str) {
    if !is_valid_email(email) {
        problems.push("email must be a valid email address".to_string());
    }
}

pub fn check_password(problems: &mut Vec<String>, password: &str) {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        problems.push(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_CHARS
        ));
    }
}

// =============================================================================
// Extractor
// =============================================================================

/// JSON body extractor that runs `Validate` after deserializing.
/// Malformed bodies and rule violations both reject with 400.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                ApiError::from(Error::validation(rejection.body_text()))
            })?;

        let problems = value.validate();
        if !problems.is_empty() {
            tracing::debug!(?problems, "Request failed validation");
            return Err(Error::Validation(problems).into());
        }

        Ok(ValidatedJson(value))
    }
}

/// Path extractor whose rejection goes through `ApiError` like any other 400
pub struct ValidatedPath<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("Rejected path parameters: {}", rejection.body_text());
                ApiError::from(Error::validation(rejection.body_text()))
            })?;

        Ok(ValidatedPath(value))
    }
}
