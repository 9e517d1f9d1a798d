// HTTP error translation
// Decision: Handlers return ApiError; this is the only place errors become status codes
// Decision: Internal detail is logged here and replaced by a generic message

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use eventhub_core::Error;

use super::common::ErrorResponse;
use crate::storage::StorageError;

#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self(err.into())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Conflict => StatusCode::CONFLICT,
            Error::InvalidCredentials | Error::InvalidToken | Error::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Hashing | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self.0 {
            Error::Validation(details) => ErrorResponse::with_details("Validation error", details),
            err if err.is_internal() => {
                tracing::error!("Request failed: {:#}", err);
                ErrorResponse::new("Internal server error")
            }
            err => ErrorResponse::new(err.to_string()),
        };
        (status, Json(body)).into_response()
    }
}
