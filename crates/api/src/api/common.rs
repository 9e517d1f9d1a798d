// Common DTOs for public API
//
// These types are shared across multiple API endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message describing what went wrong.
    pub error: String,
    /// Individual problems found while validating the request.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(error: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            error: error.into(),
            details,
        }
    }
}

/// Response wrapper for list endpoints.
/// All list endpoints return responses wrapped in a `data` field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    /// Array of items returned by the list operation.
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// Plain acknowledgement message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Logged out successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_omits_empty_details() {
        let json = serde_json::to_value(ErrorResponse::new("Event not found")).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Event not found" }));

        let json = serde_json::to_value(ErrorResponse::with_details(
            "Validation error",
            vec!["title is required".to_string()],
        ))
        .unwrap();
        assert_eq!(json["details"][0], "title is required");
    }

    #[test]
    fn test_list_response_wraps_data() {
        let json = serde_json::to_value(ListResponse::from(vec![1, 2, 3])).unwrap();
        assert_eq!(json, serde_json::json!({ "data": [1, 2, 3] }));
    }
}
