// HTTP API routes
//
// This module contains the HTTP route handlers for the public API.
// Each resource module owns its AppState and router.

pub mod common;
pub mod error;
pub mod events;
pub mod validation;

// Re-export common types
pub use common::{ErrorResponse, ListResponse, MessageResponse};
pub use error::ApiError;
