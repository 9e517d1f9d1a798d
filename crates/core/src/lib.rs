// Eventhub Core
//
// DB-agnostic and HTTP-agnostic building blocks shared by the API crate.
//
// Key design decisions:
// - Domain entity types (User, Event) are defined here
// - Errors are typed; translation to HTTP happens at the API boundary
// - Telemetry setup lives here so every binary configures logging the same way

// Telemetry (tracing subscriber setup)
pub mod telemetry;

// Domain entity types
pub mod event;
pub mod user;

pub mod error;

// Re-exports for convenience
pub use error::{Error, Result, UnauthorizedReason};
pub use event::{Event, EventCategory, EventStatus};
pub use user::{normalize_email, User};
