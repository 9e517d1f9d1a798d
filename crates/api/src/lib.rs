// Eventhub API Library
// Decision: Shared library for binaries (API server, OpenAPI export) and integration tests

// API routes and types (shared for OpenAPI generation)
pub mod api;

// Authentication module
pub mod auth;

// Router assembly
pub mod app;
pub use app::build_app;

// Startup configuration
pub mod config;
pub use config::AppConfig;

// Services layer
pub mod services;
pub use services::EventService;

// Storage layer
pub mod storage;

// OpenAPI spec generation
pub mod openapi;
