// Services layer for business logic
// Services own business rules, calling storage directly

pub mod event;

pub use event::EventService;
