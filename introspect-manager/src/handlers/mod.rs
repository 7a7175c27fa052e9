// Main handlers (system/health handlers)
pub mod main_handlers;
pub use main_handlers::AppState;

// Questionnaire session handlers
pub mod session_handlers;

// Scope submission handlers
pub mod scope_handlers;
