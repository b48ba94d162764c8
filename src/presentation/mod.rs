// Presentation layer - Rendering surface and HTTP endpoints
pub mod app_state;
pub mod document;
pub mod handlers;
