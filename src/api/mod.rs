//! HTTP surface - API-Gateway style proxy handler

pub mod handler;
pub mod message;

pub use handler::handle;
pub use message::{ApiRequest, ApiResponse};
