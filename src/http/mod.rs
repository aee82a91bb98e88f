//! HTTP surface: axum router, bearer-token extractor and JSON bodies.
//!
//! Handlers translate wire bodies into service requests and map service
//! errors onto status codes through [`error::ApiError`].

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use extract::AuthenticatedUser;
pub use router::router;
pub use state::AppState;

#[cfg(test)]
mod tests;
