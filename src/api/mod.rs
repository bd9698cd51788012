//! HTTP API module for the Prima Engine.
//!
//! This module exposes the calculator over a single REST endpoint that
//! accepts an employee record as JSON and returns the computed bonus.

mod handlers;
mod response;
mod state;

pub use handlers::create_router;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
