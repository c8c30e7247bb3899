//! HTTP API module for the Till Variance Engine.
//!
//! This module provides the REST API endpoints for evaluating till events
//! and validating float amounts.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EvaluationRequest, FloatValidationRequest};
pub use response::{ApiError, ApiErrorResponse, FloatValidationResponse, HealthResponse};
pub use state::AppState;
