//! HTTP request handlers for the Till Variance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::evaluation::{FloatAmountGuard, TillEventInput, evaluate_till_event};
use crate::models::Money;

use super::request::{EvaluationRequest, FloatValidationRequest};
use super::response::{ApiError, ApiErrorResponse, FloatValidationResponse, HealthResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/evaluate", post(evaluate_handler))
        .route("/float/validate", post(validate_float_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /evaluate endpoint.
///
/// Accepts a till event snapshot and returns the evaluation result.
async fn evaluate_handler(
    State(state): State<AppState>,
    payload: Result<Json<EvaluationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing evaluation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let input: TillEventInput = request.into();
    let start_time = Instant::now();

    match evaluate_till_event(&input, state.config().config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                event_type = %input.event_type,
                till_id = %input.till_id,
                classification = ?result.classification,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Evaluation completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Evaluation failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /float/validate endpoint.
///
/// Checks a single float amount against its transfer amount.
async fn validate_float_handler(
    payload: Result<Json<FloatValidationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let amounts = Money::parse(&request.float_amount, request.currency_code.as_str()).and_then(
        |float_amount| {
            Money::parse(&request.transfer_amount, request.currency_code.as_str())
                .map(|transfer_amount| (float_amount, transfer_amount))
        },
    );
    let (float_amount, transfer_amount) = match amounts {
        Ok(amounts) => amounts,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid float request");
            return error_response(err.into());
        }
    };

    match FloatAmountGuard::validate(&float_amount, &transfer_amount) {
        Ok(()) => json_response(StatusCode::OK, FloatValidationResponse { valid: true }),
        Err(err) => {
            info!(
                correlation_id = %correlation_id,
                error = %err,
                "Float amount rejected"
            );
            error_response(err.into())
        }
    }
}

/// Handler for GET /health endpoint.
async fn health_handler(State(state): State<AppState>) -> Response {
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "ok".to_string(),
            retail_location: state.config().retail_location().id.clone(),
        },
    )
}
