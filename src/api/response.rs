//! Response types for the Till Variance Engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::evaluation::FloatGuardError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// Body of a successful float validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatValidationResponse {
    /// Always true; failures are reported as [`ApiError`].
    pub valid: bool,
}

/// Body of the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok" when the engine is serving.
    pub status: String,
    /// The retail location the engine is configured for.
    pub retail_location: String,
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::TenderNotFound { tender_id } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "TENDER_NOT_FOUND",
                    format!("Tender not found: {}", tender_id),
                    format!("The tender '{}' is not configured for this location", tender_id),
                ),
            },
            EngineError::EventNotConfigured { event } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "EVENT_NOT_CONFIGURED",
                    format!("Till event not configured: {}", event),
                    "The retail location has no features configured for this event",
                ),
            },
            EngineError::InvalidAmount { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_AMOUNT",
                    format!("Invalid amount for '{}'", field),
                    message,
                ),
            },
            EngineError::CurrencyMismatch { left, right } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(
                    "CURRENCY_MISMATCH",
                    format!("Currency mismatch: {} vs {}", left, right),
                ),
            },
            EngineError::InvalidRequest { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(message),
            },
        }
    }
}

impl From<FloatGuardError> for ApiErrorResponse {
    fn from(error: FloatGuardError) -> Self {
        ApiErrorResponse {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error: ApiError::with_details(
                "FLOAT_EXCEEDS_TRANSFER",
                error.to_string(),
                "Reduce the float amount or correct the transfer amount",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_engine_error_to_api_error() {
        let engine_error = EngineError::TenderNotFound {
            tender_id: "cash_jpy".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "TENDER_NOT_FOUND");
    }

    #[test]
    fn test_config_errors_are_server_errors() {
        let api_error: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "/x".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_float_error_is_unprocessable() {
        let api_error: ApiErrorResponse = FloatGuardError::FloatExceedsTransfer {
            float_amount: Money::parse("50.00", "USD").unwrap(),
            transfer_amount: Money::parse("40.00", "USD").unwrap(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_error.error.code, "FLOAT_EXCEEDS_TRANSFER");
        assert!(api_error.error.message.contains("50.00 USD"));
    }
}
