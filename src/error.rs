//! Error types for the Till Variance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for the fault conditions that can occur while loading configuration or
//! evaluating a till event. Business data conditions such as an unacceptable
//! variance are not errors; they are returned as classifications.

use thiserror::Error;

/// The main error type for the Till Variance Engine.
///
/// # Example
///
/// ```
/// use till_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/tenders.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/tenders.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Tender id was not found in the configuration.
    #[error("Tender not found: {tender_id}")]
    TenderNotFound {
        /// The tender id that was not found.
        tender_id: String,
    },

    /// The till event has no feature configuration for this retail location.
    #[error("Till event not configured: {event}")]
    EventNotConfigured {
        /// The event type, in its wire form.
        event: String,
    },

    /// A captured amount could not be converted to money.
    #[error("Invalid amount for '{field}': {message}")]
    InvalidAmount {
        /// The field holding the amount (e.g. "captured[1].float_amount").
        field: String,
        /// A description of what made the amount invalid.
        message: String,
    },

    /// Arithmetic was attempted on two amounts in different currencies.
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch {
        /// The currency of the left operand.
        left: String,
        /// The currency of the right operand.
        right: String,
    },

    /// The evaluation request was structurally inconsistent.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// A description of the inconsistency.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
