//! Request types for the Till Variance Engine API.
//!
//! This module defines the JSON request structures for the `/evaluate` and
//! `/float/validate` endpoints.

use serde::{Deserialize, Serialize};

use crate::evaluation::TillEventInput;
use crate::models::{CapturedInput, CurrencyData, ExpectedTender, TillEventType};

/// Request body for the `/evaluate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// The till event being recorded.
    pub event_type: TillEventType,
    /// The terminal the event runs on.
    pub terminal_id: String,
    /// The till being counted or moved.
    pub till_id: String,
    /// Optional explicit tender list; the location configuration is used otherwise.
    #[serde(default)]
    pub currency_data: Option<Vec<CurrencyData>>,
    /// Expected amounts from the business engine, keyed by tender id.
    #[serde(default)]
    pub expected: Vec<ExpectedTender>,
    /// Operator entries, in tender order.
    #[serde(default)]
    pub captured: Vec<CapturedInput>,
}

impl From<EvaluationRequest> for TillEventInput {
    fn from(req: EvaluationRequest) -> Self {
        TillEventInput {
            event_type: req.event_type,
            terminal_id: req.terminal_id,
            till_id: req.till_id,
            currency_data: req.currency_data,
            expected: req.expected,
            captured: req.captured,
        }
    }
}

/// Request body for the `/float/validate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatValidationRequest {
    /// The ISO 4217 currency code both amounts are in.
    pub currency_code: String,
    /// The float amount, as a decimal string.
    pub float_amount: String,
    /// The counted transfer amount, as a decimal string.
    pub transfer_amount: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_evaluation_request() {
        let json = r#"{
            "event_type": "till_count",
            "terminal_id": "reg_01",
            "till_id": "till_07",
            "expected": [
                { "tender_id": "cash_usd", "amount": { "amount": "100.00", "currency": "USD" } }
            ],
            "captured": [
                { "transfer_amount": "98.00" }
            ]
        }"#;

        let request: EvaluationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.event_type, TillEventType::TillCount);
        assert_eq!(request.expected.len(), 1);
        assert_eq!(request.captured[0].transfer_amount.as_deref(), Some("98.00"));
        assert!(request.currency_data.is_none());
    }

    #[test]
    fn test_request_conversion() {
        let request = EvaluationRequest {
            event_type: TillEventType::TillAudit,
            terminal_id: "reg_02".to_string(),
            till_id: "till_03".to_string(),
            currency_data: None,
            expected: vec![],
            captured: vec![CapturedInput::default()],
        };

        let input: TillEventInput = request.into();
        assert_eq!(input.event_type, TillEventType::TillAudit);
        assert_eq!(input.till_id, "till_03");
        assert_eq!(input.captured.len(), 1);
    }

    #[test]
    fn test_deserialize_float_validation_request() {
        let json = r#"{ "currency_code": "USD", "float_amount": "50.00", "transfer_amount": "40.00" }"#;
        let request: FloatValidationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.float_amount, "50.00");
    }
}
