//! End-to-end evaluation of a till event.
//!
//! [`evaluate_till_event`] runs every check of the engine over one snapshot
//! of expected and captured amounts and records each decision in the
//! audit trace.

use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::TillConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, CapturedInput, CurrencyData, EvaluationResult,
    ExpectedTender, FloatGuardOutcome, TillEventType,
};

use super::captured::parse_captured_amounts;
use super::classification::{classify_variance, local_currency_index, next_step};
use super::float_guard::{resolve_float_amount, FloatAmountGuard};
use super::reconciliation::{
    align_expected, expected_amount_visible, relevant_currencies, tender_variances,
};
use super::variance::{has_variance, is_variance_acceptable};

/// One snapshot of a till event awaiting a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TillEventInput {
    /// The event being recorded.
    pub event_type: TillEventType,
    /// The terminal the event runs on.
    pub terminal_id: String,
    /// The till being counted or moved.
    pub till_id: String,
    /// Tenders of the event; derived from configuration when absent.
    /// Foreignness is always taken from the location's default tender.
    #[serde(default)]
    pub currency_data: Option<Vec<CurrencyData>>,
    /// Expected amounts keyed by tender id, in any order.
    #[serde(default)]
    pub expected: Vec<ExpectedTender>,
    /// Operator entries, index-aligned with the currency data.
    #[serde(default)]
    pub captured: Vec<CapturedInput>,
}

fn step(
    step_number: u32,
    rule_id: &str,
    rule_name: &str,
    input: serde_json::Value,
    output: serde_json::Value,
    reasoning: String,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input,
        output,
        reasoning,
    }
}

/// Evaluates a till event against the retail location configuration.
///
/// The evaluation is pure: the same input and configuration always give
/// the same decision. Only the evaluation id, timestamp and duration vary.
///
/// # Errors
///
/// * [`EngineError::EventNotConfigured`] if the event has no features
/// * [`EngineError::InvalidAmount`] / [`EngineError::InvalidRequest`] for
///   malformed operator entries
///
/// # Examples
///
/// ```no_run
/// use till_engine::config::ConfigLoader;
/// use till_engine::evaluation::{evaluate_till_event, TillEventInput};
/// use till_engine::models::{CapturedInput, TillEventType};
///
/// let loader = ConfigLoader::load("./config/store_001")?;
/// let input = TillEventInput {
///     event_type: TillEventType::TillIn,
///     terminal_id: "reg_01".to_string(),
///     till_id: "till_07".to_string(),
///     currency_data: None,
///     expected: vec![],
///     captured: vec![CapturedInput {
///         transfer_amount: Some("200.00".to_string()),
///         float_amount: None,
///     }],
/// };
/// let result = evaluate_till_event(&input, loader.config())?;
/// println!("{:?}", result.next_step);
/// # Ok::<(), till_engine::error::EngineError>(())
/// ```
pub fn evaluate_till_event(
    input: &TillEventInput,
    config: &TillConfig,
) -> EngineResult<EvaluationResult> {
    let start_time = Instant::now();
    let event_type = input.event_type;
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();

    let features = config
        .event_features(event_type)
        .ok_or_else(|| EngineError::EventNotConfigured {
            event: event_type.to_string(),
        })?;

    let default_tender_id = &config.retail_location().default_tender_id;
    let currency_data = match &input.currency_data {
        Some(data) => data
            .iter()
            .map(|entry| CurrencyData {
                is_foreign_tender: entry.tender_id != *default_tender_id,
                ..entry.clone()
            })
            .collect(),
        None => relevant_currencies(event_type, config)?,
    };
    if currency_data.is_empty() {
        return Err(EngineError::InvalidRequest {
            message: "event has no tenders".to_string(),
        });
    }

    let (expected, unused) = align_expected(&currency_data, &input.expected);
    for tender_id in unused {
        warnings.push(AuditWarning {
            code: "UNUSED_EXPECTED_TENDER".to_string(),
            message: format!(
                "Expected amount for tender '{}' ignored: tender is not part of this event",
                tender_id
            ),
            severity: "low".to_string(),
        });
    }

    let mut captured = parse_captured_amounts(&currency_data, &input.captured)?;

    // Float resolution and guard
    let guard = FloatAmountGuard::from_features(features);
    if guard.is_enabled() {
        for (data, amount) in currency_data.iter().zip(captured.iter_mut()) {
            if data.is_foreign_tender {
                continue;
            }
            if let Some(amount) = amount {
                amount.float_amount = resolve_float_amount(
                    amount.float_amount.take(),
                    config.till_float_amount(&data.tender_id),
                    features.allow_float_amount_manual_update,
                );
            }
        }
    }
    let float_guard = match guard.validate_all(&currency_data, captured.clone()) {
        Ok(_) if guard.is_enabled() => FloatGuardOutcome::Ok,
        Ok(_) => FloatGuardOutcome::NotApplicable,
        Err(error) => error.into(),
    };

    let mut step_number: u32 = 1;

    let variance = has_variance(event_type, &expected, &captured);
    steps.push(step(
        step_number,
        "has_variance",
        "Variance Detection",
        serde_json::json!({
            "event_type": event_type.as_str(),
            "tenders": currency_data.len(),
            "expected_known": expected.iter().filter(|e| e.amount.is_some()).count(),
            "captured": captured.iter().filter(|c| c.is_some()).count(),
        }),
        serde_json::json!({ "has_variance": variance }),
        match event_type {
            TillEventType::TillToSafe => "Only over-counts are variances for till to safe".to_string(),
            _ if variance => "At least one comparable tender differs from its expected amount".to_string(),
            _ => "No comparable tender differs from its expected amount".to_string(),
        },
    ));
    step_number += 1;

    let local_index = local_currency_index(&currency_data);
    let threshold = config.acceptable_variance_threshold();
    let acceptable = is_variance_acceptable(
        event_type,
        local_index,
        &expected,
        &captured,
        threshold.as_ref(),
    );
    steps.push(step(
        step_number,
        "acceptable_variance",
        "Acceptable Variance Check",
        serde_json::json!({
            "local_tender": local_index.map(|i| currency_data[i].tender_id.clone()),
            "threshold": threshold.as_ref().map(|t| t.amount.to_string()),
            "eligible": event_type.allows_acceptable_variance(),
        }),
        serde_json::json!({ "acceptable": acceptable }),
        match &threshold {
            Some(t) => format!("Local tender variance tolerance is {}", t),
            None => "No threshold configured: only an exact match is acceptable".to_string(),
        },
    ));
    step_number += 1;

    let classification = classify_variance(
        event_type,
        &currency_data,
        &expected,
        &captured,
        threshold.as_ref(),
    );
    steps.push(step(
        step_number,
        "classification",
        "Variance Classification",
        serde_json::json!({ "has_variance": variance, "acceptable": acceptable }),
        serde_json::json!({ "classification": classification }),
        format!("Event classified as {:?}", classification),
    ));
    step_number += 1;

    let next = next_step(classification, event_type, features);
    steps.push(step(
        step_number,
        "routing",
        "Next Step Routing",
        serde_json::json!({
            "classification": classification,
            "capture_comment_for_count_variance": features.capture_comment_for_count_variance,
            "denomination_count_required": features.denomination_count_required,
        }),
        serde_json::to_value(&next).unwrap_or(serde_json::Value::Null),
        format!("Next step: {:?}", next),
    ));
    step_number += 1;

    steps.push(step(
        step_number,
        "float_guard",
        "Float Amount Guard",
        serde_json::json!({ "maintain_float_in_till": guard.is_enabled() }),
        serde_json::to_value(&float_guard).unwrap_or(serde_json::Value::Null),
        if float_guard.blocks_submission() {
            "Float exceeds the counted amount; submission blocked".to_string()
        } else {
            "Float amounts are within the counted amounts".to_string()
        },
    ));

    let accountable_party = config
        .retail_location()
        .accountability_mode
        .accountable_party(&input.terminal_id, &input.till_id);

    let duration = start_time.elapsed();
    debug!(duration_us = duration.as_micros() as u64, "Evaluation finished");
    info!(
        event_type = %event_type,
        ?classification,
        blocked = float_guard.blocks_submission(),
        "Till event evaluated"
    );

    Ok(EvaluationResult {
        evaluation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        event_type,
        accountable_party,
        has_variance: variance,
        variance_acceptable: acceptable,
        classification,
        next_step: next,
        expected_amounts_visible: expected_amount_visible(event_type, features),
        denomination_count_required: features.denomination_count_required,
        tender_variances: tender_variances(&currency_data, &expected, &captured),
        float_guard,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: duration.as_micros() as u64,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{AccountableParty, Money, NextStep, VarianceClassification};

    fn config() -> TillConfig {
        ConfigLoader::load("./config/store_001")
            .unwrap()
            .config()
            .clone()
    }

    fn usd(s: &str) -> Money {
        Money::parse(s, "USD").unwrap()
    }

    fn capture(transfer: &str) -> CapturedInput {
        CapturedInput {
            transfer_amount: Some(transfer.to_string()),
            float_amount: None,
        }
    }

    fn input(
        event_type: TillEventType,
        expected: Vec<ExpectedTender>,
        captured: Vec<CapturedInput>,
    ) -> TillEventInput {
        TillEventInput {
            event_type,
            terminal_id: "reg_01".to_string(),
            till_id: "till_07".to_string(),
            currency_data: None,
            expected,
            captured,
        }
    }

    #[test]
    fn test_exact_count_proceeds_to_submission() {
        let result = evaluate_till_event(
            &input(
                TillEventType::TillIn,
                vec![ExpectedTender::new("cash_usd", Some(usd("200.00")))],
                vec![capture("200.00")],
            ),
            &config(),
        )
        .unwrap();

        assert_eq!(result.classification, VarianceClassification::NoVariance);
        assert_eq!(result.next_step, NextStep::ProceedToSubmission);
        assert!(!result.has_variance);
    }

    #[test]
    fn test_variance_within_threshold_is_recorded() {
        let result = evaluate_till_event(
            &input(
                TillEventType::TillIn,
                vec![ExpectedTender::new("cash_usd", Some(usd("200.00")))],
                vec![capture("204.00")],
            ),
            &config(),
        )
        .unwrap();

        assert_eq!(result.classification, VarianceClassification::AcceptableVariance);
        assert_eq!(result.next_step, NextStep::ProceedWithRecordedVariance);
        assert_eq!(result.tender_variances[0].variance, Some(usd("4.00")));
    }

    #[test]
    fn test_variance_beyond_threshold_requires_reason() {
        let result = evaluate_till_event(
            &input(
                TillEventType::TillIn,
                vec![ExpectedTender::new("cash_usd", Some(usd("200.00")))],
                vec![capture("190.00")],
            ),
            &config(),
        )
        .unwrap();

        assert_eq!(result.classification, VarianceClassification::UnacceptableVariance);
        assert_eq!(
            result.next_step,
            NextStep::CaptureVarianceReason {
                reason_code_list_type: Some("till_variance".to_string()),
                comment_required: true,
            }
        );
    }

    #[test]
    fn test_audit_trace_records_every_decision() {
        let result = evaluate_till_event(
            &input(
                TillEventType::TillCount,
                vec![ExpectedTender::new("cash_usd", Some(usd("200.00")))],
                vec![capture("200.00")],
            ),
            &config(),
        )
        .unwrap();

        let rule_ids: Vec<_> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec![
                "has_variance",
                "acceptable_variance",
                "classification",
                "routing",
                "float_guard"
            ]
        );
        let numbers: Vec<_> = result.audit_trace.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_float_above_transfer_blocks_submission() {
        let result = evaluate_till_event(
            &input(
                TillEventType::TillIn,
                vec![],
                vec![CapturedInput {
                    transfer_amount: Some("40.00".to_string()),
                    float_amount: Some("50.00".to_string()),
                }],
            ),
            &config(),
        )
        .unwrap();

        assert!(result.float_guard.blocks_submission());
        match result.float_guard {
            FloatGuardOutcome::FloatExceedsTransfer { index, tender_id, .. } => {
                assert_eq!(index, 0);
                assert_eq!(tender_id, "cash_usd");
            }
            other => panic!("Expected FloatExceedsTransfer, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_float_is_kept_when_manual_update_allowed() {
        let result = evaluate_till_event(
            &input(
                TillEventType::TillIn,
                vec![ExpectedTender::new("cash_usd", Some(usd("40.00")))],
                vec![capture("40.00")],
            ),
            &config(),
        )
        .unwrap();

        assert_eq!(result.float_guard, FloatGuardOutcome::Ok);
    }

    #[test]
    fn test_configured_float_applies_when_manual_update_disallowed() {
        // safe_to_till keeps a float but does not allow manual updates; the
        // configured 100.00 float is checked against the transfer.
        let result = evaluate_till_event(
            &input(
                TillEventType::SafeToTill,
                vec![],
                vec![CapturedInput {
                    transfer_amount: Some("80.00".to_string()),
                    float_amount: Some("10.00".to_string()),
                }],
            ),
            &config(),
        )
        .unwrap();

        assert!(result.float_guard.blocks_submission());
    }

    #[test]
    fn test_float_guard_not_applicable_without_float() {
        let result = evaluate_till_event(
            &input(TillEventType::TillToSafe, vec![], vec![capture("10.00")]),
            &config(),
        )
        .unwrap();

        assert_eq!(result.float_guard, FloatGuardOutcome::NotApplicable);
        assert_eq!(result.classification, VarianceClassification::NoExpectedAmountKnown);
    }

    #[test]
    fn test_accountable_party_follows_location_mode() {
        let result = evaluate_till_event(
            &input(TillEventType::TillCount, vec![], vec![]),
            &config(),
        )
        .unwrap();

        assert_eq!(
            result.accountable_party,
            AccountableParty::Till("till_07".to_string())
        );
    }

    #[test]
    fn test_blind_count_hides_expected_amounts() {
        let result = evaluate_till_event(
            &input(TillEventType::TillCount, vec![], vec![]),
            &config(),
        )
        .unwrap();
        assert!(!result.expected_amounts_visible);
    }

    #[test]
    fn test_denomination_count_flag_is_reported() {
        let till_in = evaluate_till_event(&input(TillEventType::TillIn, vec![], vec![]), &config())
            .unwrap();
        let till_to_safe =
            evaluate_till_event(&input(TillEventType::TillToSafe, vec![], vec![]), &config())
                .unwrap();

        assert!(till_in.denomination_count_required);
        assert!(!till_to_safe.denomination_count_required);
        assert_eq!(
            till_in.audit_trace.steps[3].input["denomination_count_required"],
            serde_json::json!(true)
        );
    }

    #[test]
    fn test_unused_expected_tender_adds_warning() {
        let result = evaluate_till_event(
            &input(
                TillEventType::TillIn,
                vec![
                    ExpectedTender::new("cash_usd", Some(usd("10.00"))),
                    ExpectedTender::new("cash_eur", Some(Money::parse("5.00", "EUR").unwrap())),
                ],
                vec![capture("10.00")],
            ),
            &config(),
        )
        .unwrap();

        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(result.audit_trace.warnings[0].code, "UNUSED_EXPECTED_TENDER");
    }

    #[test]
    fn test_explicit_currency_data_overrides_configuration() {
        let mut event = input(
            TillEventType::TillIn,
            vec![ExpectedTender::new("cash_usd", Some(usd("10.00")))],
            vec![capture("10.00")],
        );
        event.currency_data = Some(vec![CurrencyData {
            tender_id: "cash_usd".to_string(),
            currency_code: "USD".to_string(),
            tender_name: "Cash".to_string(),
            is_foreign_tender: false,
        }]);

        let result = evaluate_till_event(&event, &config()).unwrap();
        assert_eq!(result.tender_variances.len(), 1);
    }

    #[test]
    fn test_foreign_flag_comes_from_default_tender() {
        let mut event = input(
            TillEventType::TillCount,
            vec![
                ExpectedTender::new("cash_usd", Some(usd("100.00"))),
                ExpectedTender::new("cash_eur", Some(Money::parse("20.00", "EUR").unwrap())),
            ],
            vec![capture("100.00"), capture("500.00")],
        );
        event.currency_data = Some(
            [("cash_usd", "USD"), ("cash_eur", "EUR")]
                .iter()
                .map(|(id, currency)| CurrencyData {
                    tender_id: id.to_string(),
                    currency_code: currency.to_string(),
                    tender_name: id.to_string(),
                    is_foreign_tender: false,
                })
                .collect(),
        );

        let result = evaluate_till_event(&event, &config()).unwrap();

        assert!(!result.tender_variances[0].is_foreign_tender);
        assert!(result.tender_variances[1].is_foreign_tender);
        assert_eq!(result.classification, VarianceClassification::UnacceptableVariance);
        assert!(matches!(
            result.next_step,
            NextStep::CaptureVarianceReason { .. }
        ));
    }

    #[test]
    fn test_empty_currency_data_is_rejected() {
        let mut event = input(TillEventType::TillIn, vec![], vec![]);
        event.currency_data = Some(vec![]);

        let result = evaluate_till_event(&event, &config());
        assert!(matches!(result, Err(EngineError::InvalidRequest { .. })));
    }

    #[test]
    fn test_identical_inputs_give_identical_decisions() {
        let event = input(
            TillEventType::TillReconciliation,
            vec![ExpectedTender::new("cash_usd", Some(usd("100.00")))],
            vec![capture("97.00")],
        );
        let config = config();

        let first = evaluate_till_event(&event, &config).unwrap();
        let second = evaluate_till_event(&event, &config).unwrap();

        assert_eq!(first.classification, second.classification);
        assert_eq!(first.next_step, second.next_step);
        assert_eq!(first.tender_variances, second.tender_variances);
        assert_eq!(first.audit_trace.steps, second.audit_trace.steps);
    }
}
