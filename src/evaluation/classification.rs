//! Variance classification and next-step routing.
//!
//! This module turns the raw variance checks into a single
//! [`VarianceClassification`] and decides which step the display layer
//! runs next.

use tracing::debug;

use crate::config::EventFeatures;
use crate::models::{
    CapturedAmount, CurrencyData, ExpectedTender, Money, NextStep, TillEventType,
    VarianceClassification,
};

use super::variance::{
    expected_amount_known, foreign_tender_variance, has_variance, is_variance_acceptable,
};

/// Returns the index of the local (non-foreign) tender in the currency data.
pub fn local_currency_index(currency_data: &[CurrencyData]) -> Option<usize> {
    currency_data.iter().position(|data| !data.is_foreign_tender)
}

/// Classifies the discrepancy between expected and counted amounts.
///
/// 1. With no expected amount known, a `TillAudit` that captured anything
///    is an unacceptable variance; every other case is
///    `NoExpectedAmountKnown`.
/// 2. Without a variance the result is `NoVariance`.
/// 3. A variance is acceptable only when the local tender is within
///    tolerance and no other tender differs from its expected amount.
/// 4. Anything else is `UnacceptableVariance`.
///
/// # Examples
///
/// ```
/// use till_engine::evaluation::classify_variance;
/// use till_engine::models::{
///     CapturedAmount, CurrencyData, ExpectedTender, Money, TillEventType, VarianceClassification,
/// };
///
/// let usd = |s: &str| Money::parse(s, "USD").unwrap();
/// let currency_data = vec![CurrencyData {
///     tender_id: "cash_usd".to_string(),
///     currency_code: "USD".to_string(),
///     tender_name: "Cash".to_string(),
///     is_foreign_tender: false,
/// }];
/// let expected = vec![ExpectedTender::new("cash_usd", Some(usd("100.00")))];
/// let counted = vec![Some(CapturedAmount::transfer(usd("103.00")))];
///
/// let classification = classify_variance(
///     TillEventType::TillCount,
///     &currency_data,
///     &expected,
///     &counted,
///     Some(&usd("5.00")),
/// );
/// assert_eq!(classification, VarianceClassification::AcceptableVariance);
/// ```
pub fn classify_variance(
    event_type: TillEventType,
    currency_data: &[CurrencyData],
    expected: &[ExpectedTender],
    captured: &[Option<CapturedAmount>],
    acceptable_variance_threshold: Option<&Money>,
) -> VarianceClassification {
    let variance = has_variance(event_type, expected, captured);
    let local_index = local_currency_index(currency_data);

    let classification = if !expected_amount_known(expected) {
        if event_type == TillEventType::TillAudit && variance {
            VarianceClassification::UnacceptableVariance
        } else {
            VarianceClassification::NoExpectedAmountKnown
        }
    } else if !variance {
        VarianceClassification::NoVariance
    } else if is_variance_acceptable(
        event_type,
        local_index,
        expected,
        captured,
        acceptable_variance_threshold,
    ) && !foreign_tender_variance(local_index, expected, captured)
    {
        VarianceClassification::AcceptableVariance
    } else {
        VarianceClassification::UnacceptableVariance
    };

    debug!(event_type = %event_type, ?classification, "Variance classified");
    classification
}

/// Decides which step follows a classification.
///
/// Unacceptable variances route to reason capture, except for `TillToSafe`
/// and `TillAudit` events configured without a mandatory count-variance
/// comment, which submit with the variance recorded.
pub fn next_step(
    classification: VarianceClassification,
    event_type: TillEventType,
    features: &EventFeatures,
) -> NextStep {
    match classification {
        VarianceClassification::NoVariance | VarianceClassification::NoExpectedAmountKnown => {
            NextStep::ProceedToSubmission
        }
        VarianceClassification::AcceptableVariance => NextStep::ProceedWithRecordedVariance,
        VarianceClassification::UnacceptableVariance => {
            let may_skip_reason = matches!(
                event_type,
                TillEventType::TillToSafe | TillEventType::TillAudit
            ) && !features.capture_comment_for_count_variance;

            if may_skip_reason {
                NextStep::ProceedWithRecordedVariance
            } else {
                NextStep::CaptureVarianceReason {
                    reason_code_list_type: features.reason_code_list_type.clone(),
                    comment_required: features.capture_comment_for_count_variance,
                }
            }
        }
    }
}
