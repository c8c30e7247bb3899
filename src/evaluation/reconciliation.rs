//! Reconciliation helpers for the till detail flow.
//!
//! These functions prepare the index-aligned inputs of the variance checks
//! and compute the per-tender variance amounts shown to the operator.

use crate::config::{EventFeatures, TillConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{CapturedAmount, CurrencyData, ExpectedTender, TenderVariance, TillEventType};

use super::variance::comparable_pair;

/// Lists the tenders counted for an event.
///
/// The default tender always comes first. Foreign tenders follow, ordered
/// by tender id, when the event's features enable multi-currency counting.
pub fn relevant_currencies(
    event_type: TillEventType,
    config: &TillConfig,
) -> EngineResult<Vec<CurrencyData>> {
    let features = config
        .event_features(event_type)
        .ok_or_else(|| EngineError::EventNotConfigured {
            event: event_type.to_string(),
        })?;

    let default_id = &config.retail_location().default_tender_id;
    let default = config
        .currency_data(default_id)
        .ok_or_else(|| EngineError::TenderNotFound {
            tender_id: default_id.clone(),
        })?;

    let mut currencies = vec![default];
    if features.multi_currency {
        currencies.extend(
            config
                .tenders()
                .keys()
                .filter(|id| *id != default_id)
                .filter_map(|id| config.currency_data(id)),
        );
    }
    Ok(currencies)
}

/// Returns whether expected amounts may be shown to the operator.
///
/// Blind counting hides them for count events. Hidden amounts still take
/// part in the variance checks.
pub fn expected_amount_visible(event_type: TillEventType, features: &EventFeatures) -> bool {
    !(features.allow_blind_count && event_type.is_count_event())
}

/// Re-keys expected tenders by currency-data index.
///
/// Tenders missing from `expected` get an absent amount. Entries whose
/// tender is not part of the event are dropped and their ids returned.
pub fn align_expected(
    currency_data: &[CurrencyData],
    expected: &[ExpectedTender],
) -> (Vec<ExpectedTender>, Vec<String>) {
    let aligned = currency_data
        .iter()
        .map(|data| {
            let amount = expected
                .iter()
                .find(|e| e.tender_id == data.tender_id)
                .and_then(|e| e.amount.clone());
            ExpectedTender::new(data.tender_id.clone(), amount)
        })
        .collect();

    let unused = expected
        .iter()
        .filter(|e| !currency_data.iter().any(|d| d.tender_id == e.tender_id))
        .map(|e| e.tender_id.clone())
        .collect();

    (aligned, unused)
}

/// Computes `counted - expected` for each tender of the event.
pub fn tender_variances(
    currency_data: &[CurrencyData],
    expected: &[ExpectedTender],
    captured: &[Option<CapturedAmount>],
) -> Vec<TenderVariance> {
    currency_data
        .iter()
        .enumerate()
        .map(|(index, data)| {
            let expected_tender = expected.get(index);
            let captured_amount = captured.get(index).and_then(Option::as_ref);

            let variance = expected_tender
                .zip(captured.get(index))
                .and_then(|(e, c)| comparable_pair(e, c))
                .and_then(|(expected, counted)| counted.checked_sub(expected).ok());

            TenderVariance {
                tender_id: data.tender_id.clone(),
                is_foreign_tender: data.is_foreign_tender,
                expected: expected_tender.and_then(|e| e.amount.clone()),
                counted: captured_amount.map(|c| c.transfer_amount.clone()),
                variance,
            }
        })
        .collect()
}
