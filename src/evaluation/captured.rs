//! Conversion of operator-entered amounts into money.

use crate::error::{EngineError, EngineResult};
use crate::models::{CapturedAmount, CapturedAmounts, CapturedInput, CurrencyData, Money};

fn parse_field(value: Option<&str>, currency: &str, field: String) -> EngineResult<Option<Money>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => Money::parse(text, currency).map(Some).map_err(|e| match e {
            EngineError::InvalidAmount { message, .. } => EngineError::InvalidAmount { field, message },
            other => other,
        }),
    }
}

/// Parses the amounts typed for each tender of the event.
///
/// The result is index-aligned with `currency_data`. Blank or missing
/// transfer amounts leave the tender uncaptured. A float amount without a
/// transfer amount, more inputs than tenders, or a malformed decimal is
/// rejected.
///
/// # Examples
///
/// ```
/// use till_engine::evaluation::parse_captured_amounts;
/// use till_engine::models::{CapturedInput, CurrencyData};
///
/// let currency_data = vec![CurrencyData {
///     tender_id: "cash_usd".to_string(),
///     currency_code: "USD".to_string(),
///     tender_name: "Cash".to_string(),
///     is_foreign_tender: false,
/// }];
/// let inputs = vec![CapturedInput {
///     transfer_amount: Some("250.00".to_string()),
///     float_amount: Some("100.00".to_string()),
/// }];
///
/// let captured = parse_captured_amounts(&currency_data, &inputs).unwrap();
/// let amount = captured[0].as_ref().unwrap();
/// assert_eq!(amount.transfer_amount.currency, "USD");
/// assert!(amount.float_amount.is_some());
/// ```
pub fn parse_captured_amounts(
    currency_data: &[CurrencyData],
    inputs: &[CapturedInput],
) -> EngineResult<CapturedAmounts> {
    if inputs.len() > currency_data.len() {
        return Err(EngineError::InvalidRequest {
            message: format!(
                "{} captured entries for {} tenders",
                inputs.len(),
                currency_data.len()
            ),
        });
    }

    currency_data
        .iter()
        .enumerate()
        .map(|(index, data)| {
            let Some(input) = inputs.get(index) else {
                return Ok(None);
            };

            let transfer = parse_field(
                input.transfer_amount.as_deref(),
                &data.currency_code,
                format!("captured[{}].transfer_amount", index),
            )?;
            let float = parse_field(
                input.float_amount.as_deref(),
                &data.currency_code,
                format!("captured[{}].float_amount", index),
            )?;

            match (transfer, float) {
                (Some(transfer_amount), float_amount) => Ok(Some(CapturedAmount {
                    transfer_amount,
                    float_amount,
                })),
                (None, Some(_)) => Err(EngineError::InvalidAmount {
                    field: format!("captured[{}].transfer_amount", index),
                    message: "required when a float amount is entered".to_string(),
                }),
                (None, None) => Ok(None),
            }
        })
        .collect()
}
