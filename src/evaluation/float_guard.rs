//! Float amount guard.
//!
//! When a till keeps a float sub-balance, the float entered (or carried
//! from configuration) for a tender may never exceed what was counted into
//! the drawer for that tender.

use std::cmp::Ordering;

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::EventFeatures;
use crate::models::{CapturedAmounts, CurrencyData, FloatGuardOutcome, Money};

/// A float amount that cannot be saved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FloatGuardError {
    /// The float is larger than the counted transfer amount.
    #[error("Float amount {float_amount} exceeds transfer amount {transfer_amount}")]
    FloatExceedsTransfer {
        /// The float amount.
        float_amount: Money,
        /// The transfer amount.
        transfer_amount: Money,
    },
}

/// A float guard failure located at a tender of the event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Tender '{tender_id}' (index {index}): {source}")]
pub struct TenderFloatError {
    /// The currency-data index that failed.
    pub index: usize,
    /// The tender id at that index.
    pub tender_id: String,
    /// The underlying failure.
    #[source]
    pub source: FloatGuardError,
}

impl From<TenderFloatError> for FloatGuardOutcome {
    fn from(error: TenderFloatError) -> Self {
        match error.source {
            FloatGuardError::FloatExceedsTransfer {
                float_amount,
                transfer_amount,
            } => FloatGuardOutcome::FloatExceedsTransfer {
                index: error.index,
                tender_id: error.tender_id,
                float_amount,
                transfer_amount,
            },
        }
    }
}

/// Guards float amounts against transfer amounts for one till event.
///
/// # Examples
///
/// ```
/// use till_engine::evaluation::FloatAmountGuard;
/// use till_engine::models::Money;
///
/// let usd = |s: &str| Money::parse(s, "USD").unwrap();
///
/// assert!(FloatAmountGuard::validate(&usd("50.00"), &usd("40.00")).is_err());
/// assert!(FloatAmountGuard::validate(&usd("40.00"), &usd("40.00")).is_ok());
/// assert!(FloatAmountGuard::validate(&usd("0"), &usd("0")).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatAmountGuard {
    maintain_float_in_till: bool,
}

impl FloatAmountGuard {
    /// Creates a guard; a disabled guard accepts every snapshot.
    pub fn new(maintain_float_in_till: bool) -> Self {
        Self {
            maintain_float_in_till,
        }
    }

    /// Creates a guard from an event's feature flags.
    pub fn from_features(features: &EventFeatures) -> Self {
        Self::new(features.maintain_float_in_till)
    }

    /// Returns true when floats are maintained in the till.
    pub fn is_enabled(&self) -> bool {
        self.maintain_float_in_till
    }

    /// Checks one float amount against its transfer amount.
    ///
    /// Fails when the float is non-zero and greater than the transfer amount.
    /// Amounts in different currencies are not compared.
    pub fn validate(float_amount: &Money, transfer_amount: &Money) -> Result<(), FloatGuardError> {
        if float_amount.is_not_zero()
            && float_amount.checked_cmp(transfer_amount) == Some(Ordering::Greater)
        {
            return Err(FloatGuardError::FloatExceedsTransfer {
                float_amount: float_amount.clone(),
                transfer_amount: transfer_amount.clone(),
            });
        }
        Ok(())
    }

    /// Checks every local tender of a captured snapshot.
    ///
    /// Foreign tenders are not checked. The first failing tender halts the
    /// whole snapshot; nothing is clamped. On success the snapshot is handed
    /// back unchanged for submission.
    pub fn validate_all(
        &self,
        currency_data: &[CurrencyData],
        captured: CapturedAmounts,
    ) -> Result<CapturedAmounts, TenderFloatError> {
        if !self.maintain_float_in_till {
            return Ok(captured);
        }

        for (index, (data, amount)) in currency_data.iter().zip(&captured).enumerate() {
            if data.is_foreign_tender {
                continue;
            }
            let Some(amount) = amount else { continue };
            let Some(float_amount) = &amount.float_amount else {
                continue;
            };

            if let Err(source) = Self::validate(float_amount, &amount.transfer_amount) {
                warn!(
                    index,
                    tender_id = %data.tender_id,
                    error = %source,
                    "Float amount rejected"
                );
                return Err(TenderFloatError {
                    index,
                    tender_id: data.tender_id.clone(),
                    source,
                });
            }
        }

        debug!(tenders = currency_data.len(), "Float amounts accepted");
        Ok(captured)
    }
}

/// Chooses the float amount kept for a tender.
///
/// When manual float updates are allowed the operator's entry is used as
/// typed, and a blank entry keeps no float. Otherwise the configured till
/// float applies.
pub fn resolve_float_amount(
    entered: Option<Money>,
    configured: Option<Money>,
    allow_manual_update: bool,
) -> Option<Money> {
    if allow_manual_update {
        entered
    } else {
        configured
    }
}
