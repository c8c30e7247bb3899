//! Tender and amount models.
//!
//! Expected, captured and variance amounts are all index-aligned with the
//! [`CurrencyData`] list of the event: index `i` of each slice refers to
//! the same tender.

use serde::{Deserialize, Serialize};

use super::Money;

/// A tender/currency combination relevant to the current till event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyData {
    /// The tender id (e.g. "cash_usd").
    pub tender_id: String,
    /// The ISO 4217 currency code of the tender.
    pub currency_code: String,
    /// The display name of the tender.
    pub tender_name: String,
    /// True for tenders other than the retail location's default.
    #[serde(default)]
    pub is_foreign_tender: bool,
}

/// The expected amount for a tender, as supplied by the business engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedTender {
    /// The tender id this amount belongs to.
    pub tender_id: String,
    /// The expected amount, or `None` when the engine cannot predict it.
    #[serde(default)]
    pub amount: Option<Money>,
}

impl ExpectedTender {
    /// Creates an expected tender entry.
    pub fn new(tender_id: impl Into<String>, amount: Option<Money>) -> Self {
        Self {
            tender_id: tender_id.into(),
            amount,
        }
    }
}

/// Raw amounts typed by the operator for one tender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedInput {
    /// The counted or transferred amount, as a decimal string.
    #[serde(default)]
    pub transfer_amount: Option<String>,
    /// The float amount kept in the till, as a decimal string.
    #[serde(default)]
    pub float_amount: Option<String>,
}

/// Parsed amounts captured for one tender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedAmount {
    /// The counted or transferred amount.
    pub transfer_amount: Money,
    /// The float amount kept in the till, if any.
    #[serde(default)]
    pub float_amount: Option<Money>,
}

impl CapturedAmount {
    /// Creates a captured amount with no float.
    pub fn transfer(transfer_amount: Money) -> Self {
        Self {
            transfer_amount,
            float_amount: None,
        }
    }

    /// Creates a captured amount with a float.
    pub fn with_float(transfer_amount: Money, float_amount: Money) -> Self {
        Self {
            transfer_amount,
            float_amount: Some(float_amount),
        }
    }
}

/// Captured amounts by currency index; `None` until the operator submits.
pub type CapturedAmounts = Vec<Option<CapturedAmount>>;

/// The per-tender discrepancy between expected and counted amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenderVariance {
    /// The tender id.
    pub tender_id: String,
    /// True for non-default tenders.
    pub is_foreign_tender: bool,
    /// The expected amount, if known.
    pub expected: Option<Money>,
    /// The counted amount, if captured.
    pub counted: Option<Money>,
    /// `counted - expected`; `None` when the pair is not comparable.
    pub variance: Option<Money>,
}
