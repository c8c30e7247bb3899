//! Money value type.
//!
//! A [`Money`] is a decimal amount tagged with an ISO 4217 currency code.
//! Amounts in different currencies never compare and never combine.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A decimal amount in a single currency.
///
/// # Example
///
/// ```
/// use till_engine::models::Money;
///
/// let counted = Money::parse("104.00", "USD").unwrap();
/// let expected = Money::parse("100.00", "USD").unwrap();
/// let diff = counted.checked_sub(&expected).unwrap();
/// assert_eq!(diff.to_string(), "4.00 USD");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// The decimal amount.
    pub amount: Decimal,
    /// The ISO 4217 currency code.
    pub currency: String,
}

impl Money {
    /// Creates a new amount in the given currency.
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    /// A zero amount in the given currency.
    pub fn zero(currency: impl Into<String>) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Parses a decimal string as entered at the till.
    ///
    /// Surrounding whitespace is ignored. Anything that is not a plain
    /// decimal number is rejected with [`EngineError::InvalidAmount`].
    pub fn parse(value: &str, currency: impl Into<String>) -> EngineResult<Self> {
        let trimmed = value.trim();
        let amount = Decimal::from_str(trimmed).map_err(|e| EngineError::InvalidAmount {
            field: "amount".to_string(),
            message: format!("not a decimal: {} ({})", trimmed, e),
        })?;
        Ok(Self::new(amount, currency))
    }

    /// Returns true if both amounts carry the same currency code.
    pub fn same_currency(&self, other: &Money) -> bool {
        self.currency == other.currency
    }

    /// Returns true if the amount is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is anything but zero.
    pub fn is_not_zero(&self) -> bool {
        !self.is_zero()
    }

    /// Returns the absolute value.
    pub fn abs(&self) -> Money {
        Money::new(self.amount.abs(), self.currency.clone())
    }

    /// Adds two amounts of the same currency.
    pub fn checked_add(&self, other: &Money) -> EngineResult<Money> {
        self.ensure_same_currency(other)?;
        Ok(Money::new(self.amount + other.amount, self.currency.clone()))
    }

    /// Subtracts `other` from `self` when both share a currency.
    pub fn checked_sub(&self, other: &Money) -> EngineResult<Money> {
        self.ensure_same_currency(other)?;
        Ok(Money::new(self.amount - other.amount, self.currency.clone()))
    }

    /// Compares two amounts, or returns `None` if the currencies differ.
    pub fn checked_cmp(&self, other: &Money) -> Option<Ordering> {
        if self.same_currency(other) {
            Some(self.amount.cmp(&other.amount))
        } else {
            None
        }
    }

    fn ensure_same_currency(&self, other: &Money) -> EngineResult<()> {
        if self.same_currency(other) {
            Ok(())
        } else {
            Err(EngineError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            })
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
