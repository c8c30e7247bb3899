//! Configuration types for till event evaluation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{AccountabilityMode, CurrencyData, Money, TillEventType};

/// Retail location settings from retail_location.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct RetailLocationConfig {
    /// The retail location id (e.g. "store_001").
    pub id: String,
    /// The human-readable name of the location.
    pub name: String,
    /// The tender id of the location's default (local) currency.
    pub default_tender_id: String,
    /// Largest variance accepted without a reason code, in the default currency.
    #[serde(default)]
    pub acceptable_variance_threshold: Option<Decimal>,
    /// Whether variances are tracked per terminal or per till.
    #[serde(default)]
    pub accountability_mode: AccountabilityMode,
}

/// A tender accepted at the retail location.
#[derive(Debug, Clone, Deserialize)]
pub struct TenderConfig {
    /// The ISO 4217 currency code of the tender.
    pub currency_code: String,
    /// The display name of the tender.
    pub name: String,
    /// The float kept in the till for this tender, if any.
    #[serde(default)]
    pub till_float_amount: Option<Decimal>,
}

/// Tenders configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TendersConfig {
    /// Map of tender id to tender details.
    pub tenders: BTreeMap<String, TenderConfig>,
}

/// Per-event feature flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EventFeatures {
    /// The operator must count by denomination.
    pub denomination_count_required: bool,
    /// Expected amounts are hidden from the operator while counting.
    pub allow_blind_count: bool,
    /// A float sub-balance is kept in the till.
    pub maintain_float_in_till: bool,
    /// The operator may overwrite the configured float amount.
    pub allow_float_amount_manual_update: bool,
    /// A comment is required when a count variance is captured.
    pub capture_comment_for_count_variance: bool,
    /// The reason-code list offered for variances.
    pub reason_code_list_type: Option<String>,
    /// Foreign tenders are counted alongside the default tender.
    pub multi_currency: bool,
}

/// Till events configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TillEventsConfig {
    /// Map of event type to its features.
    pub events: HashMap<TillEventType, EventFeatures>,
}

/// The complete till configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct TillConfig {
    retail_location: RetailLocationConfig,
    tenders: BTreeMap<String, TenderConfig>,
    events: HashMap<TillEventType, EventFeatures>,
}

impl TillConfig {
    /// Creates a new TillConfig from its component parts.
    pub fn new(
        retail_location: RetailLocationConfig,
        tenders: BTreeMap<String, TenderConfig>,
        events: HashMap<TillEventType, EventFeatures>,
    ) -> Self {
        Self {
            retail_location,
            tenders,
            events,
        }
    }

    /// Returns the retail location settings.
    pub fn retail_location(&self) -> &RetailLocationConfig {
        &self.retail_location
    }

    /// Returns all tenders, ordered by tender id.
    pub fn tenders(&self) -> &BTreeMap<String, TenderConfig> {
        &self.tenders
    }

    /// Returns the features configured for an event, if any.
    pub fn event_features(&self, event: TillEventType) -> Option<&EventFeatures> {
        self.events.get(&event)
    }

    /// Returns the default tender, if it is configured.
    pub fn default_tender(&self) -> Option<&TenderConfig> {
        self.tenders.get(&self.retail_location.default_tender_id)
    }

    /// Returns the acceptable variance threshold as money in the default currency.
    pub fn acceptable_variance_threshold(&self) -> Option<Money> {
        let threshold = self.retail_location.acceptable_variance_threshold?;
        let tender = self.default_tender()?;
        Some(Money::new(threshold, tender.currency_code.clone()))
    }

    /// Builds the currency data entry for a configured tender.
    pub fn currency_data(&self, tender_id: &str) -> Option<CurrencyData> {
        self.tenders.get(tender_id).map(|tender| CurrencyData {
            tender_id: tender_id.to_string(),
            currency_code: tender.currency_code.clone(),
            tender_name: tender.name.clone(),
            is_foreign_tender: tender_id != self.retail_location.default_tender_id,
        })
    }

    /// Returns the configured till float for a tender, in its currency.
    pub fn till_float_amount(&self, tender_id: &str) -> Option<Money> {
        let tender = self.tenders.get(tender_id)?;
        tender
            .till_float_amount
            .map(|amount| Money::new(amount, tender.currency_code.clone()))
    }
}
