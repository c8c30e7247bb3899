//! Till event kinds and accountability settings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of till or cash event being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TillEventType {
    /// Opening a till into a cash drawer.
    TillIn,
    /// Closing a till out of a cash drawer.
    TillOut,
    /// Moving cash from a till to the bank.
    TillToBank,
    /// Moving cash from a till to the safe.
    TillToSafe,
    /// Moving cash from the safe into a till.
    SafeToTill,
    /// Counting a till without moving it.
    TillCount,
    /// Reconciling a till against its expected balance.
    TillReconciliation,
    /// An audit count of a till.
    TillAudit,
}

impl TillEventType {
    /// Every event kind, in declaration order.
    pub const ALL: [TillEventType; 8] = [
        TillEventType::TillIn,
        TillEventType::TillOut,
        TillEventType::TillToBank,
        TillEventType::TillToSafe,
        TillEventType::SafeToTill,
        TillEventType::TillCount,
        TillEventType::TillReconciliation,
        TillEventType::TillAudit,
    ];

    /// Returns the snake_case name used on the wire and in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            TillEventType::TillIn => "till_in",
            TillEventType::TillOut => "till_out",
            TillEventType::TillToBank => "till_to_bank",
            TillEventType::TillToSafe => "till_to_safe",
            TillEventType::SafeToTill => "safe_to_till",
            TillEventType::TillCount => "till_count",
            TillEventType::TillReconciliation => "till_reconciliation",
            TillEventType::TillAudit => "till_audit",
        }
    }

    /// Returns true for the events whose variance may be accepted against a
    /// configured tolerance.
    pub fn allows_acceptable_variance(&self) -> bool {
        matches!(
            self,
            TillEventType::TillIn
                | TillEventType::TillOut
                | TillEventType::TillAudit
                | TillEventType::TillCount
                | TillEventType::TillReconciliation
        )
    }

    /// Returns true for events where the operator counts the drawer contents.
    pub fn is_count_event(&self) -> bool {
        matches!(
            self,
            TillEventType::TillOut
                | TillEventType::TillCount
                | TillEventType::TillReconciliation
                | TillEventType::TillAudit
        )
    }
}

impl fmt::Display for TillEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether variances are tracked against a terminal or against a till.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountabilityMode {
    /// Variances are recorded against the terminal (register).
    #[default]
    Terminal,
    /// Variances are recorded against the till, wherever it is used.
    Till,
}

/// The party a recorded variance is held against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum AccountableParty {
    /// A terminal id.
    Terminal(String),
    /// A till id.
    Till(String),
}

impl AccountabilityMode {
    /// Picks the party a variance is recorded against.
    pub fn accountable_party(&self, terminal_id: &str, till_id: &str) -> AccountableParty {
        match self {
            AccountabilityMode::Terminal => AccountableParty::Terminal(terminal_id.to_string()),
            AccountabilityMode::Till => AccountableParty::Till(till_id.to_string()),
        }
    }
}
