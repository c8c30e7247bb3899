//! Evaluation result models for the Till Variance Engine.
//!
//! This module contains the [`EvaluationResult`] type and the structures
//! that describe a till event decision: the variance classification, the
//! step the caller should run next, per-tender variances, the float guard
//! outcome and an audit trace of every decision taken.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AccountableParty, Money, TenderVariance, TillEventType};

/// How the counted amounts relate to the expected amounts.
///
/// Derived from the inputs on every evaluation and never stored.
///
/// # Example
///
/// ```
/// use till_engine::models::VarianceClassification;
///
/// let classification = VarianceClassification::AcceptableVariance;
/// assert!(classification.is_variance());
/// assert!(!VarianceClassification::NoVariance.is_variance());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceClassification {
    /// Counted amounts match the expected amounts.
    NoVariance,
    /// A variance exists but is within the configured tolerance.
    AcceptableVariance,
    /// A variance exists and must be explained.
    UnacceptableVariance,
    /// The business engine supplied no expected amount to compare against.
    NoExpectedAmountKnown,
}

impl VarianceClassification {
    /// Returns true when a variance was found, acceptable or not.
    pub fn is_variance(&self) -> bool {
        matches!(
            self,
            VarianceClassification::AcceptableVariance
                | VarianceClassification::UnacceptableVariance
        )
    }
}

/// The step the display layer should run after an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum NextStep {
    /// Submit the event directly.
    ProceedToSubmission,
    /// Submit without a reason code; the variance is recorded.
    ProceedWithRecordedVariance,
    /// Capture a variance reason before submitting.
    CaptureVarianceReason {
        /// The reason-code list to offer, if one is configured.
        #[serde(skip_serializing_if = "Option::is_none")]
        reason_code_list_type: Option<String>,
        /// Whether a free-text comment is mandatory.
        comment_required: bool,
    },
}

/// Outcome of the float amount guard for one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FloatGuardOutcome {
    /// Float is not maintained in the till for this event.
    NotApplicable,
    /// Every float amount is within its transfer amount.
    Ok,
    /// A float exceeds the counted transfer amount; submission is blocked.
    FloatExceedsTransfer {
        /// The currency index that failed first.
        index: usize,
        /// The tender id at that index.
        tender_id: String,
        /// The offending float amount.
        float_amount: Money,
        /// The transfer amount it was checked against.
        transfer_amount: Money,
    },
}

impl FloatGuardOutcome {
    /// Returns true when the outcome blocks submission.
    pub fn blocks_submission(&self) -> bool {
        matches!(self, FloatGuardOutcome::FloatExceedsTransfer { .. })
    }
}

/// A single step in the audit trace recording an evaluation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during evaluation.
///
/// Warnings indicate potential issues that don't prevent evaluation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of evaluation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during evaluation.
    pub warnings: Vec<AuditWarning>,
    /// The total evaluation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of evaluating a till event.
///
/// # Example
///
/// ```
/// use till_engine::models::{
///     AccountableParty, AuditTrace, EvaluationResult, FloatGuardOutcome, NextStep,
///     TillEventType, VarianceClassification,
/// };
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let result = EvaluationResult {
///     evaluation_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "0.1.0".to_string(),
///     event_type: TillEventType::TillCount,
///     accountable_party: AccountableParty::Terminal("reg_01".to_string()),
///     has_variance: false,
///     variance_acceptable: true,
///     classification: VarianceClassification::NoVariance,
///     next_step: NextStep::ProceedToSubmission,
///     expected_amounts_visible: true,
///     denomination_count_required: false,
///     tender_variances: vec![],
///     float_guard: FloatGuardOutcome::NotApplicable,
///     audit_trace: AuditTrace::default(),
/// };
/// assert!(!result.float_guard.blocks_submission());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Unique identifier for this evaluation.
    pub evaluation_id: Uuid,
    /// When the evaluation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the evaluation.
    pub engine_version: String,
    /// The event that was evaluated.
    pub event_type: TillEventType,
    /// The terminal or till any recorded variance is held against.
    pub accountable_party: AccountableParty,
    /// Whether any variance was found.
    pub has_variance: bool,
    /// Whether the local-currency variance is within tolerance.
    pub variance_acceptable: bool,
    /// The variance classification.
    pub classification: VarianceClassification,
    /// What the caller should do next.
    pub next_step: NextStep,
    /// Whether expected amounts may be shown to the operator.
    pub expected_amounts_visible: bool,
    /// Whether the operator must count by denomination.
    pub denomination_count_required: bool,
    /// Per-tender variances, index-aligned with the event's currency data.
    pub tender_variances: Vec<TenderVariance>,
    /// The float guard outcome.
    pub float_guard: FloatGuardOutcome,
    /// Complete audit trace of evaluation decisions.
    pub audit_trace: AuditTrace,
}
