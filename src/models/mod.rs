//! Core data models for the Till Variance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod evaluation_result;
mod money;
mod tender;
mod till_event;

pub use evaluation_result::{
    AuditStep, AuditTrace, AuditWarning, EvaluationResult, FloatGuardOutcome, NextStep,
    VarianceClassification,
};
pub use money::Money;
pub use tender::{
    CapturedAmount, CapturedAmounts, CapturedInput, CurrencyData, ExpectedTender, TenderVariance,
};
pub use till_event::{AccountabilityMode, AccountableParty, TillEventType};
