//! Evaluation logic for the Till Variance Engine.
//!
//! This module contains the decision functions for till events: variance
//! detection, the acceptable-variance tolerance check, classification and
//! routing, per-tender reconciliation amounts, parsing of operator entries,
//! the float amount guard, and the end-to-end [`evaluate_till_event`].

mod captured;
mod classification;
mod float_guard;
mod reconciliation;
mod till_event;
mod variance;

pub use captured::parse_captured_amounts;
pub use classification::{classify_variance, local_currency_index, next_step};
pub use float_guard::{FloatAmountGuard, FloatGuardError, TenderFloatError, resolve_float_amount};
pub use reconciliation::{
    align_expected, expected_amount_visible, relevant_currencies, tender_variances,
};
pub use till_event::{TillEventInput, evaluate_till_event};
pub use variance::{
    expected_amount_known, foreign_tender_variance, has_variance, is_variance_acceptable,
};
