//! Till Variance Engine for point-of-sale cash handling
//!
//! This crate decides, for a till event such as a count, a float transfer or an
//! audit, whether the amounts an operator captured differ from what the business
//! engine expected, whether that difference is within the location's tolerance,
//! and what the operator must do next.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod models;
