//! Configuration loading and management for the Till Variance Engine.
//!
//! This module provides functionality to load retail location settings,
//! tenders and per-event feature flags from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use till_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/store_001").unwrap();
//! println!("Loaded location: {}", config.retail_location().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EventFeatures, RetailLocationConfig, TenderConfig, TendersConfig, TillConfig,
    TillEventsConfig,
};
