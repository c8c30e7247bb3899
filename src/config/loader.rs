//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading till
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{RetailLocationConfig, TendersConfig, TillConfig, TillEventsConfig};

/// Loads and provides access to till configuration.
///
/// # Directory Structure
///
/// ```text
/// config/store_001/
/// ├── retail_location.yaml  # Location id, default tender, variance threshold
/// ├── tenders.yaml          # Tenders and their currencies
/// └── till_events.yaml      # Feature flags per till event
/// ```
///
/// # Example
///
/// ```no_run
/// use till_engine::config::ConfigLoader;
/// use till_engine::models::TillEventType;
///
/// let loader = ConfigLoader::load("./config/store_001")?;
/// if let Some(features) = loader.config().event_features(TillEventType::TillCount) {
///     println!("Blind count: {}", features.allow_blind_count);
/// }
/// # Ok::<(), till_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TillConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any required file is missing, contains invalid
    /// YAML, or if the default tender is not one of the configured tenders.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let retail_location =
            Self::load_yaml::<RetailLocationConfig>(&path.join("retail_location.yaml"))?;
        let tenders = Self::load_yaml::<TendersConfig>(&path.join("tenders.yaml"))?;
        let events = Self::load_yaml::<TillEventsConfig>(&path.join("till_events.yaml"))?;

        let config = TillConfig::new(retail_location, tenders.tenders, events.events);
        let loader = Self::from_config(config)?;

        debug!(
            retail_location = %loader.config.retail_location().id,
            tenders = loader.config.tenders().len(),
            "Loaded till configuration"
        );

        Ok(loader)
    }

    /// Wraps an already-built configuration, checking that its default
    /// tender exists.
    pub fn from_config(config: TillConfig) -> EngineResult<Self> {
        if config.default_tender().is_none() {
            return Err(EngineError::TenderNotFound {
                tender_id: config.retail_location().default_tender_id.clone(),
            });
        }
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying till configuration.
    pub fn config(&self) -> &TillConfig {
        &self.config
    }

    /// Returns the retail location settings.
    pub fn retail_location(&self) -> &RetailLocationConfig {
        self.config.retail_location()
    }
}
