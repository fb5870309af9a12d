//! Configuration for liftlog-names
//!
//! The three similarity cutoffs increase with the consequence of the action
//! they gate: warn on entry < group for review < merge without confirmation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Matching and merge configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Minimum similarity for a suggestion during name entry
    pub warn_threshold: f64,
    /// Minimum similarity for grouping records for review
    pub cluster_threshold: f64,
    /// Similarity a member must exceed to be merged without confirmation
    pub auto_merge_threshold: f64,
    /// Maximum suggestions returned by validation
    pub max_suggestions: usize,
    /// Minimum trimmed length (in characters) of a new name
    pub min_name_length: usize,
    /// Extra autocorrect entries (informal spelling -> display name)
    pub corrections: BTreeMap<String, String>,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            warn_threshold: 0.7,
            cluster_threshold: 0.85,
            auto_merge_threshold: 0.9,
            max_suggestions: 5,
            min_name_length: 2,
            corrections: BTreeMap::new(),
        }
    }
}

impl DedupConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = [
            ("warn_threshold", self.warn_threshold),
            ("cluster_threshold", self.cluster_threshold),
            ("auto_merge_threshold", self.auto_merge_threshold),
        ];
        for (name, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange(format!(
                    "{} must be between 0.0 and 1.0, got {}",
                    name, value
                )));
            }
        }

        if self.warn_threshold >= self.cluster_threshold {
            return Err(ConfigError::InvalidThresholds(
                "warn_threshold must be less than cluster_threshold".to_string(),
            ));
        }

        if self.cluster_threshold >= self.auto_merge_threshold {
            return Err(ConfigError::InvalidThresholds(
                "cluster_threshold must be less than auto_merge_threshold".to_string(),
            ));
        }

        if self.max_suggestions == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_suggestions must be positive".to_string(),
            ));
        }

        if self.min_name_length == 0 {
            return Err(ConfigError::InvalidLimit(
                "min_name_length must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
