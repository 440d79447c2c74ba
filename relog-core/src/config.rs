//! Configuration types for replayable-activity logging

use serde::{Deserialize, Serialize};

use crate::record::Severity;

/// Default bound on buffered records per operation
pub const DEFAULT_BUFFER_CAPACITY: usize = 1000;

/// Default tag key holding an operation's final outcome
pub const DEFAULT_RESULT_TAG: &str = "Result";

/// Default outcome value that triggers replay
pub const DEFAULT_FAILURE_OUTCOME: &str = "SystemError";

/// Configuration for the replay logging pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Master switch for replay buffering
    pub enabled: bool,

    /// Maximum buffered records per operation (drop-oldest beyond this)
    pub max_records_per_operation: usize,

    /// Tag key consulted for an operation's final outcome
    pub result_tag: String,

    /// The single outcome value that warrants replay (ordinal comparison)
    pub failure_outcome: String,

    /// Minimum severity admitted to the live log stream
    pub min_severity: Severity,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_records_per_operation: DEFAULT_BUFFER_CAPACITY,
            result_tag: DEFAULT_RESULT_TAG.to_string(),
            failure_outcome: DEFAULT_FAILURE_OUTCOME.to_string(),
            min_severity: Severity::Info,
        }
    }
}

impl ReplayConfig {
    /// Load configuration from `relog.toml` and `RELOG_`-prefixed
    /// environment variables, with `RELOG_CONFIG_PATH` pointing at an
    /// alternate file.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or validation fails.
    pub fn load() -> crate::error::Result<Self> {
        use figment::{
            Figment,
            providers::{Env, Format, Serialized, Toml},
        };

        let mut figment = Figment::from(Serialized::defaults(ReplayConfig::default()))
            .merge(Toml::file("relog.toml"))
            .merge(Env::prefixed("RELOG_"));

        if let Ok(path) = std::env::var("RELOG_CONFIG_PATH") {
            figment = figment.merge(Toml::file(path));
        }

        let config: ReplayConfig = figment.extract().map_err(|e| {
            crate::error::RelogError::Configuration(format!("Failed to load configuration: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        use figment::{
            Figment,
            providers::{Format, Serialized, Toml},
        };

        let config: ReplayConfig = Figment::from(Serialized::defaults(ReplayConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| {
                crate::error::RelogError::Configuration(format!(
                    "Failed to load configuration file: {}",
                    e
                ))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if the per-operation record bound is zero or a tag
    /// key/value is empty.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.max_records_per_operation == 0 {
            return Err(crate::error::RelogError::Configuration(
                "max_records_per_operation must be at least 1".to_string(),
            ));
        }
        if self.result_tag.is_empty() {
            return Err(crate::error::RelogError::Configuration(
                "result_tag must not be empty".to_string(),
            ));
        }
        if self.failure_outcome.is_empty() {
            return Err(crate::error::RelogError::Configuration(
                "failure_outcome must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
