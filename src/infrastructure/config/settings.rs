//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; a missing file means defaults.
//! The snapshot path can be overridden with `RIDEBOOK_SNAPSHOT`.
//!
//! # Example
//!
//! ```no_run
//! use ridebook::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("ridebook.toml")?;
//!     config.init_logging(0);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use chrono::FixedOffset;
use serde::Deserialize;
use tracing::debug;

use super::ledger::{LedgerConfig, MAX_CURRENCY_DECIMALS};
use super::logging::LoggingConfig;
use super::store::{StoreConfig, SNAPSHOT_ENV};
use crate::error::{ConfigError, Result};

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "ridebook.toml";

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Timezone and amount display for ledger evaluation.
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Where the ledger snapshot lives.
    #[serde(default)]
    pub store: StoreConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Environment overrides are not applied here; see [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
            Self::parse_toml(&content)?
        } else {
            debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        if let Ok(snapshot) = std::env::var(SNAPSHOT_ENV) {
            config.override_snapshot(snapshot)?;
        }
        Ok(config)
    }

    /// Point the store at another snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is blank.
    pub fn override_snapshot(&mut self, snapshot: impl Into<String>) -> Result<()> {
        let snapshot = snapshot.into();
        if snapshot.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "store.snapshot",
            }
            .into());
        }
        self.store.snapshot = snapshot;
        Ok(())
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.store.snapshot.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "store.snapshot",
            }
            .into());
        }
        if self.ledger.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(ConfigError::InvalidValue {
                field: "currency_decimals",
                reason: format!("must be at most {MAX_CURRENCY_DECIMALS}"),
            }
            .into());
        }
        if let Err(raw) = self.ledger.offset() {
            return Err(ConfigError::InvalidValue {
                field: "utc_offset",
                reason: format!("'{raw}' is not an offset like +03:00"),
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: "must be \"pretty\" or \"json\"".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Fixed evaluator offset, or `None` for the machine's local zone.
    #[must_use]
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.ledger.offset().ok().flatten()
    }

    /// Initialize logging based on configuration, raised by `-v` flags.
    pub fn init_logging(&self, verbose: u8) {
        self.logging.clone().with_verbosity(verbose).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.store.snapshot, "ledger.json");
        assert_eq!(config.ledger.currency_decimals, 0);
        assert!(config.utc_offset().is_none());
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::parse_toml(
            r#"
[logging]
level = "debug"
format = "json"

[ledger]
utc_offset = "+03:00"
currency_decimals = 2

[store]
snapshot = "data/rides.json"
"#,
        )
        .unwrap();

        assert_eq!(config.logging.format, "json");
        assert_eq!(config.ledger.currency_decimals, 2);
        assert_eq!(config.utc_offset(), FixedOffset::east_opt(3 * 3600));
        assert_eq!(config.store.snapshot, "data/rides.json");
    }

    #[test]
    fn blank_override_is_rejected() {
        let mut config = Config::default();
        assert!(config.override_snapshot("  ").is_err());
        config.override_snapshot("other.json").unwrap();
        assert_eq!(config.store.snapshot, "other.json");
    }
}
