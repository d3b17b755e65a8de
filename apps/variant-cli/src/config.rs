//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied in main)             │
//! │     --strict, --compact                                                │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     VARIANT_LARGE_SET_THRESHOLD=5000                                   │
//! │     VARIANT_BATCH_SIZE=250                                             │
//! │     VARIANT_MATCH_STRATEGY=option_values_then_title                    │
//! │     VARIANT_STRICT=true                                                │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config PATH, or the platform config dir:                         │
//! │     ~/.config/variant-builder/variants.toml (Linux)                    │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [engine]
//! large_set_threshold = 1000
//! batch_size = 100
//! match_strategy = "title"
//!
//! [output]
//! pretty = true
//! strict = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use variant_core::validation::validate_positive;
use variant_core::{EngineConfig, MatchStrategy};

use crate::error::{CliError, CliResult};

// =============================================================================
// Output Settings
// =============================================================================

/// How results are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Pretty-print JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Validate the option set before generating.
    #[serde(default)]
    pub strict: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            pretty: true,
            strict: false,
        }
    }
}

// =============================================================================
// CLI Config
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub output: OutputSettings,
}

impl CliConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (an explicit path must exist)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::InvalidConfig(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        validate_positive("engine.large_set_threshold", self.engine.large_set_threshold)
            .and_then(|_| validate_positive("engine.batch_size", self.engine.batch_size))
            .map_err(|e| CliError::InvalidConfig(e.to_string()))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `VARIANT_*` overrides from `lookup`. Unparseable values are
    /// logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup("VARIANT_LARGE_SET_THRESHOLD") {
            match raw.trim().parse::<usize>() {
                Ok(threshold) => {
                    debug!(threshold, "Overriding large set threshold from environment");
                    self.engine.large_set_threshold = threshold;
                }
                Err(_) => warn!(value = %raw, "Ignoring invalid VARIANT_LARGE_SET_THRESHOLD"),
            }
        }

        if let Some(raw) = lookup("VARIANT_BATCH_SIZE") {
            match raw.trim().parse::<usize>() {
                Ok(batch_size) => self.engine.batch_size = batch_size,
                Err(_) => warn!(value = %raw, "Ignoring invalid VARIANT_BATCH_SIZE"),
            }
        }

        if let Some(raw) = lookup("VARIANT_MATCH_STRATEGY") {
            match raw.parse::<MatchStrategy>() {
                Ok(strategy) => self.engine.match_strategy = strategy,
                Err(e) => warn!(error = %e, "Ignoring VARIANT_MATCH_STRATEGY"),
            }
        }

        if let Some(raw) = lookup("VARIANT_STRICT") {
            self.output.strict = matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
    }

    /// Platform config file location.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "catalog", "variant-builder")
            .map(|dirs| dirs.config_dir().join("variants.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
