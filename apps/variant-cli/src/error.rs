//! # CLI Error Types
//!
//! Everything that can stop a `variant-builder` run.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CLI Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │     Input       │  │       Engine            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  ConfigParse    │  │  Io             │  │  Core (unknown combo)   │ │
//! │  │  InvalidConfig  │  │  Json           │  │  InvalidOptions         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use variant_core::{CoreError, ValidationError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Config file is not valid TOML or has the wrong shape.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config parsed but holds unusable values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // Input Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input or output JSON failure.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    // =========================================================================
    // Engine Errors
    // =========================================================================
    /// Strict mode rejected the option set.
    #[error("Invalid options: {0}")]
    InvalidOptions(#[from] ValidationError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
