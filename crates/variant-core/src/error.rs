//! # Error Types
//!
//! Domain-specific error types for variant-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  variant-core errors (this file)                                       │
//! │  ├── CoreError        - Contract errors from callers                   │
//! │  └── ValidationError  - Option set validation failures                 │
//! │                                                                         │
//! │  variant-cli errors (separate crate)                                   │
//! │  └── CliError         - File, JSON and config failures                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Generation and resolution never fail. Everything here is a caller
//! contract error: an unknown combo id, a strategy name that does not
//! parse, or an option set that breaks the validation rules.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core engine errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A selection operation referenced a combo that is not part of the
    /// current generation pass.
    ///
    /// ## When This Occurs
    /// - The UI kept a combo id across a regeneration
    /// - The caller typed an id by hand (CLI `--deselect`)
    #[error("Combination not found: {0}")]
    ComboNotFound(String),

    /// Resolve mode string did not parse.
    #[error("Unknown resolve mode: '{0}'. Valid options: regenerate, merge")]
    UnknownResolveMode(String),

    /// Match strategy string did not parse.
    #[error("Unknown match strategy: '{0}'. Valid options: title, option_values_then_title")]
    UnknownMatchStrategy(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Option set validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., an id containing the combo id separator).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Duplicate value (e.g., two values sharing an id inside one option).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
