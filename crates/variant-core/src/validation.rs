//! # Validation Module
//!
//! Checks an option set before it reaches the generator.
//!
//! Generation itself never fails: a blank value still produces a combo,
//! and an option without values collapses the product to zero. These
//! rules are for hosts that want to reject such input up front (the CLI
//! runs them in strict mode).
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  options[i].id          required, unique across the set                │
//! │  options[i].name        required                                       │
//! │  options[i].values[j]   id required, unique within the option,         │
//! │                         must not contain the combo id separator "|"    │
//! │                         value text required                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use variant_core::types::ProductOption;
//! use variant_core::validation::validate_options;
//!
//! let options: Vec<ProductOption> = Vec::new();
//! assert!(validate_options(&options).is_ok());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::{ProductOption, ProductOptionValue};
use crate::COMBO_ID_SEPARATOR;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

fn require(field: String, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

/// Validates an option value id.
///
/// ## Example
/// ```rust
/// use variant_core::validation::validate_value_id;
///
/// assert!(validate_value_id("v-red").is_ok());
/// assert!(validate_value_id("").is_err());
/// assert!(validate_value_id("v|red").is_err());
/// ```
pub fn validate_value_id(id: &str) -> ValidationResult<()> {
    require("value id".to_string(), id)?;

    if id.contains(COMBO_ID_SEPARATOR) {
        return Err(ValidationError::InvalidFormat {
            field: "value id".to_string(),
            reason: format!("must not contain '{}'", COMBO_ID_SEPARATOR),
        });
    }

    Ok(())
}

fn validate_value(option_idx: usize, value_idx: usize, value: &ProductOptionValue) -> ValidationResult<()> {
    validate_value_id(&value.id).map_err(|err| match err {
        ValidationError::Required { .. } => ValidationError::Required {
            field: format!("options[{option_idx}].values[{value_idx}].id"),
        },
        ValidationError::InvalidFormat { reason, .. } => ValidationError::InvalidFormat {
            field: format!("options[{option_idx}].values[{value_idx}].id"),
            reason,
        },
        other => other,
    })?;

    require(
        format!("options[{option_idx}].values[{value_idx}].value"),
        &value.value,
    )
}

/// Validates a single option and its values.
pub fn validate_option(option_idx: usize, option: &ProductOption) -> ValidationResult<()> {
    require(format!("options[{option_idx}].id"), &option.id)?;
    require(format!("options[{option_idx}].name"), &option.name)?;

    let mut seen = HashSet::new();
    for (value_idx, value) in option.values.iter().enumerate() {
        validate_value(option_idx, value_idx, value)?;

        if !seen.insert(value.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: format!("options[{option_idx}].values.id"),
                value: value.id.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates a whole option set.
pub fn validate_options(options: &[ProductOption]) -> ValidationResult<()> {
    let mut seen = HashSet::new();

    for (option_idx, option) in options.iter().enumerate() {
        validate_option(option_idx, option)?;

        if !seen.insert(option.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "options.id".to_string(),
                value: option.id.clone(),
            });
        }
    }

    Ok(())
}

/// Validates a threshold or chunk size from configuration.
pub fn validate_positive(field: &str, value: usize) -> ValidationResult<()> {
    if value == 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: i64::MAX,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
