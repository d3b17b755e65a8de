//! # variant-core: Variant Combination Engine
//!
//! Pure logic behind the catalog admin's variant builder. Given a product's
//! options and its already persisted variants, it proposes every sellable
//! combination, tracks the user's selection and resolves the final variant
//! list. No I/O: persisting the result is the caller's job.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Variant Builder Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Admin Dashboard / variant-cli (host)               │   │
//! │  │      options + existing variants ──►    ◄── ProductVariant[]    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ variant-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │  │ generator │─►│  matcher  │─►│ selection │─►│ resolver  │   │   │
//! │  │  │ Cartesian │  │ existing? │  │ toggles & │  │ regenerate│   │   │
//! │  │  │  product  │  │  by title │  │  filters  │  │  / merge  │   │   │
//! │  │  └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Options, variants and combos
//! - [`generator`] - Cartesian product enumeration (lazy or eager)
//! - [`matcher`] - Existing-variant matching
//! - [`selection`] - Selection state, filters, sort, pages
//! - [`resolver`] - Regenerate / merge resolution
//! - [`builder`] - Session facade over all of the above
//! - [`config`] - Engine settings
//! - [`validation`] - Optional option-set checks
//! - [`money`] - Integer money for price fields
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use variant_core::{EngineConfig, ProductOption, ProductOptionValue, ResolveMode, VariantBuilder};
//!
//! let value = |id: &str, text: &str, sort| ProductOptionValue {
//!     id: id.to_string(),
//!     value: text.to_string(),
//!     sort,
//! };
//! let options = vec![
//!     ProductOption {
//!         id: "opt-color".to_string(),
//!         name: "color".to_string(),
//!         values: vec![value("v-red", "Red", 0), value("v-blue", "Blue", 1)],
//!         sort: 0,
//!     },
//!     ProductOption {
//!         id: "opt-size".to_string(),
//!         name: "size".to_string(),
//!         values: vec![value("v-s", "S", 0), value("v-m", "M", 1)],
//!         sort: 1,
//!     },
//! ];
//!
//! let mut builder = VariantBuilder::new(EngineConfig::default(), options, Vec::new());
//! assert_eq!(builder.combos().len(), 4);
//!
//! builder.selection_mut().toggle("v-blue|v-m").unwrap();
//! let variants = builder.apply(ResolveMode::Regenerate);
//!
//! let names: Vec<&str> = variants.iter().map(|v| v.name.as_str()).collect();
//! assert_eq!(names, ["Red - S", "Red - M", "Blue - S"]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod builder;
pub mod config;
pub mod error;
pub mod generator;
pub mod matcher;
pub mod money;
pub mod resolver;
pub mod selection;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use builder::VariantBuilder;
pub use config::{EngineConfig, MatchStrategy};
pub use error::{CoreError, CoreResult, ValidationError};
pub use generator::{
    combination_count, combinations, combo_id, generate, generate_annotated, Combinations, Generation,
};
pub use matcher::{annotate, normalize_title};
pub use money::Money;
pub use resolver::{resolve, ResolveMode};
pub use selection::{ComboFilter, ComboSort, SelectionStats, StatusFilter, VariantSelection};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Combination count above which a pass is reported as large.
pub const DEFAULT_LARGE_SET_THRESHOLD: usize = 1000;

/// Joins option value ids into a combo id; see [`generator::combo_id`].
pub const COMBO_ID_SEPARATOR: &str = "|";

/// Escapes a separator or escape character inside a value id.
pub const COMBO_ID_ESCAPE: char = '\\';

/// Joins option value texts into a combo title.
pub const TITLE_SEPARATOR: &str = " - ";

/// Option names projected onto [`ProductVariant`] fields. Case-sensitive.
pub const SIZE_OPTION: &str = "size";
pub const COLOR_OPTION: &str = "color";
pub const WEIGHT_OPTION: &str = "weight";
