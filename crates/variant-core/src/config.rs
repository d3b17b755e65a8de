//! # Engine Configuration
//!
//! Tunables for a generation pass. Hosts deserialize this from their own
//! config sources (the CLI reads an `[engine]` TOML table); the engine only
//! ever sees the finished struct.
//!
//! ```toml
//! [engine]
//! large_set_threshold = 1000
//! batch_size = 100
//! match_strategy = "title"
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Match Strategy
// =============================================================================

/// How generated combos are matched against existing variants.
///
/// ## Strategy Comparison
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                      Match Strategy Comparison                          │
/// │                                                                         │
/// │  TITLE (Default)                   │  OPTION_VALUES_THEN_TITLE          │
/// │  ───────────────                   │  ────────────────────────          │
/// │  • trim + lowercase name == title  │  • value id sets compared first    │
/// │  • works for legacy variants       │  • title only for variants that    │
/// │  • "S" on Size and "S" on Fit      │    carry no optionValueIds         │
/// │    collide                         │  • no false matches on repeated    │
/// │                                    │    value text                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MatchStrategy {
    /// Normalized title equality only.
    #[default]
    Title,

    /// Exact option value id set first, normalized title as a fallback for
    /// variants without ids.
    OptionValuesThenTitle,
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStrategy::Title => write!(f, "title"),
            MatchStrategy::OptionValuesThenTitle => write!(f, "option_values_then_title"),
        }
    }
}

impl std::str::FromStr for MatchStrategy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" | "name" | "legacy" => Ok(MatchStrategy::Title),
            "option_values_then_title" | "option-values-then-title" | "ids" | "two_tier" => {
                Ok(MatchStrategy::OptionValuesThenTitle)
            }
            other => Err(CoreError::UnknownMatchStrategy(other.to_string())),
        }
    }
}

// =============================================================================
// Engine Config
// =============================================================================

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Combination count above which a pass is flagged as large. Advisory.
    #[serde(default = "default_large_set_threshold")]
    pub large_set_threshold: usize,

    /// Suggested chunk size for hosts pulling combos incrementally.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default)]
    pub match_strategy: MatchStrategy,
}

fn default_large_set_threshold() -> usize {
    crate::DEFAULT_LARGE_SET_THRESHOLD
}

fn default_batch_size() -> usize {
    100
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            large_set_threshold: default_large_set_threshold(),
            batch_size: default_batch_size(),
            match_strategy: MatchStrategy::default(),
        }
    }
}

impl EngineConfig {
    /// Returns true when `count` combinations warrant a large-set warning.
    #[inline]
    pub fn is_large(&self, count: usize) -> bool {
        count > self.large_set_threshold
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
