//! # Variant Builder
//!
//! One editing session over a product's variants: generate, let the user
//! adjust the selection, resolve.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Builder Session                                   │
//! │                                                                         │
//! │  VariantBuilder::new(config, options, existing)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  generation pass ──► VariantSelection (all selected)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  selection_mut().toggle(..) / set_by_option_value(..) / set_all(..)    │
//! │       │                                                                 │
//! │       │   set_options(..) / set_existing(..) ──► fresh pass,           │
//! │       │                                          selection reset       │
//! │       ▼                                                                 │
//! │  apply(ResolveMode) ──► Vec<ProductVariant> ──► caller persists        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::info;

use crate::config::EngineConfig;
use crate::generator::generate_annotated;
use crate::resolver::{resolve, ResolveMode};
use crate::selection::VariantSelection;
use crate::types::{ProductOption, ProductVariant, VariantCombo};

/// Owns the inputs and selection of one builder session.
#[derive(Debug, Clone)]
pub struct VariantBuilder {
    config: EngineConfig,
    options: Vec<ProductOption>,
    existing: Vec<ProductVariant>,
    selection: VariantSelection,
    is_large: bool,
}

impl VariantBuilder {
    /// Creates a session and runs the first generation pass.
    pub fn new(config: EngineConfig, options: Vec<ProductOption>, existing: Vec<ProductVariant>) -> Self {
        let mut builder = VariantBuilder {
            config,
            options,
            existing,
            selection: VariantSelection::default(),
            is_large: false,
        };
        builder.regenerate();
        builder
    }

    /// Runs a fresh generation pass. Any selection changes are discarded.
    pub fn regenerate(&mut self) {
        let generation = generate_annotated(&self.options, &self.existing, &self.config);
        self.is_large = generation.is_large;
        self.selection = VariantSelection::new(generation.combos);
    }

    /// Replaces the option set and regenerates.
    pub fn set_options(&mut self, options: Vec<ProductOption>) {
        self.options = options;
        self.regenerate();
    }

    /// Replaces the existing variants and regenerates.
    pub fn set_existing(&mut self, existing: Vec<ProductVariant>) {
        self.existing = existing;
        self.regenerate();
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn options(&self) -> &[ProductOption] {
        &self.options
    }

    pub fn existing(&self) -> &[ProductVariant] {
        &self.existing
    }

    /// True when the last pass exceeded the large-set threshold.
    pub fn is_large(&self) -> bool {
        self.is_large
    }

    pub fn combos(&self) -> &[VariantCombo] {
        self.selection.combos()
    }

    pub fn selection(&self) -> &VariantSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut VariantSelection {
        &mut self.selection
    }

    /// Resolves the current selection into the variants to persist.
    pub fn apply(&self, mode: ResolveMode) -> Vec<ProductVariant> {
        let stats = self.selection.stats();
        info!(
            %mode,
            selected = stats.selected,
            new_selected = stats.new_selected,
            "Applying variant selection"
        );
        resolve(
            mode,
            self.selection.combos(),
            &self.existing,
            &self.options,
            self.config.match_strategy,
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
