//! # Commands
//!
//! `generate` and `resolve`, each turning a [`BuilderInput`] into a
//! serializable report. Printing is left to `main`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use variant_core::selection::paginate;
use variant_core::validation::validate_options;
use variant_core::{
    ComboFilter, ComboSort, ProductVariant, ResolveMode, SelectionStats, VariantBuilder, VariantCombo,
};

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::input::BuilderInput;

/// Output of `generate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReport {
    pub generated_at: DateTime<Utc>,
    pub is_large: bool,
    pub stats: SelectionStats,
    /// Combos in the requested view (filtered, sorted, possibly one page).
    pub combos: Vec<VariantCombo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageInfo>,
}

/// Position of a paged `generate` view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Requested page of the `generate` view (1-based).
#[derive(Debug, Clone, Copy)]
pub struct Paging {
    pub page: usize,
    pub per_page: usize,
}

/// Output of `resolve`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveReport {
    pub generated_at: DateTime<Utc>,
    pub mode: ResolveMode,
    pub stats: SelectionStats,
    pub variants: Vec<ProductVariant>,
}

/// Selection edits applied before resolving.
#[derive(Debug, Clone, Default)]
pub struct SelectionEdits {
    /// Combo ids to deselect.
    pub deselect: Vec<String>,
    /// Option value ids whose combos are all deselected.
    pub deselect_values: Vec<String>,
}

fn start_session(config: &CliConfig, input: BuilderInput) -> CliResult<VariantBuilder> {
    if config.output.strict {
        validate_options(&input.options)?;
    }

    Ok(VariantBuilder::new(
        config.engine.clone(),
        input.options,
        input.existing_variants,
    ))
}

/// Generates and annotates every combination, returning the requested view.
pub fn generate(
    config: &CliConfig,
    input: BuilderInput,
    filter: &ComboFilter,
    sort: ComboSort,
    paging: Option<Paging>,
) -> CliResult<GenerateReport> {
    let builder = start_session(config, input)?;
    let selection = builder.selection();
    let view = selection.view(filter, sort);

    let (combos, page): (Vec<VariantCombo>, _) = match paging {
        Some(paging) => {
            let page = paginate(&view, paging.page, paging.per_page);
            let info = PageInfo {
                page: page.page,
                per_page: page.per_page,
                total_items: page.total_items,
                total_pages: page.total_pages,
            };
            (page.items.into_iter().cloned().collect(), Some(info))
        }
        None => (view.into_iter().cloned().collect(), None),
    };
    info!(total = selection.len(), shown = combos.len(), "Combinations generated");

    Ok(GenerateReport {
        generated_at: Utc::now(),
        is_large: builder.is_large(),
        stats: selection.stats(),
        combos,
        page,
    })
}

/// Generates, applies the selection edits and resolves with `mode`.
pub fn resolve(
    config: &CliConfig,
    input: BuilderInput,
    mode: ResolveMode,
    edits: &SelectionEdits,
) -> CliResult<ResolveReport> {
    let mut builder = start_session(config, input)?;

    let selection = builder.selection_mut();
    for value_id in &edits.deselect_values {
        let touched = selection.set_by_option_value(value_id, false);
        if touched == 0 {
            warn!(%value_id, "No combination uses this option value");
        }
    }
    for combo_id in &edits.deselect {
        selection.set_selected(combo_id, false)?;
    }

    Ok(ResolveReport {
        generated_at: Utc::now(),
        mode,
        stats: builder.selection().stats(),
        variants: builder.apply(mode),
    })
}
