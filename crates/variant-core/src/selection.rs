//! # Selection / Filter State
//!
//! Owns the combos of one generation pass and the user's selection on them.
//!
//! ## State vs. View
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Selection State Operations                         │
//! │                                                                         │
//! │  UI Action                 Method                    State Change       │
//! │  ─────────                 ──────                    ────────────       │
//! │                                                                         │
//! │  Click row checkbox ─────► toggle(id) ─────────────► one combo flips   │
//! │                                                                         │
//! │  Click "Red" chip ───────► set_by_option_value() ──► every Red combo   │
//! │                                                                         │
//! │  Header checkbox ────────► set_all() ──────────────► every combo       │
//! │                                                                         │
//! │  "Select filtered" ──────► set_filtered() ─────────► combos in view    │
//! │                                                                         │
//! │  Type in search box ─────► view(filter, sort) ─────► (read only)       │
//! │                                                                         │
//! │  NOTE: view() borrows; it never reorders or edits the combos, so a     │
//! │        selection survives any number of filter and sort changes.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::VariantCombo;

// =============================================================================
// Filter & Sort
// =============================================================================

/// Status filter of the combination table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StatusFilter {
    #[default]
    All,
    Selected,
    New,
    Existing,
}

impl StatusFilter {
    pub fn matches(&self, combo: &VariantCombo) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Selected => combo.selected,
            StatusFilter::New => combo.is_new(),
            StatusFilter::Existing => combo.is_existing,
        }
    }
}

/// Search text plus status filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ComboFilter {
    /// Case-insensitive substring matched against title and id.
    pub search: String,
    pub status: StatusFilter,
}

impl ComboFilter {
    pub fn matches(&self, combo: &VariantCombo) -> bool {
        if !self.status.matches(combo) {
            return false;
        }

        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || combo.title.to_lowercase().contains(&needle)
            || combo.id.to_lowercase().contains(&needle)
    }
}

/// Sort order of the combination table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ComboSort {
    /// Title ascending.
    #[default]
    Title,
    /// New before existing, then title.
    Status,
}

/// Case-insensitive title order with an exact comparison as tie-break.
///
/// Compares lowercased code points, which approximates the dashboard's
/// `localeCompare` for ASCII titles but ignores locale collation rules.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl ComboSort {
    pub fn compare(&self, a: &VariantCombo, b: &VariantCombo) -> Ordering {
        match self {
            ComboSort::Title => compare_titles(&a.title, &b.title),
            ComboSort::Status => a
                .is_existing
                .cmp(&b.is_existing)
                .then_with(|| compare_titles(&a.title, &b.title)),
        }
    }
}

// =============================================================================
// Stats & Pages
// =============================================================================

/// Summary counts for the builder footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectionStats {
    pub total: usize,
    pub selected: usize,
    pub new: usize,
    pub existing: usize,
    /// Selected combos that would create a new variant.
    pub new_selected: usize,
}

/// One page of a derived view.
#[derive(Debug, Clone)]
pub struct ComboPage<'a> {
    pub items: Vec<&'a VariantCombo>,
    /// 1-based page number after clamping.
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slices a view into pages. Out-of-range pages clamp to the nearest valid
/// page and a zero page size is treated as one.
pub fn paginate<'a>(view: &[&'a VariantCombo], page: usize, per_page: usize) -> ComboPage<'a> {
    let per_page = per_page.max(1);
    let total_items = view.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let items = view
        .iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .copied()
        .collect();

    ComboPage {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}

// =============================================================================
// Variant Selection
// =============================================================================

/// The combos of one generation pass with their selection state.
///
/// ## Invariants
/// - Combo order is enumeration order and never changes
/// - Selection operations only touch combos of this pass; unknown ids are
///   rejected, not remembered
#[derive(Debug, Clone, Default)]
pub struct VariantSelection {
    combos: Vec<VariantCombo>,
    positions: HashMap<String, usize>,
}

impl VariantSelection {
    pub fn new(combos: Vec<VariantCombo>) -> Self {
        let positions = combos
            .iter()
            .enumerate()
            .map(|(idx, combo)| (combo.id.clone(), idx))
            .collect();

        VariantSelection { combos, positions }
    }

    /// All combos in enumeration order.
    pub fn combos(&self) -> &[VariantCombo] {
        &self.combos
    }

    pub fn into_combos(self) -> Vec<VariantCombo> {
        self.combos
    }

    pub fn get(&self, combo_id: &str) -> Option<&VariantCombo> {
        self.positions.get(combo_id).map(|&idx| &self.combos[idx])
    }

    pub fn len(&self) -> usize {
        self.combos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    fn combo_mut(&mut self, combo_id: &str) -> CoreResult<&mut VariantCombo> {
        let idx = *self
            .positions
            .get(combo_id)
            .ok_or_else(|| CoreError::ComboNotFound(combo_id.to_string()))?;
        Ok(&mut self.combos[idx])
    }

    /// Flips one combo and returns its new state.
    pub fn toggle(&mut self, combo_id: &str) -> CoreResult<bool> {
        let combo = self.combo_mut(combo_id)?;
        combo.selected = !combo.selected;
        Ok(combo.selected)
    }

    /// Sets one combo explicitly.
    pub fn set_selected(&mut self, combo_id: &str, selected: bool) -> CoreResult<()> {
        self.combo_mut(combo_id)?.selected = selected;
        Ok(())
    }

    /// Sets every combo that uses `value_id`. Returns how many combos use it.
    pub fn set_by_option_value(&mut self, value_id: &str, selected: bool) -> usize {
        let mut touched = 0;
        for combo in self.combos.iter_mut().filter(|c| c.contains_value(value_id)) {
            combo.selected = selected;
            touched += 1;
        }
        touched
    }

    /// True when every combo using `value_id` is selected (vacuously true
    /// when none use it). Hosts invert this to drive a value chip.
    pub fn all_selected_for_value(&self, value_id: &str) -> bool {
        self.combos
            .iter()
            .filter(|c| c.contains_value(value_id))
            .all(|c| c.selected)
    }

    pub fn set_all(&mut self, selected: bool) {
        for combo in &mut self.combos {
            combo.selected = selected;
        }
    }

    /// Sets every combo the filter admits. Returns how many matched.
    ///
    /// The filter is evaluated against the state before any change, so a
    /// `Selected` filter deselecting its own rows still sees all of them.
    pub fn set_filtered(&mut self, selected: bool, filter: &ComboFilter) -> usize {
        let targets: Vec<usize> = self
            .combos
            .iter()
            .enumerate()
            .filter(|(_, c)| filter.matches(c))
            .map(|(idx, _)| idx)
            .collect();

        for &idx in &targets {
            self.combos[idx].selected = selected;
        }
        targets.len()
    }

    /// Derived, sorted view. Borrows; never mutates.
    pub fn view(&self, filter: &ComboFilter, sort: ComboSort) -> Vec<&VariantCombo> {
        let mut view: Vec<&VariantCombo> = self.combos.iter().filter(|c| filter.matches(c)).collect();
        view.sort_by(|a, b| sort.compare(a, b));
        view
    }

    /// Selected combos in enumeration order.
    pub fn selected(&self) -> impl Iterator<Item = &VariantCombo> {
        self.combos.iter().filter(|c| c.selected)
    }

    pub fn stats(&self) -> SelectionStats {
        self.combos
            .iter()
            .fold(SelectionStats::default(), |mut stats, combo| {
                stats.total += 1;
                if combo.selected {
                    stats.selected += 1;
                }
                if combo.is_existing {
                    stats.existing += 1;
                } else {
                    stats.new += 1;
                    if combo.selected {
                        stats.new_selected += 1;
                    }
                }
                stats
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
