//! # Combination Generator
//!
//! Enumerates the Cartesian product of a product's option values.
//!
//! ## Enumeration Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Options sorted by `sort`, values sorted by `sort` (stable on ties)    │
//! │                                                                         │
//! │     Color (sort 0): Red, Blue                                          │
//! │     Size  (sort 1): S, M                                               │
//! │                                                                         │
//! │  Odometer traversal: first option slowest, last option fastest         │
//! │                                                                         │
//! │     cursor [0,0] → "Red - S"                                           │
//! │     cursor [0,1] → "Red - M"                                           │
//! │     cursor [1,0] → "Blue - S"                                          │
//! │     cursor [1,1] → "Blue - M"                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`Combinations`] is lazy: a host that must stay responsive pulls
//! [`Combinations::next_batch`] chunks between frames. Re-running
//! [`combinations`] on the same options restarts the sequence and produces
//! identical ids, titles and order.

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::matcher::annotate;
use crate::types::{ProductOption, ProductOptionValue, ProductVariant, VariantCombo};
use crate::{COMBO_ID_ESCAPE, COMBO_ID_SEPARATOR, TITLE_SEPARATOR};

// =============================================================================
// Ordered Options
// =============================================================================

/// An option with its values in enumeration order.
#[derive(Debug, Clone)]
pub struct OrderedOption<'a> {
    pub option: &'a ProductOption,
    pub values: Vec<&'a ProductOptionValue>,
}

/// Sorts options and their values by `sort` ascending.
///
/// Sorting is stable, so ties keep the caller's order.
pub fn ordered_options(options: &[ProductOption]) -> Vec<OrderedOption<'_>> {
    let mut ordered: Vec<OrderedOption<'_>> = options
        .iter()
        .map(|option| {
            let mut values: Vec<&ProductOptionValue> = option.values.iter().collect();
            values.sort_by_key(|v| v.sort);
            OrderedOption { option, values }
        })
        .collect();

    ordered.sort_by_key(|o| o.option.sort);
    ordered
}

/// Builds a combo id from its value ids.
///
/// Ids are joined with [`COMBO_ID_SEPARATOR`]; a separator or escape
/// character inside an id is prefixed with [`COMBO_ID_ESCAPE`], so distinct
/// id lists always give distinct combo ids.
///
/// ```rust
/// use variant_core::generator::combo_id;
///
/// let ids = |ids: &[&str]| ids.iter().map(|s| s.to_string()).collect::<Vec<_>>();
/// assert_eq!(combo_id(&ids(&["v-red", "v-s"])), "v-red|v-s");
/// assert_eq!(combo_id(&ids(&["x|y", "z"])), r"x\|y|z");
/// ```
pub fn combo_id(value_ids: &[String]) -> String {
    let mut id = String::new();
    for (idx, value_id) in value_ids.iter().enumerate() {
        if idx > 0 {
            id.push_str(COMBO_ID_SEPARATOR);
        }
        for ch in value_id.chars() {
            if ch == COMBO_ID_ESCAPE || COMBO_ID_SEPARATOR.contains(ch) {
                id.push(COMBO_ID_ESCAPE);
            }
            id.push(ch);
        }
    }
    id
}

/// Number of combinations the options produce.
///
/// Zero when there are no options or any option has no values. Saturates at
/// `usize::MAX` rather than overflowing.
pub fn combination_count(options: &[ProductOption]) -> usize {
    if options.is_empty() {
        return 0;
    }

    options
        .iter()
        .fold(1usize, |acc, option| acc.saturating_mul(option.values.len()))
}

// =============================================================================
// Lazy Enumeration
// =============================================================================

/// Lazy iterator over the combinations of an option set.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    axes: Vec<OrderedOption<'a>>,
    cursor: Vec<usize>,
    remaining: usize,
    exhausted: bool,
}

/// Starts a fresh enumeration over `options`.
pub fn combinations(options: &[ProductOption]) -> Combinations<'_> {
    let axes = ordered_options(options);
    let remaining = combination_count(options);

    Combinations {
        cursor: vec![0; axes.len()],
        exhausted: remaining == 0,
        remaining,
        axes,
    }
}

impl<'a> Combinations<'a> {
    /// Total number of combinations in this enumeration, consumed or not.
    pub fn total(&self) -> usize {
        self.axes
            .iter()
            .fold(if self.axes.is_empty() { 0 } else { 1usize }, |acc, axis| {
                acc.saturating_mul(axis.values.len())
            })
    }

    /// Pulls up to `n` combinations. Returns an empty batch once exhausted.
    pub fn next_batch(&mut self, n: usize) -> Vec<VariantCombo> {
        self.by_ref().take(n).collect()
    }

    fn current(&self) -> VariantCombo {
        let picked: Vec<&ProductOptionValue> = self
            .axes
            .iter()
            .zip(&self.cursor)
            .map(|(axis, &idx)| axis.values[idx])
            .collect();

        let option_value_ids: Vec<String> = picked.iter().map(|v| v.id.clone()).collect();
        let title = picked
            .iter()
            .map(|v| v.value.as_str())
            .collect::<Vec<_>>()
            .join(TITLE_SEPARATOR);

        VariantCombo {
            id: combo_id(&option_value_ids),
            option_value_ids,
            title,
            selected: true,
            is_existing: false,
            existing_variant_id: None,
        }
    }

    /// Moves the odometer one step. The last axis turns fastest.
    fn advance(&mut self) {
        for axis in (0..self.axes.len()).rev() {
            self.cursor[axis] += 1;
            if self.cursor[axis] < self.axes[axis].values.len() {
                return;
            }
            self.cursor[axis] = 0;
        }
        // Every axis wrapped
        self.exhausted = true;
    }
}

impl<'a> Iterator for Combinations<'a> {
    type Item = VariantCombo;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let combo = self.current();
        self.advance();
        self.remaining = self.remaining.saturating_sub(1);
        Some(combo)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> ExactSizeIterator for Combinations<'a> {}

/// Eager form of [`combinations`].
pub fn generate(options: &[ProductOption]) -> Vec<VariantCombo> {
    combinations(options).collect()
}

// =============================================================================
// Annotated Generation
// =============================================================================

/// Result of a full generation pass.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Annotated combos in enumeration order.
    pub combos: Vec<VariantCombo>,

    /// True when the pass exceeded the configured large-set threshold.
    pub is_large: bool,
}

/// Generates every combination and annotates it against `existing`.
///
/// A large pass is only reported, never refused.
pub fn generate_annotated(
    options: &[ProductOption],
    existing: &[ProductVariant],
    config: &EngineConfig,
) -> Generation {
    let total = combination_count(options);
    let is_large = config.is_large(total);
    if is_large {
        warn!(
            total,
            threshold = config.large_set_threshold,
            "Large variant set, generation may be slow"
        );
    }

    let mut combos = Vec::with_capacity(total.min(config.large_set_threshold));
    let mut iter = combinations(options);
    loop {
        let batch = iter.next_batch(config.batch_size.max(1));
        if batch.is_empty() {
            break;
        }
        combos.extend(batch);
    }

    annotate(&mut combos, existing, config.match_strategy);

    debug!(
        options = options.len(),
        combos = combos.len(),
        existing = combos.iter().filter(|c| c.is_existing).count(),
        "Generation pass complete"
    );

    Generation { combos, is_large }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: &str, name: &str, sort: i64, values: &[(&str, &str, i64)]) -> ProductOption {
        ProductOption {
            id: id.to_string(),
            name: name.to_string(),
            sort,
            values: values
                .iter()
                .map(|(id, value, sort)| ProductOptionValue {
                    id: id.to_string(),
                    value: value.to_string(),
                    sort: *sort,
                })
                .collect(),
        }
    }

    fn color_size() -> Vec<ProductOption> {
        vec![
            option("opt-color", "Color", 0, &[("v-red", "Red", 0), ("v-blue", "Blue", 1)]),
            option("opt-size", "Size", 1, &[("v-s", "S", 0), ("v-m", "M", 1)]),
        ]
    }

    fn titles(combos: &[VariantCombo]) -> Vec<&str> {
        combos.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn test_odometer_order() {
        let combos = generate(&color_size());
        assert_eq!(titles(&combos), ["Red - S", "Red - M", "Blue - S", "Blue - M"]);
        assert_eq!(combos[0].id, "v-red|v-s");
        assert_eq!(combos[3].option_value_ids, ["v-blue", "v-m"]);
    }

    #[test]
    fn test_sort_fields_drive_order_not_input_order() {
        let shuffled = vec![
            option("opt-size", "Size", 1, &[("v-m", "M", 1), ("v-s", "S", 0)]),
            option("opt-color", "Color", 0, &[("v-blue", "Blue", 1), ("v-red", "Red", 0)]),
        ];
        assert_eq!(generate(&shuffled), generate(&color_size()));
    }

    #[test]
    fn test_equal_sort_keeps_input_order() {
        let options = vec![option(
            "opt-fit",
            "Fit",
            0,
            &[("v-slim", "Slim", 0), ("v-loose", "Loose", 0)],
        )];
        assert_eq!(titles(&generate(&options)), ["Slim", "Loose"]);
    }

    #[test]
    fn test_cardinality() {
        let options = vec![
            option("a", "A", 0, &[("a1", "1", 0), ("a2", "2", 1), ("a3", "3", 2)]),
            option("b", "B", 1, &[("b1", "x", 0), ("b2", "y", 1)]),
            option("c", "C", 2, &[("c1", "p", 0), ("c2", "q", 1), ("c3", "r", 2), ("c4", "s", 3)]),
        ];
        assert_eq!(combination_count(&options), 24);
        assert_eq!(generate(&options).len(), 24);
    }

    #[test]
    fn test_no_options_is_empty() {
        assert_eq!(combination_count(&[]), 0);
        assert!(generate(&[]).is_empty());
    }

    #[test]
    fn test_option_without_values_collapses_product() {
        let mut options = color_size();
        options.push(option("opt-material", "Material", 2, &[]));

        assert_eq!(combination_count(&options), 0);
        assert!(generate(&options).is_empty());
    }

    #[test]
    fn test_ids_unique() {
        let options = vec![
            option("a", "A", 0, &[("a1", "X", 0), ("a2", "X", 1)]),
            option("b", "B", 1, &[("b1", "X", 0), ("b2", "X", 1)]),
        ];
        let combos = generate(&options);
        let mut ids: Vec<&str> = combos.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_ids_unique_with_separator_in_value_ids() {
        let options = vec![
            option("a", "A", 0, &[("x|y", "One", 0), ("x", "Two", 1)]),
            option("b", "B", 1, &[("z", "Three", 0), ("y|z", "Four", 1)]),
        ];
        let combos = generate(&options);
        let mut ids: Vec<&str> = combos.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);

        let escaped = combo_id(&["a\\".to_string(), "b".to_string()]);
        let plain = combo_id(&["a".to_string(), "\\b".to_string()]);
        assert_ne!(escaped, plain);
    }

    #[test]
    fn test_defaults_selected_and_new() {
        for combo in generate(&color_size()) {
            assert!(combo.selected);
            assert!(!combo.is_existing);
            assert!(combo.existing_variant_id.is_none());
        }
    }

    #[test]
    fn test_next_batch_chunks() {
        let options = color_size();
        let mut iter = combinations(&options);
        assert_eq!(iter.len(), 4);

        let first = iter.next_batch(3);
        assert_eq!(first.len(), 3);
        assert_eq!(iter.len(), 1);

        let second = iter.next_batch(3);
        assert_eq!(titles(&second), ["Blue - M"]);
        assert!(iter.next_batch(3).is_empty());
        assert_eq!(iter.total(), 4);
    }

    #[test]
    fn test_single_option() {
        let options = vec![option("opt-size", "size", 0, &[("v-s", "S", 0), ("v-m", "M", 1)])];
        let combos = generate(&options);
        assert_eq!(titles(&combos), ["S", "M"]);
        assert_eq!(combos[1].id, "v-m");
    }

    #[test]
    fn test_generate_annotated_flags_large_sets() {
        let values: Vec<(String, String, i64)> = (0..40)
            .map(|i| (format!("v{i}"), format!("{i}"), i))
            .collect();
        let refs: Vec<(&str, &str, i64)> = values
            .iter()
            .map(|(id, value, sort)| (id.as_str(), value.as_str(), *sort))
            .collect();
        let options = vec![option("a", "A", 0, &refs), option("b", "B", 1, &refs)];

        let config = EngineConfig::default();
        let generation = generate_annotated(&options, &[], &config);
        assert_eq!(generation.combos.len(), 1600);
        assert!(generation.is_large);

        let small = generate_annotated(&color_size(), &[], &config);
        assert!(!small.is_large);
    }
}
