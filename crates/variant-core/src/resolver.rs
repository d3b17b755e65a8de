//! # Merge / Regenerate Resolver
//!
//! Turns the selection state into the variant list the caller persists.
//!
//! ## Strategies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Resolve Modes                                   │
//! │                                                                         │
//! │  REGENERATE                          │  MERGE                           │
//! │  ──────────                          │  ─────                           │
//! │  • one variant per selected combo    │  • every existing variant kept   │
//! │  • matched combos reuse the          │  • orphans emitted inactive      │
//! │    existing id and stored fields     │  • new selected combos appended  │
//! │  • unselected combos omitted; the    │  • nothing is ever dropped       │
//! │    caller treats omission as delete  │                                  │
//! │                                                                         │
//! │  Example: existing [Red - S], combos [Red - S, Red - M] (both selected) │
//! │  REGENERATE → [Red - S (same id), Red - M (new id)]                     │
//! │  MERGE      → [Red - S (unchanged, active), Red - M (new id)]           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Attribute Projection
//! Options named exactly `size`, `color` or `weight` fill the matching
//! variant field with the combo's value text. The match is case-sensitive;
//! an option called `Color` is not projected.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;
use uuid::Uuid;

use crate::config::MatchStrategy;
use crate::error::CoreError;
use crate::generator::{ordered_options, OrderedOption};
use crate::matcher::{normalize_title, value_set_key, ExistingIndex};
use crate::types::{ProductOption, ProductVariant, VariantCombo};
use crate::{COLOR_OPTION, SIZE_OPTION, WEIGHT_OPTION};

// =============================================================================
// Resolve Mode
// =============================================================================

/// Resolution strategy chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ResolveMode {
    /// Keep exactly the selected combos.
    #[default]
    Regenerate,

    /// Keep every existing variant, deactivate orphans, add new selections.
    Merge,
}

impl std::fmt::Display for ResolveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveMode::Regenerate => write!(f, "regenerate"),
            ResolveMode::Merge => write!(f, "merge"),
        }
    }
}

impl std::str::FromStr for ResolveMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "regenerate" | "regen" | "replace" => Ok(ResolveMode::Regenerate),
            "merge" | "keep" => Ok(ResolveMode::Merge),
            other => Err(CoreError::UnknownResolveMode(other.to_string())),
        }
    }
}

// =============================================================================
// Projection
// =============================================================================

#[derive(Debug, Default)]
struct Projection {
    size: String,
    color: String,
    weight: String,
}

/// Reads size/color/weight text for a combo. Value ids are paired with the
/// ordered options by position; ids that do not resolve project nothing.
fn project(combo: &VariantCombo, axes: &[OrderedOption<'_>]) -> Projection {
    let mut projection = Projection::default();

    for (axis, value_id) in axes.iter().zip(&combo.option_value_ids) {
        let Some(value) = axis.option.value_by_id(value_id) else {
            continue;
        };
        let slot = match axis.option.name.as_str() {
            SIZE_OPTION => &mut projection.size,
            COLOR_OPTION => &mut projection.color,
            WEIGHT_OPTION => &mut projection.weight,
            _ => continue,
        };
        *slot = value.value.clone();
    }

    projection
}

fn new_variant(combo: &VariantCombo, axes: &[OrderedOption<'_>]) -> ProductVariant {
    let projection = project(combo, axes);

    ProductVariant {
        id: Some(Uuid::new_v4().to_string()),
        option_value_ids: Some(combo.option_value_ids.clone()),
        name: combo.title.clone(),
        size: projection.size,
        color: projection.color,
        weight: projection.weight,
        is_active: Some(true),
        ..Default::default()
    }
}

/// Existing record refreshed from its combo. Prices, stock and EAN carry
/// over untouched.
fn updated_variant(
    existing: &ProductVariant,
    combo: &VariantCombo,
    axes: &[OrderedOption<'_>],
) -> ProductVariant {
    let projection = project(combo, axes);

    ProductVariant {
        id: existing
            .id
            .clone()
            .or_else(|| Some(Uuid::new_v4().to_string())),
        option_value_ids: Some(combo.option_value_ids.clone()),
        name: combo.title.clone(),
        size: projection.size,
        color: projection.color,
        weight: projection.weight,
        is_active: Some(true),
        ..existing.clone()
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Produces the final variant list for `mode`.
///
/// `strategy` must be the one the combos were annotated with; regenerate
/// uses it to find matched variants that have no id.
///
/// Pure apart from id generation: new variants get a fresh UUID v4.
pub fn resolve(
    mode: ResolveMode,
    combos: &[VariantCombo],
    existing: &[ProductVariant],
    options: &[ProductOption],
    strategy: MatchStrategy,
) -> Vec<ProductVariant> {
    let axes = ordered_options(options);

    let variants = match mode {
        ResolveMode::Regenerate => regenerate(combos, existing, &axes, strategy),
        ResolveMode::Merge => merge(combos, existing, &axes),
    };

    let inactive = variants
        .iter()
        .filter(|v| v.is_active == Some(false))
        .count();
    info!(
        %mode,
        combos = combos.len(),
        existing = existing.len(),
        emitted = variants.len(),
        inactive,
        "Variants resolved"
    );

    variants
}

fn regenerate(
    combos: &[VariantCombo],
    existing: &[ProductVariant],
    axes: &[OrderedOption<'_>],
    strategy: MatchStrategy,
) -> Vec<ProductVariant> {
    let by_id: HashMap<&str, &ProductVariant> = existing
        .iter()
        .filter_map(|v| v.id.as_deref().map(|id| (id, v)))
        .collect();
    let index = ExistingIndex::new(existing);

    combos
        .iter()
        .filter(|c| c.selected)
        .map(|combo| {
            let matched = match combo.existing_variant_id.as_deref() {
                Some(id) => by_id.get(id).copied(),
                // Existing variants without an id are found again by lookup.
                None if combo.is_existing => index.find(combo, strategy),
                None => None,
            };

            match matched {
                Some(existing) => updated_variant(existing, combo, axes),
                None => new_variant(combo, axes),
            }
        })
        .collect()
}

/// Keeps every existing variant, active only while some combo still
/// carries its value-id set (or, for legacy variants without ids, its
/// title), then appends one new variant per selected new combo.
///
/// Newness comes from annotation. Under [`MatchStrategy::Title`] an
/// existing variant whose value ids match a combo but whose name differs
/// stays active here and the combo is still new, so both are emitted.
/// [`MatchStrategy::OptionValuesThenTitle`] avoids that duplicate.
fn merge(
    combos: &[VariantCombo],
    existing: &[ProductVariant],
    axes: &[OrderedOption<'_>],
) -> Vec<ProductVariant> {
    let combo_sets: HashSet<Vec<String>> = combos
        .iter()
        .map(|c| value_set_key(&c.option_value_ids))
        .collect();
    let combo_titles: HashSet<String> = combos.iter().map(|c| normalize_title(&c.title)).collect();

    let mut variants: Vec<ProductVariant> = existing
        .iter()
        .map(|variant| {
            let still_generated = match variant.value_ids() {
                Some(ids) => combo_sets.contains(&value_set_key(ids)),
                None => combo_titles.contains(&variant.normalized_name()),
            };

            ProductVariant {
                is_active: Some(still_generated),
                ..variant.clone()
            }
        })
        .collect();

    variants.extend(
        combos
            .iter()
            .filter(|c| c.selected && c.is_new())
            .map(|combo| new_variant(combo, axes)),
    );

    variants
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use crate::matcher::annotate;
    use crate::money::Money;
    use crate::types::ProductOptionValue;

    fn option(id: &str, name: &str, sort: i64, values: &[(&str, &str)]) -> ProductOption {
        ProductOption {
            id: id.to_string(),
            name: name.to_string(),
            sort,
            values: values
                .iter()
                .enumerate()
                .map(|(idx, (id, value))| ProductOptionValue {
                    id: id.to_string(),
                    value: value.to_string(),
                    sort: idx as i64,
                })
                .collect(),
        }
    }

    fn apparel() -> Vec<ProductOption> {
        vec![
            option("opt-color", "color", 0, &[("v-red", "Red"), ("v-blue", "Blue")]),
            option("opt-size", "size", 1, &[("v-s", "S"), ("v-m", "M")]),
            option("opt-fabric", "fabric", 2, &[("v-cotton", "Cotton")]),
        ]
    }

    fn annotated(options: &[ProductOption], existing: &[ProductVariant]) -> Vec<VariantCombo> {
        let mut combos = generate(options);
        annotate(&mut combos, existing, MatchStrategy::Title);
        combos
    }

    #[test]
    fn test_resolve_mode_parse() {
        assert_eq!("MERGE".parse::<ResolveMode>().unwrap(), ResolveMode::Merge);
        assert_eq!("regen".parse::<ResolveMode>().unwrap(), ResolveMode::Regenerate);
        assert!(matches!(
            "upsert".parse::<ResolveMode>(),
            Err(CoreError::UnknownResolveMode(_))
        ));
        assert_eq!(ResolveMode::Merge.to_string(), "merge");
    }

    #[test]
    fn test_projection_uses_exact_lowercase_names() {
        let options = apparel();
        let combos = annotated(&options, &[]);
        let variants = resolve(ResolveMode::Regenerate, &combos, &[], &options, MatchStrategy::Title);

        assert_eq!(variants[0].name, "Red - S - Cotton");
        assert_eq!(variants[0].color, "Red");
        assert_eq!(variants[0].size, "S");
        assert_eq!(variants[0].weight, "");
    }

    #[test]
    fn test_projection_is_case_sensitive() {
        let options = vec![option("opt-color", "Color", 0, &[("v-red", "Red")])];
        let combos = annotated(&options, &[]);
        let variants = resolve(ResolveMode::Regenerate, &combos, &[], &options, MatchStrategy::Title);
        assert_eq!(variants[0].color, "");
    }

    #[test]
    fn test_new_variants_are_zeroed_and_active() {
        let options = apparel();
        let combos = annotated(&options, &[]);
        let variants = resolve(ResolveMode::Regenerate, &combos, &[], &options, MatchStrategy::Title);

        assert_eq!(variants.len(), 4);
        for variant in &variants {
            assert!(variant.id.is_some());
            assert_eq!(variant.is_active, Some(true));
            assert!(variant.price.is_zero());
            assert!(variant.mrp.is_zero());
            assert!(variant.csp.is_zero());
            assert!(variant.cust_discount.is_zero());
            assert_eq!(variant.stock_quantity, 0);
            assert_eq!(variant.max_purchase_limit, 0);
            assert_eq!(variant.threshold, 0);
            assert_eq!(variant.ean_number, "");
        }

        let ids: HashSet<&str> = variants.iter().filter_map(|v| v.id.as_deref()).collect();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_regenerate_reuses_existing_record() {
        let options = apparel();
        let existing = vec![ProductVariant {
            id: Some("pv-1".to_string()),
            name: "red - s - cotton".to_string(),
            mrp: Money::from(49_900),
            stock_quantity: 12,
            ean_number: "8901234567890".to_string(),
            is_active: Some(false),
            ..Default::default()
        }];
        let combos = annotated(&options, &existing);
        let variants = resolve(ResolveMode::Regenerate, &combos, &existing, &options, MatchStrategy::Title);

        let reused = &variants[0];
        assert_eq!(reused.id.as_deref(), Some("pv-1"));
        assert_eq!(reused.name, "Red - S - Cotton");
        assert_eq!(reused.mrp, Money::from(49_900));
        assert_eq!(reused.stock_quantity, 12);
        assert_eq!(reused.ean_number, "8901234567890");
        assert_eq!(reused.is_active, Some(true));
        assert_eq!(
            reused.option_value_ids.as_deref(),
            Some(&["v-red".to_string(), "v-s".to_string(), "v-cotton".to_string()][..])
        );
    }

    #[test]
    fn test_regenerate_existing_without_id_gets_one() {
        let options = apparel();
        let existing = vec![ProductVariant {
            name: "Blue - M - Cotton".to_string(),
            stock_quantity: 3,
            ..Default::default()
        }];
        let combos = annotated(&options, &existing);
        let variants = resolve(ResolveMode::Regenerate, &combos, &existing, &options, MatchStrategy::Title);

        let blue_m = variants.iter().find(|v| v.name == "Blue - M - Cotton").unwrap();
        assert!(blue_m.id.is_some());
        assert_eq!(blue_m.stock_quantity, 3);
    }

    #[test]
    fn test_regenerate_keeps_value_set_match_without_id() {
        let options = vec![option("opt-size", "size", 0, &[("v-s", "S"), ("v-m", "M")])];
        let existing = vec![ProductVariant {
            option_value_ids: Some(vec!["v-s".to_string()]),
            name: "Small".to_string(),
            stock_quantity: 7,
            ean_number: "8901234567890".to_string(),
            ..Default::default()
        }];
        let mut combos = generate(&options);
        annotate(&mut combos, &existing, MatchStrategy::OptionValuesThenTitle);
        assert!(combos[0].is_existing);
        assert!(combos[0].existing_variant_id.is_none());

        let variants = resolve(
            ResolveMode::Regenerate,
            &combos,
            &existing,
            &options,
            MatchStrategy::OptionValuesThenTitle,
        );

        let small = &variants[0];
        assert_eq!(small.name, "S");
        assert_eq!(small.stock_quantity, 7);
        assert_eq!(small.ean_number, "8901234567890");
        assert!(small.id.is_some());
        assert_eq!(variants[1].stock_quantity, 0);
    }

    #[test]
    fn test_regenerate_drops_unselected() {
        let options = apparel();
        let mut combos = annotated(&options, &[]);
        combos[1].selected = false;

        let variants = resolve(ResolveMode::Regenerate, &combos, &[], &options, MatchStrategy::Title);
        assert_eq!(variants.len(), 3);
        assert!(variants.iter().all(|v| v.name != combos[1].title));
    }

    #[test]
    fn test_merge_deactivates_by_value_set() {
        let options = apparel();
        let existing = vec![
            ProductVariant {
                id: Some("pv-keep".to_string()),
                name: "Old label".to_string(),
                option_value_ids: Some(vec![
                    "v-cotton".to_string(),
                    "v-s".to_string(),
                    "v-blue".to_string(),
                ]),
                ..Default::default()
            },
            ProductVariant {
                id: Some("pv-gone".to_string()),
                name: "Green - S".to_string(),
                option_value_ids: Some(vec!["v-green".to_string(), "v-s".to_string()]),
                ..Default::default()
            },
        ];
        let combos = annotated(&options, &existing);
        let variants = resolve(ResolveMode::Merge, &combos, &existing, &options, MatchStrategy::Title);

        assert_eq!(variants[0].id.as_deref(), Some("pv-keep"));
        assert_eq!(variants[0].name, "Old label");
        assert_eq!(variants[0].is_active, Some(true));
        assert_eq!(variants[1].id.as_deref(), Some("pv-gone"));
        assert_eq!(variants[1].is_active, Some(false));
        // Neither title matched, so all four combos are new, including the
        // one whose value ids pv-keep already carries.
        assert_eq!(variants.len(), 6);
        assert!(variants[2..].iter().any(|v| v.name == "Blue - S - Cotton"));
    }

    #[test]
    fn test_merge_ignores_selection_for_existing() {
        let options = apparel();
        let existing = vec![ProductVariant {
            id: Some("pv-1".to_string()),
            name: "Red - S - Cotton".to_string(),
            ..Default::default()
        }];
        let mut combos = annotated(&options, &existing);
        for combo in &mut combos {
            combo.selected = false;
        }

        let variants = resolve(ResolveMode::Merge, &combos, &existing, &options, MatchStrategy::Title);
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].is_active, Some(true));
    }
}
