//! # Existing-Variant Matcher
//!
//! Marks generated combos that already exist as persisted variants.
//!
//! ## Matching Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Existing-Variant Matching                            │
//! │                                                                         │
//! │  existing variants ──► ExistingIndex                                   │
//! │                        ├── by_title:      "red - s" → pv-1             │
//! │                        ├── by_value_set:  [v-red,v-s] → pv-1           │
//! │                        └── legacy_titles: names of variants w/o ids    │
//! │                                                                         │
//! │  combo "Red - S" ──► normalize ──► "red - s"                           │
//! │                                     │                                   │
//! │        MatchStrategy::Title         ▼                                   │
//! │        ────────────────────  by_title lookup                            │
//! │                                                                         │
//! │        MatchStrategy::OptionValuesThenTitle                            │
//! │        ────────────────────  by_value_set lookup,                       │
//! │                              then legacy_titles lookup                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Duplicate Names
//! When several existing variants normalize to the same key, the one with
//! the lowest `id` wins, and a variant with an id beats one without. The
//! outcome never depends on the order the caller listed variants in.

use std::collections::HashMap;

use crate::config::MatchStrategy;
use crate::types::{ProductVariant, VariantCombo};

/// Normalizes a title or variant name for comparison: trimmed, lowercased.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Order-independent key for a set of option value ids.
pub fn value_set_key(ids: &[String]) -> Vec<String> {
    let mut key = ids.to_vec();
    key.sort_unstable();
    key
}

/// Tie-break ordering: variants with an id first, then ascending id.
fn precedes(candidate: &ProductVariant, current: &ProductVariant) -> bool {
    let key = |v: &ProductVariant| (v.id.is_none(), v.id.clone());
    key(candidate) < key(current)
}

fn insert_preferred<'a, K: std::hash::Hash + Eq>(
    map: &mut HashMap<K, &'a ProductVariant>,
    key: K,
    variant: &'a ProductVariant,
) {
    map.entry(key)
        .and_modify(|current| {
            if precedes(variant, current) {
                *current = variant;
            }
        })
        .or_insert(variant);
}

// =============================================================================
// Existing Index
// =============================================================================

/// Lookup tables over the caller's existing variants.
#[derive(Debug, Default)]
pub struct ExistingIndex<'a> {
    by_title: HashMap<String, &'a ProductVariant>,
    by_value_set: HashMap<Vec<String>, &'a ProductVariant>,
    legacy_titles: HashMap<String, &'a ProductVariant>,
}

impl<'a> ExistingIndex<'a> {
    pub fn new(existing: &'a [ProductVariant]) -> Self {
        let mut index = ExistingIndex::default();

        for variant in existing {
            let title = variant.normalized_name();
            insert_preferred(&mut index.by_title, title.clone(), variant);

            match variant.value_ids() {
                Some(ids) => insert_preferred(&mut index.by_value_set, value_set_key(ids), variant),
                None => insert_preferred(&mut index.legacy_titles, title, variant),
            }
        }

        index
    }

    /// Finds the existing variant a combo corresponds to.
    pub fn find(&self, combo: &VariantCombo, strategy: MatchStrategy) -> Option<&'a ProductVariant> {
        let title = normalize_title(&combo.title);
        match strategy {
            MatchStrategy::Title => self.by_title.get(&title).copied(),
            MatchStrategy::OptionValuesThenTitle => self
                .by_value_set
                .get(&value_set_key(&combo.option_value_ids))
                .or_else(|| self.legacy_titles.get(&title))
                .copied(),
        }
    }
}

// =============================================================================
// Annotation
// =============================================================================

/// Sets `is_existing` and `existing_variant_id` on every combo and resets
/// `selected` to true.
pub fn annotate(combos: &mut [VariantCombo], existing: &[ProductVariant], strategy: MatchStrategy) {
    let index = ExistingIndex::new(existing);

    for combo in combos.iter_mut() {
        let matched = index.find(combo, strategy);
        combo.selected = true;
        combo.is_existing = matched.is_some();
        combo.existing_variant_id = matched.and_then(|v| v.id.clone());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(id: Option<&str>, name: &str, ids: Option<&[&str]>) -> ProductVariant {
        ProductVariant {
            id: id.map(str::to_string),
            name: name.to_string(),
            option_value_ids: ids.map(|ids| ids.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    fn combo(title: &str, ids: &[&str]) -> VariantCombo {
        let option_value_ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
        VariantCombo {
            id: option_value_ids.join("|"),
            option_value_ids,
            title: title.to_string(),
            selected: false,
            is_existing: false,
            existing_variant_id: None,
        }
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  Red - S  "), "red - s");
        assert_eq!(normalize_title("BLUE"), "blue");
    }

    #[test]
    fn test_value_set_key_ignores_order() {
        let a = vec!["v-red".to_string(), "v-s".to_string()];
        let b = vec!["v-s".to_string(), "v-red".to_string()];
        assert_eq!(value_set_key(&a), value_set_key(&b));
        assert_ne!(value_set_key(&a), value_set_key(&b[..1]));
    }

    #[test]
    fn test_title_match_is_case_and_space_insensitive() {
        let existing = vec![variant(Some("pv-1"), "  s ", None)];
        let mut combos = vec![combo("S", &["v-s"]), combo("M", &["v-m"])];

        annotate(&mut combos, &existing, MatchStrategy::Title);

        assert!(combos[0].is_existing);
        assert_eq!(combos[0].existing_variant_id.as_deref(), Some("pv-1"));
        assert!(!combos[1].is_existing);
        assert!(combos.iter().all(|c| c.selected));
    }

    #[test]
    fn test_duplicate_names_pick_lowest_id() {
        let forward = vec![
            variant(Some("pv-9"), "Red", None),
            variant(None, "red", None),
            variant(Some("pv-2"), "RED", None),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        for existing in [forward, reversed] {
            let mut combos = vec![combo("Red", &["v-red"])];
            annotate(&mut combos, &existing, MatchStrategy::Title);
            assert_eq!(combos[0].existing_variant_id.as_deref(), Some("pv-2"));
        }
    }

    #[test]
    fn test_existing_without_id_still_marks_existing() {
        let existing = vec![variant(None, "Red", None)];
        let mut combos = vec![combo("Red", &["v-red"])];
        annotate(&mut combos, &existing, MatchStrategy::Title);

        assert!(combos[0].is_existing);
        assert!(combos[0].existing_variant_id.is_none());
    }

    #[test]
    fn test_two_tier_prefers_value_ids() {
        // Same display text, different option values.
        let existing = vec![variant(Some("pv-1"), "S", Some(&["v-fit-s"]))];
        let mut combos = vec![combo("S", &["v-size-s"]), combo("S", &["v-fit-s"])];

        annotate(&mut combos, &existing, MatchStrategy::OptionValuesThenTitle);
        assert!(!combos[0].is_existing);
        assert!(combos[1].is_existing);

        annotate(&mut combos, &existing, MatchStrategy::Title);
        assert!(combos[0].is_existing);
        assert!(combos[1].is_existing);
    }

    #[test]
    fn test_two_tier_falls_back_to_title_for_legacy_variants() {
        let existing = vec![variant(Some("pv-legacy"), "Blue - M", None)];
        let mut combos = vec![combo("Blue - M", &["v-blue", "v-m"])];

        annotate(&mut combos, &existing, MatchStrategy::OptionValuesThenTitle);
        assert_eq!(combos[0].existing_variant_id.as_deref(), Some("pv-legacy"));
    }

    #[test]
    fn test_annotate_resets_selection() {
        let mut combos = vec![combo("Red", &["v-red"])];
        annotate(&mut combos, &[], MatchStrategy::Title);
        assert!(combos[0].selected);
        assert!(!combos[0].is_existing);
    }
}
