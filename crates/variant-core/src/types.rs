//! # Domain Types
//!
//! The shapes the engine consumes and produces.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  caller-owned (input)                 engine-owned (derived)            │
//! │  ┌─────────────────────┐              ┌─────────────────────┐           │
//! │  │   ProductOption     │  generate    │    VariantCombo     │           │
//! │  │  ─────────────────  │ ───────────► │  ─────────────────  │           │
//! │  │  id, name, sort     │              │  id (value ids)     │           │
//! │  │  values[]  ─────────┼──┐           │  title "Red - S"    │           │
//! │  └─────────────────────┘  │           │  selected           │           │
//! │  ┌─────────────────────┐  │           │  is_existing        │           │
//! │  │ ProductOptionValue  │◄─┘           └──────────┬──────────┘           │
//! │  │  id, value, sort    │                         │ resolve              │
//! │  └─────────────────────┘                         ▼                      │
//! │                                       ┌─────────────────────┐           │
//! │  caller-owned (input + output)        │   ProductVariant    │           │
//! │  ─────────────────────────────────►   │  name, prices,      │           │
//! │  existing variants                    │  size/color/weight  │           │
//! │                                       └─────────────────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Field names follow the catalog API exactly: `optionValueIds`,
//! `customTitle`, `isExisting` and `existingVariantId` are camelCase, the
//! remaining variant fields are snake_case.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::matcher::normalize_title;
use crate::money::Money;

// =============================================================================
// Product Option
// =============================================================================

/// One value on an option axis (e.g. "Red" on "Color").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductOptionValue {
    /// Identifier, unique within its option.
    pub id: String,

    /// Display text; becomes part of the variant title.
    pub value: String,

    /// Enumeration order within the option (ascending).
    #[serde(default)]
    pub sort: i64,
}

/// A configurable product axis (e.g. "Color", "Size").
///
/// A missing `values` array deserializes to an empty list. An option with no
/// values collapses the whole Cartesian product to zero combinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductOption {
    pub id: String,

    /// Axis name. `size`, `color` and `weight` (exact, lowercase) are
    /// projected onto the dedicated variant fields.
    pub name: String,

    #[serde(default)]
    pub values: Vec<ProductOptionValue>,

    /// Enumeration order among options (ascending).
    #[serde(default)]
    pub sort: i64,
}

impl ProductOption {
    /// Looks up a value of this option by id.
    pub fn value_by_id(&self, value_id: &str) -> Option<&ProductOptionValue> {
        self.values.iter().find(|v| v.id == value_id)
    }
}

// =============================================================================
// Product Variant
// =============================================================================

/// A sellable variant as persisted by the catalog API.
///
/// Every field except `name` has a default so partial payloads from the
/// dashboard deserialize cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ProductVariant {
    /// Persisted id. `None` only for variants the caller has not saved yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Option value ids this variant was built from. Legacy variants lack it.
    #[serde(rename = "optionValueIds", skip_serializing_if = "Option::is_none")]
    pub option_value_ids: Option<Vec<String>>,

    #[serde(rename = "customTitle", skip_serializing_if = "Option::is_none")]
    pub custom_title: Option<String>,

    /// Display name; for generated variants this is the combo title.
    pub name: String,

    pub price: Money,
    pub mrp: Money,
    pub csp: Money,
    pub cust_discount: Money,

    pub stock_quantity: i64,
    pub max_purchase_limit: i64,
    pub threshold: i64,

    pub ean_number: String,

    pub size: String,
    pub color: String,
    pub weight: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_qty: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ProductVariant {
    /// Name as used for title matching: trimmed and lowercased.
    pub fn normalized_name(&self) -> String {
        normalize_title(&self.name)
    }

    /// Option value ids, treating an empty list the same as a missing one.
    pub fn value_ids(&self) -> Option<&[String]> {
        self.option_value_ids
            .as_deref()
            .filter(|ids| !ids.is_empty())
    }
}

// =============================================================================
// Variant Combo
// =============================================================================

/// One element of the Cartesian product of the option values.
///
/// Created fresh on every generation pass and never persisted. Only
/// `selected` changes after generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VariantCombo {
    /// Value ids joined by [`COMBO_ID_SEPARATOR`](crate::COMBO_ID_SEPARATOR).
    pub id: String,

    /// One value id per option, in option order.
    pub option_value_ids: Vec<String>,

    /// Value texts joined by `" - "`.
    pub title: String,

    pub selected: bool,

    pub is_existing: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_variant_id: Option<String>,
}

impl VariantCombo {
    /// True when no existing variant matched this combo.
    #[inline]
    pub fn is_new(&self) -> bool {
        !self.is_existing
    }

    /// Checks whether the combo uses the given option value.
    pub fn contains_value(&self, value_id: &str) -> bool {
        self.option_value_ids.iter().any(|id| id == value_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
