//! # Builder Input
//!
//! The JSON document the CLI consumes, in the dashboard's own shapes:
//!
//! ```json
//! {
//!   "options": [
//!     { "id": "opt-color", "name": "color", "sort": 0,
//!       "values": [{ "id": "v-red", "value": "Red", "sort": 0 }] }
//!   ],
//!   "existingVariants": [
//!     { "id": "pv-1", "name": "Red", "mrp": 49900 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::debug;
use variant_core::{ProductOption, ProductVariant};

use crate::error::CliResult;

/// Options plus the variants already persisted for the product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderInput {
    pub options: Vec<ProductOption>,

    #[serde(default)]
    pub existing_variants: Vec<ProductVariant>,
}

impl BuilderInput {
    /// Reads input from a file, or from stdin when `path` is `-`.
    pub fn read(path: &Path) -> CliResult<Self> {
        let contents = if path == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            std::fs::read_to_string(path)?
        };

        let input = Self::parse(&contents)?;
        debug!(
            ?path,
            options = input.options.len(),
            existing = input.existing_variants.len(),
            "Input loaded"
        );
        Ok(input)
    }

    pub fn parse(contents: &str) -> CliResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }
}
