//! Catalog records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::{ProductId, ProductType};

/// A single product in the static catalog asset.
///
/// Only `id` and `type` are interpreted. Every other field (name, price,
/// image, ...) is carried through untouched in [`CatalogRecord::extra`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Product identifier.
    pub id: ProductId,
    /// Category type used by [`crate::Catalog::by_type`].
    #[serde(rename = "type")]
    pub product_type: ProductType,
    /// Descriptive fields opaque to Pantry.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogRecord {
    /// Create a record with no descriptive fields.
    #[must_use]
    pub fn new(id: ProductId, product_type: ProductType) -> Self {
        Self {
            id,
            product_type,
            extra: Map::new(),
        }
    }

    /// Attach a descriptive field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Look up a descriptive field by name.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}
