//! Read-only queries over the preloaded product catalog.
//!
//! The catalog is loaded once by the caller (see `pantry_storefront::assets`)
//! and never mutated afterwards, so every query is a pure linear scan that
//! returns records in storage order.
//!
//! ```
//! use pantry_core::{Catalog, CatalogRecord, ProductId, ProductType};
//!
//! let catalog = Catalog::new(vec![
//!     CatalogRecord::new(ProductId::new(1), ProductType::new(1)),
//!     CatalogRecord::new(ProductId::new(2), ProductType::new(2)),
//!     CatalogRecord::new(ProductId::new(3), ProductType::new(1)),
//! ]);
//!
//! let ids: Vec<_> = catalog.by_type(ProductType::new(1)).iter().map(|r| r.id).collect();
//! assert_eq!(ids, [ProductId::new(1), ProductId::new(3)]);
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::types::{CatalogRecord, ProductCounter, ProductId, ProductType};

/// Errors that can occur when building a [`Catalog`] from its asset.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The asset is not a JSON array of catalog records.
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable, in-memory product catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
}

impl Catalog {
    /// Wrap an already loaded list of records.
    #[must_use]
    pub const fn new(records: Vec<CatalogRecord>) -> Self {
        Self { records }
    }

    /// Parse a catalog from the JSON text of the asset.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the text is not a JSON array of
    /// records with integer `id` and `type` fields.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<CatalogRecord> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    /// Every record whose `type` equals `product_type`.
    #[must_use]
    pub fn by_type(&self, product_type: ProductType) -> Vec<&CatalogRecord> {
        self.records
            .iter()
            .filter(|record| record.product_type == product_type)
            .collect()
    }

    /// Every record whose `id` appears in `ids`.
    ///
    /// This is a membership test: repeating an id in `ids` does not repeat
    /// the record in the result.
    #[must_use]
    pub fn by_ids(&self, ids: &[ProductId]) -> Vec<&CatalogRecord> {
        if ids.is_empty() {
            return Vec::new();
        }

        let wanted: HashSet<ProductId> = ids.iter().copied().collect();
        self.records
            .iter()
            .filter(|record| wanted.contains(&record.id))
            .collect()
    }

    /// First record with the given id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CatalogRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Join a selection to its catalog records.
    ///
    /// Results follow catalog order. Counters whose id is not in the catalog
    /// are dropped. If a selection lists the same id twice, the quantities
    /// are summed.
    #[must_use]
    pub fn selected(&self, counters: &[ProductCounter]) -> Vec<(&CatalogRecord, i32)> {
        let ids: Vec<ProductId> = counters.iter().map(|c| c.id).collect();
        self.by_ids(&ids)
            .into_iter()
            .map(|record| {
                let cant = counters
                    .iter()
                    .filter(|c| c.id == record.id)
                    .fold(0_i32, |acc, c| acc.saturating_add(c.cant));
                (record, cant)
            })
            .collect()
    }

    /// Iterate over all records in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogRecord> {
        self.records.iter()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<CatalogRecord>> for Catalog {
    fn from(records: Vec<CatalogRecord>) -> Self {
        Self::new(records)
    }
}
