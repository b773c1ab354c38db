//! Application state shared across consumers.
//!
//! Built once at startup and passed explicitly to whatever needs the catalog
//! or the selection. There is no global instance.

use std::sync::Arc;

use pantry_core::{Catalog, CatalogRecord};

use crate::cookies::CookieStore;
use crate::selection::CounterStore;

/// Application state.
///
/// This struct is cheaply cloneable via `Arc` when the cookie store is.
#[derive(Clone)]
pub struct AppState<S> {
    catalog: Arc<Catalog>,
    selection: CounterStore<S>,
}

impl<S: CookieStore> AppState<S> {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Preloaded catalog
    /// * `cookies` - Cookie store backing the selection
    #[must_use]
    pub fn new(catalog: Catalog, cookies: S) -> Self {
        Self {
            catalog: Arc::new(catalog),
            selection: CounterStore::new(cookies),
        }
    }

    /// Get a reference to the catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get a reference to the selection store.
    #[must_use]
    pub const fn selection(&self) -> &CounterStore<S> {
        &self.selection
    }

    /// Catalog records for the stored selection with their quantities.
    #[must_use]
    pub fn selected_products(&self) -> Vec<(CatalogRecord, i32)> {
        let counters = self.selection.load();
        self.catalog
            .selected(&counters)
            .into_iter()
            .map(|(record, cant)| (record.clone(), cant))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pantry_core::{ProductId, ProductType};

    use super::*;
    use crate::cookies::MemoryCookieStore;

    #[test]
    fn test_selected_products() {
        let catalog = Catalog::new(vec![
            CatalogRecord::new(ProductId::new(1), ProductType::new(1)),
            CatalogRecord::new(ProductId::new(2), ProductType::new(1)),
        ]);
        let state = AppState::new(catalog, MemoryCookieStore::new());

        assert!(state.selected_products().is_empty());

        state.selection().increment(ProductId::new(2));
        state.selection().increment(ProductId::new(2));

        let selected = state.selected_products();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].0.id, ProductId::new(2));
        assert_eq!(selected[0].1, 2);
    }

    #[test]
    fn test_clones_share_selection() {
        let state = AppState::new(Catalog::default(), MemoryCookieStore::new());
        let other = state.clone();

        other.selection().increment(ProductId::new(5));
        assert_eq!(state.selection().load().len(), 1);
    }
}
