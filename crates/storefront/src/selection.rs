//! Cookie-backed persistence of the user's selected products.
//!
//! The selection is a list of [`ProductCounter`]s stored as percent-encoded
//! JSON in a single cookie that lives for one day:
//!
//! ```text
//! selectedProducts=%5B%7B%22id%22%3A1%2C%22cant%22%3A2%7D%5D; expires=Tue, 20 Oct 2026 10:00:00 GMT; path=/
//! ```
//!
//! Reading is fail-soft. A missing, expired or corrupted cookie reads as an
//! empty selection, so callers never handle a load error. [`CounterStore::try_load`]
//! keeps the two failure cases apart for code that cares.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use pantry_core::{ProductCounter, ProductId};

use crate::cookies::{CookieStore, SetCookie};

/// Name of the selection cookie.
pub const SELECTED_PRODUCTS_COOKIE: &str = "selectedProducts";

/// Selection lifetime in seconds (1 day).
pub const SELECTION_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Path scope of the selection cookie.
pub const COOKIE_PATH: &str = "/";

/// Selection lifetime.
#[must_use]
pub fn selection_ttl() -> Duration {
    Duration::seconds(SELECTION_TTL_SECONDS)
}

/// Why a stored selection could not be read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// No live selection cookie exists.
    #[error("no selection cookie")]
    Absent,
    /// The cookie exists but its value does not decode to a selection.
    #[error("malformed selection cookie: {0}")]
    Malformed(String),
}

/// Reads and writes the selection cookie through an injected [`CookieStore`].
#[derive(Debug, Clone)]
pub struct CounterStore<S> {
    store: S,
}

impl<S: CookieStore> CounterStore<S> {
    /// Create a counter store on top of `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying cookie store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Persist `values`, replacing any previous selection.
    ///
    /// The cookie expires [`selection_ttl`] after the store's current time.
    #[instrument(skip(self, values), fields(count = values.len()))]
    pub fn save(&self, values: &[ProductCounter]) {
        let json = match serde_json::to_string(values) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize selection");
                return;
            }
        };

        let Some(expires) = self.store.now().checked_add_signed(selection_ttl()) else {
            warn!("Selection expiry is out of range, not saving");
            return;
        };
        self.write(urlencoding::encode(&json).into_owned(), expires);
        debug!(%expires, "Saved selection");
    }

    /// Read the stored selection.
    ///
    /// Never fails: an absent or malformed cookie reads as `[]`.
    #[must_use]
    pub fn load(&self) -> Vec<ProductCounter> {
        match self.try_load() {
            Ok(values) => values,
            Err(LoadError::Absent) => Vec::new(),
            Err(LoadError::Malformed(reason)) => {
                warn!(%reason, "Ignoring malformed selection cookie");
                Vec::new()
            }
        }
    }

    /// Read the stored selection, reporting why it could not be read.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Absent`] when there is no live selection cookie
    /// and [`LoadError::Malformed`] when its value is not percent-encoded
    /// JSON of a counter list.
    pub fn try_load(&self) -> Result<Vec<ProductCounter>, LoadError> {
        let raw = self
            .store
            .get(SELECTED_PRODUCTS_COOKIE)
            .ok_or(LoadError::Absent)?;
        decode_selection(&raw)
    }

    /// Expire the selection cookie immediately. Clearing twice is harmless.
    pub fn clear(&self) {
        self.write(String::new(), DateTime::<Utc>::UNIX_EPOCH);
        debug!("Cleared selection");
    }

    /// Add one unit of `id`, appending a new counter if needed.
    ///
    /// Returns the saved selection.
    pub fn increment(&self, id: ProductId) -> Vec<ProductCounter> {
        let mut values = self.load();
        match values.iter_mut().find(|c| c.id == id) {
            Some(counter) => counter.cant = counter.cant.saturating_add(1),
            None => values.push(ProductCounter::new(id, 1)),
        }
        self.save(&values);
        values
    }

    /// Remove one unit of `id`. A counter that reaches zero is dropped.
    ///
    /// An id with no counter is a no-op: nothing is written, so the cookie
    /// keeps its value and expiry.
    ///
    /// Returns the current selection.
    pub fn decrement(&self, id: ProductId) -> Vec<ProductCounter> {
        let mut values = self.load();
        if !values.iter().any(|c| c.id == id) {
            return values;
        }
        if let Some(counter) = values.iter_mut().find(|c| c.id == id) {
            counter.cant = counter.cant.saturating_sub(1);
        }
        values.retain(|c| c.id != id || c.cant > 0);
        self.save(&values);
        values
    }

    /// Set the quantity of `id` outright. A quantity of zero or less removes
    /// the counter.
    ///
    /// Returns the saved selection.
    pub fn set_count(&self, id: ProductId, cant: i32) -> Vec<ProductCounter> {
        let mut values = self.load();
        if cant > 0 {
            match values.iter_mut().find(|c| c.id == id) {
                Some(counter) => counter.cant = cant,
                None => values.push(ProductCounter::new(id, cant)),
            }
        } else {
            values.retain(|c| c.id != id);
        }
        self.save(&values);
        values
    }

    fn write(&self, value: String, expires: DateTime<Utc>) {
        self.store.set(SetCookie {
            name: SELECTED_PRODUCTS_COOKIE.to_owned(),
            value,
            expires,
            path: COOKIE_PATH.to_owned(),
        });
    }
}

fn decode_selection(raw: &str) -> Result<Vec<ProductCounter>, LoadError> {
    let json = urlencoding::decode(raw).map_err(|e| LoadError::Malformed(e.to_string()))?;
    serde_json::from_str(&json).map_err(|e| LoadError::Malformed(e.to_string()))
}
