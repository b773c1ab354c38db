//! Selection management commands.
//!
//! # Usage
//!
//! ```bash
//! pantry selection add 3
//! pantry selection set 3 5
//! pantry selection remove 3
//! pantry selection show
//! pantry selection cookie
//! pantry selection clear
//! ```
//!
//! The selection lives in the cookie jar file configured by
//! `PANTRY_COOKIE_JAR`, so it expires one day after the last change just as
//! it would in a browser.

use std::io::Write;
use std::path::Path;

use pantry_core::{Catalog, ProductCounter, ProductId, total_quantity};
use pantry_storefront::cookies::{Clock, load_jar, save_jar};
use pantry_storefront::{AppError, CookieStore, CounterStore, MemoryCookieStore};

/// Open the jar file at `path`, run `action` on the selection it holds,
/// then write the jar back.
///
/// The jar is not written if `action` fails.
///
/// # Errors
///
/// Returns an error if the jar cannot be read or written, or if `action`
/// fails.
pub fn with_jar<T>(
    path: &Path,
    clock: Clock,
    action: impl FnOnce(&CounterStore<MemoryCookieStore>) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let store = CounterStore::new(load_jar(path, clock)?);
    let result = action(&store)?;
    save_jar(store.store(), path)?;
    Ok(result)
}

/// Print the stored selection joined with the catalog, one JSON line per
/// product, followed by a total.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn show<S: CookieStore>(
    store: &CounterStore<S>,
    catalog: &Catalog,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let counters = store.load();
    for (record, cant) in catalog.selected(&counters) {
        let line = serde_json::json!({ "cant": cant, "product": record });
        writeln!(out, "{line}")?;
    }

    let unknown = counters
        .iter()
        .filter(|c| catalog.get(c.id).is_none())
        .count();
    if unknown > 0 {
        tracing::warn!(unknown, "Selection references products missing from the catalog");
    }

    writeln!(out, "total: {}", total_quantity(&counters))?;
    Ok(())
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn add<S: CookieStore>(
    store: &CounterStore<S>,
    id: ProductId,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let values = store.increment(id);
    write_counters(&values, out)
}

/// Remove one unit of a product.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn remove<S: CookieStore>(
    store: &CounterStore<S>,
    id: ProductId,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let values = store.decrement(id);
    write_counters(&values, out)
}

/// Set the quantity of a product.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn set<S: CookieStore>(
    store: &CounterStore<S>,
    id: ProductId,
    cant: i32,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let values = store.set_count(id, cant);
    write_counters(&values, out)
}

/// Forget the selection.
pub fn clear<S: CookieStore>(store: &CounterStore<S>) {
    store.clear();
    tracing::info!("Selection cleared");
}

/// Print the raw cookie string the selection is read from.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn cookie<S: CookieStore>(
    store: &CounterStore<S>,
    out: &mut impl Write,
) -> Result<(), AppError> {
    writeln!(out, "{}", store.store().cookie_string())?;
    Ok(())
}

fn write_counters(values: &[ProductCounter], out: &mut impl Write) -> Result<(), AppError> {
    writeln!(out, "{}", serde_json::to_string(values)?)?;
    Ok(())
}
