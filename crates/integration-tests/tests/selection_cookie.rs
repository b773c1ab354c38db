//! Counter store behaviour over a shared cookie jar.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::thread;

use chrono::{DateTime, Duration, Utc};

use pantry_core::{ProductCounter, ProductId};
use pantry_integration_tests::{frozen_jar, test_now};
use pantry_storefront::cookies::{fixed_clock, load_jar, save_jar};
use pantry_storefront::selection::SELECTED_PRODUCTS_COOKIE;
use pantry_storefront::{CookieStore, CounterStore, LoadError, MemoryCookieStore};

fn c(id: i32, cant: i32) -> ProductCounter {
    ProductCounter::new(ProductId::new(id), cant)
}

#[test]
fn test_roundtrip_various_selections() {
    let store = CounterStore::new(frozen_jar());

    for values in [
        vec![],
        vec![c(1, 1)],
        vec![c(5, 2), c(1, 0), c(5, 9)],
        vec![c(i32::MAX, i32::MIN), c(-4, 3)],
    ] {
        store.save(&values);
        assert_eq!(store.load(), values);
    }
}

#[test]
fn test_clear_twice() {
    let store = CounterStore::new(frozen_jar());
    store.save(&[c(1, 2)]);

    store.clear();
    assert_eq!(store.load(), Vec::new());
    store.clear();
    assert_eq!(store.load(), Vec::new());
    assert_eq!(store.try_load(), Err(LoadError::Absent));
}

#[test]
fn test_clear_on_empty_jar() {
    let store = CounterStore::new(frozen_jar());
    store.clear();
    assert!(store.load().is_empty());
    assert_eq!(store.store().cookie_string(), "");
}

#[test]
fn test_corrupted_entry_reads_empty() {
    let store = CounterStore::new(frozen_jar());
    store.save(&[c(1, 2)]);
    store.store().insert_raw(SELECTED_PRODUCTS_COOKIE, "%5B%7B%22id%22%3A");

    assert!(store.load().is_empty());
    assert!(matches!(store.try_load(), Err(LoadError::Malformed(_))));
}

#[test]
fn test_unrelated_cookie_isolation() {
    let jar = frozen_jar();
    let store = CounterStore::new(jar.clone());
    store.save(&[c(2, 1)]);

    jar.insert_raw("session", "abc123");
    jar.insert_raw("selectedProductsBackup", "garbage");

    assert_eq!(store.load(), vec![c(2, 1)]);
    assert_eq!(
        jar.cookie_string(),
        format!(
            "{SELECTED_PRODUCTS_COOKIE}=%5B%7B%22id%22%3A2%2C%22cant%22%3A1%7D%5D; session=abc123; selectedProductsBackup=garbage"
        )
    );
}

#[test]
fn test_expiration_attribute() {
    let store = CounterStore::new(frozen_jar());
    store.save(&[c(1, 1)]);

    let written = store.store().last_written().unwrap();
    assert_eq!(written.expires, test_now() + Duration::days(1));
    assert_eq!(
        written.to_string(),
        "selectedProducts=%5B%7B%22id%22%3A1%2C%22cant%22%3A1%7D%5D; expires=Tue, 20 Oct 2026 12:30:00 GMT; path=/"
    );
}

#[test]
fn test_selection_expires_after_a_day() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cookies.json");

    let store = CounterStore::new(frozen_jar());
    store.save(&[c(1, 1)]);
    save_jar(store.store(), &path).unwrap();

    let almost = load_jar(&path, fixed_clock(test_now() + Duration::hours(23))).unwrap();
    assert_eq!(CounterStore::new(almost).load(), vec![c(1, 1)]);

    let expired = load_jar(&path, fixed_clock(test_now() + Duration::days(1))).unwrap();
    assert!(CounterStore::new(expired).load().is_empty());
}

#[test]
fn test_selection_survives_jar_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jar").join("cookies.json");

    let first = CounterStore::new(load_jar(&path, fixed_clock(test_now())).unwrap());
    first.increment(ProductId::new(3));
    first.increment(ProductId::new(3));
    save_jar(first.store(), &path).unwrap();

    let second = CounterStore::new(load_jar(&path, fixed_clock(test_now())).unwrap());
    assert_eq!(second.load(), vec![c(3, 2)]);
}

#[test]
fn test_shared_store_last_writer_wins() {
    let jar = Arc::new(MemoryCookieStore::with_clock(fixed_clock(
        DateTime::<Utc>::UNIX_EPOCH + Duration::days(365),
    )));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let jar = Arc::clone(&jar);
            thread::spawn(move || CounterStore::new(jar).save(&[c(i, i)]))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let loaded = CounterStore::new(Arc::clone(&jar)).load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(jar.entries().len(), 1);
    assert_eq!(jar.written().len(), 8);
}
