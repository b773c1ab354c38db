//! Integration tests for Pantry.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pantry-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `selection_cookie` - Counter store behaviour over a shared cookie jar
//! - `catalog_queries` - Catalog filters over a loaded asset
//!
//! This crate only holds fixtures shared by the test files.

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::{DateTime, TimeZone, Utc};

use pantry_core::Catalog;
use pantry_storefront::MemoryCookieStore;
use pantry_storefront::cookies::fixed_clock;

/// Catalog asset used across tests.
pub const FOODS_JSON: &str = r#"[
    {"id": 1, "type": 1, "name": "Arepa", "price": 2.5},
    {"id": 2, "type": 2, "name": "Jugo de mora", "price": 1.75},
    {"id": 3, "type": 1, "name": "Empanada", "price": 1.0}
]"#;

/// Fixed "now" for deterministic expiration checks.
///
/// # Panics
///
/// Never: the date is a valid constant.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 30, 0).unwrap()
}

/// An empty jar frozen at [`test_now`].
#[must_use]
pub fn frozen_jar() -> MemoryCookieStore {
    MemoryCookieStore::with_clock(fixed_clock(test_now()))
}

/// The catalog parsed from [`FOODS_JSON`].
///
/// # Panics
///
/// Never: the fixture is valid JSON.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn foods() -> Catalog {
    Catalog::from_json_str(FOODS_JSON).unwrap()
}
