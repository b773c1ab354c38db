//! Pantry Core - Shared types library.
//!
//! This crate provides the types used across all Pantry components:
//! - `storefront` - Selection persistence and catalog asset loading
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure queries - no file access,
//! no cookie handling. The catalog is handed in already loaded, which keeps
//! this crate usable anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, selection counters, and catalog records
//! - [`catalog`] - Read-only queries over a preloaded catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod types;

pub use catalog::{Catalog, CatalogError};
pub use types::*;
