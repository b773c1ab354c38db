//! Core types for Pantry.
//!
//! This module provides type-safe wrappers for the catalog and selection
//! domain.

pub mod counter;
pub mod id;
pub mod record;

pub use counter::{ProductCounter, total_quantity};
pub use id::*;
pub use record::CatalogRecord;
