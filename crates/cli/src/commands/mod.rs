//! Subcommand implementations.
//!
//! Commands write their output to the given writer so they can be exercised
//! in tests without capturing stdout.

pub mod foods;
pub mod selection;
