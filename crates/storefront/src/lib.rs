//! Pantry Storefront library.
//!
//! Persistence of the user's product selection in a cookie, loading of the
//! catalog asset, and the configuration that ties them together.
//!
//! # Modules
//!
//! - [`cookies`] - Injectable cookie store and the in-memory jar
//! - [`selection`] - Selection counters persisted in the `selectedProducts` cookie
//! - [`assets`] - Catalog asset loading
//! - [`config`] - Environment-driven configuration
//! - [`state`] - Explicitly constructed application state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod assets;
pub mod config;
pub mod cookies;
pub mod error;
pub mod selection;
pub mod state;

pub use cookies::{CookieStore, MemoryCookieStore, SetCookie};
pub use error::AppError;
pub use selection::{CounterStore, LoadError};
pub use state::AppState;
