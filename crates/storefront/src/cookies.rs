//! Cookie store abstraction.
//!
//! The browser's cookie jar is process-wide mutable state. Pantry never
//! touches it directly: components receive a [`CookieStore`] at construction
//! and go through its two capabilities, reading the `document.cookie` view
//! and writing one `Set-Cookie`.
//!
//! [`MemoryCookieStore`] is the jar used by tests and the CLI. It honours
//! expiration the way a browser does: a write whose `expires` is not in the
//! future evicts the entry, and entries that expire later disappear from
//! reads.

use std::collections::VecDeque;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RFC 1123 date layout used in the `expires` attribute.
const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Number of recent writes a [`MemoryCookieStore`] remembers.
pub const WRITE_LOG_CAPACITY: usize = 64;

/// Source of the current time.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Clock reading the system time.
#[must_use]
pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// Clock frozen at `at`.
#[must_use]
pub fn fixed_clock(at: DateTime<Utc>) -> Clock {
    Arc::new(move || at)
}

/// A single cookie write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    /// Cookie name.
    pub name: String,
    /// Already-encoded cookie value.
    pub value: String,
    /// Absolute expiration time.
    pub expires: DateTime<Utc>,
    /// Path scope.
    pub path: String,
}

impl SetCookie {
    /// Render the `expires` attribute value (`Thu, 01 Jan 1970 00:00:00 GMT`).
    #[must_use]
    pub fn expires_attr(&self) -> String {
        self.expires.format(EXPIRES_FORMAT).to_string()
    }
}

impl fmt::Display for SetCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}; expires={}; path={}",
            self.name,
            self.value,
            self.expires_attr(),
            self.path
        )
    }
}

/// Capability to read and write cookies.
pub trait CookieStore {
    /// Every live cookie as `name=value` pairs joined by `"; "`, in the
    /// shape of `document.cookie`.
    fn cookie_string(&self) -> String;

    /// Write a cookie, replacing any entry with the same name and path.
    fn set(&self, cookie: SetCookie);

    /// Current time as seen by this store.
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    /// Raw (still encoded) value of the first cookie named `name`.
    fn get(&self, name: &str) -> Option<String> {
        find_cookie(&self.cookie_string(), name).map(str::to_owned)
    }
}

impl<T: CookieStore + ?Sized> CookieStore for Arc<T> {
    fn cookie_string(&self) -> String {
        (**self).cookie_string()
    }

    fn set(&self, cookie: SetCookie) {
        (**self).set(cookie);
    }

    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

impl<T: CookieStore + ?Sized> CookieStore for &T {
    fn cookie_string(&self) -> String {
        (**self).cookie_string()
    }

    fn set(&self, cookie: SetCookie) {
        (**self).set(cookie);
    }

    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

/// Find the value of the first entry named `name` in a `document.cookie`
/// string.
///
/// Entries are separated by `;` and may carry surrounding whitespace.
/// Entries without `=` are ignored.
#[must_use]
pub fn find_cookie<'a>(cookie_string: &'a str, name: &str) -> Option<&'a str> {
    cookie_string
        .split(';')
        .filter_map(|entry| entry.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
}

// =============================================================================
// In-memory jar
// =============================================================================

/// A cookie held by [`MemoryCookieStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    /// `None` for session cookies.
    pub expires: Option<DateTime<Utc>>,
    pub path: String,
}

impl StoredCookie {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_none_or(|expires| expires > now)
    }
}

#[derive(Debug, Default)]
struct Jar {
    entries: Vec<StoredCookie>,
    written: VecDeque<SetCookie>,
}

/// Thread-safe in-memory cookie jar.
///
/// Clones share the same jar.
#[derive(Clone)]
pub struct MemoryCookieStore {
    inner: Arc<RwLock<Jar>>,
    clock: Clock,
}

impl fmt::Debug for MemoryCookieStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryCookieStore")
            .field("entries", &self.entries())
            .finish_non_exhaustive()
    }
}

impl Default for MemoryCookieStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCookieStore {
    /// Create an empty jar on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    /// Create an empty jar on the given clock.
    #[must_use]
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Jar::default())),
            clock,
        }
    }

    /// Rebuild a jar from a snapshot, dropping entries that already expired.
    #[must_use]
    pub fn from_snapshot(snapshot: JarSnapshot, clock: Clock) -> Self {
        let now = clock();
        let entries = snapshot
            .cookies
            .into_iter()
            .filter(|cookie| cookie.is_live(now))
            .collect();
        Self {
            inner: Arc::new(RwLock::new(Jar {
                entries,
                written: VecDeque::new(),
            })),
            clock,
        }
    }

    /// Live entries, in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> JarSnapshot {
        JarSnapshot {
            cookies: self.entries(),
        }
    }

    /// Live entries, in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<StoredCookie> {
        let now = (self.clock)();
        let jar = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        jar.entries
            .iter()
            .filter(|cookie| cookie.is_live(now))
            .cloned()
            .collect()
    }

    /// The last [`WRITE_LOG_CAPACITY`] writes this jar received, oldest first.
    #[must_use]
    pub fn written(&self) -> Vec<SetCookie> {
        let jar = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        jar.written.iter().cloned().collect()
    }

    /// The most recent write, if any.
    #[must_use]
    pub fn last_written(&self) -> Option<SetCookie> {
        let jar = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        jar.written.back().cloned()
    }

    /// Store a session cookie at path `/` without going through a
    /// [`SetCookie`] write. Useful for planting unrelated or corrupted
    /// entries.
    pub fn insert_raw(&self, name: &str, value: &str) {
        let mut jar = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        upsert(
            &mut jar.entries,
            StoredCookie {
                name: name.to_owned(),
                value: value.to_owned(),
                expires: None,
                path: "/".to_owned(),
            },
        );
    }
}

fn upsert(entries: &mut Vec<StoredCookie>, cookie: StoredCookie) {
    match entries
        .iter_mut()
        .find(|existing| existing.name == cookie.name && existing.path == cookie.path)
    {
        Some(existing) => *existing = cookie,
        None => entries.push(cookie),
    }
}

impl CookieStore for MemoryCookieStore {
    fn cookie_string(&self) -> String {
        self.entries()
            .iter()
            .map(|cookie| format!("{}={}", cookie.name, cookie.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn set(&self, cookie: SetCookie) {
        let now = (self.clock)();
        let mut jar = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        if cookie.expires <= now {
            jar.entries
                .retain(|existing| !(existing.name == cookie.name && existing.path == cookie.path));
        } else {
            upsert(
                &mut jar.entries,
                StoredCookie {
                    name: cookie.name.clone(),
                    value: cookie.value.clone(),
                    expires: Some(cookie.expires),
                    path: cookie.path.clone(),
                },
            );
        }

        if jar.written.len() == WRITE_LOG_CAPACITY {
            jar.written.pop_front();
        }
        jar.written.push_back(cookie);
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

// =============================================================================
// Jar persistence
// =============================================================================

/// Errors from reading or writing a jar file.
#[derive(Debug, Error)]
pub enum JarError {
    /// The jar file could not be read or written.
    #[error("cookie jar I/O error: {0}")]
    Io(#[from] io::Error),
    /// The jar file is not a valid snapshot.
    #[error("cookie jar format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// Serializable view of a jar's live entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JarSnapshot {
    pub cookies: Vec<StoredCookie>,
}

/// Open a jar file. A missing file yields an empty jar.
///
/// # Errors
///
/// Returns [`JarError`] if the file exists but cannot be read or parsed.
pub fn load_jar(path: &Path, clock: Clock) -> Result<MemoryCookieStore, JarError> {
    let snapshot = match fs::read_to_string(path) {
        Ok(text) => serde_json::from_str(&text)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => JarSnapshot::default(),
        Err(e) => return Err(e.into()),
    };
    Ok(MemoryCookieStore::from_snapshot(snapshot, clock))
}

/// Write the jar's live entries to `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`JarError::Io`] if the file cannot be written.
pub fn save_jar(store: &MemoryCookieStore, path: &Path) -> Result<(), JarError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let text = serde_json::to_string_pretty(&store.snapshot())?;
    fs::write(path, text)?;
    Ok(())
}
