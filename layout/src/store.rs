//! Persisted string preferences.
//!
//! Two keys live here across page loads: the theme and the desktop sidebar
//! mode. Each is owned by exactly one controller, so the store needs no
//! transactional behavior. Reads never fail; a missing or unreadable value is
//! simply absent.

use std::collections::{BTreeSet, HashMap};

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

/// Error returned by [`PreferenceStore::set`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No persistent storage is reachable (private mode, disabled storage).
    #[error("preference storage is unavailable")]
    Unavailable,
    /// The backend refused the write, e.g. quota exceeded.
    #[error("preference storage rejected write to {key}: {reason}")]
    Rejected { key: String, reason: String },
}

/// A persisted or server-rendered value that names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind} value: {value:?}")]
pub struct ParseError {
    /// What was being parsed, e.g. `"theme"`.
    pub kind: &'static str,
    /// The rejected raw value.
    pub value: String,
}

/// Synchronous key-value storage for user preferences.
pub trait PreferenceStore {
    /// Read the value stored for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the value could not be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Preferences kept in memory for the lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `pairs`.
    #[must_use]
    pub fn with_values(pairs: &[(&str, &str)]) -> Self {
        let values = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Self { values }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// A store layered over an optional primary backend, with every value also
/// kept in memory.
///
/// Once a write to the primary fails, that key is served from memory until a
/// later write to the primary succeeds, so a rejected write never brings back
/// the older value the primary still holds.
#[derive(Debug)]
pub struct FallbackStore<P> {
    primary: Option<P>,
    memory: MemoryStore,
    diverged: BTreeSet<String>,
}

impl<P: PreferenceStore> FallbackStore<P> {
    /// Layer memory over `primary`; `None` means memory only.
    #[must_use]
    pub fn new(primary: Option<P>) -> Self {
        Self { primary, memory: MemoryStore::new(), diverged: BTreeSet::new() }
    }

    /// Whether a primary backend is attached.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.primary.is_some()
    }

    /// Keys whose latest value only lives in memory.
    pub fn diverged_keys(&self) -> impl Iterator<Item = &str> {
        self.diverged.iter().map(String::as_str)
    }
}

impl<P: PreferenceStore> PreferenceStore for FallbackStore<P> {
    fn get(&self, key: &str) -> Option<String> {
        if !self.diverged.contains(key)
            && let Some(value) = self.primary.as_ref().and_then(|primary| primary.get(key))
        {
            return Some(value);
        }
        self.memory.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.memory.set(key, value)?;
        let Some(primary) = self.primary.as_mut() else {
            return Ok(());
        };
        match primary.set(key, value) {
            Ok(()) => {
                self.diverged.remove(key);
                Ok(())
            }
            Err(err) => {
                self.diverged.insert(key.to_owned());
                Err(err)
            }
        }
    }
}

/// Write `value` and log instead of failing; preference writes are best-effort.
pub(crate) fn persist<S: PreferenceStore>(store: &mut S, key: &str, value: &str) {
    match store.set(key, value) {
        Ok(()) => log::debug!("persisted {key}={value}"),
        Err(err) => log::warn!("preference not persisted: {err}"),
    }
}
