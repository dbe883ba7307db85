//! `localStorage`-backed preference store.
//!
//! TRADE-OFFS
//! ==========
//! Storage is best-effort. When `localStorage` is missing (private mode,
//! disabled cookies, non-hydrate builds) or refuses a write, preferences
//! still live in memory for the rest of the page so the UI keeps working;
//! they just do not survive navigation.

use layout::store::{FallbackStore, PreferenceStore, StoreError};
#[cfg(not(feature = "hydrate"))]
use layout::store::MemoryStore;

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

/// `window.localStorage` as a [`PreferenceStore`].
#[cfg(feature = "hydrate")]
#[derive(Debug)]
pub struct LocalStorage(web_sys::Storage);

#[cfg(feature = "hydrate")]
impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.0.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("localStorage read of {key} failed: {err:?}");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.0
            .set_item(key, value)
            .map_err(|err| StoreError::Rejected { key: key.to_owned(), reason: format!("{err:?}") })
    }
}

#[cfg(feature = "hydrate")]
type Backend = LocalStorage;
#[cfg(not(feature = "hydrate"))]
type Backend = MemoryStore;

/// Preference store over `window.localStorage` with an in-memory fallback.
///
/// A key whose `localStorage` write was rejected is read back from memory
/// for the rest of the page.
#[derive(Debug)]
pub struct BrowserStore {
    inner: FallbackStore<Backend>,
}

impl BrowserStore {
    /// Open the page's `localStorage`, falling back to memory if unavailable.
    #[must_use]
    pub fn open() -> Self {
        #[cfg(feature = "hydrate")]
        {
            let local = match web_sys::window().map(|w| w.local_storage()) {
                Some(Ok(Some(storage))) => Some(LocalStorage(storage)),
                Some(Ok(None)) | None => {
                    log::warn!("localStorage unavailable; preferences kept in memory");
                    None
                }
                Some(Err(err)) => {
                    log::warn!("localStorage blocked ({err:?}); preferences kept in memory");
                    None
                }
            };
            Self { inner: FallbackStore::new(local) }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::in_memory()
        }
    }

    /// A store that never touches `localStorage`.
    #[must_use]
    pub fn in_memory() -> Self {
        Self { inner: FallbackStore::new(None) }
    }

    /// Whether writes reach `localStorage`.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.inner.is_persistent()
    }
}

impl Default for BrowserStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl PreferenceStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.set(key, value)
    }
}
