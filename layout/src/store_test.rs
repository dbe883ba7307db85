use super::*;

/// Store whose writes always fail, for exercising the degrade path.
struct ReadOnlyStore;

impl PreferenceStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
}

// =============================================================
// MemoryStore
// =============================================================

#[test]
fn memory_store_starts_empty() {
    let store = MemoryStore::new();
    assert!(store.is_empty());
    assert_eq!(store.get("theme"), None);
}

#[test]
fn memory_store_set_then_get() {
    let mut store = MemoryStore::new();
    assert!(store.set("theme", "light").is_ok());
    assert_eq!(store.get("theme").as_deref(), Some("light"));
    assert_eq!(store.len(), 1);
}

#[test]
fn memory_store_overwrites() {
    let mut store = MemoryStore::with_values(&[("theme", "dark")]);
    assert!(store.set("theme", "light").is_ok());
    assert_eq!(store.get("theme").as_deref(), Some("light"));
    assert_eq!(store.len(), 1);
}

#[test]
fn memory_store_keys_are_independent() {
    let store = MemoryStore::with_values(&[("theme", "dark"), ("desktopSidebarState", "full")]);
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
    assert_eq!(store.get("desktopSidebarState").as_deref(), Some("full"));
}

// =============================================================
// FallbackStore
// =============================================================

/// Holds values from an earlier visit and rejects writes while `full` is set.
struct QuotaStore {
    inner: MemoryStore,
    full: bool,
}

impl PreferenceStore for QuotaStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.full {
            return Err(StoreError::Rejected { key: key.to_owned(), reason: "quota exceeded".into() });
        }
        self.inner.set(key, value)
    }
}

fn quota_store(full: bool) -> FallbackStore<QuotaStore> {
    FallbackStore::new(Some(QuotaStore { inner: MemoryStore::with_values(&[("desktopSidebarState", "icons")]), full }))
}

#[test]
fn fallback_reads_primary_values() {
    let store = quota_store(false);
    assert!(store.is_persistent());
    assert_eq!(store.get("desktopSidebarState").as_deref(), Some("icons"));
    assert_eq!(store.get("theme"), None);
}

#[test]
fn fallback_writes_through_to_primary() {
    let mut store = quota_store(false);
    assert!(store.set("desktopSidebarState", "full").is_ok());
    assert_eq!(store.get("desktopSidebarState").as_deref(), Some("full"));
    assert_eq!(store.diverged_keys().count(), 0);
}

#[test]
fn rejected_write_is_served_from_memory_not_stale_primary() {
    let mut store = quota_store(true);
    assert!(matches!(store.set("desktopSidebarState", "full"), Err(StoreError::Rejected { .. })));
    assert_eq!(store.get("desktopSidebarState").as_deref(), Some("full"));
    assert_eq!(store.diverged_keys().collect::<Vec<_>>(), vec!["desktopSidebarState"]);
}

#[test]
fn successful_write_clears_divergence() {
    let mut store = quota_store(true);
    assert!(store.set("desktopSidebarState", "full").is_err());
    if let Some(primary) = store.primary.as_mut() {
        primary.full = false;
    }
    assert!(store.set("desktopSidebarState", "icons").is_ok());
    assert_eq!(store.diverged_keys().count(), 0);
    assert_eq!(store.get("desktopSidebarState").as_deref(), Some("icons"));
}

#[test]
fn fallback_without_primary_is_memory_only() {
    let mut store = FallbackStore::<MemoryStore>::new(None);
    assert!(!store.is_persistent());
    assert!(store.set("theme", "light").is_ok());
    assert_eq!(store.get("theme").as_deref(), Some("light"));
}

// =============================================================
// persist
// =============================================================

#[test]
fn persist_writes_through() {
    let mut store = MemoryStore::new();
    persist(&mut store, "theme", "dark");
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
}

#[test]
fn persist_swallows_store_errors() {
    let mut store = ReadOnlyStore;
    persist(&mut store, "theme", "dark");
    assert_eq!(store.get("theme"), None);
}

#[test]
fn store_error_messages() {
    assert_eq!(StoreError::Unavailable.to_string(), "preference storage is unavailable");
    let err = StoreError::Rejected { key: "theme".into(), reason: "quota".into() };
    assert_eq!(err.to_string(), "preference storage rejected write to theme: quota");
}

#[test]
fn parse_error_message_quotes_value() {
    let err = ParseError { kind: "theme", value: "sepia".into() };
    assert_eq!(err.to_string(), "unrecognized theme value: \"sepia\"");
}
