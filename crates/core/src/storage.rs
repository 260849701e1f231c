//! Key-value persistence port.
//!
//! All durable state (cart, current user, subscribers, the stashed search
//! term) lives in a handful of string records behind this trait. Stores
//! load on demand and write back immediately after each mutation; there is
//! no in-memory cache across reads. Writes are best-effort: implementations
//! log failures and swallow them, so callers never observe a storage error.
//!
//! A single logical writer is assumed. Two processes sharing one backing
//! store race with last-writer-wins semantics.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Well-known record keys.
pub mod keys {
    /// Ordered list of cart line items, JSON-serialized.
    pub const CART: &str = "cart";

    /// The logged-in user record, JSON-serialized, or absent.
    pub const CURRENT_USER: &str = "current_user";

    /// Newsletter subscriber emails, JSON-serialized list of strings.
    pub const SUBSCRIBERS: &str = "subscribers";

    /// Ephemeral search term, consumed and deleted on first read.
    pub const SEARCH_TERM: &str = "search_term";
}

/// A durable string-keyed, string-valued record store.
pub trait Storage: Send + Sync {
    /// Read a record. Absent keys return `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a record, replacing any previous value. Best-effort.
    fn set(&self, key: &str, value: &str);

    /// Delete a record if present. Best-effort.
    fn remove(&self, key: &str);
}

/// In-memory storage, used by tests and available as a volatile backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("cart"), None);

        storage.set("cart", "[]");
        assert_eq!(storage.get("cart").as_deref(), Some("[]"));

        storage.set("cart", "[1]");
        assert_eq!(storage.get("cart").as_deref(), Some("[1]"));

        storage.remove("cart");
        assert_eq!(storage.get("cart"), None);

        // Removing an absent key is a no-op.
        storage.remove("cart");
    }
}
