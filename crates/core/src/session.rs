//! Session state: the logged-in user, the subscriber set, and the
//! ephemeral search term.
//!
//! The logged-in user is a single persisted record with no transition
//! restrictions: login always overwrites, logout always clears. The
//! subscriber set is append-only with exact-string membership (no case
//! normalization). All reads fall back to absent/empty on malformed data.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::{Storage, keys};
use crate::types::Email;

/// The logged-in user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user's email address.
    pub email: Email,
    /// Display name.
    pub name: String,
}

/// User and subscriber operations over a storage port.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    /// Create a session store over the given storage backend.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// The currently logged-in user, if any. Malformed records read as
    /// absent.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        let raw = self.storage.get(keys::CURRENT_USER)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::warn!(error = %err, "malformed user record, treating as logged out");
                None
            }
        }
    }

    /// Persist `user` as the logged-in user, replacing any previous one.
    pub fn log_in(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(raw) => self.storage.set(keys::CURRENT_USER, &raw),
            Err(err) => tracing::warn!(error = %err, "failed to serialize user record"),
        }
    }

    /// Clear the logged-in user.
    pub fn log_out(&self) {
        self.storage.remove(keys::CURRENT_USER);
    }

    /// All subscriber emails, in subscription order.
    #[must_use]
    pub fn subscribers(&self) -> Vec<String> {
        let Some(raw) = self.storage.get(keys::SUBSCRIBERS) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(emails) => emails,
            Err(err) => {
                tracing::warn!(error = %err, "malformed subscriber record, treating as empty");
                Vec::new()
            }
        }
    }

    /// Add an email to the subscriber set.
    ///
    /// The email is trimmed; an empty result is rejected. Membership is an
    /// exact-string comparison. Returns whether the email was newly added.
    pub fn subscribe(&self, email: &str) -> bool {
        let email = email.trim();
        if email.is_empty() {
            return false;
        }

        let mut subscribers = self.subscribers();
        if subscribers.iter().any(|existing| existing == email) {
            return false;
        }
        subscribers.push(email.to_owned());

        match serde_json::to_string(&subscribers) {
            Ok(raw) => self.storage.set(keys::SUBSCRIBERS, &raw),
            Err(err) => tracing::warn!(error = %err, "failed to serialize subscriber record"),
        }
        true
    }

    /// Stash a search term ahead of navigating to the results view.
    pub fn stash_search_term(&self, term: &str) {
        self.storage.set(keys::SEARCH_TERM, term);
    }

    /// Consume the stashed search term, deleting it immediately.
    #[must_use]
    pub fn take_search_term(&self) -> Option<String> {
        let term = self.storage.get(keys::SEARCH_TERM)?;
        self.storage.remove(keys::SEARCH_TERM);
        Some(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store() -> SessionStore {
        SessionStore::new(Arc::new(MemoryStorage::new()))
    }

    fn user(email: &str, name: &str) -> User {
        User {
            email: Email::parse(email).expect("valid email"),
            name: name.to_owned(),
        }
    }

    #[test]
    fn test_login_overwrites_and_logout_clears() {
        let store = store();
        assert!(store.current_user().is_none());

        store.log_in(&user("ada@example.com", "Ada"));
        assert_eq!(store.current_user(), Some(user("ada@example.com", "Ada")));

        store.log_in(&user("grace@example.com", "Grace"));
        assert_eq!(
            store.current_user(),
            Some(user("grace@example.com", "Grace"))
        );

        store.log_out();
        assert!(store.current_user().is_none());
    }

    #[test]
    fn test_malformed_user_record_reads_as_logged_out() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::CURRENT_USER, "{broken");
        let store = SessionStore::new(storage);
        assert!(store.current_user().is_none());
    }

    #[test]
    fn test_subscribe_deduplicates_exactly() {
        let store = store();
        assert!(store.subscribe("ada@example.com"));
        assert!(!store.subscribe("ada@example.com"));
        assert_eq!(store.subscribers(), ["ada@example.com"]);

        // Case-sensitive membership: a different casing is a new entry.
        assert!(store.subscribe("Ada@example.com"));
        assert_eq!(store.subscribers().len(), 2);
    }

    #[test]
    fn test_subscribe_rejects_empty_after_trim() {
        let store = store();
        assert!(!store.subscribe(""));
        assert!(!store.subscribe("   "));
        assert!(store.subscribers().is_empty());

        assert!(store.subscribe("  ada@example.com  "));
        assert_eq!(store.subscribers(), ["ada@example.com"]);
    }

    #[test]
    fn test_search_term_is_consumed_on_read() {
        let store = store();
        assert!(store.take_search_term().is_none());

        store.stash_search_term("honey");
        assert_eq!(store.take_search_term().as_deref(), Some("honey"));
        assert!(store.take_search_term().is_none());
    }
}
