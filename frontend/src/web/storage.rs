//! Durable token storage.
//!
//! Exactly one key holds the bearer token; the profile is never persisted
//! and is re-fetched on every load. The trait exists so the session core
//! can run against an in-memory store in native tests.

use gloo_storage::{LocalStorage, Storage};

/// LocalStorage key for the bearer token. Last write wins; there is no
/// multi-session support.
pub const TOKEN_STORAGE_KEY: &str = "focusup_token";

pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Browser-backed store over `window.localStorage`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WebTokenStore;

impl TokenStore for WebTokenStore {
    fn load(&self) -> Option<String> {
        LocalStorage::get(TOKEN_STORAGE_KEY).ok()
    }

    fn save(&self, token: &str) {
        // A full or unavailable LocalStorage leaves the session memory-only.
        let _ = LocalStorage::set(TOKEN_STORAGE_KEY, token);
    }

    fn clear(&self) {
        LocalStorage::delete(TOKEN_STORAGE_KEY);
    }
}

// =========================================================
// Test store
// =========================================================

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// In-memory stand-in; clones share the same cell so tests can inspect
    /// what the session core persisted.
    #[derive(Clone, Default)]
    pub struct MemoryTokenStore {
        cell: Rc<RefCell<Option<String>>>,
    }

    impl MemoryTokenStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_token(token: &str) -> Self {
            let store = Self::default();
            store.save(token);
            store
        }

        pub fn stored(&self) -> Option<String> {
            self.cell.borrow().clone()
        }
    }

    impl TokenStore for MemoryTokenStore {
        fn load(&self) -> Option<String> {
            self.cell.borrow().clone()
        }

        fn save(&self, token: &str) {
            *self.cell.borrow_mut() = Some(token.to_string());
        }

        fn clear(&self) {
            *self.cell.borrow_mut() = None;
        }
    }

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load(), None);

        store.save("abc");
        assert_eq!(store.load(), Some("abc".to_string()));

        // last write wins
        store.save("def");
        assert_eq!(store.load(), Some("def".to_string()));

        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn memory_store_clones_share_state() {
        let store = MemoryTokenStore::new();
        let twin = store.clone();
        store.save("abc");
        assert_eq!(twin.load(), Some("abc".to_string()));
    }
}
