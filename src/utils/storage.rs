//! Durable client-side key/value storage
//!
//! Values are raw strings: the session token is stored verbatim and the user
//! profile as JSON text, so the layout matches what other clients of the same
//! backend write to localStorage.

use std::cell::RefCell;
use std::collections::HashMap;

use gloo_storage::{LocalStorage, Storage};

pub const STORAGE_KEY_TOKEN: &str = "token";
pub const STORAGE_KEY_USER: &str = "user";

pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str);
}

/// Browser localStorage
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to read '{}' from localStorage: {:?}", key, e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| format!("Failed to write '{}' to localStorage: {:?}", key, e))
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// In-memory storage for tests and non-browser targets
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl MemoryStorage {
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let storage = Self::new();
        storage
            .entries
            .borrow_mut()
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        storage
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert!(storage.get(STORAGE_KEY_TOKEN).is_none());

        storage.set(STORAGE_KEY_TOKEN, "abc").unwrap();
        assert_eq!(storage.get(STORAGE_KEY_TOKEN).as_deref(), Some("abc"));

        storage.remove(STORAGE_KEY_TOKEN);
        assert!(storage.get(STORAGE_KEY_TOKEN).is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let storage = MemoryStorage::with_entries([(STORAGE_KEY_USER, "{}")]);
        storage.remove(STORAGE_KEY_TOKEN);
        assert_eq!(storage.len(), 1);
    }
}
