//! Key/value persistence
//!
//! The game keeps a single entry: the high score, a plain base-10 integer.
//! Storage may be missing or blocked; callers treat every failure as
//! "nothing stored".

use std::collections::HashMap;

/// Minimal string store, shaped after the browser's `Storage`
pub trait KeyValueStore {
    /// Read a value (None if missing or storage unavailable)
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write a value. Returns false if the write did not happen.
    fn set_item(&mut self, key: &str, value: &str) -> bool;
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> bool {
        self.items.insert(key.to_string(), value.to_string());
        true
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - nothing will be persisted");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) -> bool {
        match &self.storage {
            Some(storage) => storage.set_item(key, value).is_ok(),
            None => false,
        }
    }
}
