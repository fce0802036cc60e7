//! Key-value persistence backing the session snapshot, the bearer token and
//! UI preferences. Browser builds use `window.localStorage`; native builds and
//! tests use an in-memory map. Each read or write is a single get/set call so a
//! value is never partially applied.

use super::errors::AppError;
use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// Serialized session snapshot `{user, token, isAuthenticated, allPermissions}`.
pub const SESSION_KEY: &str = "auth-storage";
/// Raw bearer token read by the request middleware.
pub const TOKEN_KEY: &str = "auth_token";
/// Appearance preference (`light`, `dark` or `system`).
pub const APPEARANCE_KEY: &str = "appearance";

/// Minimal storage contract shared by the session store and HTTP middleware.
///
/// Reads treat backend failures as a missing value; writes report them.
pub trait KeyValueStore: Clone {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    /// Returns `AppError::Storage` when the backend refuses the write.
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    fn remove(&self, key: &str);
}

/// In-memory store; clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// `window.localStorage` binding.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let storage = Self::storage()
            .ok_or_else(|| AppError::Storage("Local storage is unavailable.".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|_| AppError::Storage(format!("Failed to write `{key}`.")))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            if storage.remove_item(key).is_err() {
                tracing::warn!(key, "failed to remove local storage entry");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, MemoryStorage, TOKEN_KEY};

    #[test]
    fn clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set(TOKEN_KEY, "tok123").ok();
        assert_eq!(other.get(TOKEN_KEY).as_deref(), Some("tok123"));

        other.remove(TOKEN_KEY);
        assert!(!storage.contains(TOKEN_KEY));
    }
}
