use contracts::shared::tab_state::{KeyValueStore, StorageError};
use web_sys::window;

/// `window.localStorage` as a [`KeyValueStore`].
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    /// `None` when there is no window or local storage is blocked.
    pub fn detect() -> Option<Self> {
        let storage = window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{e:?}")))
    }
}
