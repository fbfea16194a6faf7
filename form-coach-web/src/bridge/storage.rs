//! localStorage-backed history store

use wasm_bindgen::JsValue;

use crate::error::StorageError;
use crate::session::HistoryStore;

fn access_error(err: JsValue) -> StorageError {
    StorageError::Access(format!("{:?}", err))
}

/// Reads and writes one localStorage key
pub struct LocalStorageStore {
    storage: web_sys::Storage,
    key: String,
}

impl LocalStorageStore {
    pub fn open(key: &str) -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        let storage = window
            .local_storage()
            .map_err(access_error)?
            .ok_or(StorageError::Unavailable)?;

        Ok(Self {
            storage,
            key: key.to_string(),
        })
    }
}

impl HistoryStore for LocalStorageStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        self.storage.get_item(&self.key).map_err(access_error)
    }

    fn save(&self, data: &str) -> Result<(), StorageError> {
        self.storage.set_item(&self.key, data).map_err(access_error)
    }
}
