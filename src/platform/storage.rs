//! LocalStorage-backed store

use wasm_bindgen::{JsCast, JsValue};
use web_sys::Storage;

use crate::error::StoreError;
use crate::persistence::KeyValueStore;

/// `window.localStorage`
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    /// Open the page's LocalStorage
    pub fn open() -> Result<Self, StoreError> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(js_error_text(&e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage.get_item(key).map_err(|e| access_error(key, &e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| access_error(key, &e))
    }
}

fn access_error(key: &str, err: &JsValue) -> StoreError {
    StoreError::Access {
        key: key.to_string(),
        message: js_error_text(err),
    }
}

/// Best-effort readable text for a thrown JS value
pub(crate) fn js_error_text(err: &JsValue) -> String {
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}
