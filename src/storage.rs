//! Token Persistence
//!
//! The bearer token lives in the browser's local storage under one key.

use tracing::warn;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenStorage {
    key: &'static str,
}

impl TokenStorage {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }

    fn local_storage() -> Result<web_sys::Storage, ApiError> {
        web_sys::window()
            .ok_or_else(|| ApiError::Storage("no window".to_string()))?
            .local_storage()
            .map_err(|e| ApiError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| ApiError::Storage("local storage unavailable".to_string()))
    }

    pub fn load(&self) -> Option<String> {
        let storage = Self::local_storage().ok()?;
        storage.get_item(self.key).ok().flatten()
    }

    pub fn save(&self, token: &str) -> Result<(), ApiError> {
        Self::local_storage()?
            .set_item(self.key, token)
            .map_err(|e| ApiError::Storage(format!("{:?}", e)))
    }

    pub fn clear(&self) {
        match Self::local_storage() {
            Ok(storage) => {
                if let Err(e) = storage.remove_item(self.key) {
                    warn!("failed to remove token: {:?}", e);
                }
            }
            Err(e) => warn!("failed to remove token: {}", e),
        }
    }
}
