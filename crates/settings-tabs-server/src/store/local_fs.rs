// SPDX-License-Identifier: Apache-2.0

use crate::store::{OptionStore, StoreError};
use async_trait::async_trait;
use settings_tabs_model::StoredValues;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed store: one `<key>.json` document per storage key under the
/// root directory. Replacement writes a sibling temp file and renames it
/// over the target so readers never observe a partial mapping.
pub struct LocalFsStore {
    root: PathBuf,
}

impl LocalFsStore {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        // Storage keys are slug-derived; anything else is a traversal attempt.
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(StoreError(format!("invalid storage key: {key}")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| StoreError(format!("create store root failed: {e}")))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(|e| StoreError(format!("write failed: {e}")))?;
        fs::rename(&tmp, path).map_err(|e| StoreError(format!("rename failed: {e}")))
    }
}

#[async_trait]
impl OptionStore for LocalFsStore {
    fn backend_tag(&self) -> &'static str {
        "localfs"
    }

    async fn get(&self, key: &str) -> Result<StoredValues, StoreError> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(StoredValues::new());
        }
        let bytes = fs::read(&path).map_err(|e| StoreError(format!("read failed: {e}")))?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError(format!("parse failed: {e}")))
    }

    async fn ensure(&self, key: &str) -> Result<(), StoreError> {
        let path = self.key_path(key)?;
        if path.exists() {
            return Ok(());
        }
        self.write_atomic(&path, b"{}")
    }

    async fn replace(&self, key: &str, values: StoredValues) -> Result<(), StoreError> {
        let path = self.key_path(key)?;
        let bytes = serde_json::to_vec(&values)
            .map_err(|e| StoreError(format!("serialize failed: {e}")))?;
        self.write_atomic(&path, &bytes)
    }
}
