// SPDX-License-Identifier: Apache-2.0

use crate::store::{OptionStore, StoreError};
use async_trait::async_trait;
use settings_tabs_model::StoredValues;
use std::collections::HashMap;
use std::sync::atomic::AtomicU64;
use tokio::sync::Mutex;

/// In-process store; also the test double. `get_calls` lets tests assert
/// that static tabs perform no storage reads.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, StoredValues>>,
    pub get_calls: AtomicU64,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OptionStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<StoredValues, StoreError> {
        self.get_calls
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        Ok(self
            .entries
            .lock()
            .await
            .get(key)
            .cloned()
            .unwrap_or_default())
    }

    async fn ensure(&self, key: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .await
            .entry(key.to_string())
            .or_default();
        Ok(())
    }

    async fn replace(&self, key: &str, values: StoredValues) -> Result<(), StoreError> {
        self.entries.lock().await.insert(key.to_string(), values);
        Ok(())
    }
}
