// SPDX-License-Identifier: Apache-2.0

pub(crate) mod local_fs;
pub(crate) mod memory;

use async_trait::async_trait;
use settings_tabs_model::StoredValues;
use std::fmt::{Display, Formatter};

pub use local_fs::LocalFsStore;
pub use memory::MemoryStore;

#[derive(Debug)]
pub struct StoreError(pub String);

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for StoreError {}

/// Key-value contract the host storage collaborator must satisfy.
///
/// One storage key owns one full value mapping; `replace` overwrites the
/// whole mapping as a unit and `get` on a never-saved key yields an empty
/// mapping, not an error.
#[async_trait]
pub trait OptionStore: Send + Sync {
    fn backend_tag(&self) -> &'static str;

    async fn get(&self, key: &str) -> Result<StoredValues, StoreError>;

    /// Idempotent creation of an empty entry; a no-op when present.
    async fn ensure(&self, key: &str) -> Result<(), StoreError>;

    /// Atomically overwrites the full value set for a key.
    async fn replace(&self, key: &str, values: StoredValues) -> Result<(), StoreError>;
}
