//! Document store abstraction
//!
//! The uploader only needs two writes: `set` at an explicit key and `add`
//! under a generated key. `FirestoreClient` implements them against the
//! real service; `MemoryStore` keeps documents in memory for tests and dry
//! runs.

mod memory;

use crate::error::Result;
use crate::types::JobRecord;
use async_trait::async_trait;

pub use memory::{MemoryStore, WriteOp};

/// A keyed document store grouped into named collections
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fails if the store cannot accept writes at all
    fn ensure_ready(&self) -> Result<()>;

    /// Create or fully replace the document at `collection/key`
    async fn set(&self, collection: &str, key: &str, record: &JobRecord) -> Result<()>;

    /// Insert a new document and return its generated key
    async fn add(&self, collection: &str, record: &JobRecord) -> Result<String>;
}
