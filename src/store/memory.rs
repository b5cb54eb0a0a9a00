//! In-memory document store

use super::DocumentStore;
use crate::error::{Error, Result};
use crate::firestore::{validate_collection_id, validate_document_id};
use crate::types::{JobRecord, TITLE_FIELD};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use uuid::Uuid;

/// A write observed by the store, in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// `set` at an explicit key
    Set { collection: String, key: String },
    /// `add` that was assigned `key`
    Add { collection: String, key: String },
}

impl WriteOp {
    /// Key the write landed on
    pub fn key(&self) -> &str {
        match self {
            WriteOp::Set { key, .. } | WriteOp::Add { key, .. } => key,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    collections: BTreeMap<String, BTreeMap<String, JobRecord>>,
    writes: Vec<WriteOp>,
}

/// Thread-safe in-memory store with the same key rules as Firestore
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    failing_keys: HashSet<String>,
    failing_titles: HashSet<String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every `set` at `key`
    #[must_use]
    pub fn fail_on_key(mut self, key: impl Into<String>) -> Self {
        self.failing_keys.insert(key.into());
        self
    }

    /// Reject every write of a record whose `title` equals `title`
    #[must_use]
    pub fn fail_on_title(mut self, title: impl Into<String>) -> Self {
        self.failing_titles.insert(title.into());
        self
    }

    /// All writes so far, in order
    pub fn writes(&self) -> Vec<WriteOp> {
        self.lock().writes.clone()
    }

    /// Document at `collection/key`
    pub fn get(&self, collection: &str, key: &str) -> Option<JobRecord> {
        self.lock()
            .collections
            .get(collection)
            .and_then(|docs| docs.get(key))
            .cloned()
    }

    /// Number of documents in `collection`
    pub fn len(&self, collection: &str) -> usize {
        self.lock().collections.get(collection).map_or(0, BTreeMap::len)
    }

    /// Whether `collection` holds no documents
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means a test panicked mid-write
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn check_title(&self, record: &JobRecord) -> Result<()> {
        let title = record.get(TITLE_FIELD).and_then(|v| v.as_str());
        match title {
            Some(t) if self.failing_titles.contains(t) => {
                Err(Error::store(format!("write rejected for '{t}'")))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn ensure_ready(&self) -> Result<()> {
        Ok(())
    }

    async fn set(&self, collection: &str, key: &str, record: &JobRecord) -> Result<()> {
        validate_collection_id(collection)?;
        validate_document_id(key)?;
        if self.failing_keys.contains(key) {
            return Err(Error::store(format!("write rejected at key '{key}'")));
        }
        self.check_title(record)?;

        let mut inner = self.lock();
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), record.clone());
        inner.writes.push(WriteOp::Set {
            collection: collection.to_string(),
            key: key.to_string(),
        });
        Ok(())
    }

    async fn add(&self, collection: &str, record: &JobRecord) -> Result<String> {
        validate_collection_id(collection)?;
        self.check_title(record)?;

        let key = Uuid::new_v4().simple().to_string();
        let mut inner = self.lock();
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.clone(), record.clone());
        inner.writes.push(WriteOp::Add {
            collection: collection.to_string(),
            key: key.clone(),
        });
        Ok(key)
    }
}
