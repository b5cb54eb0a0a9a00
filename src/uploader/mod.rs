//! Job uploader
//!
//! Writes each job record into a collection, one request at a time.
//! A failed record is logged and skipped; the batch always runs to the end.

use crate::config::{DEFAULT_COLLECTION, DEFAULT_WRITE_TIMEOUT};
use crate::error::{Error, Result};
use crate::firestore::validate_collection_id;
use crate::store::DocumentStore;
use crate::types::{record_title, DocumentKey, IdPolicy, JobRecord};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Progress is logged after every this many successful writes
pub const PROGRESS_INTERVAL: usize = 10;

/// Options for one upload run
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Target collection
    pub collection: String,
    /// How the `id` field selects document keys
    pub id_policy: IdPolicy,
    /// Bound on each document write
    pub write_timeout: Duration,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            id_policy: IdPolicy::default(),
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }
}

/// Counts for a finished upload
///
/// `uploaded` counts writes that returned without error, not what the store
/// durably committed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// Records a write was attempted for
    pub attempted: usize,
    /// Writes that returned without error
    pub uploaded: usize,
    /// Writes that failed and were skipped
    pub failed: usize,
}

/// Upload `jobs` into `options.collection`.
///
/// Returns `Err` only when the store or collection is unusable as a whole;
/// per-record failures are logged and counted in the summary.
pub async fn upload(
    store: &dyn DocumentStore,
    jobs: &[JobRecord],
    options: &UploadOptions,
) -> Result<UploadSummary> {
    if jobs.is_empty() {
        warn!("[!] No jobs to upload.");
        return Ok(UploadSummary::default());
    }

    info!("[>] Uploading {} jobs to Firebase...", jobs.len());

    store.ensure_ready()?;
    validate_collection_id(&options.collection)?;

    let mut summary = UploadSummary::default();
    for job in jobs {
        summary.attempted += 1;
        let key = DocumentKey::for_record(job, options.id_policy);

        match write_job(store, &options.collection, &key, job, options.write_timeout).await {
            Ok(stored_at) => {
                summary.uploaded += 1;
                debug!("Stored job at {}/{}", options.collection, stored_at);
                if summary.uploaded % PROGRESS_INTERVAL == 0 {
                    info!("   ... uploaded {} jobs", summary.uploaded);
                }
            }
            Err(e) => {
                summary.failed += 1;
                error!("[X] Error uploading job {}: {e}", record_title(job));
            }
        }
    }

    info!(
        "[OK] Successfully uploaded {} jobs to Firestore.",
        summary.uploaded
    );
    Ok(summary)
}

/// Write one record and return the key it was stored under
async fn write_job(
    store: &dyn DocumentStore,
    collection: &str,
    key: &DocumentKey,
    job: &JobRecord,
    timeout: Duration,
) -> Result<String> {
    let write = async {
        match key {
            DocumentKey::Explicit(id) => store.set(collection, id, job).await.map(|()| id.clone()),
            DocumentKey::Generated => store.add(collection, job).await,
        }
    };

    #[allow(clippy::cast_possible_truncation)]
    let timeout_ms = timeout.as_millis() as u64;
    tokio::time::timeout(timeout, write)
        .await
        .map_err(|_| Error::Timeout { timeout_ms })?
}
