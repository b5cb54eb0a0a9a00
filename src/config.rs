//! Run configuration
//!
//! Every path is derived from an application root, matching the layout the
//! uploader was written for:
//!
//! ```text
//! <root>/
//!   serviceAccountKey.json
//!   Data/structuered_jobs.json
//! ```

use crate::types::IdPolicy;
use crate::uploader::UploadOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Credential file name, relative to the application root
pub const CREDENTIALS_FILE: &str = "serviceAccountKey.json";

/// Data directory, relative to the application root
pub const DATA_DIR: &str = "Data";

/// Job file name inside the data directory
pub const DATA_FILE: &str = "structuered_jobs.json";

/// Collection the jobs are written to
pub const DEFAULT_COLLECTION: &str = "jobs";

/// Project id used with the emulator when none is configured
pub const DEFAULT_EMULATOR_PROJECT: &str = "demo-project";

/// Default bound on a single document write
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolved settings for one upload run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Application root all default paths hang off
    pub app_root: PathBuf,
    /// Service-account key file
    pub credentials_path: PathBuf,
    /// Input JSON array of jobs
    pub data_path: PathBuf,
    /// Target collection
    pub collection: String,
    /// Overrides the key file's project id
    pub project_id: Option<String>,
    /// `host:port` of a Firestore emulator; skips the credential file
    pub emulator_host: Option<String>,
    /// Bound on each document write
    pub write_timeout: Duration,
    /// How the `id` field selects document keys
    pub id_policy: IdPolicy,
}

impl Settings {
    /// Defaults rooted at `app_root`
    pub fn from_root(app_root: impl AsRef<Path>) -> Self {
        let app_root = app_root.as_ref().to_path_buf();
        Self {
            credentials_path: default_credentials_path(&app_root),
            data_path: default_data_path(&app_root),
            app_root,
            collection: DEFAULT_COLLECTION.to_string(),
            project_id: None,
            emulator_host: None,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
            id_policy: IdPolicy::default(),
        }
    }

    /// Options handed to the uploader
    pub fn upload_options(&self) -> UploadOptions {
        UploadOptions {
            collection: self.collection.clone(),
            id_policy: self.id_policy,
            write_timeout: self.write_timeout,
        }
    }
}

/// `<root>/serviceAccountKey.json`
pub fn default_credentials_path(app_root: &Path) -> PathBuf {
    app_root.join(CREDENTIALS_FILE)
}

/// `<root>/Data/structuered_jobs.json`
pub fn default_data_path(app_root: &Path) -> PathBuf {
    app_root.join(DATA_DIR).join(DATA_FILE)
}
