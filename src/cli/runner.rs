//! CLI runner - executes an upload run

use crate::cli::commands::Cli;
use crate::config::Settings;
use crate::database;
use crate::error::{Error, Result};
use crate::loader::load_jobs;
use crate::store::DocumentStore;
use crate::uploader::{upload, UploadSummary};
use tracing::{error, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Resolved settings for this run
    pub fn settings(&self) -> Result<Settings> {
        let settings = self.cli.settings();
        if settings.write_timeout.is_zero() {
            return Err(Error::config("--timeout-secs must be greater than zero"));
        }
        Ok(settings)
    }

    /// Initialize the shared Firestore handle, then load and upload
    pub async fn run(&self) -> Result<UploadSummary> {
        let settings = self.settings()?;
        let handle = database::shared(&settings);
        self.run_with_store(handle).await
    }

    /// Load the jobs file and upload it through `store`
    pub async fn run_with_store(&self, store: &dyn DocumentStore) -> Result<UploadSummary> {
        let settings = self.settings()?;

        let jobs = load_jobs(&settings.data_path).inspect_err(|e| {
            error!("[X] Cannot upload: {e}");
        })?;

        let summary = upload(store, &jobs, &settings.upload_options())
            .await
            .inspect_err(|e| {
                error!("[X] Firebase upload failed: {e}");
            })?;

        info!("[OK] Firebase upload step completed.");
        Ok(summary)
    }
}
