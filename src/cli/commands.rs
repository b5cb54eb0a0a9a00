//! CLI arguments

use crate::config::{
    default_credentials_path, default_data_path, Settings, DEFAULT_COLLECTION,
};
use crate::types::IdPolicy;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Upload structured job postings into Cloud Firestore
#[derive(Parser, Debug)]
#[command(name = "jobs-uploader")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Application root holding serviceAccountKey.json and Data/
    #[arg(long, env = "JOBS_UPLOADER_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Jobs file (defaults to <root>/Data/structuered_jobs.json)
    #[arg(long, env = "JOBS_UPLOADER_DATA")]
    pub data: Option<PathBuf>,

    /// Service account key (defaults to <root>/serviceAccountKey.json)
    #[arg(long, env = "JOBS_UPLOADER_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    /// Target collection
    #[arg(long, default_value = DEFAULT_COLLECTION)]
    pub collection: String,

    /// Project id (overrides the one in the key file)
    #[arg(long, env = "GOOGLE_CLOUD_PROJECT")]
    pub project_id: Option<String>,

    /// Firestore emulator host:port; no credentials needed
    #[arg(long, env = "FIRESTORE_EMULATOR_HOST")]
    pub emulator_host: Option<String>,

    /// Timeout for each document write, in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    /// How the `id` field picks document keys
    #[arg(long, value_enum, default_value = "truthy")]
    pub id_policy: IdPolicy,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the arguments into run settings
    pub fn settings(&self) -> Settings {
        Settings {
            app_root: self.root.clone(),
            credentials_path: self
                .credentials
                .clone()
                .unwrap_or_else(|| default_credentials_path(&self.root)),
            data_path: self
                .data
                .clone()
                .unwrap_or_else(|| default_data_path(&self.root)),
            collection: self.collection.clone(),
            project_id: self.project_id.clone(),
            emulator_host: self.emulator_host.clone().filter(|h| !h.trim().is_empty()),
            write_timeout: Duration::from_secs(self.timeout_secs),
            id_policy: self.id_policy,
        }
    }
}
