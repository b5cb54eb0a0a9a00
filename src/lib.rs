//! # Jobs Uploader
//!
//! Uploads structured job postings from a JSON file into a Cloud Firestore
//! collection.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use jobs_uploader::config::Settings;
//! use jobs_uploader::database::DatabaseHandle;
//! use jobs_uploader::loader::load_jobs;
//! use jobs_uploader::uploader::upload;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> jobs_uploader::Result<()> {
//!     let settings = Settings::from_root("backend");
//!     let handle = DatabaseHandle::initialize(&settings);
//!
//!     let jobs = load_jobs(&settings.data_path)?;
//!     let summary = upload(&handle, &jobs, &settings.upload_options()).await?;
//!     println!("{} uploaded", summary.uploaded);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! cli ──► loader ──► uploader ──► DocumentStore
//!  │                                  ▲     ▲
//!  └──► database (shared handle) ─────┘     │
//!             │                        MemoryStore
//!             ▼
//!        firestore ──► http ──► auth (service account / emulator)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Job records and document keys
pub mod types;

/// Run settings and default paths
pub mod config;

/// Service-account and emulator authentication
pub mod auth;

/// HTTP client with timeouts
pub mod http;

/// Firestore REST client
pub mod firestore;

/// Document store trait and in-memory store
pub mod store;

/// Process-wide Firestore handle
pub mod database;

/// Job file loader
pub mod loader;

/// Job uploader
pub mod uploader;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::{DocumentKey, IdPolicy, JobRecord};

pub use loader::{load_jobs, load_jobs_from_str};
pub use uploader::{upload, UploadOptions, UploadSummary};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
