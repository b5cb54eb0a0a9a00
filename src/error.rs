//! Error types for the jobs uploader
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the jobs uploader
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid credentials file '{path}': {message}")]
    InvalidCredentials { path: String, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Token refresh failed: {message}")]
    TokenRefresh { message: String },

    #[error("JWT generation failed: {message}")]
    JwtGeneration { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Input Errors
    // ============================================================================
    #[error("'{path}' does not exist.")]
    FileNotFound { path: String },

    #[error("'{path}' is empty.")]
    EmptyFile { path: String },

    #[error("'{path}' must contain a non-empty list of jobs.")]
    InvalidShape { path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Document Store Errors
    // ============================================================================
    #[error("Firestore client is not initialized: {reason}")]
    ClientNotInitialized { reason: String },

    #[error("Invalid collection id '{collection}': {message}")]
    InvalidCollection { collection: String, message: String },

    #[error("Invalid document id '{id}': {message}")]
    InvalidDocumentId { id: String, message: String },

    #[error("Store error: {message}")]
    Store { message: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid credentials error
    pub fn credentials(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a not-initialized error
    pub fn not_initialized(reason: impl Into<String>) -> Self {
        Self::ClientNotInitialized {
            reason: reason.into(),
        }
    }

    /// Create an invalid collection error
    pub fn invalid_collection(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidCollection {
            collection: collection.into(),
            message: message.into(),
        }
    }

    /// Create an invalid document id error
    pub fn invalid_document_id(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDocumentId {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}

/// Result type alias for the jobs uploader
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
