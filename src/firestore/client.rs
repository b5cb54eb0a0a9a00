//! Firestore client over the v1 REST API

use super::ids::{validate_collection_id, validate_document_id};
use super::value::to_document;
use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::store::DocumentStore;
use crate::types::{JobRecord, JsonValue};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Production Firestore endpoint
pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Database id used by Firebase projects
pub const DEFAULT_DATABASE: &str = "(default)";

/// Configuration for a Firestore client
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    /// Google Cloud project id
    pub project_id: String,
    /// Database id within the project
    pub database_id: String,
    /// REST endpoint, including the `/v1` prefix
    pub base_url: String,
    /// Timeout for each request
    pub timeout: Duration,
    /// How requests are authenticated
    pub auth: AuthConfig,
}

impl FirestoreConfig {
    /// Config for the production endpoint
    pub fn new(project_id: impl Into<String>, auth: AuthConfig) -> Self {
        Self {
            project_id: project_id.into(),
            database_id: DEFAULT_DATABASE.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            auth,
        }
    }

    /// Config for a local emulator listening on `host` (e.g. `localhost:8080`)
    pub fn emulator(project_id: impl Into<String>, host: &str) -> Self {
        let base_url = if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}/v1", host.trim_end_matches('/'))
        } else {
            format!("http://{host}/v1")
        };
        Self {
            base_url,
            ..Self::new(project_id, AuthConfig::emulator())
        }
    }

    /// Override the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Authenticated handle to one Firestore database
#[derive(Debug)]
pub struct FirestoreClient {
    http: HttpClient,
    base_url: Url,
    project_id: String,
    database_id: String,
}

impl FirestoreClient {
    /// Build a client; validates the endpoint and the signing key, no network I/O
    pub fn new(config: FirestoreConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "Firestore base URL cannot be a base: {}",
                config.base_url
            )));
        }
        if config.project_id.trim().is_empty() {
            return Err(Error::config("Firestore project id is empty"));
        }

        let http = HttpClient::with_auth(config.timeout, config.auth)?;
        http.authenticator().validate()?;

        Ok(Self {
            http,
            base_url,
            project_id: config.project_id,
            database_id: config.database_id,
        })
    }

    /// Project this client writes to
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// URL of a collection, or of a document when `document_id` is given
    pub fn document_url(&self, collection: &str, document_id: Option<&str>) -> Result<String> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::config("Firestore base URL cannot be a base"))?;
            segments.pop_if_empty().extend([
                "projects",
                self.project_id.as_str(),
                "databases",
                self.database_id.as_str(),
                "documents",
                collection,
            ]);
            if let Some(id) = document_id {
                segments.push(id);
            }
        }
        Ok(url.to_string())
    }

    /// Write `record` at `collection/id`, replacing any existing document
    pub async fn set_document(&self, collection: &str, id: &str, record: &JobRecord) -> Result<()> {
        validate_collection_id(collection)?;
        validate_document_id(id)?;

        let url = self.document_url(collection, Some(id))?;
        debug!("PATCH {url}");
        // No updateMask: the stored document becomes exactly `record`
        self.http.patch(&url, &to_document(record)).await?;
        Ok(())
    }

    /// Insert `record` into `collection` under a server-generated id
    pub async fn add_document(&self, collection: &str, record: &JobRecord) -> Result<String> {
        validate_collection_id(collection)?;

        let url = self.document_url(collection, None)?;
        debug!("POST {url}");
        let response = self.http.post(&url, &to_document(record)).await?;
        let created: JsonValue = response.json().await.map_err(Error::Http)?;

        created
            .get("name")
            .and_then(JsonValue::as_str)
            .and_then(|name| name.rsplit('/').next())
            .filter(|id| !id.is_empty())
            .map(String::from)
            .ok_or_else(|| Error::store("Created document has no name"))
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    fn ensure_ready(&self) -> Result<()> {
        Ok(())
    }

    async fn set(&self, collection: &str, key: &str, record: &JobRecord) -> Result<()> {
        self.set_document(collection, key, record).await
    }

    async fn add(&self, collection: &str, record: &JobRecord) -> Result<String> {
        self.add_document(collection, record).await
    }
}
