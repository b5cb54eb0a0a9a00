//! HTTP client with timeouts and authentication
//!
//! Sends the JSON writes of the Firestore client to absolute URLs:
//! - Per-request timeouts
//! - Authentication via the `Authenticator`
//! - Error classification for non-success responses

use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use reqwest::{Client, Method, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Authenticated HTTP client
pub struct HttpClient {
    client: Client,
    timeout: Duration,
    authenticator: Authenticator,
}

impl HttpClient {
    /// Create a client whose requests are bounded by `timeout` and signed by `auth_config`
    pub fn with_auth(timeout: Duration, auth_config: AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("jobs-uploader/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Http)?;
        let authenticator = Authenticator::with_client(auth_config, client.clone());

        Ok(Self {
            client,
            timeout,
            authenticator,
        })
    }

    /// The authenticator applied to every request
    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// POST a JSON body
    pub async fn post(&self, url: &str, body: &Value) -> Result<Response> {
        self.send(Method::POST, url, body).await
    }

    /// PATCH a JSON body
    pub async fn patch(&self, url: &str, body: &Value) -> Result<Response> {
        self.send(Method::PATCH, url, body).await
    }

    /// Send once; non-2xx statuses become `Error::HttpStatus`
    async fn send(&self, method: Method, url: &str, body: &Value) -> Result<Response> {
        let req = self
            .client
            .request(method.clone(), url)
            .json(body)
            .timeout(self.timeout);
        let req = self.authenticator.apply(req).await?;

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Err(self.timeout_error()),
            Err(e) => return Err(Error::Http(e)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Request succeeded: {method} {url}");
        Ok(response)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn timeout_error(&self) -> Error {
        Error::Timeout {
            timeout_ms: self.timeout.as_millis() as u64,
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("timeout", &self.timeout)
            .field("authenticator", &self.authenticator)
            .finish_non_exhaustive()
    }
}
