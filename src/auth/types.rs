//! Auth configuration types
//!
//! `ServiceAccountKey` mirrors the JSON file downloaded from the Firebase
//! console. `AuthConfig` is the runtime form handed to the `Authenticator`.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// OAuth2 scope granting read/write access to Firestore
pub const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";

/// Token endpoint used when the key file omits `token_uri`
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Bearer token accepted by the Firestore emulator
pub const EMULATOR_TOKEN: &str = "owner";

const SERVICE_ACCOUNT_TYPE: &str = "service_account";

/// Google service-account key file
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    /// Always "service_account"
    #[serde(rename = "type")]
    pub key_type: String,
    /// Project the key belongs to
    pub project_id: String,
    /// Key id, sent as the JWT `kid` header
    #[serde(default)]
    pub private_key_id: Option<String>,
    /// RSA private key (PEM format)
    pub private_key: String,
    /// Service account email (JWT issuer)
    pub client_email: String,
    /// OAuth2 token endpoint
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Read and validate a key file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        if !path.exists() {
            return Err(Error::FileNotFound { path: display });
        }

        let content = fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| match e {
            Error::JsonParse(inner) => Error::credentials(display, inner.to_string()),
            Error::InvalidCredentials { message, .. } => Error::credentials(display, message),
            other => other,
        })
    }

    /// Parse and validate a key from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        let key: Self = serde_json::from_str(content)?;
        key.validate()?;
        Ok(key)
    }

    fn validate(&self) -> Result<()> {
        if self.key_type != SERVICE_ACCOUNT_TYPE {
            return Err(Error::credentials(
                "<inline>",
                format!(
                    "expected type '{SERVICE_ACCOUNT_TYPE}', found '{}'",
                    self.key_type
                ),
            ));
        }
        for (field, value) in [
            ("project_id", &self.project_id),
            ("client_email", &self.client_email),
            ("private_key", &self.private_key),
        ] {
            if value.trim().is_empty() {
                return Err(Error::credentials(
                    "<inline>",
                    format!("field '{field}' is empty"),
                ));
            }
        }
        Ok(())
    }
}

// Keep the private key out of debug output.
impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

/// Authentication configuration
#[derive(Debug, Clone)]
pub enum AuthConfig {
    /// Static bearer token (the emulator accepts "owner")
    Bearer {
        /// The bearer token
        token: String,
    },

    /// Service account exchanging a signed JWT for an access token
    ServiceAccount {
        /// Parsed key file
        key: ServiceAccountKey,
        /// Requested scopes
        scopes: Vec<String>,
        /// Token lifetime in seconds
        token_lifetime_seconds: u64,
    },
}

impl AuthConfig {
    /// Service-account auth with the Firestore scope and a one-hour token
    pub fn service_account(key: ServiceAccountKey) -> Self {
        Self::ServiceAccount {
            key,
            scopes: vec![DATASTORE_SCOPE.to_string()],
            token_lifetime_seconds: 3600,
        }
    }

    /// Auth for the local Firestore emulator
    pub fn emulator() -> Self {
        Self::Bearer {
            token: EMULATOR_TOKEN.to_string(),
        }
    }
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_cached_token_not_expired() {
        let token = CachedToken::expires_in("test".to_string(), 3600);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_cached_token_expired() {
        let token = CachedToken::expires_in("test".to_string(), -100);
        assert!(token.is_expired());
    }

    #[test]
    fn test_cached_token_no_expiration() {
        let token = CachedToken::new("test".to_string(), None);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_emulator_config() {
        let config = AuthConfig::emulator();
        assert!(matches!(config, AuthConfig::Bearer { token } if token == "owner"));
    }
}
