//! Authenticator implementation
//!
//! Handles applying authentication to requests and managing token refresh.

use super::types::{AuthConfig, CachedToken, ServiceAccountKey};
use crate::error::{Error, Result};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Authenticator handles applying authentication to HTTP requests
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Cached access token for service-account auth
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create an authenticator sharing `http_client` for token requests
    pub fn with_client(config: AuthConfig, http_client: Client) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Check that the configured credentials can sign tokens.
    ///
    /// Does not contact the token endpoint.
    pub fn validate(&self) -> Result<()> {
        match &self.config {
            AuthConfig::ServiceAccount { key, .. } => encoding_key(key).map(|_| ()),
            AuthConfig::Bearer { .. } => Ok(()),
        }
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::Bearer { token } => Ok(req.bearer_auth(token)),
            AuthConfig::ServiceAccount {
                key,
                scopes,
                token_lifetime_seconds,
            } => {
                let token = self
                    .get_or_refresh_token(key, scopes, *token_lifetime_seconds)
                    .await?;
                Ok(req.bearer_auth(token))
            }
        }
    }

    /// Get a valid token, refreshing if necessary
    async fn get_or_refresh_token(
        &self,
        key: &ServiceAccountKey,
        scopes: &[String],
        lifetime_seconds: u64,
    ) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Double-check after acquiring write lock
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self
            .exchange_service_account_jwt(key, scopes, lifetime_seconds)
            .await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Sign a JWT with the service-account key and exchange it for an access token
    async fn exchange_service_account_jwt(
        &self,
        key: &ServiceAccountKey,
        scopes: &[String],
        lifetime_seconds: u64,
    ) -> Result<CachedToken> {
        let jwt = sign_assertion(key, scopes, lifetime_seconds)?;

        debug!("Exchanging service account assertion at {}", key.token_uri);
        let form = [("grant_type", JWT_BEARER_GRANT), ("assertion", jwt.as_str())];

        let response = self
            .http_client
            .post(&key.token_uri)
            .form(&form)
            .send()
            .await
            .map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::TokenRefresh {
                message: format!("JWT token exchange failed with status {status}: {body}"),
            });
        }

        let token_response: TokenResponse = response.json().await.map_err(Error::Http)?;
        Ok(token_response.into_cached_token())
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn encoding_key(key: &ServiceAccountKey) -> Result<EncodingKey> {
    EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| Error::JwtGeneration {
        message: format!("Invalid private key: {e}"),
    })
}

/// Build the RS256 assertion sent to the token endpoint
fn sign_assertion(
    key: &ServiceAccountKey,
    scopes: &[String],
    lifetime_seconds: u64,
) -> Result<String> {
    let claims = assertion_claims(key, scopes, lifetime_seconds);

    let mut header = Header::new(Algorithm::RS256);
    header.kid.clone_from(&key.private_key_id);

    encode(&header, &claims, &encoding_key(key)?).map_err(|e| Error::JwtGeneration {
        message: format!("Failed to encode JWT: {e}"),
    })
}

fn assertion_claims(key: &ServiceAccountKey, scopes: &[String], lifetime_seconds: u64) -> JwtClaims {
    let now = Utc::now().timestamp();
    #[allow(clippy::cast_possible_wrap)]
    let exp = now + lifetime_seconds as i64;

    JwtClaims {
        iss: key.client_email.clone(),
        sub: key.client_email.clone(),
        aud: key.token_uri.clone(),
        scope: scopes.join(" "),
        iat: now,
        exp,
    }
}

/// OAuth2 token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenResponse {
    fn into_cached_token(self) -> CachedToken {
        match self.expires_in {
            Some(secs) => CachedToken::expires_in(self.access_token, secs),
            None => CachedToken::new(self.access_token, None),
        }
    }
}

/// JWT claims for the service-account assertion
#[derive(Debug, Serialize)]
struct JwtClaims {
    iss: String,
    sub: String,
    aud: String,
    scope: String,
    iat: i64,
    exp: i64,
}

#[cfg(test)]
mod claim_tests {
    use super::*;

    #[test]
    fn test_assertion_claims() {
        let key = ServiceAccountKey {
            key_type: "service_account".to_string(),
            project_id: "demo".to_string(),
            private_key_id: Some("kid-1".to_string()),
            private_key: "unused".to_string(),
            client_email: "uploader@demo.iam.gserviceaccount.com".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
        };
        let scopes = vec!["a".to_string(), "b".to_string()];

        let claims = assertion_claims(&key, &scopes, 3600);
        assert_eq!(claims.iss, "uploader@demo.iam.gserviceaccount.com");
        assert_eq!(claims.sub, claims.iss);
        assert_eq!(claims.aud, "https://oauth2.googleapis.com/token");
        assert_eq!(claims.scope, "a b");
        assert_eq!(claims.exp - claims.iat, 3600);
    }
}
