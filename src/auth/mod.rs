//! Authentication module
//!
//! Supports static Bearer tokens (Firestore emulator) and Google
//! service-account keys exchanged for OAuth2 access tokens.
//!
//! The `Authenticator` applies auth to outgoing requests and caches the
//! access token for the service-account flow.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{
    AuthConfig, CachedToken, ServiceAccountKey, DATASTORE_SCOPE, DEFAULT_TOKEN_URI,
    EMULATOR_TOKEN,
};

#[cfg(test)]
mod tests;
