//! HTTP client module
//!
//! Thin wrapper over reqwest used by the Firestore client. Every request is
//! an authenticated JSON PATCH or POST to an absolute URL, bounded by the
//! client timeout. Non-2xx responses become `Error::HttpStatus` and are
//! never retried.

mod client;

pub use client::HttpClient;

#[cfg(test)]
mod tests;
