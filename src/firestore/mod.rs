//! Firestore REST client
//!
//! Writes job records into Cloud Firestore over the v1 REST API.
//!
//! # Overview
//!
//! - `value`: encoding of plain JSON as Firestore typed values
//! - `ids`: collection and document id validation
//! - `client`: `set` (PATCH, full overwrite) and `add` (POST, generated key)

mod client;
mod ids;
mod value;

pub use client::{FirestoreClient, FirestoreConfig, DEFAULT_BASE_URL, DEFAULT_DATABASE};
pub use ids::{validate_collection_id, validate_document_id};
pub use value::{encode_value, to_document};
