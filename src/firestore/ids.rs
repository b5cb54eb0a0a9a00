//! Collection and document id rules
//!
//! Firestore rejects ids that are empty, contain `/`, are `.` or `..`,
//! match `__.*__`, or exceed 1500 bytes.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

const MAX_ID_BYTES: usize = 1500;

static RESERVED_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^__.*__$").expect("Invalid reserved id regex"));

fn check_id(id: &str) -> std::result::Result<(), &'static str> {
    if id.is_empty() {
        return Err("must not be empty");
    }
    if id.len() > MAX_ID_BYTES {
        return Err("must be at most 1500 bytes");
    }
    if id.contains('/') {
        return Err("must not contain '/'");
    }
    if id == "." || id == ".." {
        return Err("must not be '.' or '..'");
    }
    if RESERVED_ID.is_match(id) {
        return Err("ids matching __.*__ are reserved");
    }
    Ok(())
}

/// Validate a collection id
pub fn validate_collection_id(collection: &str) -> Result<()> {
    check_id(collection).map_err(|message| Error::invalid_collection(collection, message))
}

/// Validate a document id
pub fn validate_document_id(id: &str) -> Result<()> {
    check_id(id).map_err(|message| Error::invalid_document_id(id, message))
}
