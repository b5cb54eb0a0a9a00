//! Common types used throughout the jobs uploader
//!
//! This module contains the job record representation and the rules for
//! deciding which document key a record is stored under.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// One job posting: an arbitrary, ordered JSON object
pub type JobRecord = JsonObject;

/// Field holding the caller-supplied document key
pub const ID_FIELD: &str = "id";

/// Field used to identify a record in diagnostics
pub const TITLE_FIELD: &str = "title";

/// Placeholder used when a record has no usable title
pub const UNKNOWN_TITLE: &str = "Unknown";

// ============================================================================
// Document Keys
// ============================================================================

/// How a record's `id` field is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// Falsy ids (`null`, `false`, `0`, `""`, `[]`, `{}`) are treated as absent
    #[default]
    Truthy,
    /// Any non-null id is a key, as long as its string form is non-empty
    Present,
}

/// Where a record is written in the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKey {
    /// Set (overwrite) the document at this key
    Explicit(String),
    /// Add a new document under a store-assigned key
    Generated,
}

impl DocumentKey {
    /// Resolve the document key for a record
    pub fn for_record(record: &JobRecord, policy: IdPolicy) -> Self {
        let Some(id) = record.get(ID_FIELD) else {
            return Self::Generated;
        };

        let usable = match policy {
            IdPolicy::Truthy => is_truthy(id),
            IdPolicy::Present => !id.is_null(),
        };
        if !usable {
            return Self::Generated;
        }

        let key = key_string(id);
        if key.is_empty() {
            Self::Generated
        } else {
            Self::Explicit(key)
        }
    }
}

/// Truthiness of a JSON value: empty, zero, false and null values are falsy
pub fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(a) => !a.is_empty(),
        JsonValue::Object(o) => !o.is_empty(),
    }
}

/// String form of a value used as a document key
///
/// Strings are used verbatim and every other value as its compact JSON text,
/// so `true` keys a document as `"true"` (never `"True"`) and `1.5` as `"1.5"`.
pub fn key_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Title of a record for log lines
///
/// A missing or null title reads `Unknown` rather than `None`. Non-string
/// titles use their JSON text like [`key_string`].
pub fn record_title(record: &JobRecord) -> String {
    match record.get(TITLE_FIELD) {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Null) | None => UNKNOWN_TITLE.to_string(),
        Some(other) => other.to_string(),
    }
}
