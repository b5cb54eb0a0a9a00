//! JSON parser for job files

use crate::error::{Error, Result};
use crate::types::{JobRecord, JsonValue};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load the jobs from a file
///
/// # Errors
///
/// - `FileNotFound` if `path` does not exist
/// - `EmptyFile` if the file has zero length
/// - `JsonParse` if the content is not valid JSON
/// - `InvalidShape` if the content is not a non-empty array of objects
///
/// # Examples
///
/// ```ignore
/// let jobs = load_jobs("Data/structuered_jobs.json")?;
/// ```
pub fn load_jobs(path: impl AsRef<Path>) -> Result<Vec<JobRecord>> {
    let path = path.as_ref();
    let path_display = path.display().to_string();

    if !path.exists() {
        return Err(Error::FileNotFound { path: path_display });
    }
    if fs::metadata(path)?.len() == 0 {
        return Err(Error::EmptyFile { path: path_display });
    }

    let content = fs::read_to_string(path)?;
    let jobs = parse_jobs(&content, &path_display)?;
    debug!("Loaded {} jobs from {}", jobs.len(), path_display);
    Ok(jobs)
}

/// Load the jobs from a JSON string
pub fn load_jobs_from_str(content: &str) -> Result<Vec<JobRecord>> {
    parse_jobs(content, "<inline>")
}

fn parse_jobs(content: &str, origin: &str) -> Result<Vec<JobRecord>> {
    let value: JsonValue = serde_json::from_str(content)?;
    let shape_error = || Error::InvalidShape {
        path: origin.to_string(),
    };

    let JsonValue::Array(items) = value else {
        return Err(shape_error());
    };
    if items.is_empty() {
        return Err(shape_error());
    }

    items
        .into_iter()
        .map(|item| match item {
            JsonValue::Object(record) => Ok(record),
            _ => Err(shape_error()),
        })
        .collect()
}
