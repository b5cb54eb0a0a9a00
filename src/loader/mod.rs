//! Job file loader
//!
//! Reads the structured jobs file and checks its shape.
//!
//! # Overview
//!
//! The file must hold a non-empty JSON array of objects. Records are returned
//! as-is; no per-field validation happens here.

mod parser;

pub use parser::{load_jobs, load_jobs_from_str};
