//! CLI module
//!
//! Command-line entry point for an upload run.
//!
//! With no arguments the uploader reads `./serviceAccountKey.json` and
//! `./Data/structuered_jobs.json` and writes into the `jobs` collection.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::Runner;
