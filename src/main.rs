//! Jobs uploader CLI
//!
//! Loads the structured jobs file and writes every job into Firestore.

use clap::Parser;
use jobs_uploader::cli::{Cli, Runner};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Diagnostics are the prefixed lines themselves, so no level/target/time
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stdout)
        .without_time()
        .with_level(false)
        .with_target(false)
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        // Load and upload failures were already logged where they happened
        if matches!(e, jobs_uploader::Error::Config { .. }) {
            error!("[X] {e}");
        }
        std::process::exit(1);
    }
}
