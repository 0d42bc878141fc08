//! Astview CLI binary.

use anyhow::Result;
use astview_cli::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the astview CLI.
///
/// Uses tokio's current_thread runtime: each run is one sequential
/// invocation of the external parser.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=astview=debug cargo run
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("astview=info")),
        )
        .with_target(false)
        .init();

    tracing::debug!("Starting astview CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Astview CLI completed successfully");
    Ok(())
}
