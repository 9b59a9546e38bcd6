//! autocommit - watches source files and commits every change.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use autocommit::cli::{self, Cli};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("autocommit=info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = cli::watch::run(&cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
