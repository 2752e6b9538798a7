//! WriteScore - dual-score writing analysis CLI
//!
//! Scores text along configurable stylistic dimensions and combines them
//! into an AI-likelihood index and an overall quality index.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = writescore::cli::Cli::parse();

    // RUST_LOG wins when set; otherwise the --log-level flag applies
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.clone()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    writescore::cli::run(cli)
}
