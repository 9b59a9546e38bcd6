//! Command line interface.

pub mod watch;

use std::path::PathBuf;

use clap::Parser;

/// autocommit - commit and push every saved change automatically
#[derive(Parser, Debug)]
#[command(name = "autocommit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// File or directory to watch (a file selects its parent directory)
    pub path: Option<PathBuf>,

    /// Commit locally but never push
    #[arg(long)]
    pub no_push: bool,

    /// Config file to use instead of .autocommit.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
