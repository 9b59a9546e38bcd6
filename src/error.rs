//! Error types for autocommit.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Crate error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error in {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Not a git repository - {}", .0.display())]
    NotARepository(PathBuf),

    #[error("No .{extension} files found in {}", .root.display())]
    NoSourceFiles { extension: String, root: PathBuf },

    #[error("git {op} failed: {stderr}")]
    Git { op: &'static str, stderr: String },

    #[error("git {op} timed out after {timeout:?}")]
    GitTimeout { op: &'static str, timeout: Duration },

    #[error("File is not valid UTF-8: {}", .0.display())]
    NotUtf8(PathBuf),
}
