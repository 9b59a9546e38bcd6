//! autocommit library.
//!
//! Polls a git working tree for edited source files and turns every change
//! into a commit with a generated message, then pushes it.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod watcher;

pub use error::Error;
