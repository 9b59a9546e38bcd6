//! Last-seen modification times for tracked files.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

/// Result of one poll cycle.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PollResult {
    /// Paths seen for the first time this cycle.
    pub discovered: Vec<PathBuf>,
    /// Previously seen paths whose mtime moved forward.
    pub changed: Vec<PathBuf>,
}

/// In-memory map from file path to last observed mtime.
///
/// `None` marks a file that has never had its mtime read; it compares older
/// than any real mtime and its first reading never counts as a change.
/// Entries are never removed.
#[derive(Debug, Default)]
pub struct FileTracker {
    mtimes: HashMap<PathBuf, Option<SystemTime>>,
}

impl FileTracker {
    /// Record the current mtime of every file, so that only later edits count.
    pub fn seed(files: &[PathBuf]) -> Self {
        Self::seed_with(files, read_mtime)
    }

    pub fn seed_with<F>(files: &[PathBuf], mut probe: F) -> Self
    where
        F: FnMut(&Path) -> io::Result<SystemTime>,
    {
        let mtimes = files
            .iter()
            .map(|path| (path.clone(), probe(path).ok()))
            .collect();
        Self { mtimes }
    }

    pub fn len(&self) -> usize {
        self.mtimes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mtimes.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.mtimes.contains_key(path)
    }

    /// Compare the freshly scanned files against the recorded mtimes.
    pub fn poll(&mut self, files: &[PathBuf]) -> PollResult {
        self.poll_with(files, read_mtime)
    }

    /// Same as [`poll`](Self::poll) with a custom mtime source.
    ///
    /// The recorded mtime is advanced as soon as a change is seen, so a change
    /// is reported once even if acting on it fails.
    pub fn poll_with<F>(&mut self, files: &[PathBuf], mut probe: F) -> PollResult
    where
        F: FnMut(&Path) -> io::Result<SystemTime>,
    {
        let mut result = PollResult::default();

        for path in files {
            if !self.mtimes.contains_key(path) {
                self.mtimes.insert(path.clone(), None);
                result.discovered.push(path.clone());
            }
        }

        for path in files {
            let current = match probe(path) {
                Ok(mtime) => mtime,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "Cannot read mtime, skipping");
                    continue;
                }
            };

            let Some(last) = self.mtimes.get_mut(path) else {
                continue;
            };

            match *last {
                Some(previous) if current <= previous => {}
                Some(_) => {
                    *last = Some(current);
                    result.changed.push(path.clone());
                }
                None => {
                    *last = Some(current);
                }
            }
        }

        result
    }
}

fn read_mtime(path: &Path) -> io::Result<SystemTime> {
    std::fs::metadata(path)?.modified()
}
