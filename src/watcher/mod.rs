//! File polling and commit handling.

pub mod commit;
pub mod scanner;
pub mod tracker;

pub use commit::{commit_file, CommitOutcome, PushStatus};
pub use scanner::scan;
pub use tracker::{FileTracker, PollResult};

/// Local wall-clock time for console lines.
pub(crate) fn clock() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
