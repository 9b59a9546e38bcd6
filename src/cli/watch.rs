//! Watch loop - polls source files and commits every change.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Error;
use crate::git::{self, Git};
use crate::watcher::{self, clock, CommitOutcome, FileTracker};

/// Time allowed for `git remote get-url` at startup.
const REMOTE_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolve the directory to watch.
///
/// Defaults to the current directory; a file selects its parent. The result
/// must contain `.git`.
pub fn resolve_root(path: Option<&Path>) -> Result<PathBuf, Error> {
    let cwd = std::env::current_dir()?;
    let target = match path {
        Some(p) => cwd.join(p),
        None => cwd,
    };

    let dir = if target.is_file() {
        target.parent().map(Path::to_path_buf).unwrap_or(target)
    } else {
        target
    };
    let dir = dir.canonicalize().unwrap_or(dir);

    if !git::is_repository(&dir) {
        return Err(Error::NotARepository(dir));
    }
    Ok(dir)
}

/// Run the watcher until Ctrl+C.
pub async fn run(cli: &Cli) -> Result<(), Error> {
    let root = resolve_root(cli.path.as_deref())?;
    let mut config = Config::load(&root, cli.config.as_deref())?;
    if cli.no_push {
        config.git.push = false;
    }

    let extension = config.watch.extension.clone();
    let files = watcher::scan(&root, &extension);
    if files.is_empty() {
        return Err(Error::NoSourceFiles { extension, root });
    }

    let git = Git::new(&root);

    println!(
        "🔍 Watching all .{} files in: {}",
        extension,
        root.display()
    );
    match git.remote_url(&config.git.remote, REMOTE_LOOKUP_TIMEOUT).await {
        Ok(url) => println!("📦 Repository: {}", url),
        Err(e) => debug!(error = %e, "No remote URL"),
    }
    println!("📄 Files tracked: {}", files.len());
    for file in &files {
        println!("   - {}", relative(&root, file).display());
    }
    if !config.git.push {
        println!("Push disabled, commits stay local");
    }
    println!("Auto-commit enabled - Press Ctrl+C to stop\n");

    let mut tracker = FileTracker::seed(&files);
    info!(root = %root.display(), files = tracker.len(), "Watcher started");

    tokio::select! {
        _ = watch_loop(&root, &config, &git, &mut tracker) => {}
        _ = interrupted(tokio::signal::ctrl_c()) => {}
    }

    println!("\n✓ Watcher stopped");
    info!("Watcher stopped");
    Ok(())
}

/// Poll forever; every error is handled per file.
async fn watch_loop(root: &Path, config: &Config, git: &Git, tracker: &mut FileTracker) {
    loop {
        sleep(config.watch.poll_interval()).await;

        let files = watcher::scan(root, &config.watch.extension);
        let poll = tracker.poll(&files);

        for path in &poll.discovered {
            println!("📝 New file detected: {}", relative(root, path).display());
        }

        for path in &poll.changed {
            // Let the editor finish writing.
            sleep(config.watch.settle_delay()).await;
            println!(
                "[{}] 📝 Changed: {}",
                clock(),
                relative(root, path).display()
            );

            match watcher::commit_file(git, &config.git, path).await {
                Ok(CommitOutcome::Committed { .. }) => {}
                Ok(CommitOutcome::NothingStaged) => {
                    println!("  No changes to commit");
                }
                Err(e) => {
                    error!(path = %path.display(), error = %e, "Commit attempt failed");
                }
            }
        }
    }
}

/// Resolve once `signal` reports an interrupt.
///
/// If the handler cannot be installed this never resolves, and the watcher
/// keeps running until the process is killed.
async fn interrupted<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

fn relative<'a>(root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}
