//! Thin wrapper over the `git` command line.
//!
//! Each call maps to one subprocess run from the repository root. A call
//! with a timeout kills the child when the limit passes.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::error::Error;

/// Check if `dir` is the root of a git working tree.
pub fn is_repository(dir: &Path) -> bool {
    dir.join(".git").exists()
}

/// git runner bound to one repository.
#[derive(Debug, Clone)]
pub struct Git {
    repo_root: PathBuf,
}

impl Git {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    /// `git add -- <path>`, with the path relative to the repository root.
    pub async fn stage(&self, path: &Path, timeout: Duration) -> Result<(), Error> {
        let relative = path.strip_prefix(&self.repo_root).unwrap_or(path);
        let args: [&OsStr; 3] = ["add".as_ref(), "--".as_ref(), relative.as_os_str()];
        let output = self.run("add", args, Some(timeout)).await?;
        check("add", &output)
    }

    /// Whether the index differs from HEAD (`git diff --cached --quiet`).
    pub async fn has_staged_changes(&self, timeout: Duration) -> Result<bool, Error> {
        let output = self
            .run("diff", ["diff", "--cached", "--quiet"], Some(timeout))
            .await?;
        Ok(!output.status.success())
    }

    /// `git commit -m <message> --author=<author>`. Not time-bounded.
    pub async fn commit(&self, message: &str, author: &str) -> Result<(), Error> {
        let author = format!("--author={}", author);
        let output = self
            .run("commit", ["commit", "-m", message, author.as_str()], None)
            .await?;
        check("commit", &output)
    }

    /// `git push <remote> <branch>`.
    pub async fn push(&self, remote: &str, branch: &str, timeout: Duration) -> Result<(), Error> {
        let output = self
            .run("push", ["push", remote, branch], Some(timeout))
            .await?;
        check("push", &output)
    }

    /// URL configured for `remote`.
    pub async fn remote_url(&self, remote: &str, timeout: Duration) -> Result<String, Error> {
        let output = self
            .run("remote", ["remote", "get-url", remote], Some(timeout))
            .await?;
        check("remote", &output)?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn run<I, S>(
        &self,
        op: &'static str,
        args: I,
        timeout: Option<Duration>,
    ) -> Result<Output, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new("git");
        cmd.args(args)
            .current_dir(&self.repo_root)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| Error::GitTimeout { op, timeout: limit })??,
            None => cmd.output().await?,
        };

        debug!(op, status = ?output.status.code(), "git finished");
        Ok(output)
    }
}

/// Turn a non-zero exit into `Error::Git`, keeping git's own explanation.
fn check(op: &'static str, output: &Output) -> Result<(), Error> {
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let stderr = if stderr.is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr
    };

    Err(Error::Git { op, stderr })
}
