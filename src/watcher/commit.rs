//! Turn one changed file into one commit and one push.
//!
//! Each git step reports its own result. Staging and pushing failures are
//! logged and do not stop the attempt; everything else aborts it and is
//! handed back to the watch loop.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::analyzer;
use crate::config::GitConfig;
use crate::error::Error;
use crate::git::Git;
use crate::watcher::clock;

/// What happened to the pushed commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushStatus {
    Pushed,
    Failed(String),
    Disabled,
}

/// Result of a commit attempt that did not error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A commit was made; it stands whatever the push did.
    Committed { message: String, push: PushStatus },
    /// Nothing differed from HEAD after staging.
    NothingStaged,
}

/// Stage, commit and push a single file.
pub async fn commit_file(
    git: &Git,
    config: &GitConfig,
    path: &Path,
) -> Result<CommitOutcome, Error> {
    if let Err(e) = git.stage(path, config.stage_timeout()).await {
        warn!(path = %path.display(), error = %e, "Staging failed, checking index anyway");
    }

    if !git.has_staged_changes(config.diff_timeout()).await? {
        debug!(path = %path.display(), "No staged changes");
        return Ok(CommitOutcome::NothingStaged);
    }

    let bytes = tokio::fs::read(path).await?;
    let content = String::from_utf8(bytes).map_err(|_| Error::NotUtf8(path.to_path_buf()))?;
    let message = analyzer::commit_message(path, &content);

    git.commit(&message, &config.author).await?;
    println!("[{}] ✓ Committed: {}", clock(), message);
    info!(path = %path.display(), %message, "Committed");

    let push = if config.push {
        push_commit(git, config).await
    } else {
        PushStatus::Disabled
    };

    Ok(CommitOutcome::Committed { message, push })
}

async fn push_commit(git: &Git, config: &GitConfig) -> PushStatus {
    match git
        .push(&config.remote, &config.branch, config.push_timeout())
        .await
    {
        Ok(()) => {
            println!("  📤 Pushed to {}/{}", config.remote, config.branch);
            PushStatus::Pushed
        }
        Err(e) => {
            println!("  ⚠️  Push failed (check connection)");
            warn!(remote = %config.remote, branch = %config.branch, error = %e, "Push failed");
            PushStatus::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_AUTHOR;
    use crate::git::tests::{git_available, init_repo, last_commit};
    use std::process::Command as StdCommand;
    use std::time::Duration;

    const HELLO: &str =
        "package main\n\nimport \"fmt\"\n\nfunc main() {\n\tfmt.Println(\"hi\")\n}\n";

    fn offline() -> GitConfig {
        GitConfig {
            push: false,
            ..GitConfig::default()
        }
    }

    #[tokio::test]
    async fn test_commits_changed_file() {
        if !git_available() {
            return;
        }
        let repo = init_repo();
        let git = Git::new(repo.path());
        let file = repo.path().join("hello.go");
        std::fs::write(&file, HELLO).unwrap();

        let outcome = commit_file(&git, &offline(), &file).await.unwrap();
        assert_eq!(
            outcome,
            CommitOutcome::Committed {
                message: "Update hello: main package, functions, fmt (8 lines)".to_string(),
                push: PushStatus::Disabled,
            }
        );
        assert_eq!(last_commit(repo.path(), "%an <%ae>"), DEFAULT_AUTHOR);
        assert_eq!(
            last_commit(repo.path(), "%s"),
            "Update hello: main package, functions, fmt (8 lines)"
        );
    }

    #[tokio::test]
    async fn test_unchanged_content_makes_no_commit() {
        if !git_available() {
            return;
        }
        let repo = init_repo();
        let git = Git::new(repo.path());
        let file = repo.path().join("hello.go");
        std::fs::write(&file, HELLO).unwrap();

        commit_file(&git, &offline(), &file).await.unwrap();
        let head = last_commit(repo.path(), "%H");

        // Rewriting identical bytes bumps the mtime but not the content.
        std::fs::write(&file, HELLO).unwrap();
        let outcome = commit_file(&git, &offline(), &file).await.unwrap();
        assert_eq!(outcome, CommitOutcome::NothingStaged);
        assert_eq!(last_commit(repo.path(), "%H"), head);
    }

    #[tokio::test]
    async fn test_nested_file() {
        if !git_available() {
            return;
        }
        let repo = init_repo();
        let git = Git::new(repo.path());
        std::fs::create_dir_all(repo.path().join("pkg/store")).unwrap();
        let file = repo.path().join("pkg/store/cache.go");
        std::fs::write(&file, "package store\n").unwrap();

        let outcome = commit_file(&git, &offline(), &file).await.unwrap();
        assert_eq!(
            outcome,
            CommitOutcome::Committed {
                message: "Update cache: code update (2 lines)".to_string(),
                push: PushStatus::Disabled,
            }
        );
    }

    #[tokio::test]
    async fn test_push_failure_keeps_commit() {
        if !git_available() {
            return;
        }
        let repo = init_repo();
        let git = Git::new(repo.path());
        let file = repo.path().join("hello.go");
        std::fs::write(&file, HELLO).unwrap();

        let outcome = commit_file(&git, &GitConfig::default(), &file)
            .await
            .unwrap();
        match outcome {
            CommitOutcome::Committed { push, .. } => {
                assert!(matches!(push, PushStatus::Failed(_)));
            }
            other => panic!("expected a commit, got {:?}", other),
        }
        assert!(last_commit(repo.path(), "%s").starts_with("Update hello:"));
    }

    #[tokio::test]
    async fn test_non_utf8_aborts_attempt() {
        if !git_available() {
            return;
        }
        let repo = init_repo();
        let git = Git::new(repo.path());
        let file = repo.path().join("blob.go");
        std::fs::write(&file, [0xff, 0xfe, 0x00, 0x61]).unwrap();

        let err = commit_file(&git, &offline(), &file).await.unwrap_err();
        assert!(matches!(err, Error::NotUtf8(_)));
        assert_eq!(last_commit(repo.path(), "%H"), "");
    }

    #[tokio::test]
    async fn test_stage_timeout_still_checks_index() {
        if !git_available() {
            return;
        }
        let repo = init_repo();
        let git = Git::new(repo.path());
        let file = repo.path().join("hello.go");
        std::fs::write(&file, HELLO).unwrap();
        let status = StdCommand::new("git")
            .args(["add", "hello.go"])
            .current_dir(repo.path())
            .status()
            .unwrap();
        assert!(status.success());

        let config = GitConfig {
            stage_timeout_secs: 0,
            ..offline()
        };
        let outcome = commit_file(&git, &config, &file).await.unwrap();
        assert_eq!(
            outcome,
            CommitOutcome::Committed {
                message: "Update hello: main package, functions, fmt (8 lines)".to_string(),
                push: PushStatus::Disabled,
            }
        );
    }

    #[tokio::test]
    async fn test_diff_timeout_aborts_attempt() {
        if !git_available() {
            return;
        }
        let repo = init_repo();
        let git = Git::new(repo.path());
        let file = repo.path().join("hello.go");
        std::fs::write(&file, HELLO).unwrap();

        let config = GitConfig {
            diff_timeout_secs: 0,
            ..offline()
        };
        let err = commit_file(&git, &config, &file).await.unwrap_err();
        assert!(matches!(
            err,
            Error::GitTimeout { op: "diff", timeout } if timeout == Duration::ZERO
        ));
        assert_eq!(last_commit(repo.path(), "%H"), "");
    }
}
