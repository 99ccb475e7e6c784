//! Version-control recovery.
//!
//! Rewriting a page that was already rewritten would lose its content (the
//! new shell has no `main-content` div), so when the site already looks
//! modernized the tracked files are first restored with
//! `git checkout HEAD -- .`.

use std::path::Path;
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RestoreError {
    #[error("could not run git: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("git restore failed ({status}): {stderr}")]
    Failed { status: String, stderr: String },
}

/// Restore every tracked file under `root` to its last committed state.
pub fn restore_tree(root: &Path) -> Result<(), RestoreError> {
    let output = Command::new("git")
        .args(["checkout", "HEAD", "--", "."])
        .current_dir(root)
        .output()?;

    if !output.status.success() {
        return Err(RestoreError::Failed {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{commit_all, inside_git_work_tree, write_file};
    use tempfile::TempDir;

    #[test]
    fn restore_outside_a_repository_fails() {
        let tmp = TempDir::new().unwrap();
        if inside_git_work_tree(tmp.path()) {
            eprintln!("skipping: temp dir is inside a git work tree");
            return;
        }
        // Either git is missing (Spawn) or it refuses to run outside a repo.
        assert!(restore_tree(tmp.path()).is_err());
    }

    #[test]
    fn restore_in_missing_directory_is_spawn_error() {
        let tmp = TempDir::new().unwrap();
        let result = restore_tree(&tmp.path().join("missing"));
        assert!(matches!(result, Err(RestoreError::Spawn(_))));
    }

    #[test]
    fn restore_brings_back_committed_content() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "sub/page.html", "original");
        if !commit_all(tmp.path()) {
            eprintln!("skipping: git unavailable");
            return;
        }
        write_file(tmp.path(), "sub/page.html", "rewritten");

        restore_tree(tmp.path()).unwrap();
        let restored = std::fs::read_to_string(tmp.path().join("sub/page.html")).unwrap();
        assert_eq!(restored, "original");
    }
}
