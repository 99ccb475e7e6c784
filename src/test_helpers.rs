//! Shared test utilities for the sandvox-modernize test suite.
//!
//! Builders for small Sandvox-shaped pages and a helper for laying them out
//! in a temp directory.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_file(tmp.path(), "what.html", &legacy_page("What", "<p>Hello</p>"));
//! ```

use std::path::Path;
use std::process::Command;

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// A minimal Sandvox page whose `main-content` div holds `body`.
pub fn legacy_page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN">
<html>
<head>
<meta name="generator" content="Sandvox 2.10.12" />
<title>{title} | Mighty Cheese</title>
</head>
<body>
<div id="page-container">
<div id="main">
<div id="main-top"></div>
<div id="main-content">
{body}
</div>
<div id="main-bottom"></div>
</div>
<div id="sidebar"><div class="pagelet">Sidebar stuff</div></div>
</div>
</body>
</html>
"#
    )
}

/// Run git in `root`; false when git is missing or the command fails.
pub fn git(root: &Path, args: &[&str]) -> bool {
    Command::new("git")
        .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
        .args(["-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(root)
        .output()
        .is_ok_and(|out| out.status.success())
}

/// Whether `root` sits inside some git work tree, including an enclosing one.
pub fn inside_git_work_tree(root: &Path) -> bool {
    git(root, &["rev-parse", "--is-inside-work-tree"])
}

/// `git init` plus one commit holding everything under `root`.
/// False when git is unavailable.
pub fn commit_all(root: &Path) -> bool {
    git(root, &["init", "-q"])
        && git(root, &["add", "-A"])
        && git(root, &["commit", "-q", "-m", "snapshot"])
}
