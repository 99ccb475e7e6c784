//! Candidate page discovery.
//!
//! Walks the site tree and yields every `.html` file that is not inside a
//! skipped directory. Siblings are visited in file-name order, so the walk is
//! deterministic and matches a component-wise sort of the resulting paths.
//!
//! ```text
//! site/
//! ├── index.html                   # yielded
//! ├── _Resources/                  # skipped anywhere in the tree
//! │   └── widget.html
//! ├── headaches/
//! │   └── index.html               # yielded
//! └── pog/
//!     ├── Media/                   # skipped by prefix
//!     │   └── slide.html
//!     └── the_pawlet_box/
//!         └── index.html           # yielded
//! ```
//!
//! Unreadable directories are logged and skipped; the walk never fails.

use crate::config::ModernizeConfig;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const HTML_EXTENSION: &str = "html";

/// Lazily yield candidate pages under `root`, in sorted order.
pub fn discover<'a>(
    root: &'a Path,
    config: &'a ModernizeConfig,
) -> impl Iterator<Item = PathBuf> + 'a {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| {
            // The root itself is never a skip candidate, only what lies below it.
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !is_skipped_dir(&entry.file_name().to_string_lossy(), config)
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!("skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_html(entry.path()))
        .map(|entry| entry.into_path())
        .filter(move |path| {
            let rel = relative_path(root, path);
            !config
                .skip_prefixes
                .iter()
                .any(|prefix| rel.starts_with(prefix.as_str()))
        })
}

/// `/`-joined path of `path` relative to `root`.
///
/// Falls back to the full path when `path` is not under `root`.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_skipped_dir(name: &str, config: &ModernizeConfig) -> bool {
    config.skip_dirs.iter().any(|skip| skip == name)
}

fn is_html(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == HTML_EXTENSION)
}
