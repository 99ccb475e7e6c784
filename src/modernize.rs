//! Run orchestration.
//!
//! ```text
//! discover → sample check (git restore) → snapshot all → rewrite each → report
//! ```
//!
//! Every candidate is read into memory before the first file is written, so
//! no page is ever transformed from a partially rewritten tree. Per-file
//! problems are logged and skipped; only a failed restore or a failed write
//! stops the run.

use crate::config::{ConfigError, ModernizeConfig};
use crate::restore::{self, RestoreError};
use crate::types::{Document, Outcome};
use crate::{clean, discover, extract, listing, output, page};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModernizeError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Git restore failed: {0}")]
    Restore(#[from] RestoreError),
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Whether a run writes its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Rewrite pages in place
    #[default]
    Run,
    /// Report what would change, touch nothing
    Check,
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub found: usize,
    pub read: usize,
    pub modified: usize,
    pub not_legacy: usize,
    pub missing_content: usize,
    pub unreadable: usize,
    /// The sample page was already modernized
    pub restored: bool,
}

/// Rewrite one document from its original text.
pub fn process_document(doc: &Document, config: &ModernizeConfig) -> Outcome {
    let html = doc.original.as_str();
    if !extract::looks_legacy(html) {
        return Outcome::NotLegacy;
    }

    let title = extract::extract_title(html, &config.site.name);
    let main_content = match extract::extract_main_content(html) {
        Some(content) if !content.is_empty() => content,
        _ => return Outcome::MissingContent,
    };

    let split = extract::split_index(main_content);
    let content = if split.has_index() {
        let index_html = listing::transform_index(split.index);
        format!("{}\n{}\n{}", split.before, index_html, split.after)
    } else {
        main_content.to_string()
    };
    let content = clean::clean_content(&content);

    let root_prefix = page::relative_root(&doc.rel_path);
    let active = page::active_section(&doc.rel_path, &config.sections);
    let nav = page::render_nav(&config.nav, &root_prefix, active);
    let rendered = page::render_page(&config.site, &title, nav, &content, &root_prefix);
    Outcome::Rewritten(rendered.into_string())
}

/// Read every candidate into memory. Unreadable files are logged and left out.
pub fn read_snapshots(root: &Path, files: &[PathBuf]) -> Vec<(PathBuf, Document)> {
    files
        .iter()
        .filter_map(|path| match fs::read(path) {
            Ok(bytes) => Some((
                path.clone(),
                Document {
                    rel_path: discover::relative_path(root, path),
                    original: String::from_utf8_lossy(&bytes).into_owned(),
                },
            )),
            Err(err) => {
                tracing::error!("could not read {}: {err}", path.display());
                None
            }
        })
        .collect()
}

/// Whether the first candidate already carries the modern page shell.
fn sample_is_modernized(files: &[PathBuf]) -> bool {
    let Some(sample) = files.first() else {
        return false;
    };
    match fs::read(sample) {
        Ok(bytes) => page::looks_modernized(&String::from_utf8_lossy(&bytes)),
        Err(err) => {
            tracing::warn!("could not read sample {}: {err}", sample.display());
            false
        }
    }
}

/// Rewrite (or in check mode, inspect) every candidate page under `root`.
pub fn run(
    root: &Path,
    config: &ModernizeConfig,
    mode: RunMode,
) -> Result<RunSummary, ModernizeError> {
    let files: Vec<PathBuf> = discover::discover(root, config).collect();
    output::print_lines(&output::format_discovery(root, files.len()));

    let mut summary = RunSummary {
        found: files.len(),
        ..RunSummary::default()
    };

    if sample_is_modernized(&files) {
        summary.restored = true;
        output::print_lines(&output::format_restore_notice(mode));
        if mode == RunMode::Check {
            return Ok(summary);
        }
        restore::restore_tree(root)?;
        tracing::info!("restored originals from git in {}", root.display());
    }

    let snapshots = read_snapshots(root, &files);
    summary.read = snapshots.len();
    summary.unreadable = files.len() - snapshots.len();
    output::print_lines(&output::format_snapshot(summary.read));

    for (path, doc) in &snapshots {
        match process_document(doc, config) {
            Outcome::Rewritten(html) => {
                if mode == RunMode::Run {
                    fs::write(path, html).map_err(|source| ModernizeError::Write {
                        path: path.clone(),
                        source,
                    })?;
                }
                summary.modified += 1;
                println!("{}", output::format_modified(&doc.rel_path, mode));
            }
            Outcome::NotLegacy => {
                summary.not_legacy += 1;
                tracing::debug!("not a Sandvox page: {}", doc.rel_path);
            }
            Outcome::MissingContent => {
                summary.missing_content += 1;
                tracing::warn!("no main-content found in {}", doc.rel_path);
            }
        }
    }

    output::print_lines(&output::format_summary(&summary, mode));
    Ok(summary)
}
