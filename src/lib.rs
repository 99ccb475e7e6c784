//! # sandvox-modernize
//!
//! Rewrites a static site exported by the Sandvox desktop site builder into
//! plain HTML5 pages. Each page keeps only its content region, loses the
//! builder's wrapper markup, and is re-wrapped in one shared shell with a
//! navigation bar and footer. Files are overwritten in place; version control
//! is the backup.
//!
//! # Architecture: Single-Pass Pipeline
//!
//! ```text
//! 1. Discover   site/        →  sorted .html paths      (skip dirs pruned)
//! 2. Snapshot   paths        →  original text per page  (before any write)
//! 3. Extract    page text    →  main-content region     (depth-counting scan)
//! 4. Listings   index div    →  gallery grid / list     (regex recognizers)
//! 5. Clean      region       →  plain content           (ordered rule list)
//! 6. Assemble   content      →  HTML5 page              (Maud)
//! ```
//!
//! Every step after the snapshot is a pure function of the original text, so
//! unit tests exercise the whole transformation without touching the
//! filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`discover`] | Walks the site tree and yields candidate pages |
//! | [`extract`] | Finds the content region, the index container, and the title |
//! | [`listing`] | Rewrites photo grids and article indexes |
//! | [`clean`] | Ordered cleaning rules over the extracted content |
//! | [`balance`] | Drops `</div>` tags left without an opener |
//! | [`page`] | Renders navigation and the page shell; detects rewritten pages |
//! | [`restore`] | `git checkout` recovery when the tree is already rewritten |
//! | [`modernize`] | Orchestrates a run and counts outcomes |
//! | [`config`] | Site identity and lookup tables, optional `modernize.toml` |
//! | [`types`] | Per-document values shared between modules |
//! | [`output`] | CLI progress and summary formatting |
//!
//! # Design Decisions
//!
//! ## Text Transforms, Not a DOM
//!
//! The input is one builder's output, so its quirks are known and fixed.
//! Cleaning is a list of regex rules applied in order; the only structural
//! step is a depth-counting scan for the end of a nested `<div>`.
//!
//! ## Snapshot Before Writing
//!
//! All candidate pages are read before the first write. A page's rewrite
//! never depends on another page's rewritten state.
//!
//! ## Refusing to Rewrite Twice
//!
//! A rewritten page has no content region left to extract. If the first
//! candidate already looks rewritten, the tree is restored from git before
//! anything else happens, and a failed restore stops the run.

pub mod balance;
pub mod clean;
pub mod config;
pub mod discover;
pub mod extract;
pub mod listing;
pub mod modernize;
pub mod output;
pub mod page;
pub mod restore;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
