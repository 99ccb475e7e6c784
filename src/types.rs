//! Per-file values shared between pipeline stages.
//!
//! Nothing here outlives a single document: each value is created while one
//! page is being rewritten and dropped before the next one starts.

/// A candidate page and the text it had before this run touched anything.
#[derive(Debug, Clone)]
pub struct Document {
    /// `/`-joined path relative to the site root (e.g. `headaches/index.html`)
    pub rel_path: String,
    /// Original text, read once before any file is rewritten
    pub original: String,
}

/// Content region split around an optional index container.
///
/// When the region has no index, `before` holds everything and the other two
/// segments are empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndexSplit<'a> {
    pub before: &'a str,
    pub index: &'a str,
    pub after: &'a str,
}

impl IndexSplit<'_> {
    pub fn has_index(&self) -> bool {
        !self.index.is_empty()
    }
}

/// One child of an index container.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingEntry {
    /// Anchor-wrapped thumbnail from a photo grid
    Thumbnail {
        href: String,
        src: String,
        alt: String,
    },
    /// Heading link from an article index, with its summary markup if any
    Article {
        href: String,
        title: String,
        summary: Option<String>,
    },
}

/// What happened to one document.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// New page text, ready to be written in place
    Rewritten(String),
    /// No Sandvox marker and no content container: not ours to touch
    NotLegacy,
    /// Looks like a Sandvox page but the content region is missing or empty
    MissingContent,
}
