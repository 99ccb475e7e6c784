//! Content region extraction.
//!
//! Sandvox pages put everything worth keeping inside
//! `<div id="main-content">`. Regular expressions cannot match balanced
//! nesting, so the end of that container (and of the index container inside
//! it) is found with a depth-counting scan over `<div` / `</div>` occurrences.
//!
//! The scan is total: on truncated or unbalanced input it returns the rest of
//! the text instead of failing.

use crate::types::IndexSplit;
use regex::Regex;
use std::sync::LazyLock;

static MAIN_CONTENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<div\s+id="main-content"[^>]*>"#).unwrap());

static INDEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div\s+id="index"\s+class="(?:general|photogrid)-index">"#).unwrap()
});

static LEADING_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*<!--[^>]*-->").unwrap());

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());

/// Return the inner text of the `tag` element whose opening tag ends just
/// before `start`, and the position just past its closing tag.
///
/// Every `<tag` seen after `start` nests one level deeper, every `</tag>`
/// closes one level. Without a matching close the rest of `text` is returned
/// together with `text.len()`.
pub fn extract_nested<'a>(text: &'a str, start: usize, tag: &str) -> (&'a str, usize) {
    let start = clamp_to_boundary(text, start);
    let open = format!("<{tag}");
    let close = format!("</{tag}>");

    let mut depth = 1usize;
    let mut pos = start;
    while pos < text.len() {
        let Some(next_close) = text[pos..].find(&close).map(|i| pos + i) else {
            break;
        };
        match text[pos..].find(&open).map(|i| pos + i) {
            Some(next_open) if next_open < next_close => {
                depth += 1;
                pos = next_open + open.len();
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return (&text[start..next_close], next_close + close.len());
                }
                pos = next_close + close.len();
            }
        }
    }
    (&text[start..], text.len())
}

/// Inner markup of the first `<div id="main-content">`, if the page has one.
pub fn extract_main_content(text: &str) -> Option<&str> {
    let m = MAIN_CONTENT_RE.find(text)?;
    let (content, _) = extract_nested(text, m.end(), "div");
    Some(content)
}

/// Split a content region around its index container.
pub fn split_index(content: &str) -> IndexSplit<'_> {
    let Some(m) = INDEX_RE.find(content) else {
        return IndexSplit {
            before: content,
            ..IndexSplit::default()
        };
    };
    let (index, end) = extract_nested(content, m.end(), "div");
    let rest = &content[end..];
    // Sandvox follows the index close with an `<!-- index -->` marker.
    let after = match LEADING_COMMENT_RE.find(rest) {
        Some(comment) => &rest[comment.end()..],
        None => rest,
    };
    IndexSplit {
        before: &content[..m.start()],
        index,
        after,
    }
}

/// Page title: the first `<title>` text up to any ` | Site Name` suffix.
pub fn extract_title(text: &str, fallback: &str) -> String {
    match TITLE_RE.captures(text) {
        Some(caps) => {
            let raw = caps[1].trim();
            raw.split('|').next().unwrap_or(raw).trim().to_string()
        }
        None => fallback.to_string(),
    }
}

/// Whether a page was produced by Sandvox (or at least has its content div).
pub fn looks_legacy(text: &str) -> bool {
    text.to_lowercase().contains("sandvox") || text.contains("main-content")
}

fn clamp_to_boundary(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos += 1;
    }
    pos
}
