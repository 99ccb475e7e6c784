//! Sandvox markup removal.
//!
//! Cleaning is an ordered list of named substitution rules ([`RULES`]) run
//! over the extracted content, followed by [`rebalance`] and whitespace
//! normalization. Order matters:
//!
//! - `comments` runs before anything that matches across markup, so commented
//!   out wrappers never match.
//! - `article-timestamp` runs before `article-wrappers`, whose `article…`
//!   pattern also matches the `article-info` opener.
//! - `article-content`, `article-wrappers`, `pagelets` and `callout` drop only
//!   opening tags. The orphaned `</div>`s they leave are removed by
//!   [`rebalance`], which therefore has to run last.

use crate::balance::rebalance;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// How a rule rewrites its matches.
pub enum Action {
    /// Replace every match once (`$1`-style expansions allowed).
    Replace(&'static str),
    /// Replace every match, repeating the whole pass up to `passes` times to
    /// peel nested wrappers.
    Repeat {
        replacement: &'static str,
        passes: usize,
    },
    /// Compute each replacement from the match.
    With(fn(&Captures) -> String),
}

/// One cleaning step.
pub struct Rule {
    pub name: &'static str,
    pattern: Regex,
    action: Action,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, action: Action) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("cleaning rule pattern must compile"),
            action,
        }
    }

    /// Apply this rule to `html`.
    pub fn apply(&self, html: &str) -> String {
        match &self.action {
            Action::Replace(replacement) => {
                self.pattern.replace_all(html, *replacement).into_owned()
            }
            Action::Repeat {
                replacement,
                passes,
            } => {
                let mut out = html.to_string();
                for _ in 0..*passes {
                    out = self.pattern.replace_all(&out, *replacement).into_owned();
                }
                out
            }
            Action::With(f) => self
                .pattern
                .replace_all(html, |caps: &Captures| f(caps))
                .into_owned(),
        }
    }
}

/// The cleaning pipeline, in application order.
pub static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    use Action::*;
    vec![
        Rule::new(
            "main-markers",
            r#"<div\s+id="main-(?:top|bottom)">\s*</div>"#,
            Replace(""),
        ),
        Rule::new("comments", r"(?s)<!--.*?-->", Replace("")),
        Rule::new("sandvox-ids", r#"\s+id="k-[^"]*""#, Replace("")),
        Rule::new(
            "inline-spans",
            r#"(?s)<span\s+class="in">(.*?)</span>"#,
            Repeat {
                replacement: "${1}",
                passes: 3,
            },
        ),
        Rule::new("inline-styles", r#"\s+style="[^"]*""#, Replace("")),
        Rule::new(
            "webkit-br",
            r#"<br\s+class="webkit-block-placeholder"\s*/?>"#,
            Replace("<br />"),
        ),
        Rule::new(
            "empty-callout-container",
            r#"<div\s+class="callout-container">\s*</div>"#,
            Replace(""),
        ),
        Rule::new(
            "empty-article-info",
            r#"<div\s+class="article-info">\s*</div>"#,
            Replace(""),
        ),
        Rule::new("empty-clear", r#"<div\s+class="clear">\s*</div>"#, Replace("")),
        Rule::new(
            "empty-article-summary",
            r#"<div\s+class="article-summary">\s*</div>"#,
            Replace(""),
        ),
        Rule::new("empty-br-paragraph", r"<p>\s*<br\s*/?>\s*</p>", Replace("")),
        Rule::new("empty-br-div", r"<div>\s*<br\s*/?>\s*</div>", Replace("")),
        Rule::new("empty-italic", r"<i>\s*</i>", Replace("")),
        Rule::new("empty-caption", r#"<div\s+class="caption">\s*</div>"#, Replace("")),
        Rule::new(
            "rich-text",
            r#"(?s)<div\s+class="RichTextElement">\s*<div>(.*?)</div>\s*</div>"#,
            Replace("${1}"),
        ),
        Rule::new(
            "rich-text-bare",
            r#"(?s)<div\s+class="RichTextElement">\s*(.*?)\s*</div>"#,
            Replace("${1}"),
        ),
        Rule::new(
            "article-content",
            r#"<div\s+class="article-content">\s*"#,
            Replace(""),
        ),
        Rule::new(
            "article-timestamp",
            r#"(?s)<div\s+class="article-info">\s*<div\s+class="timestamp">\s*(.*?)\s*</div>\s*</div>"#,
            Replace(r#"<p class="timestamp">${1}</p>"#),
        ),
        Rule::new(
            "article-wrappers",
            r#"<div\s+class="article[^"]*">\s*"#,
            Replace(""),
        ),
        Rule::new(
            "callout-markers",
            r#"<div\s+class="callout-(?:top|bottom)">\s*</div>"#,
            Replace(""),
        ),
        Rule::new("pagelets", r#"<div\s+class="pagelet[^"]*">"#, Replace("")),
        Rule::new(
            "element-introduction",
            r#"<div\s+class="elementIntroduction">"#,
            Replace(""),
        ),
        Rule::new("callout", r#"<div\s+class="callout">"#, Replace("")),
        Rule::new(
            "callout-container",
            r#"(?s)<div\s+class="callout-container">\s*(.*?)\s*</div>"#,
            With(callout_content),
        ),
    ]
});

static BLANK_LINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());
static TRAILING_SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+\n").unwrap());

fn callout_content(caps: &Captures) -> String {
    let inner = &caps[1];
    if inner.trim().is_empty() {
        String::new()
    } else {
        format!(r#"<div class="callout-content">{inner}</div>"#)
    }
}

/// Strip Sandvox markup from extracted content.
pub fn clean_content(content: &str) -> String {
    let mut html = content.to_string();
    for rule in RULES.iter() {
        html = rule.apply(&html);
    }
    let html = rebalance(&html);
    normalize_whitespace(&html)
}

/// Apply a single named rule, or `None` if no rule has that name.
pub fn apply_rule(name: &str, html: &str) -> Option<String> {
    RULES
        .iter()
        .find(|rule| rule.name == name)
        .map(|rule| rule.apply(html))
}

fn normalize_whitespace(html: &str) -> String {
    let html = BLANK_LINES_RE.replace_all(html, "\n\n");
    let html = TRAILING_SPACE_RE.replace_all(&html, "\n");
    html.trim().to_string()
}
