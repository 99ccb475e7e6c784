//! Index container rewriting.
//!
//! Sandvox renders two kinds of listing inside `<div id="index">`:
//!
//! - **Photo grids**: a run of `<a href="…"><img src="…" alt="…" /></a>`
//!   thumbnails, rewritten as a `gallery-grid` of lazily loaded images.
//! - **Article indexes**: `<h3><a href="…">Title</a></h3>` headings each
//!   followed by an optional `article-summary` block, rewritten as an
//!   `index-list`.
//!
//! Thumbnails are tried first; a listing that has any is never treated as an
//! article index. Anything else renders as nothing.
//!
//! Hrefs, sources, titles and summaries are copied from the page as-is: they
//! are already HTML text, so they are emitted with [`PreEscaped`].

use crate::types::ListingEntry;
use maud::{Markup, PreEscaped, html};
use regex::Regex;
use std::sync::LazyLock;

static THUMBNAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<a\s+href="([^"]+)">\s*(<img\b[^>]*>)\s*</a>"#).unwrap()
});

static SRC_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\ssrc="([^"]+)""#).unwrap());

static ALT_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\salt="([^"]*)""#).unwrap());

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<h3[^>]*><a\s+href="([^"]+)">(.*?)</a></h3>"#).unwrap()
});

static SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)class="article-summary"[^>]*>(.*?)</div>"#).unwrap()
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Anchor-wrapped thumbnails, in document order.
pub fn parse_thumbnails(inner: &str) -> Vec<ListingEntry> {
    THUMBNAIL_RE
        .captures_iter(inner)
        .filter_map(|caps| {
            let img = &caps[2];
            let src = SRC_ATTR_RE.captures(img)?[1].to_string();
            let alt = ALT_ATTR_RE
                .captures(img)
                .map(|c| c[1].to_string())
                .unwrap_or_default();
            Some(ListingEntry::Thumbnail {
                href: caps[1].to_string(),
                src,
                alt,
            })
        })
        .collect()
}

/// Heading-linked articles, each with the summary found before the next heading.
pub fn parse_articles(inner: &str) -> Vec<ListingEntry> {
    HEADING_RE
        .captures_iter(inner)
        .map(|caps| {
            let tail_start = caps.get(0).map_or(inner.len(), |m| m.end());
            let tail = &inner[tail_start..];
            let tail = &tail[..tail.find("<h3").unwrap_or(tail.len())];

            let summary = SUMMARY_RE
                .captures(tail)
                .map(|c| c[1].trim().to_string())
                .filter(|s| !s.is_empty());

            ListingEntry::Article {
                href: caps[1].to_string(),
                title: strip_tags(&caps[2]).trim().to_string(),
                summary,
            }
        })
        .collect()
}

/// Rewrite an index container's inner markup, or return an empty string when
/// it is neither a photo grid nor an article index.
pub fn transform_index(inner: &str) -> String {
    let thumbnails = parse_thumbnails(inner);
    if !thumbnails.is_empty() {
        return render_gallery(&thumbnails).into_string();
    }
    let articles = parse_articles(inner);
    if !articles.is_empty() {
        return render_article_list(&articles).into_string();
    }
    String::new()
}

fn render_gallery(entries: &[ListingEntry]) -> Markup {
    let items = entries.iter().filter_map(|entry| match entry {
        ListingEntry::Thumbnail { href, src, alt } => {
            Some((href.as_str(), src.as_str(), alt.as_str()))
        }
        ListingEntry::Article { .. } => None,
    });
    html! {
        div.gallery-grid {
            @for (href, src, alt) in items {
                div.gallery-item {
                    a href=(PreEscaped(href)) {
                        img src=(PreEscaped(src)) alt=(PreEscaped(alt)) loading="lazy";
                    }
                }
            }
        }
    }
}

fn render_article_list(entries: &[ListingEntry]) -> Markup {
    let items = entries.iter().filter_map(|entry| match entry {
        ListingEntry::Article {
            href,
            title,
            summary,
        } => Some((href.as_str(), title.as_str(), summary.as_deref())),
        ListingEntry::Thumbnail { .. } => None,
    });
    html! {
        ul.index-list {
            @for (href, title, summary) in items {
                li {
                    a href=(PreEscaped(href)) { (PreEscaped(title)) }
                    @if let Some(summary) = summary {
                        div.summary { (PreEscaped(summary)) }
                    }
                }
            }
        }
    }
}

fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Thumbnails
    // =========================================================================

    #[test]
    fn photo_grid_scenario() {
        let inner = r#"<a href="p1.html"><img src="p1.jpg" alt="Pic 1"/></a>"#;
        let html = transform_index(inner);
        assert!(html.starts_with(r#"<div class="gallery-grid">"#));
        assert!(html.contains(r#"<div class="gallery-item"><a href="p1.html">"#));
        assert!(html.contains(r#"src="p1.jpg""#));
        assert!(html.contains(r#"alt="Pic 1""#));
        assert!(html.contains(r#"loading="lazy""#));
        assert!(!html.contains("index-list"));
    }

    #[test]
    fn thumbnails_keep_document_order() {
        let inner = r#"
            <a href="b.html"><img src="b.jpg" alt="B" /></a>
            <div class="caption">x</div>
            <a href="a.html">
                <img width="100" src="a.jpg" alt="A">
            </a>"#;
        let entries = parse_thumbnails(inner);
        let hrefs: Vec<&str> = entries
            .iter()
            .map(|e| match e {
                ListingEntry::Thumbnail { href, .. } => href.as_str(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(hrefs, ["b.html", "a.html"]);
    }

    #[test]
    fn thumbnail_attributes_in_any_order() {
        let inner = r#"<a href="x.html"><img alt="Ex" class="t" src="x.jpg" /></a>"#;
        assert_eq!(
            parse_thumbnails(inner),
            vec![ListingEntry::Thumbnail {
                href: "x.html".to_string(),
                src: "x.jpg".to_string(),
                alt: "Ex".to_string(),
            }]
        );
    }

    #[test]
    fn thumbnail_src_is_not_confused_with_data_src() {
        let inner = r#"<a href="x.html"><img data-src="lazy.jpg" src="x.jpg" alt="" /></a>"#;
        match &parse_thumbnails(inner)[0] {
            ListingEntry::Thumbnail { src, .. } => assert_eq!(src, "x.jpg"),
            other => panic!("unexpected entry {other:?}"),
        }
    }

    #[test]
    fn image_without_src_is_not_a_thumbnail() {
        assert!(parse_thumbnails(r#"<a href="x.html"><img alt="none" /></a>"#).is_empty());
    }

    // =========================================================================
    // Articles
    // =========================================================================

    #[test]
    fn article_index_scenario() {
        let inner = r#"<h3><a href="a.html">Title A</a></h3><div class="article-summary">Sum A</div>"#;
        let html = transform_index(inner);
        assert_eq!(
            html,
            r#"<ul class="index-list"><li><a href="a.html">Title A</a><div class="summary">Sum A</div></li></ul>"#
        );
    }

    #[test]
    fn article_titles_are_plain_text() {
        let inner = r#"<h3 class="title"><a href="m.html"><span class="in">Migraine <b>notes</b></span></a></h3>"#;
        assert_eq!(
            parse_articles(inner),
            vec![ListingEntry::Article {
                href: "m.html".to_string(),
                title: "Migraine notes".to_string(),
                summary: None,
            }]
        );
    }

    #[test]
    fn summary_belongs_to_its_own_heading() {
        let inner = r#"
            <h3><a href="one.html">One</a></h3>
            <p>no summary here</p>
            <h3><a href="two.html">Two</a></h3>
            <div class="article-summary"><p>Second <em>summary</em></p></div>"#;
        let entries = parse_articles(inner);
        assert_eq!(entries.len(), 2);
        assert!(matches!(&entries[0], ListingEntry::Article { summary: None, .. }));
        match &entries[1] {
            ListingEntry::Article { summary, .. } => {
                assert_eq!(summary.as_deref(), Some("<p>Second <em>summary</em></p>"));
            }
            other => panic!("unexpected entry {other:?}"),
        }
    }

    #[test]
    fn blank_summary_is_dropped() {
        let inner = r#"<h3><a href="a.html">A</a></h3><div class="article-summary">   </div>"#;
        let html = transform_index(inner);
        assert!(!html.contains("summary"));
    }

    #[test]
    fn summary_markup_is_kept_verbatim() {
        let inner = r#"<h3><a href="a.html">A &amp; B</a></h3><div class="article-summary">Fish &amp; <i>chips</i></div>"#;
        let html = transform_index(inner);
        assert!(html.contains(">A &amp; B</a>"));
        assert!(html.contains(r#"<div class="summary">Fish &amp; <i>chips</i></div>"#));
    }

    // =========================================================================
    // Exclusivity and fallthrough
    // =========================================================================

    #[test]
    fn thumbnails_win_over_headings() {
        let inner = r#"<h3><a href="a.html">A</a></h3><a href="p.html"><img src="p.jpg" alt="P" /></a>"#;
        let html = transform_index(inner);
        assert!(html.contains("gallery-grid"));
        assert!(!html.contains("index-list"));
    }

    #[test]
    fn headings_alone_never_produce_a_grid() {
        let inner = r#"<h3><a href="a.html">A</a></h3>"#;
        let html = transform_index(inner);
        assert!(html.contains("index-list"));
        assert!(!html.contains("gallery-grid"));
    }

    #[test]
    fn renderers_ignore_entries_of_the_other_kind() {
        let entries = vec![
            ListingEntry::Article {
                href: "a.html".into(),
                title: "A".into(),
                summary: None,
            },
            ListingEntry::Thumbnail {
                href: "t.html".into(),
                src: "t.jpg".into(),
                alt: "T".into(),
            },
        ];
        assert_eq!(
            render_gallery(&entries).into_string(),
            r#"<div class="gallery-grid"><div class="gallery-item"><a href="t.html"><img src="t.jpg" alt="T" loading="lazy"></a></div></div>"#
        );
        assert_eq!(
            render_article_list(&entries).into_string(),
            r#"<ul class="index-list"><li><a href="a.html">A</a></li></ul>"#
        );
    }

    #[test]
    fn unrecognized_index_renders_nothing() {
        assert_eq!(transform_index("<p>just text</p>"), "");
        assert_eq!(transform_index(""), "");
    }
}
