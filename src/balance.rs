//! Stray `</div>` removal.
//!
//! Several cleaning rules drop a wrapper's opening tag and leave its closing
//! tag behind. [`rebalance`] makes left-to-right passes tracking `<div`
//! depth and drops every `</div>` that has no open `<div` to close. Dropping a
//! tag joins the text around it, which can spell a new orphan (`</</div>div>`),
//! so passes repeat until one drops nothing.

use regex::Regex;
use std::sync::LazyLock;

static CLOSE_DIV_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^</div\s*>").unwrap());

/// Remove closing div tags that have no matching opener.
///
/// Opening tags and all other text are copied through unchanged. The result
/// never closes more divs than it has opened at any point, and running it a
/// second time changes nothing.
pub fn rebalance(html: &str) -> String {
    let mut current = rebalance_pass(html);
    loop {
        let next = rebalance_pass(&current);
        // A pass only removes text, so equal length means nothing was dropped
        if next.len() == current.len() {
            return current;
        }
        current = next;
    }
}

fn rebalance_pass(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut depth = 0usize;
    let mut pos = 0;

    while let Some(offset) = html[pos..].find('<') {
        let tag_start = pos + offset;
        out.push_str(&html[pos..tag_start]);
        let rest = &html[tag_start..];

        if is_div_open(rest) {
            depth += 1;
            let tag_len = rest.find('>').map_or(rest.len(), |i| i + 1);
            out.push_str(&rest[..tag_len]);
            pos = tag_start + tag_len;
        } else if let Some(close) = CLOSE_DIV_RE.find(rest) {
            if depth > 0 {
                depth -= 1;
                out.push_str(close.as_str());
            }
            pos = tag_start + close.end();
        } else {
            out.push('<');
            pos = tag_start + 1;
        }
    }
    out.push_str(&html[pos..]);
    out
}

/// `<div` followed by whitespace or `>`; `<divider>` does not count.
fn is_div_open(rest: &str) -> bool {
    rest.strip_prefix("<div")
        .and_then(|after| after.chars().next())
        .is_some_and(|c| c == '>' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Whether every `</div>` in `html` closes an earlier open `<div`.
    fn prefix_balanced(html: &str) -> bool {
        let mut depth = 0usize;
        let mut pos = 0;
        while let Some(offset) = html[pos..].find('<') {
            let rest = &html[pos + offset..];
            if is_div_open(rest) {
                depth += 1;
                pos += offset + rest.find('>').map_or(rest.len(), |i| i + 1);
            } else if let Some(close) = CLOSE_DIV_RE.find(rest) {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
                pos += offset + close.end();
            } else {
                pos += offset + 1;
            }
        }
        true
    }

    /// Markup built from div fragments and the pieces of a div tag, so joins
    /// across dropped tags come up often.
    fn div_soup() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop::sample::select(vec![
                "<div>", "</div>", "</div >", "<div class=\"x\">", "<", "/", "div", ">", "a",
                "é", " ", "\n", "<divider>",
            ]),
            0..40,
        )
        .prop_map(|parts| parts.concat())
    }

    #[test]
    fn balanced_input_unchanged() {
        let html = r#"<div class="a"><p>x</p><div>y</div></div>"#;
        assert_eq!(rebalance(html), html);
    }

    #[test]
    fn drops_leading_orphan_close() {
        assert_eq!(rebalance("text</div><p>more</p>"), "text<p>more</p>");
    }

    #[test]
    fn drops_excess_closes_after_matched_pair() {
        let html = "<div>a</div></div>\n</div >b";
        assert_eq!(rebalance(html), "<div>a</div>\nb");
    }

    #[test]
    fn keeps_close_with_whitespace_when_matched() {
        assert_eq!(rebalance("<div>a</div  >"), "<div>a</div  >");
    }

    #[test]
    fn divider_is_not_a_div() {
        let html = "<divider></div>";
        assert_eq!(rebalance(html), "<divider>");
    }

    #[test]
    fn unterminated_open_tag_is_copied() {
        assert_eq!(rebalance("</div><div class=\"x"), "<div class=\"x");
    }

    #[test]
    fn lone_angle_brackets_survive() {
        assert_eq!(rebalance("a < b </div> c <"), "a < b  c <");
    }

    #[test]
    fn orphan_spelled_by_a_drop_is_dropped_too() {
        assert_eq!(rebalance("</</div>div>"), "");
        assert_eq!(rebalance("<div>a</div></</div>div>b"), "<div>a</div>b");
    }

    #[test]
    fn opener_spelled_by_a_drop_is_kept() {
        // The closer was already dropped by the time the opener appeared
        assert_eq!(rebalance("<</div>div>x</div>"), "<div>x");
    }

    proptest! {
        #[test]
        fn prop_rebalance_is_idempotent(html in div_soup()) {
            let once = rebalance(&html);
            prop_assert_eq!(rebalance(&once), once);
        }

        #[test]
        fn prop_rebalance_output_is_prefix_balanced(html in div_soup()) {
            prop_assert!(prefix_balanced(&rebalance(&html)));
        }

        #[test]
        fn prop_rebalance_is_total_on_any_text(html in ".*") {
            let once = rebalance(&html);
            prop_assert!(once.len() <= html.len());
            prop_assert_eq!(rebalance(&once), once);
        }
    }

    #[test]
    fn never_adds_tags() {
        let input = "<div></div></div><div></div>";
        let output = rebalance(input);
        assert!(output.matches("</div>").count() <= input.matches("</div>").count());
        assert_eq!(output.matches("<div").count(), input.matches("<div").count());
    }
}
