//! Page shell rendering.
//!
//! Every rewritten page gets the same HTML5 shell: a responsive head, a
//! navigation bar with a checkbox-driven collapsible menu, the cleaned content
//! inside `<main>`, and a copyright footer.
//!
//! ## Relative Links
//!
//! Pages are written back in place, so every link into the site is relative.
//! A page `n` directories below the root prefixes the stylesheet and nav
//! hrefs with `n` copies of `../`:
//!
//! ```text
//! index.html                       → style.css
//! headaches/index.html             → ../style.css
//! pog/the_pawlet_box/index.html    → ../../style.css
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/). Navigation labels and site identity
//! are escaped; the content block and page title come from existing HTML and
//! are inserted with [`PreEscaped`].

use crate::config::{NavItem, SectionRule, SiteInfo};
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Window, in characters, that must contain the doctype of a rewritten page.
const DOCTYPE_WINDOW: usize = 50;
/// Window, in characters, that must contain the navbar marker.
const NAVBAR_WINDOW: usize = 500;

/// `../` once per directory between the site root and the page.
pub fn relative_root(rel_path: &str) -> String {
    let depth = rel_path.matches('/').count();
    "../".repeat(depth)
}

/// Nav href to mark active for a page, from the first matching section rule.
pub fn active_section<'a>(rel_path: &str, sections: &'a [SectionRule]) -> Option<&'a str> {
    sections
        .iter()
        .find(|rule| rule.matches(rel_path))
        .map(|rule| rule.target.as_str())
}

/// Renders the navigation list items.
pub fn render_nav(items: &[NavItem], root_prefix: &str, active: Option<&str>) -> Markup {
    html! {
        @for item in items {
            @let is_active = active == Some(item.href.as_str());
            li class=[is_active.then_some("active")] {
                a href={ (root_prefix) (item.href) } { (item.label) }
            }
        }
    }
}

/// Renders a complete page around already-cleaned content.
pub fn render_page(
    site: &SiteInfo,
    title: &str,
    nav: Markup,
    content: &str,
    root_prefix: &str,
) -> Markup {
    let brand_href = if root_prefix.is_empty() {
        "./"
    } else {
        root_prefix
    };
    html! {
        (DOCTYPE)
        html.has-navbar lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (PreEscaped(title)) " | " (site.name) }
                meta name="author" content=(site.author);
                link rel="stylesheet" href={ (root_prefix) (site.stylesheet) };
            }
            body {
                nav.navbar {
                    div.navbar-inner {
                        a.navbar-brand href=(brand_href) { (site.name) }
                        input.nav-toggle type="checkbox" id="nav-toggle";
                        label.nav-toggle-label for="nav-toggle" { span {} }
                        ul.nav-links {
                            (nav)
                        }
                    }
                }
                main {
                    "\n"
                    (PreEscaped(content))
                    "\n"
                }
                footer {
                    p { (site.copyright) }
                }
            }
        }
    }
}

/// Whether `text` already looks like a page rendered by [`render_page`].
pub fn looks_modernized(text: &str) -> bool {
    prefix_chars(text, DOCTYPE_WINDOW).contains("<!DOCTYPE html>")
        && prefix_chars(text, NAVBAR_WINDOW).contains("navbar")
}

fn prefix_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
