//! Site configuration module.
//!
//! Everything the rewrite needs to know about the target site lives in one
//! [`ModernizeConfig`]: skipped directories, the navigation bar, and the
//! section rule that picks each page's active nav entry. It is
//! built once at start-up and never mutated.
//!
//! ## Config File Location
//!
//! Place an optional `modernize.toml` in the site root:
//!
//! ```text
//! site/
//! ├── modernize.toml           # Overrides stock defaults (optional)
//! ├── index.html
//! ├── what.html
//! └── headaches/
//!     └── index.html
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! skip_dirs = ["_Resources", "_Media", "_tools", ".git"]
//! skip_prefixes = ["pog/Media"]
//!
//! [site]
//! name = "Mighty Cheese"
//! author = "Colin Summers"
//! copyright = "Copyright Colin Summers 2006 and other years."
//! stylesheet = "style.css"
//!
//! [[nav]]
//! label = "Home"
//! href = "index.html"
//!
//! [[sections]]
//! target = "index.html"
//! paths = ["index.html"]
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Tables merge key-by-key over the stock defaults;
//! arrays (`nav`, `sections`, `skip_dirs`) replace the default list wholesale.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the site root.
pub const CONFIG_FILE: &str = "modernize.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Static lookup tables for one rewrite run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModernizeConfig {
    /// Site identity rendered into every page shell.
    pub site: SiteInfo,
    /// Directory names excluded anywhere in the tree (exact segment match).
    pub skip_dirs: Vec<String>,
    /// Site-relative path prefixes excluded from discovery.
    pub skip_prefixes: Vec<String>,
    /// Navigation bar entries, in display order.
    pub nav: Vec<NavItem>,
    /// Active-section rules; the first match wins.
    pub sections: Vec<SectionRule>,
}

impl Default for ModernizeConfig {
    fn default() -> Self {
        Self {
            site: SiteInfo::default(),
            skip_dirs: [
                "_Resources",
                "_Media",
                "_tools",
                "sandvox_Sunburst",
                "sandvox_Imagine",
                "cgi-bin",
                ".git",
                ".claude",
                "node_modules",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            skip_prefixes: vec!["pog/Media".to_string()],
            nav: vec![
                NavItem::new("Home", "index.html"),
                NavItem::new("What", "what.html"),
                NavItem::new("Who", "who.html"),
                NavItem::new("Why", "why.html"),
                NavItem::new("Headaches", "headaches/"),
                NavItem::new("Pawlet Box", "pog/the_pawlet_box/"),
            ],
            sections: vec![
                SectionRule::exact("index.html", &["index.html"]),
                SectionRule::prefixed("what.html", &["what"]),
                SectionRule::prefixed("who.html", &["who"]),
                SectionRule::prefixed("why.html", &["why"]),
                SectionRule::prefixed("headaches/", &["headaches/", "migraines/", "damage/"]),
                SectionRule::prefixed("pog/the_pawlet_box/", &["pog/"]),
            ],
        }
    }
}

impl ModernizeConfig {
    /// Validate that the tables are internally consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if self.site.stylesheet.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.stylesheet must not be empty".into(),
            ));
        }
        for item in &self.nav {
            if item.label.trim().is_empty() || item.href.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "nav entries need a non-empty label and href".into(),
                ));
            }
        }
        for rule in &self.sections {
            if !self.nav.iter().any(|item| item.href == rule.target) {
                return Err(ConfigError::Validation(format!(
                    "section target '{}' does not match any nav href",
                    rule.target
                )));
            }
        }
        Ok(())
    }
}

/// Site identity used by the page shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Brand text and `<title>` suffix; also the fallback page title.
    pub name: String,
    /// Value of `<meta name="author">`.
    pub author: String,
    /// Footer line.
    pub copyright: String,
    /// Stylesheet path relative to the site root.
    pub stylesheet: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Mighty Cheese".to_string(),
            author: "Colin Summers".to_string(),
            copyright: "Copyright Colin Summers 2006 and other years.".to_string(),
            stylesheet: "style.css".to_string(),
        }
    }
}

/// Navigation bar entry. `href` is relative to the site root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavItem {
    pub label: String,
    pub href: String,
}

impl NavItem {
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// Maps site-relative page paths onto the nav entry to highlight.
///
/// A page matches when its path equals one of `paths` or starts with one of
/// `prefixes`. Prefixes are plain string prefixes: `"what"` matches both
/// `what.html` and `whatever/page.html`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionRule {
    /// `href` of the nav entry to mark active.
    pub target: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prefixes: Vec<String>,
}

impl SectionRule {
    fn exact(target: &str, paths: &[&str]) -> Self {
        Self {
            target: target.to_string(),
            paths: paths.iter().map(|p| p.to_string()).collect(),
            prefixes: Vec::new(),
        }
    }

    fn prefixed(target: &str, prefixes: &[&str]) -> Self {
        Self {
            target: target.to_string(),
            paths: Vec::new(),
            prefixes: prefixes.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn matches(&self, rel_path: &str) -> bool {
        self.paths.iter().any(|p| p == rel_path)
            || self.prefixes.iter().any(|p| rel_path.starts_with(p.as_str()))
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer a site's `modernize.toml` is merged onto: the
/// Mighty Cheese identity, the Sandvox skip lists, and the stock navigation
/// and section tables.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ModernizeConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values.
/// - Keys in base that are not in overlay are preserved.
///
/// A site that sets only `[site] name` keeps every default nav item, while a
/// site that sets `nav` at all replaces the whole list. Array entries are
/// never merged pairwise, since nav order is meaningful.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `modernize.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist, so a bare Sandvox export
/// runs on stock defaults. Returns `Err` if the file exists but cannot be
/// read or is not valid TOML. Unknown keys are not rejected here; that
/// happens when the merged value is deserialized in [`resolve_config`].
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
///
/// Validation runs on the merged result, so an override that renames a nav
/// href is rejected if a default section rule still points at the old one.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ModernizeConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ModernizeConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the config for a site root: stock defaults plus `modernize.toml`.
pub fn load_config(root: &Path) -> Result<ModernizeConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `modernize.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# sandvox-modernize configuration
# ===============================
# Place this file in the site root as modernize.toml. Every setting is
# optional; the values below are the defaults. Tables merge over the
# defaults key-by-key, lists replace the default list entirely.
# Unknown keys will cause an error.

# Directory names never descended into (matched against every directory
# segment of a page's path, never the file name).
skip_dirs = [
    "_Resources",
    "_Media",
    "_tools",
    "sandvox_Sunburst",
    "sandvox_Imagine",
    "cgi-bin",
    ".git",
    ".claude",
    "node_modules",
]

# Site-relative path prefixes excluded from discovery.
skip_prefixes = ["pog/Media"]

# ---------------------------------------------------------------------------
# Page shell
# ---------------------------------------------------------------------------
[site]
name = "Mighty Cheese"
author = "Colin Summers"
copyright = "Copyright Colin Summers 2006 and other years."
# Relative to the site root; each page links it with the right ../ prefix.
stylesheet = "style.css"

# ---------------------------------------------------------------------------
# Navigation bar, in display order. href is relative to the site root.
# ---------------------------------------------------------------------------
[[nav]]
label = "Home"
href = "index.html"

[[nav]]
label = "What"
href = "what.html"

[[nav]]
label = "Who"
href = "who.html"

[[nav]]
label = "Why"
href = "why.html"

[[nav]]
label = "Headaches"
href = "headaches/"

[[nav]]
label = "Pawlet Box"
href = "pog/the_pawlet_box/"

# ---------------------------------------------------------------------------
# Active section. The first rule whose `paths` contains the page path or
# whose `prefixes` starts it marks the nav entry `target` as active.
# ---------------------------------------------------------------------------
[[sections]]
target = "index.html"
paths = ["index.html"]

[[sections]]
target = "what.html"
prefixes = ["what"]

[[sections]]
target = "who.html"
prefixes = ["who"]

[[sections]]
target = "why.html"
prefixes = ["why"]

[[sections]]
target = "headaches/"
prefixes = ["headaches/", "migraines/", "damage/"]

[[sections]]
target = "pog/the_pawlet_box/"
prefixes = ["pog/"]
"##
}
