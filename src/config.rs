//! Site configuration module.
//!
//! Loads and validates the `config.toml` at the content root. User files are
//! sparse: stock defaults are the base layer and the file overrides only the
//! keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "My Blog"
//! author = ""
//! description = ""
//! site_url = ""
//!
//! [content]
//! limit = 1000                   # Max posts handed to the planner
//! include_drafts = false         # Plan posts marked `draft: true`
//! trailing_slash = true          # "/hello/" rather than "/hello"
//! extensions = ["md", "markdown"]
//!
//! [pages]
//! template = "templates/blog-post"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::content::ContentQuery;
use crate::types::TemplateRef;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Descriptive site metadata, passed through untouched.
    pub site: SiteMeta,
    /// Which posts are loaded and how their slugs look.
    pub content: ContentConfig,
    /// How page records are bound to templates.
    pub pages: PagesConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content.limit == 0 {
            return Err(ConfigError::Validation(
                "content.limit must be at least 1".into(),
            ));
        }
        if self.content.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "content.extensions must not be empty".into(),
            ));
        }
        if self.content.extensions.iter().any(|e| e.trim().is_empty() || e.starts_with('.')) {
            return Err(ConfigError::Validation(
                "content.extensions entries must be bare extensions like \"md\"".into(),
            ));
        }
        if self.pages.template.trim().is_empty() {
            return Err(ConfigError::Validation(
                "pages.template must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// The content query this config describes.
    pub fn query(&self) -> ContentQuery {
        ContentQuery {
            limit: self.content.limit,
            include_drafts: self.content.include_drafts,
            trailing_slash: self.content.trailing_slash,
            extensions: self.content.extensions.clone(),
        }
    }

    pub fn template(&self) -> TemplateRef {
        TemplateRef::new(&self.pages.template)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    pub title: String,
    pub author: String,
    pub description: String,
    pub site_url: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            author: String::new(),
            description: String::new(),
            site_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Upper bound on the number of posts, applied after date sorting.
    pub limit: usize,
    pub include_drafts: bool,
    pub trailing_slash: bool,
    /// File extensions (without the dot) treated as posts.
    pub extensions: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            limit: 1000,
            include_drafts: false,
            trailing_slash: true,
            extensions: vec!["md".to_string(), "markdown".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagesConfig {
    pub template: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            template: "templates/blog-post".to_string(),
        }
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
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

/// Load `config.toml` from a directory as a raw TOML value.
///
/// `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    tracing::debug!(root = %root.display(), "loaded site config");
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Blog Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site metadata
# ---------------------------------------------------------------------------
[site]
title = "My Blog"
author = ""
description = ""
site_url = ""

# ---------------------------------------------------------------------------
# Content discovery
# ---------------------------------------------------------------------------
[content]
# Maximum number of posts handed to the page planner, newest first.
limit = 1000

# Plan posts whose front matter says `draft: true`.
include_drafts = false

# Slugs end with a slash ("/hello-world/") when true.
trailing_slash = true

# File extensions treated as posts.
extensions = ["md", "markdown"]

# ---------------------------------------------------------------------------
# Page records
# ---------------------------------------------------------------------------
[pages]
# Template every post page is bound to. Passed through to the page
# registry as-is.
template = "templates/blog-post"
"##
}
