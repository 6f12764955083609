//! Shared types passed between the content loader, the planner and the
//! page registry.
//!
//! These are serialized to JSON between stages (`manifest.json` holds
//! documents, `pages.json` holds page records) and must stay stable across
//! all of them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The part of a post the planner consumes: a unique slug and a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDocument {
    pub slug: String,
    pub title: String,
}

impl ContentDocument {
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
        }
    }
}

/// A fully loaded Markdown post.
///
/// Carries everything the loader extracted from disk. Only [`Post::document`]
/// is handed to the planner; the rest is metadata for whoever renders the
/// page later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// URL path derived from the file location (`/hello-world/`)
    pub slug: String,
    /// Front matter `title`, else first heading, else file stem
    pub title: String,
    /// Publication time, used for ordering. Date-only values are midnight;
    /// undated posts sort after every dated one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Plain-text opening of the body, for listings
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub excerpt: String,
    /// Path of the source file relative to the content root
    pub source_path: String,
}

impl Post {
    pub fn document(&self) -> ContentDocument {
        ContentDocument::new(&self.slug, &self.title)
    }
}

/// Opaque reference to the rendering template a page is bound to.
///
/// The planner never resolves it; it is passed through to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateRef(pub String);

impl TemplateRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload handed to the template alongside the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    pub slug: String,
    /// The next-older document, absent for the oldest
    pub previous: Option<ContentDocument>,
    /// The next-newer document, absent for the newest
    pub next: Option<ContentDocument>,
}

/// Instruction to create one routable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub path: String,
    pub template: TemplateRef,
    pub context: PageContext,
}
