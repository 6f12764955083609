//! # Simple Blog
//!
//! Build-time content planning for a Markdown blog. Posts live on disk as
//! Markdown files with front matter; the crate discovers them, gives each a
//! slug from its location, orders them newest first, and plans one page per
//! post linked to its chronological neighbours.
//!
//! # Architecture: Two Stages and a Registry
//!
//! ```text
//! 1. Scan      content/       →  manifest.json   (files → sorted posts)
//! 2. Plan      manifest.json  →  pages.json      (posts → page records)
//!              page records   →  PageRegistry    (records → routes)
//! ```
//!
//! Each stage writes human-readable JSON the next one reads, so a build can
//! be inspected or resumed at any point. The planner itself is a pure
//! function over an already-sorted slice; ordering, slugging and limits are
//! the loader's job, and turning records into pages is the registry's.
//!
//! Rendering is out of scope. A page record names its template and carries
//! a context (`slug`, `previous`, `next`); whatever consumes `pages.json` or
//! implements [`registry::PageRegistry`] does the rest.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Stage 1: walks the content directory, loads and sorts posts |
//! | [`plan`] | Stage 2: sorted documents → neighbour-linked page records |
//! | [`registry`] | `PageRegistry` trait plus in-memory and `pages.json` registries |
//! | [`pipeline`] | Chains scan → plan → register |
//! | [`frontmatter`] | `---` and `+++` front matter parsing |
//! | [`slug`] | File path → URL slug |
//! | [`markdown`] | First heading and excerpt extraction |
//! | [`config`] | `config.toml` loading, defaults and validation |
//! | [`types`] | Shared serialized types (`Post`, `ContentDocument`, `PageRecord`) |
//! | [`output`] | CLI output formatting |

pub mod config;
pub mod content;
pub mod frontmatter;
pub mod markdown;
pub mod output;
pub mod pipeline;
pub mod plan;
pub mod registry;
pub mod slug;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
