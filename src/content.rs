//! Content discovery and loading.
//!
//! Walks the content directory for Markdown posts and turns each into a
//! [`Post`]: front matter parsed, slug derived from the file location,
//! title and excerpt resolved. The result is sorted newest first and capped
//! at the query limit, ready for the planner.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml                 # Site configuration (optional)
//! ├── hello-world/
//! │   ├── index.md                # → /hello-world/
//! │   └── salty_egg.jpg           # Co-located asset, ignored
//! ├── my-second-post.md           # → /my-second-post/
//! ├── 2019/
//! │   └── new-beginnings.md       # → /2019/new-beginnings/
//! └── .drafts/                    # Hidden, never walked
//! ```
//!
//! ## Failure
//!
//! Any unreadable file, malformed front matter, unparseable `date`, or two
//! posts claiming the same slug fails the whole load. A post with no `date`
//! at all is still loaded and sorts after the dated ones. Nothing
//! is planned from a partial content set.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::{self, SiteConfig};
use crate::frontmatter::{self, FrontmatterError};
use crate::markdown;
use crate::slug;
use crate::types::{ContentDocument, Post};

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid front matter in {path}: {source}")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },
    #[error("Unparseable date '{value}' in {path}")]
    InvalidDate { path: PathBuf, value: String },
    #[error("Cannot derive a slug for {0}")]
    InvalidPath(PathBuf),
    #[error("Duplicate slug {slug}: {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// What to load and how: the query the planner's input comes from.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentQuery {
    /// Keep at most this many posts, newest first.
    pub limit: usize,
    pub include_drafts: bool,
    pub trailing_slash: bool,
    pub extensions: Vec<String>,
}

impl Default for ContentQuery {
    fn default() -> Self {
        SiteConfig::default().query()
    }
}

/// Output of the scan stage: resolved config plus the sorted posts.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub config: SiteConfig,
    pub posts: Vec<Post>,
}

impl Manifest {
    /// The planner's view of the posts, in manifest order.
    pub fn documents(&self) -> Vec<ContentDocument> {
        self.posts.iter().map(Post::document).collect()
    }
}

/// Load config and posts from a content root.
pub fn scan(root: &Path) -> Result<Manifest, ContentError> {
    let config = config::load_config(root)?;
    let posts = load_posts(root, &config.query())?;
    Ok(Manifest { config, posts })
}

/// Load every post under `root`, sorted by date descending.
///
/// Undated posts come after dated ones. Posts with the same date (or both
/// undated) are ordered by slug so repeated builds agree.
pub fn load_posts(root: &Path, query: &ContentQuery) -> Result<Vec<Post>, ContentError> {
    let mut posts = Vec::new();
    let mut seen: BTreeMap<String, PathBuf> = BTreeMap::new();

    for path in collect_post_files(root, &query.extensions)? {
        let Some(post) = load_post(root, &path, query)? else {
            continue;
        };
        if let Some(first) = seen.get(&post.slug) {
            return Err(ContentError::DuplicateSlug {
                slug: post.slug,
                first: first.clone(),
                second: path,
            });
        }
        seen.insert(post.slug.clone(), path);
        posts.push(post);
    }

    // `None < Some(_)`, so descending order puts undated posts last.
    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
    if posts.len() > query.limit {
        tracing::info!(
            found = posts.len(),
            limit = query.limit,
            "dropping oldest posts beyond limit"
        );
        posts.truncate(query.limit);
    }

    tracing::info!(count = posts.len(), root = %root.display(), "loaded posts");
    Ok(posts)
}

/// Load a single post. `Ok(None)` means it is a draft and drafts are off.
fn load_post(root: &Path, path: &Path, query: &ContentQuery) -> Result<Option<Post>, ContentError> {
    let content = fs::read_to_string(path)?;
    let frontmatter_err = |source| ContentError::Frontmatter {
        path: path.to_path_buf(),
        source,
    };
    let (front, body) = frontmatter::parse(&content).map_err(frontmatter_err)?;

    if front.draft().map_err(frontmatter_err)? && !query.include_drafts {
        tracing::debug!(path = %path.display(), "skipping draft");
        return Ok(None);
    }

    let slug = slug::file_path_to_slug(root, path, query.trailing_slash)
        .ok_or_else(|| ContentError::InvalidPath(path.to_path_buf()))?;

    let date = front
        .date()
        .map(|raw| {
            parse_date(raw).ok_or_else(|| ContentError::InvalidDate {
                path: path.to_path_buf(),
                value: raw.to_string(),
            })
        })
        .transpose()?;
    if date.is_none() {
        tracing::warn!(path = %path.display(), "post has no date, sorting it last");
    }

    let title = front
        .title()
        .map(str::to_string)
        .or_else(|| markdown::first_heading(body))
        .unwrap_or_else(|| slug::title_from_path(path));

    let source_path = path
        .strip_prefix(root)
        .map_err(|_| ContentError::InvalidPath(path.to_path_buf()))?
        .to_string_lossy()
        .to_string();

    tracing::debug!(%slug, %title, ?date, "loaded post");

    Ok(Some(Post {
        slug,
        title,
        date,
        description: front.description().map(str::to_string),
        excerpt: markdown::excerpt(body, markdown::EXCERPT_LENGTH),
        source_path,
    }))
}

/// Every post file under `root`, in path order. Hidden entries are skipped.
fn collect_post_files(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, ContentError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && has_post_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn has_post_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|e| {
            let e = e.to_string_lossy();
            extensions.iter().any(|x| x.eq_ignore_ascii_case(&e))
        })
        .unwrap_or(false)
}

/// Parse a front matter date.
///
/// Accepts RFC 3339 (`2015-05-01T22:12:03.284Z`, normalized to UTC), a
/// local date-time with `T` or space separator, or a bare `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
