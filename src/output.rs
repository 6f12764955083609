//! CLI output formatting for the pipeline stages.
//!
//! Output is a content inventory: each entity leads with its positional index
//! and title, and file-system or routing detail follows on indented lines.
//!
//! ## Scan
//!
//! ```text
//! Posts
//! 001 New Beginnings (2015-05-28)
//!     Source: new-beginnings/index.md
//!     Slug: /new-beginnings/
//! 002 My Second Post! (2015-05-06)
//!     Source: my-second-post.md
//!     Slug: /my-second-post/
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Plan
//!
//! ```text
//! 001 /new-beginnings/ → templates/blog-post
//!     Previous: My Second Post! (/my-second-post/)
//! 002 /my-second-post/ → templates/blog-post
//!     Previous: Hello World (/hello-world/)
//!     Next: New Beginnings (/new-beginnings/)
//!
//! Planned 2 pages
//! ```
//!
//! Each stage has a `format_*` function returning lines (pure, testable) and
//! a `print_*` wrapper that writes them to stdout.

use std::path::Path;

use crate::content::Manifest;
use crate::types::{ContentDocument, PageRecord};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn document_ref(doc: &ContentDocument) -> String {
    format!("{} ({})", doc.title, doc.slug)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the posts and config discovered by a scan.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];

    if manifest.posts.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, post) in manifest.posts.iter().enumerate() {
        let date = post
            .date
            .map(|d| d.date().to_string())
            .unwrap_or_else(|| "undated".to_string());
        lines.push(format!("{} {} ({})", format_index(i + 1), post.title, date));
        lines.push(format!("{}Source: {}", indent(1), post.source_path));
        lines.push(format!("{}Slug: {}", indent(1), post.slug));
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    } else {
        lines.push(format!("{}(defaults)", indent(1)));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Plan output
// ============================================================================

/// Format planned page records with their neighbour links.
pub fn format_plan_output(pages: &[PageRecord]) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, page) in pages.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            page.path,
            page.template
        ));
        if let Some(prev) = &page.context.previous {
            lines.push(format!("{}Previous: {}", indent(1), document_ref(prev)));
        }
        if let Some(next) = &page.context.next {
            lines.push(format!("{}Next: {}", indent(1), document_ref(next)));
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!("Planned {}", plural(pages.len(), "page")));
    lines
}

/// Print plan output to stdout.
pub fn print_plan_output(pages: &[PageRecord]) {
    for line in format_plan_output(pages) {
        println!("{}", line);
    }
}
