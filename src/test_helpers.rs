//! Shared test utilities.
//!
//! Fixture setup plus lookups over scan and plan output that panic with the
//! available keys on a miss, so failures say what was there instead.

use std::path::Path;
use tempfile::TempDir;

use crate::content::Manifest;
use crate::types::{PageRecord, Post};

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Find a post by slug. Panics if not found.
pub fn find_post<'a>(manifest: &'a Manifest, slug: &str) -> &'a Post {
    manifest
        .posts
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| panic!("post '{slug}' not found. Available: {:?}", post_slugs(manifest)))
}

/// All post slugs in manifest order.
pub fn post_slugs(manifest: &Manifest) -> Vec<&str> {
    manifest.posts.iter().map(|p| p.slug.as_str()).collect()
}

/// Find a page record by path. Panics if not found.
pub fn find_page<'a>(pages: &'a [PageRecord], path: &str) -> &'a PageRecord {
    pages.iter().find(|p| p.path == path).unwrap_or_else(|| {
        let paths: Vec<&str> = pages.iter().map(|p| p.path.as_str()).collect();
        panic!("page '{path}' not found. Available: {paths:?}")
    })
}

/// `(path, previous slug, next slug)` for every record, in order.
pub fn neighbour_table(pages: &[PageRecord]) -> Vec<(&str, Option<&str>, Option<&str>)> {
    pages
        .iter()
        .map(|p| {
            (
                p.path.as_str(),
                p.context.previous.as_ref().map(|d| d.slug.as_str()),
                p.context.next.as_ref().map(|d| d.slug.as_str()),
            )
        })
        .collect()
}
