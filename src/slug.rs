//! File path to slug conversion.
//!
//! A post's URL is its location under the content root with the extension
//! dropped. `index` files take their directory's name, so a post can live
//! alongside its assets:
//!
//! - `hello-world/index.md` → `/hello-world/`
//! - `my-second-post.md` → `/my-second-post/`
//! - `2019/notes.md` → `/2019/notes/`
//! - `index.md` → `/`
//!
//! Segments are kept verbatim (no case folding, no escaping). The trailing
//! slash is configurable; the root slug is always `/`.

use std::path::{Component, Path};

/// Derive the slug of `path`, which must sit under `root`.
///
/// Returns `None` if `path` is outside `root` or has a non-UTF-8 segment.
pub fn file_path_to_slug(root: &Path, path: &Path, trailing_slash: bool) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;

    let mut segments = Vec::new();
    for component in rel.parent().into_iter().flat_map(Path::components) {
        match component {
            Component::Normal(s) => segments.push(s.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }

    let stem = rel.file_stem()?.to_str()?;
    if stem != "index" {
        segments.push(stem);
    }

    if segments.is_empty() {
        return Some("/".to_string());
    }

    let mut slug = format!("/{}", segments.join("/"));
    if trailing_slash {
        slug.push('/');
    }
    Some(slug)
}

/// Title fallback from a file location: the stem with dashes and
/// underscores turned into spaces, or the directory name for `index` files.
pub fn title_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let name = if stem == "index" {
        path.parent()
            .and_then(Path::file_name)
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or(stem)
    } else {
        stem
    };
    name.replace(['-', '_'], " ")
}
