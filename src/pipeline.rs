//! Build pipeline: scan → plan → register.
//!
//! Each step is an explicit call on explicit data; there are no lifecycle
//! hooks. Registration happens only after the whole content set loaded, so a
//! content error never leaves a half-registered site behind.

use std::path::Path;
use thiserror::Error;

use crate::content::{self, ContentError, Manifest};
use crate::plan::plan;
use crate::registry::{PageRegistry, RegistryError};
use crate::types::PageRecord;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Plan the pages for a scanned manifest, bound to its configured template.
pub fn plan_manifest(manifest: &Manifest) -> Vec<PageRecord> {
    let template = manifest.config.template();
    let pages = plan(&manifest.documents(), &template);
    tracing::info!(count = pages.len(), %template, "planned pages");
    pages
}

/// Hand every record to `registry`, in order. Stops at the first error.
pub fn register<R: PageRegistry>(
    pages: &[PageRecord],
    registry: &mut R,
) -> Result<(), RegistryError> {
    for page in pages {
        registry.create_page(page.clone())?;
    }
    Ok(())
}

/// Result of a full build.
#[derive(Debug)]
pub struct BuildOutput {
    pub manifest: Manifest,
    pub pages: Vec<PageRecord>,
}

/// Scan `root`, plan its posts, and register the pages.
pub fn build<R: PageRegistry>(root: &Path, registry: &mut R) -> Result<BuildOutput, BuildError> {
    let manifest = content::scan(root)?;
    let pages = plan_manifest(&manifest);
    register(&pages, registry)?;
    Ok(BuildOutput { manifest, pages })
}
