//! Page registration.
//!
//! The planner only describes pages. A [`PageRegistry`] is whatever turns
//! those descriptions into servable routes. Two are provided:
//!
//! - [`MemoryRegistry`] keeps records in memory, for tests and embedding.
//! - [`ManifestRegistry`] collects records and writes them to `pages.json`
//!   for a downstream renderer.
//!
//! Both reject a second record for a path that is already registered.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::types::PageRecord;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Page already registered at {0}")]
    DuplicatePath(String),
}

pub trait PageRegistry {
    fn create_page(&mut self, record: PageRecord) -> Result<(), RegistryError>;
}

impl<R: PageRegistry + ?Sized> PageRegistry for &mut R {
    fn create_page(&mut self, record: PageRecord) -> Result<(), RegistryError> {
        (**self).create_page(record)
    }
}

#[derive(Debug, Default)]
pub struct MemoryRegistry {
    pages: Vec<PageRecord>,
    paths: BTreeSet<String>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<PageRecord> {
        self.pages
    }
}

impl PageRegistry for MemoryRegistry {
    fn create_page(&mut self, record: PageRecord) -> Result<(), RegistryError> {
        if !self.paths.insert(record.path.clone()) {
            return Err(RegistryError::DuplicatePath(record.path));
        }
        tracing::debug!(path = %record.path, template = %record.template, "registered page");
        self.pages.push(record);
        Ok(())
    }
}

/// Collects records, then writes them as a JSON array with [`finish`].
///
/// [`finish`]: ManifestRegistry::finish
#[derive(Debug)]
pub struct ManifestRegistry {
    path: PathBuf,
    inner: MemoryRegistry,
}

impl ManifestRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            inner: MemoryRegistry::new(),
        }
    }

    pub fn pages(&self) -> &[PageRecord] {
        self.inner.pages()
    }

    /// Write `pages.json` and return the records written.
    pub fn finish(self) -> Result<Vec<PageRecord>, RegistryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self.inner.pages())?;
        fs::write(&self.path, json)?;
        tracing::info!(path = %self.path.display(), count = self.inner.pages().len(), "wrote page manifest");
        Ok(self.inner.into_pages())
    }
}

impl PageRegistry for ManifestRegistry {
    fn create_page(&mut self, record: PageRecord) -> Result<(), RegistryError> {
        self.inner.create_page(record)
    }
}

/// Read a `pages.json` written by [`ManifestRegistry`].
pub fn read_pages(path: &Path) -> Result<Vec<PageRecord>, RegistryError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
