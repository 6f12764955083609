//! Content page planning.
//!
//! Turns a date-descending list of documents into one [`PageRecord`] per
//! document, each linked to its chronological neighbours:
//!
//! ```text
//! index  slug   next   previous
//! 0      /c     -      /b
//! 1      /b     /c     /a
//! 2      /a     /b     -
//! ```
//!
//! "Next" points at the newer post (towards index 0), "previous" at the
//! older one. Input order is the output order; nothing is re-sorted here.

use crate::types::{ContentDocument, PageContext, PageRecord, TemplateRef};

/// Plan one page per document, in input order.
pub fn plan(documents: &[ContentDocument], template: &TemplateRef) -> Vec<PageRecord> {
    documents
        .iter()
        .enumerate()
        .map(|(idx, doc)| {
            let next = idx.checked_sub(1).map(|i| documents[i].clone());
            let previous = documents.get(idx + 1).cloned();

            PageRecord {
                path: doc.slug.clone(),
                template: template.clone(),
                context: PageContext {
                    slug: doc.slug.clone(),
                    previous,
                    next,
                },
            }
        })
        .collect()
}
