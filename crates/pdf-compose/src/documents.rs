//! Reference-counted store of open source documents
//!
//! Descriptors only carry a path and a page index. The store owns the parsed
//! documents they point at and keeps each one open while at least one
//! descriptor references it.

use crate::codec::{open_document, page_count};
use crate::types::*;
use lopdf::Document;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Owned snapshot of open documents, handed to export jobs
pub type SourceDocuments = HashMap<PathBuf, Arc<Document>>;

struct StoredDocument {
    document: Arc<Document>,
    references: usize,
}

#[derive(Default)]
pub struct DocumentStore {
    documents: HashMap<PathBuf, StoredDocument>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `path` (or reuse the open handle) and return its page count.
    ///
    /// Opening does not take a reference; call [`retain`](Self::retain) once
    /// per descriptor and [`close_unreferenced`](Self::close_unreferenced)
    /// if none were created.
    pub fn open(&mut self, path: &Path) -> Result<usize> {
        if let Some(stored) = self.documents.get(path) {
            log::debug!("Reusing open document {}", path.display());
            return Ok(page_count(&stored.document));
        }

        let document = open_document(path)?;
        let count = page_count(&document);
        log::debug!("Opened {} ({} pages)", path.display(), count);
        self.documents.insert(
            path.to_path_buf(),
            StoredDocument {
                document: Arc::new(document),
                references: 0,
            },
        );
        Ok(count)
    }

    /// Add one reference; returns `false` if `path` is not open
    pub fn retain(&mut self, path: &Path) -> bool {
        match self.documents.get_mut(path) {
            Some(stored) => {
                stored.references += 1;
                true
            }
            None => false,
        }
    }

    /// Drop one reference, closing the document when none remain.
    ///
    /// Returns `true` if the document was closed.
    pub fn release(&mut self, path: &Path) -> bool {
        let Some(stored) = self.documents.get_mut(path) else {
            return false;
        };
        stored.references = stored.references.saturating_sub(1);
        if stored.references == 0 {
            self.documents.remove(path);
            log::debug!("Closed {}", path.display());
            true
        } else {
            false
        }
    }

    /// Close every document that no descriptor references
    pub fn close_unreferenced(&mut self) {
        self.documents.retain(|_, stored| stored.references > 0);
    }

    pub fn get(&self, path: &Path) -> Option<&Arc<Document>> {
        self.documents.get(path).map(|stored| &stored.document)
    }

    pub fn page_count(&self, path: &Path) -> Option<usize> {
        self.get(path).map(|doc| page_count(doc))
    }

    pub fn reference_count(&self, path: &Path) -> usize {
        self.documents
            .get(path)
            .map(|stored| stored.references)
            .unwrap_or(0)
    }

    pub fn is_open(&self, path: &Path) -> bool {
        self.documents.contains_key(path)
    }

    pub fn open_documents(&self) -> usize {
        self.documents.len()
    }

    pub fn snapshot(&self) -> SourceDocuments {
        self.documents
            .iter()
            .map(|(path, stored)| (path.clone(), Arc::clone(&stored.document)))
            .collect()
    }

    pub fn clear(&mut self) {
        self.documents.clear();
    }
}
