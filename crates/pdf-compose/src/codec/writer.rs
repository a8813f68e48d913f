//! Output document assembly
//!
//! A [`PageWriter`] collects pages from any number of source documents, in the
//! order they are appended, and builds a fresh page tree for them.

use super::copy::{MAX_TREE_DEPTH, copy_object_deep, fill_unresolved};
use super::{DEFAULT_PAGE_DIMENSIONS, page_id, write_document_atomic};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_KEYS: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

pub struct PageWriter {
    document: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    /// Per-source map from source object IDs to their copies
    copied: HashMap<PathBuf, HashMap<ObjectId, ObjectId>>,
}

impl Default for PageWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PageWriter {
    pub fn new() -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        Self {
            document,
            pages_id,
            kids: Vec::new(),
            copied: HashMap::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Append the zero-based `page_index` of `source`.
    ///
    /// `source_path` identifies the source for error messages and for sharing
    /// copied resources between pages of the same document.
    pub fn append_page(
        &mut self,
        source: &Document,
        source_path: &Path,
        page_index: usize,
    ) -> Result<()> {
        let source_page_id = page_id(source, source_path, page_index)?;
        let page_dict = resolve_inherited(source, source_page_id)?;

        let cache = self.copied.entry(source_path.to_path_buf()).or_default();
        // An earlier page may already link here; take over its reserved ID
        let new_page_id = match cache.get(&source_page_id) {
            Some(&id) if !self.document.objects.contains_key(&id) => id,
            _ => self.document.new_object_id(),
        };
        // Annotations point back at their page through /P
        cache.insert(source_page_id, new_page_id);

        let mut new_page = Dictionary::new();
        for (key, value) in page_dict.iter() {
            new_page.set(
                key.clone(),
                copy_object_deep(&mut self.document, source, value, cache)?,
            );
        }
        new_page.set("Parent", Object::Reference(self.pages_id));

        self.document
            .objects
            .insert(new_page_id, Object::Dictionary(new_page));
        self.kids.push(Object::Reference(new_page_id));
        Ok(())
    }

    /// Append every page of `source` in its own order
    pub fn append_document(&mut self, source: &Document, source_path: &Path) -> Result<usize> {
        let count = source.get_pages().len();
        for page_index in 0..count {
            self.append_page(source, source_path, page_index)?;
        }
        Ok(count)
    }

    /// Build the page tree and catalog and return the finished document
    pub fn finish(mut self) -> Document {
        // Links to pages that were never appended
        let nulled: usize = self
            .copied
            .values()
            .map(|cache| fill_unresolved(&mut self.document, cache.values()))
            .sum();
        if nulled > 0 {
            log::debug!("Dropped {} reference(s) to pages outside the output", nulled);
        }

        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(self.kids.len() as i64)),
            ("Kids", Object::Array(self.kids)),
        ]);
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.document.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ]));
        self.document.trailer.set("Root", catalog_id);

        self.document
    }

    /// Finish and write atomically to `path`
    pub fn save(self, path: &Path) -> Result<()> {
        if self.kids.is_empty() {
            return Err(ComposeError::NothingToWrite);
        }
        write_document_atomic(self.finish(), path)
    }
}

/// Clone a page dictionary with inherited attributes made explicit and
/// without its `Parent` link.
fn resolve_inherited(source: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let mut page = source.get_dictionary(page_id)?.clone();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;

    while let Some(parent_id) = parent {
        if depth > MAX_TREE_DEPTH {
            break;
        }
        depth += 1;
        let node = match source.get_dictionary(parent_id) {
            Ok(node) => node,
            Err(_) => break,
        };
        for key in INHERITABLE_KEYS {
            if !page.has(key) {
                if let Ok(value) = node.get(key) {
                    page.set(key.to_vec(), value.clone());
                }
            }
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    page.remove(b"Parent");
    if !page.has(b"MediaBox") {
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(DEFAULT_PAGE_DIMENSIONS.0 as i64),
                Object::Integer(DEFAULT_PAGE_DIMENSIONS.1 as i64),
            ]),
        );
    }
    if !page.has(b"Resources") {
        page.set("Resources", Object::Dictionary(Dictionary::new()));
    }
    Ok(page)
}
