//! PDF codec adapter
//!
//! Thin layer over `lopdf` and `image` that the rest of the crate talks to:
//! 1. Open documents and look up pages by index
//! 2. Copy pages from any number of sources into one output document
//! 3. Wrap raster images into single-page documents
//! 4. Write the result atomically

mod copy;
mod io;
mod raster;
mod writer;

pub use copy::{copy_object_deep, fill_unresolved, page_dimensions};
pub use io::{load_pdf, open_document, save_pdf, write_document_atomic};
pub use raster::{TempPdf, image_to_document, image_to_temp_pdf};
pub use writer::PageWriter;

use crate::types::*;
use lopdf::{Document, ObjectId};
use std::path::Path;

/// US Letter, used when a page carries no MediaBox at all
pub(crate) const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (612.0, 792.0);

pub fn page_count(doc: &Document) -> usize {
    doc.get_pages().len()
}

/// Object ID of the zero-based `page_index`, or `MissingPage` naming `path`
pub fn page_id(doc: &Document, path: &Path, page_index: usize) -> Result<ObjectId> {
    let pages = doc.get_pages();
    u32::try_from(page_index + 1)
        .ok()
        .and_then(|number| pages.get(&number).copied())
        .ok_or_else(|| ComposeError::MissingPage {
            path: path.to_path_buf(),
            page_index,
            page_count: pages.len(),
        })
}
