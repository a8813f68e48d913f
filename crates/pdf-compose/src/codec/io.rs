//! Document I/O operations

use crate::types::*;
use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Open a PDF synchronously
pub fn open_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    Document::load(path).map_err(|e| ComposeError::unreadable_document(path, e))
}

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| ComposeError::unreadable_document(&path, e))?;
    let doc = tokio::task::spawn_blocking(move || {
        Document::load_mem(&bytes).map_err(|e| ComposeError::unreadable_document(path, e))
    })
    .await??;
    Ok(doc)
}

/// Save a document to `path` without leaving a partial file behind
pub async fn save_pdf(doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    tokio::task::spawn_blocking(move || write_document_atomic(doc, &path)).await?
}

/// Serialize `doc`, write it to a temporary file next to `path`, then rename.
///
/// The destination is either untouched or fully written.
pub fn write_document_atomic(mut doc: Document, path: &Path) -> Result<()> {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ComposeError::write_failure(path, e))?;

    let dir = destination_dir(path);
    let mut temp = tempfile::Builder::new()
        .prefix(".pdf-compose-")
        .suffix(".part")
        .tempfile_in(&dir)
        .map_err(|e| ComposeError::write_failure(path, e))?;
    temp.write_all(&bytes)
        .and_then(|_| temp.flush())
        .map_err(|e| ComposeError::write_failure(path, e))?;
    temp.persist(path)
        .map_err(|e| ComposeError::write_failure(path, e.error))?;

    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn destination_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
