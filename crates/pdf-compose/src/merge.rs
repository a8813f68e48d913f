//! Merge and export pipeline
//!
//! Every flow builds the complete output in memory and writes it atomically at
//! the end, so a failure part-way through never leaves a partial file behind.

use crate::codec::{PageWriter, TempPdf, image_to_temp_pdf, open_document, page_count};
use crate::descriptor::{PageDescriptor, PageOrigin};
use crate::documents::SourceDocuments;
use crate::types::*;
use lopdf::Document;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Owned snapshot of an edited sequence, ready to hand to a worker
#[derive(Clone)]
pub struct ExportJob {
    pub pages: Vec<PageDescriptor>,
    pub sources: SourceDocuments,
}

impl fmt::Debug for ExportJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportJob")
            .field("pages", &self.pages)
            .field("sources", &self.sources.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub page_count: usize,
    /// Temporary PDFs created for image pages; already deleted when the report is returned
    pub transient_files: Vec<PathBuf>,
}

// =============================================================================
// Whole-file merge
// =============================================================================

/// Append every page of every file in `paths`, in order, and write `output`.
///
/// Progress is reported before and after each file. The first unreadable
/// file aborts the merge and nothing is written.
pub fn merge_files_blocking<P: AsRef<Path>>(
    paths: &[P],
    output: &Path,
    mut progress: impl FnMut(Progress),
) -> Result<usize> {
    if paths.is_empty() {
        return Err(ComposeError::NothingToWrite);
    }

    let total = paths.len();
    let mut writer = PageWriter::new();

    for (index, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        let name = display_name(path);
        progress(Progress::new(format!("Merging {}", name), index, total));

        let source = open_document(path)?;
        let pages = writer.append_document(&source, path)?;
        log::debug!("Appended {} pages from {}", pages, path.display());

        progress(Progress::new(format!("Merged {}", name), index + 1, total));
    }

    let page_count = writer.page_count();
    writer.save(output)?;
    log::info!(
        "Merged {} files ({} pages) into {}",
        total,
        page_count,
        output.display()
    );
    Ok(page_count)
}

pub async fn merge_files(
    paths: Vec<PathBuf>,
    output: PathBuf,
    progress: impl FnMut(Progress) + Send + 'static,
) -> Result<usize> {
    tokio::task::spawn_blocking(move || merge_files_blocking(&paths, &output, progress)).await?
}

// =============================================================================
// Reverse
// =============================================================================

/// Write the pages of `input` to `output` in reverse order
pub fn reverse_file_blocking(input: &Path, output: &Path) -> Result<usize> {
    let source = open_document(input)?;
    let count = page_count(&source);
    if count == 0 {
        return Err(ComposeError::NothingToWrite);
    }

    let mut writer = PageWriter::new();
    for page_index in (0..count).rev() {
        writer.append_page(&source, input, page_index)?;
    }
    writer.save(output)?;

    log::info!(
        "Reversed {} pages of {} into {}",
        count,
        input.display(),
        output.display()
    );
    Ok(count)
}

pub async fn reverse_file(input: PathBuf, output: PathBuf) -> Result<usize> {
    tokio::task::spawn_blocking(move || reverse_file_blocking(&input, &output)).await?
}

// =============================================================================
// Edited-sequence export
// =============================================================================

/// Resolve `pages` left to right and write them to `output`.
///
/// PDF pages come from `sources` when present and are loaded on demand
/// otherwise. Each image becomes a transient single-page PDF that lives until
/// the export finishes, successfully or not.
pub fn export_sequence_blocking(
    pages: &[PageDescriptor],
    sources: &SourceDocuments,
    output: &Path,
    image_dpi: f32,
    mut progress: impl FnMut(Progress),
) -> Result<ExportReport> {
    if pages.is_empty() {
        return Err(ComposeError::NothingToWrite);
    }

    let total = pages.len();
    let mut writer = PageWriter::new();
    let mut loaded: HashMap<PathBuf, Document> = HashMap::new();
    let mut transient: Vec<TempPdf> = Vec::new();

    for (index, descriptor) in pages.iter().enumerate() {
        progress(Progress::new(
            format!("Exporting {}", descriptor.origin().label()),
            index,
            total,
        ));

        match descriptor.origin() {
            PageOrigin::PdfPage { path, page_index } => {
                let source = match sources.get(path) {
                    Some(doc) => doc.as_ref(),
                    None => {
                        if !loaded.contains_key(path) {
                            log::debug!("Loading {} on demand", path.display());
                            loaded.insert(path.clone(), open_document(path)?);
                        }
                        &loaded[path]
                    }
                };
                writer.append_page(source, path, *page_index)?;
            }
            PageOrigin::Image { path } => {
                let temp = image_to_temp_pdf(path, image_dpi)?;
                let source = open_document(temp.path())?;
                writer.append_page(&source, temp.path(), 0)?;
                transient.push(temp);
            }
        }
    }
    progress(Progress::new("Writing output", total, total));

    let page_count = writer.page_count();
    writer.save(output)?;

    let transient_files = transient.iter().map(|t| t.path().to_path_buf()).collect();
    drop(transient);

    log::info!("Exported {} pages to {}", page_count, output.display());
    Ok(ExportReport {
        page_count,
        transient_files,
    })
}

pub async fn export_sequence(
    job: ExportJob,
    output: PathBuf,
    image_dpi: f32,
    progress: impl FnMut(Progress) + Send + 'static,
) -> Result<ExportReport> {
    tokio::task::spawn_blocking(move || {
        export_sequence_blocking(&job.pages, &job.sources, &output, image_dpi, progress)
    })
    .await?
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
