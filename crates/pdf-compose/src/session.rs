//! Page editor session
//!
//! One [`EditorSession`] owns everything the page editor mutates: the page
//! sequence, the selection, the gesture controller, the thumbnail cache and
//! the open source documents. It lives on the UI thread and is only ever
//! borrowed mutably, so no locking is involved.
//!
//! While an export runs the session is busy and rejects every mutation with
//! [`ComposeError::Busy`].

use crate::descriptor::{DescriptorId, PageDescriptor, PageOrigin, SourceKind};
use crate::documents::DocumentStore;
use crate::gesture::{GestureController, GestureOutcome, GridLayout, Point, ThumbnailVisual};
use crate::merge::{ExportJob, ExportReport, export_sequence_blocking};
use crate::options::EditorOptions;
use crate::sequence::PageSequence;
use crate::thumbnail::{PageRasterizer, Thumbnail, ThumbnailCache};
use crate::types::*;
use std::path::Path;

pub struct EditorSession<R> {
    options: EditorOptions,
    sequence: PageSequence,
    /// Selected page, tracked by identity so it follows moves
    selection: Option<DescriptorId>,
    gesture: GestureController,
    thumbnails: ThumbnailCache<R>,
    documents: DocumentStore,
    busy: bool,
}

impl<R: PageRasterizer> EditorSession<R> {
    pub fn new(rasterizer: R, options: EditorOptions) -> Self {
        let thumbnails = ThumbnailCache::new(
            rasterizer,
            options.thumbnail_width,
            options.thumbnail_height,
            options.thumbnail_scale,
        );
        Self {
            gesture: GestureController::new(options.drag_threshold),
            thumbnails,
            options,
            sequence: PageSequence::new(),
            selection: None,
            documents: DocumentStore::new(),
            busy: false,
        }
    }

    // ---- Accessors ----

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn sequence(&self) -> &PageSequence {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn thumbnails(&self) -> &ThumbnailCache<R> {
        &self.thumbnails
    }

    pub fn gesture(&self) -> &GestureController {
        &self.gesture
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection.and_then(|id| self.sequence.position_of(id))
    }

    pub fn selected(&self) -> Option<&PageDescriptor> {
        self.selected_index().and_then(|index| self.sequence.get(index))
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Mark the session busy while a merge or reverse job owned by the caller runs
    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        if busy {
            self.gesture.cancel();
        }
    }

    /// Replace the options, dropping thumbnails rendered with the old size
    pub fn set_options(&mut self, options: EditorOptions) -> Result<()> {
        self.ensure_idle()?;
        options.validate()?;
        self.thumbnails.reconfigure(
            options.thumbnail_width,
            options.thumbnail_height,
            options.thumbnail_scale,
        );
        self.gesture.set_threshold(options.drag_threshold);
        self.options = options;
        Ok(())
    }

    // ---- Loading ----

    /// Load the caller's file list, one descriptor per page in file order.
    ///
    /// Unreadable files are skipped and reported; the rest still load.
    pub fn seed<P: AsRef<Path>>(&mut self, files: &[P]) -> Result<LoadReport> {
        let end = self.sequence.len();
        self.insert_sources(end, files)
    }

    /// Insert the pages contributed by `path` contiguously from `position`.
    ///
    /// A PDF contributes every page in its own order, an image contributes
    /// one page. Returns the number of descriptors inserted.
    pub fn insert_source(&mut self, position: usize, path: impl AsRef<Path>) -> Result<usize> {
        self.ensure_idle()?;
        let path = path.as_ref();
        let len = self.sequence.len();
        if position > len {
            return Err(ComposeError::IndexOutOfRange {
                index: position,
                len,
            });
        }

        match SourceKind::from_path(path) {
            Some(SourceKind::Image) => {
                image::image_dimensions(path).map_err(|e| ComposeError::unreadable_image(path, e))?;
                self.sequence
                    .insert(position, PageDescriptor::image(path))?;
                log::info!("Inserted image {} at {}", path.display(), position);
                Ok(1)
            }
            Some(SourceKind::Pdf) => {
                let count = self.documents.open(path)?;
                for page_index in 0..count {
                    self.sequence
                        .insert(position + page_index, PageDescriptor::pdf_page(path, page_index))?;
                    self.documents.retain(path);
                }
                if count == 0 {
                    self.documents.close_unreferenced();
                    log::warn!("{} has no pages", path.display());
                } else {
                    log::info!(
                        "Inserted {} pages from {} at {}",
                        count,
                        path.display(),
                        position
                    );
                }
                Ok(count)
            }
            None => Err(ComposeError::unreadable_document(
                path,
                "unsupported file type",
            )),
        }
    }

    /// Insert several sources one after another starting at `position`
    pub fn insert_sources<P: AsRef<Path>>(
        &mut self,
        position: usize,
        paths: &[P],
    ) -> Result<LoadReport> {
        self.ensure_idle()?;
        let mut report = LoadReport::default();
        let mut cursor = position;

        for path in paths {
            let path = path.as_ref();
            match self.insert_source(cursor, path) {
                Ok(count) => {
                    cursor += count;
                    report.inserted += count;
                }
                Err(ComposeError::IndexOutOfRange { index, len }) => {
                    return Err(ComposeError::IndexOutOfRange { index, len });
                }
                Err(e) => {
                    log::warn!("Skipping {}: {}", path.display(), e);
                    report.skipped.push((path.to_path_buf(), e));
                }
            }
        }
        Ok(report)
    }

    // ---- Structural edits ----

    pub fn remove(&mut self, index: usize) -> Result<PageDescriptor> {
        self.ensure_idle()?;
        let removed = self.sequence.remove(index)?;
        if self.selection == Some(removed.id()) {
            self.selection = None;
        }
        self.forget(&removed);
        Ok(removed)
    }

    /// Delete the selected page once the user has confirmed.
    ///
    /// Without a selection this fails with `InvalidSelection`. An unconfirmed
    /// request leaves everything untouched and returns `None`.
    pub fn delete_selected(&mut self, confirmed: bool) -> Result<Option<PageDescriptor>> {
        self.ensure_idle()?;
        let index = self.selected_index().ok_or(ComposeError::InvalidSelection)?;
        if !confirmed {
            return Ok(None);
        }
        self.remove(index).map(Some)
    }

    pub fn move_page(&mut self, from: usize, to: usize) -> Result<()> {
        self.ensure_idle()?;
        self.sequence.move_to(from, to)
    }

    pub fn move_selected_up(&mut self) -> Result<usize> {
        self.ensure_idle()?;
        let index = self.selected_index().ok_or(ComposeError::InvalidSelection)?;
        self.sequence.move_up(index)
    }

    pub fn move_selected_down(&mut self) -> Result<usize> {
        self.ensure_idle()?;
        let index = self.selected_index().ok_or(ComposeError::InvalidSelection)?;
        self.sequence.move_down(index)
    }

    /// Reverse the page order. The selection is cleared.
    pub fn reverse(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.sequence.reverse();
        self.selection = None;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.sequence.clear();
        self.thumbnails.clear();
        self.documents.clear();
        self.selection = None;
        self.gesture.cancel();
        Ok(())
    }

    pub fn select(&mut self, index: Option<usize>) -> Result<()> {
        self.ensure_idle()?;
        self.selection = match index {
            Some(index) => Some(self.descriptor_id(index)?),
            None => None,
        };
        Ok(())
    }

    // ---- Gestures ----

    pub fn press(&mut self, point: Point, hit: Option<usize>) -> Result<GestureOutcome> {
        self.ensure_idle()?;
        let hit = hit.filter(|&index| index < self.sequence.len());
        let outcome = self.gesture.press(point, hit);
        if let GestureOutcome::Selected(index) = outcome {
            self.selection = Some(self.descriptor_id(index)?);
        }
        Ok(outcome)
    }

    pub fn drag_to(&mut self, point: Point, hit: Option<usize>) -> Result<GestureOutcome> {
        self.ensure_idle()?;
        let hit = hit.filter(|&index| index < self.sequence.len());
        Ok(self.gesture.drag_to(point, hit))
    }

    /// End the gesture. A drop on a different thumbnail moves the dragged
    /// page there and keeps it selected.
    pub fn release(&mut self, point: Point, hit: Option<usize>) -> Result<GestureOutcome> {
        self.ensure_idle()?;
        let hit = hit.filter(|&index| index < self.sequence.len());
        let outcome = self.gesture.release(point, hit);
        match outcome {
            GestureOutcome::Reorder { from, to } => {
                self.sequence.move_to(from, to)?;
                self.selection = Some(self.descriptor_id(to)?);
                log::debug!("Moved page {} to {}", from + 1, to + 1);
            }
            GestureOutcome::Clicked(index) => {
                self.selection = Some(self.descriptor_id(index)?);
            }
            _ => {}
        }
        Ok(outcome)
    }

    pub fn cancel_gesture(&mut self) -> GestureOutcome {
        self.gesture.cancel()
    }

    pub fn visual_state(&self, index: usize) -> ThumbnailVisual {
        self.gesture.visual_state(index).unwrap_or_else(|| {
            if self.selected_index() == Some(index) {
                ThumbnailVisual::Selected
            } else {
                ThumbnailVisual::Normal
            }
        })
    }

    // ---- Thumbnails and layout ----

    /// Preview for the page at `index`, rendered on first use
    pub fn thumbnail_at(&mut self, index: usize) -> Option<&Thumbnail> {
        let descriptor = self.sequence.get(index)?;
        Some(self.thumbnails.get_or_render(descriptor))
    }

    /// Grid geometry for a view `available_width` wide starting at `origin`
    pub fn layout(&self, origin: Point, available_width: f32) -> GridLayout {
        let mut layout = GridLayout::fit(
            origin,
            available_width,
            self.options.thumbnail_width as f32,
            self.options.thumbnail_height as f32,
            self.options.slot_width,
            self.options.grid_spacing,
        );
        if self.options.grid_columns > 0 {
            layout.columns = self.options.grid_columns;
        }
        layout
    }

    // ---- Export ----

    /// Snapshot the sequence for a background export and mark the session busy.
    ///
    /// Call [`finish_export`](Self::finish_export) when the job completes or fails.
    pub fn begin_export(&mut self) -> Result<ExportJob> {
        self.ensure_idle()?;
        if self.sequence.is_empty() {
            return Err(ComposeError::NothingToWrite);
        }
        self.set_busy(true);
        Ok(ExportJob {
            pages: self.sequence.descriptors().to_vec(),
            sources: self.documents.snapshot(),
        })
    }

    pub fn finish_export(&mut self) {
        self.busy = false;
    }

    /// Export on the calling thread
    pub fn export_blocking(
        &mut self,
        output: &Path,
        progress: impl FnMut(Progress),
    ) -> Result<ExportReport> {
        let job = self.begin_export()?;
        let result = export_sequence_blocking(
            &job.pages,
            &job.sources,
            output,
            self.options.image_dpi,
            progress,
        );
        self.finish_export();
        result
    }

    // ---- Internals ----

    fn ensure_idle(&self) -> Result<()> {
        if self.busy {
            Err(ComposeError::Busy)
        } else {
            Ok(())
        }
    }

    fn descriptor_id(&self, index: usize) -> Result<DescriptorId> {
        self.sequence
            .get(index)
            .map(PageDescriptor::id)
            .ok_or(ComposeError::IndexOutOfRange {
                index,
                len: self.sequence.len(),
            })
    }

    /// Drop cached state for a descriptor that left the sequence
    fn forget(&mut self, descriptor: &PageDescriptor) {
        self.thumbnails.evict(descriptor.id());
        if let PageOrigin::PdfPage { path, .. } = descriptor.origin() {
            self.documents.release(path);
        }
    }
}
