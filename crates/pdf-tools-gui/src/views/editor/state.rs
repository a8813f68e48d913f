use eframe::egui;
use pdf_compose::{
    ComposeError, DescriptorId, EditorOptions, EditorSession, LoadReport, PageRasterizer,
};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use crate::ui_components::file_label;

pub type Session = EditorSession<Box<dyn PageRasterizer>>;

pub struct EditorState {
    pub session: Session,
    /// GPU copies of the session's thumbnails
    pub textures: HashMap<DescriptorId, egui::TextureHandle>,
    /// Insertion point whose file picker is open
    pub pending_insert: Option<usize>,
    pub confirm_delete: bool,
    pub notice: Option<String>,
    /// Options being edited in the settings window
    pub options_draft: Option<EditorOptions>,
}

impl EditorState {
    pub fn new(rasterizer: Box<dyn PageRasterizer>, options: EditorOptions) -> Self {
        Self {
            session: EditorSession::new(rasterizer, options),
            textures: HashMap::new(),
            pending_insert: None,
            confirm_delete: false,
            notice: None,
            options_draft: None,
        }
    }

    /// Surface a failed editor action to the user
    pub fn report(&mut self, error: ComposeError) {
        log::warn!("{}", error);
        self.notice = Some(error.to_string());
    }

    pub fn report_load(&mut self, report: LoadReport) {
        if report.inserted > 0 {
            log::info!("Added {} page(s)", report.inserted);
        }
        if report.is_complete() {
            return;
        }
        let lines: Vec<String> = report
            .skipped
            .iter()
            .map(|(path, error)| format!("{}: {}", file_label(path), error))
            .collect();
        self.notice = Some(format!("Some files were skipped:\n{}", lines.join("\n")));
    }

    /// Add files dropped on the window after the last page
    pub fn insert_dropped(&mut self, paths: Vec<PathBuf>) {
        let end = self.session.len();
        match self.session.insert_sources(end, &paths) {
            Ok(report) => self.report_load(report),
            Err(e) => self.report(e),
        }
    }

    pub fn insert_at(&mut self, position: usize, path: PathBuf) {
        match self.session.insert_source(position, &path) {
            Ok(count) => log::info!("Inserted {} page(s) from {}", count, file_label(&path)),
            Err(e) => self.report(e),
        }
    }

    pub fn apply_options(&mut self, options: EditorOptions) {
        let resized = {
            let current = self.session.options();
            current.thumbnail_width != options.thumbnail_width
                || current.thumbnail_height != options.thumbnail_height
                || current.thumbnail_scale != options.thumbnail_scale
        };
        match self.session.set_options(options) {
            Ok(()) => {
                if resized {
                    self.textures.clear();
                }
            }
            Err(e) => self.report(e),
        }
    }

    /// Drop textures whose page left the sequence
    pub fn prune_textures(&mut self) {
        let live: HashSet<DescriptorId> = self.session.sequence().iter().map(|d| d.id()).collect();
        self.textures.retain(|id, _| live.contains(id));
    }
}
