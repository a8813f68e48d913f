use eframe::egui;
use pdf_async_runtime::{JobKind, PdfCommand, PdfUpdate};
use pdf_compose::EditorOptions;
use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::jobs::JobTracker;
use crate::logger::AppLogger;
use crate::rasterizer::create_rasterizer;
use crate::views::{
    EditorAction, EditorState, MergeAction, MergeState, show_editor, show_merge,
};

#[derive(Default, PartialEq)]
enum Mode {
    #[default]
    Merge,
    Editor,
}

#[derive(Clone)]
struct ProgressState {
    operation: String,
    current: usize,
    total: usize,
}

pub struct PdfToolsApp {
    mode: Mode,
    merge_state: MergeState,
    editor: Option<EditorState>,
    /// Options the next editor session starts with
    editor_options: EditorOptions,
    status: String,
    /// Merge, reverse or export in flight; gates both views
    jobs: JobTracker,
    /// Worker failure waiting to be acknowledged
    error_notice: Option<String>,

    // Async infrastructure
    command_tx: mpsc::UnboundedSender<PdfCommand>,
    update_rx: mpsc::UnboundedReceiver<PdfUpdate>,

    // Progress tracking
    progress: Option<ProgressState>,

    logger: AppLogger,
    show_log: bool,

    _tokio_handle: tokio::runtime::Handle,
}

impl PdfToolsApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        logger: AppLogger,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        // Spawn worker task
        tokio_handle.spawn(crate::worker::worker_task(command_rx, update_tx));

        Self {
            mode: Mode::default(),
            merge_state: MergeState::default(),
            editor: None,
            editor_options: EditorOptions::default(),
            status: String::new(),
            jobs: JobTracker::default(),
            error_notice: None,
            command_tx,
            update_rx,
            progress: None,
            logger,
            show_log: false,
            _tokio_handle: tokio_handle,
        }
    }

    fn open_editor(&mut self, files: Vec<PathBuf>) {
        let mut editor = EditorState::new(create_rasterizer(), self.editor_options.clone());
        match editor.session.seed(&files) {
            Ok(report) => editor.report_load(report),
            Err(e) => editor.report(e),
        }
        self.status = format!("Editing {} page(s)", editor.session.len());
        self.editor = Some(editor);
        self.mode = Mode::Editor;
    }

    fn close_editor(&mut self) {
        self.editor = None;
        self.mode = Mode::Merge;
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let paths: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if paths.is_empty() {
            return;
        }
        if self.jobs.is_running() {
            log::debug!("Ignoring {} dropped file(s) while a job runs", paths.len());
            return;
        }

        match (&self.mode, &mut self.editor) {
            (Mode::Editor, Some(editor)) => editor.insert_dropped(paths),
            _ => {
                let pdfs = paths.into_iter().filter(|path| {
                    path.extension()
                        .and_then(|ext| ext.to_str())
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
                });
                self.merge_state.add_files(pdfs);
            }
        }
    }

    fn handle_update(&mut self, ctx: &egui::Context, update: PdfUpdate) {
        match update {
            PdfUpdate::Progress {
                operation,
                current,
                total,
            } => {
                self.progress = Some(ProgressState {
                    operation,
                    current,
                    total,
                });
                ctx.request_repaint(); // Request another frame
            }
            PdfUpdate::MergeComplete { path, page_count } => {
                self.status = format!("Merged {} pages → {}", page_count, path.display());
                self.merge_state.merged();
                self.finish_job(JobKind::Merge);
            }
            PdfUpdate::ReverseComplete { path, page_count } => {
                self.status = format!("Reversed {} pages → {}", page_count, path.display());
                self.finish_job(JobKind::Reverse);
            }
            PdfUpdate::ExportComplete { path, page_count } => {
                self.status = format!("Saved {} pages → {}", page_count, path.display());
                self.finish_job(JobKind::Export);
                self.close_editor();
            }
            PdfUpdate::OptionsLoaded { options } => {
                self.status = "Loaded editor settings".to_string();
                self.editor_options = options.clone();
                if let Some(editor) = &mut self.editor {
                    if let Some(draft) = &mut editor.options_draft {
                        *draft = options.clone();
                    }
                    editor.apply_options(options);
                }
            }
            PdfUpdate::OptionsSaved { path } => {
                self.status = format!("Saved editor settings → {}", path.display());
            }
            PdfUpdate::Error { job, message } => {
                self.status = format!("Error: {message}");
                let in_editor = match job {
                    JobKind::Export => true,
                    JobKind::Options => self.mode == Mode::Editor,
                    JobKind::Merge | JobKind::Reverse => false,
                };
                match &mut self.editor {
                    Some(editor) if in_editor => editor.notice = Some(message),
                    _ => self.error_notice = Some(message),
                }
                self.finish_job(job);
            }
        }
    }

    fn start_job(&mut self, kind: JobKind) {
        if !self.jobs.start(kind) {
            log::warn!("{:?} requested while {:?} is running", kind, self.jobs.running());
            return;
        }
        // The editor must not change while a merge or reverse reads from disk
        if let Some(editor) = &mut self.editor {
            editor.session.set_busy(true);
        }
    }

    /// Release the window if `kind` is the job it was waiting on
    fn finish_job(&mut self, kind: JobKind) {
        if !self.jobs.finish(kind) {
            return;
        }
        self.progress = None;
        if let Some(editor) = &mut self.editor {
            editor.session.set_busy(false);
        }
    }

    fn show_error_notice(&mut self, ctx: &egui::Context) {
        let Some(message) = &self.error_notice else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(5.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.error_notice = None;
        }
    }

    fn show_log_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("log_panel")
            .resizable(true)
            .default_height(140.0)
            .show_animated(ctx, self.show_log, |ui| {
                ui.horizontal(|ui| {
                    ui.strong("Log");
                    if ui.small_button("Clear").clicked() {
                        self.logger.clear();
                    }
                });
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for entry in self.logger.get_entries() {
                            let text = egui::RichText::new(entry.summary()).monospace();
                            let text = match entry.level {
                                log::Level::Error => text.color(ui.visuals().error_fg_color),
                                log::Level::Warn => text.color(ui.visuals().warn_fg_color),
                                _ => text,
                            };
                            ui.label(text);
                        }
                    });
            });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.toggle_value(&mut self.show_log, "📜 Log");
                ui.separator();

                // Show progress bar
                if let Some(ref progress) = self.progress {
                    ui.label(&progress.operation);
                    ui.add(
                        egui::ProgressBar::new(
                            progress.current as f32 / progress.total.max(1) as f32,
                        )
                        .desired_width(200.0)
                        .show_percentage(),
                    );
                    ctx.request_repaint(); // Keep updating during operations
                } else if !self.status.is_empty() {
                    ui.label(&self.status);
                } else if let Some(message) = self.logger.latest_message() {
                    ui.weak(message);
                }
            });
        });
    }
}

impl eframe::App for PdfToolsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        // Process all pending updates from worker
        while let Ok(update) = self.update_rx.try_recv() {
            self.handle_update(ctx, update);
        }

        let job_running = self.jobs.is_running();

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.add_enabled_ui(!job_running, |ui| {
                    ui.selectable_value(&mut self.mode, Mode::Merge, "📑 Merge");
                    if self.editor.is_some() {
                        ui.selectable_value(&mut self.mode, Mode::Editor, "✏ Page Editor");
                    }
                });
            });
        });

        self.show_status_bar(ctx);
        self.show_log_panel(ctx);

        let mut merge_action = None;
        let mut editor_action = None;
        egui::CentralPanel::default().show(ctx, |ui| match (&self.mode, &mut self.editor) {
            (Mode::Editor, Some(editor)) => {
                editor_action = show_editor(ui, editor, &self.command_tx, &mut self.status);
            }
            _ => {
                merge_action = show_merge(
                    ui,
                    &mut self.merge_state,
                    &self.command_tx,
                    job_running,
                    &mut self.status,
                );
            }
        });

        self.show_error_notice(ctx);

        match merge_action {
            Some(MergeAction::Submitted(kind)) => self.start_job(kind),
            Some(MergeAction::OpenEditor(files)) => self.open_editor(files),
            None => {}
        }
        match editor_action {
            Some(EditorAction::Close) => {
                self.close_editor();
                self.status.clear();
            }
            Some(EditorAction::ExportStarted) => self.start_job(JobKind::Export),
            None => {}
        }
    }
}
