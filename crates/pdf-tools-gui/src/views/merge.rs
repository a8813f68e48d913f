use eframe::egui;
use pdf_async_runtime::{JobKind, PdfCommand};
use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::ui_components::{FileListEditor, dialogs, file_label};

#[derive(Default)]
pub struct MergeState {
    pub files: Vec<PathBuf>,
    pub selected: Option<usize>,
    pub reverse_input: Option<PathBuf>,
}

impl MergeState {
    /// Append PDFs that are not in the list yet
    pub fn add_files(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        for path in paths {
            if !self.files.contains(&path) {
                self.files.push(path);
            }
        }
    }

    /// The list was merged; start over with an empty one
    pub fn merged(&mut self) {
        self.files.clear();
        self.selected = None;
    }
}

/// What the merge view asks the app to do
pub enum MergeAction {
    /// A merge or reverse job was sent to the worker
    Submitted(JobKind),
    /// Open the page editor seeded with these files
    OpenEditor(Vec<PathBuf>),
}

pub fn show_merge(
    ui: &mut egui::Ui,
    state: &mut MergeState,
    command_tx: &mpsc::UnboundedSender<PdfCommand>,
    busy: bool,
    status: &mut String,
) -> Option<MergeAction> {
    let mut action = None;

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.heading("Merge PDFs");
        ui.separator();

        ui.horizontal(|ui| {
            if ui
                .add_enabled(!busy, egui::Button::new("➕ Add PDF Files"))
                .clicked()
            {
                if let Some(paths) = dialogs::pick_pdfs() {
                    state.add_files(paths);
                }
            }
            if ui
                .add_enabled(
                    !busy && state.selected.is_some(),
                    egui::Button::new("➖ Remove"),
                )
                .clicked()
            {
                if let Some(idx) = state.selected.take() {
                    if idx < state.files.len() {
                        state.files.remove(idx);
                    }
                }
            }
            if ui
                .add_enabled(!busy && !state.files.is_empty(), egui::Button::new("Clear"))
                .clicked()
            {
                state.files.clear();
                state.selected = None;
            }
        });

        ui.add_space(5.0);
        FileListEditor::new(&mut state.files, &mut state.selected)
            .enabled(!busy)
            .show(ui);
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            let can_merge = !busy && !state.files.is_empty();
            if ui
                .add_enabled(can_merge, egui::Button::new("📑 Merge"))
                .clicked()
            {
                if let Some(output_path) = dialogs::save_pdf("merged.pdf") {
                    let _ = command_tx.send(PdfCommand::MergeFiles {
                        input_paths: state.files.clone(),
                        output_path,
                    });
                    *status = "Merging PDFs...".to_string();
                    action = Some(MergeAction::Submitted(JobKind::Merge));
                }
            }

            if ui
                .add_enabled(can_merge, egui::Button::new("✏ Edit Pages"))
                .on_hover_text("Reorder, insert and delete individual pages")
                .clicked()
            {
                action = Some(MergeAction::OpenEditor(state.files.clone()));
            }
        });

        ui.add_space(10.0);
        ui.separator();
        ui.heading("Reverse PDF");

        ui.horizontal(|ui| {
            if ui
                .add_enabled(!busy, egui::Button::new("📂 Select PDF"))
                .clicked()
            {
                if let Some(path) = dialogs::pick_pdf() {
                    state.reverse_input = Some(path);
                }
            }
            match &state.reverse_input {
                Some(path) => ui.label(file_label(path)),
                None => ui.weak("No file selected"),
            };
        });

        let can_reverse = !busy && state.reverse_input.is_some();
        if ui
            .add_enabled(can_reverse, egui::Button::new("🔃 Reverse"))
            .clicked()
        {
            if let (Some(input_path), Some(output_path)) =
                (state.reverse_input.clone(), dialogs::save_pdf("reversed.pdf"))
            {
                let _ = command_tx.send(PdfCommand::ReverseFile {
                    input_path,
                    output_path,
                });
                *status = "Reversing PDF...".to_string();
                action = Some(MergeAction::Submitted(JobKind::Reverse));
            }
        }
    });

    action
}
