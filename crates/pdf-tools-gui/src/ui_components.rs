use eframe::egui;
use std::path::{Path, PathBuf};

/// Helper for creating labeled horizontal drag values with range and suffix
pub fn labeled_drag_clamped<T>(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut T,
    range: std::ops::RangeInclusive<T>,
    suffix: &str,
) -> bool
where
    T: egui::emath::Numeric,
{
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(egui::DragValue::new(value).range(range).suffix(suffix))
            .changed()
    })
    .inner
}

/// Native file dialogs, one per kind of file the tools read or write
pub mod dialogs {
    use pdf_compose::IMAGE_EXTENSIONS;
    use std::path::PathBuf;

    pub fn pick_pdfs() -> Option<Vec<PathBuf>> {
        rfd::FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .pick_files()
    }

    pub fn pick_pdf() -> Option<PathBuf> {
        rfd::FileDialog::new().add_filter("PDF", &["pdf"]).pick_file()
    }

    pub fn pick_image() -> Option<PathBuf> {
        rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
    }

    pub fn save_pdf(default_name: &str) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .set_file_name(default_name)
            .save_file()
    }

    pub fn pick_options() -> Option<PathBuf> {
        rfd::FileDialog::new()
            .add_filter("Editor options", &["json"])
            .pick_file()
    }

    pub fn save_options() -> Option<PathBuf> {
        rfd::FileDialog::new()
            .add_filter("Editor options", &["json"])
            .set_file_name("editor-options.json")
            .save_file()
    }
}

/// File list editor with reordering and removal
pub struct FileListEditor<'a> {
    files: &'a mut Vec<PathBuf>,
    selected: &'a mut Option<usize>,
    enabled: bool,
}

impl<'a> FileListEditor<'a> {
    pub fn new(files: &'a mut Vec<PathBuf>, selected: &'a mut Option<usize>) -> Self {
        Self {
            files,
            selected,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> bool {
        if self.files.is_empty() {
            ui.label("No files selected");
            return false;
        }

        let mut to_remove = None;
        let mut to_move_up = None;
        let mut to_move_down = None;
        let len = self.files.len();

        ui.add_enabled_ui(self.enabled, |ui| {
            for (idx, path) in self.files.iter().enumerate() {
                ui.horizontal(|ui| {
                    // Reorder buttons
                    if ui.add_enabled(idx > 0, egui::Button::new("▲").small()).clicked() {
                        to_move_up = Some(idx);
                    }
                    if ui
                        .add_enabled(idx + 1 < len, egui::Button::new("▼").small())
                        .clicked()
                    {
                        to_move_down = Some(idx);
                    }

                    let label = format!("{}. {}", idx + 1, file_label(path));
                    if ui
                        .selectable_label(*self.selected == Some(idx), label)
                        .on_hover_text(path.display().to_string())
                        .clicked()
                    {
                        *self.selected = Some(idx);
                    }

                    if ui.small_button("✖").clicked() {
                        to_remove = Some(idx);
                    }
                });
            }
        });

        // Apply changes
        if let Some(idx) = to_move_up {
            self.files.swap(idx, idx - 1);
            *self.selected = Some(idx - 1);
            return true;
        }
        if let Some(idx) = to_move_down {
            self.files.swap(idx, idx + 1);
            *self.selected = Some(idx + 1);
            return true;
        }
        if let Some(idx) = to_remove {
            self.files.remove(idx);
            *self.selected = match *self.selected {
                Some(sel) if sel == idx => None,
                Some(sel) if sel > idx => Some(sel - 1),
                other => other,
            };
            return true;
        }
        false
    }
}

pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
