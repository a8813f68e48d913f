mod dialogs;
mod grid;
mod state;
mod toolbar;

pub use state::EditorState;

use eframe::egui;
use pdf_async_runtime::PdfCommand;
use tokio::sync::mpsc;

/// What the editor asks the app to do
pub enum EditorAction {
    Close,
    /// An export was sent to the worker
    ExportStarted,
}

pub fn show_editor(
    ui: &mut egui::Ui,
    state: &mut EditorState,
    command_tx: &mpsc::UnboundedSender<PdfCommand>,
    status: &mut String,
) -> Option<EditorAction> {
    let mut action = None;

    egui::TopBottomPanel::top("editor_toolbar").show_inside(ui, |ui| {
        ui.add_space(4.0);
        action = toolbar::show(ui, state, command_tx, status);
        ui.add_space(4.0);
    });

    egui::CentralPanel::default().show_inside(ui, |ui| {
        if state.session.is_empty() {
            ui.weak("No pages yet. Click + or drop PDF and image files here.");
            ui.add_space(5.0);
        }
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| grid::show(ui, state));
    });

    dialogs::show(ui.ctx(), state, command_tx);
    state.prune_textures();

    action
}
