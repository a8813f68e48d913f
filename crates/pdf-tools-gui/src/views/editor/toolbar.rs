use eframe::egui;
use pdf_async_runtime::PdfCommand;
use tokio::sync::mpsc;

use super::{EditorAction, EditorState};
use crate::ui_components::dialogs;

pub fn show(
    ui: &mut egui::Ui,
    state: &mut EditorState,
    command_tx: &mpsc::UnboundedSender<PdfCommand>,
    status: &mut String,
) -> Option<EditorAction> {
    let mut action = None;
    let idle = !state.session.is_busy();
    let has_selection = state.session.selected_index().is_some();
    let has_pages = !state.session.is_empty();

    ui.horizontal_wrapped(|ui| {
        if ui
            .add_enabled(idle, egui::Button::new("➕ Add Pages"))
            .on_hover_text("Append a PDF or an image after the last page")
            .clicked()
        {
            state.pending_insert = Some(state.session.len());
        }

        if ui
            .add_enabled(idle && has_selection, egui::Button::new("🗑 Delete"))
            .clicked()
        {
            request_delete(state);
        }

        if ui
            .add_enabled(idle && has_selection, egui::Button::new("▲ Move Up"))
            .clicked()
        {
            if let Err(e) = state.session.move_selected_up() {
                state.report(e);
            }
        }
        if ui
            .add_enabled(idle && has_selection, egui::Button::new("▼ Move Down"))
            .clicked()
        {
            if let Err(e) = state.session.move_selected_down() {
                state.report(e);
            }
        }

        if ui
            .add_enabled(idle && has_pages, egui::Button::new("🔃 Reverse"))
            .clicked()
        {
            if let Err(e) = state.session.reverse() {
                state.report(e);
            }
        }
        if ui
            .add_enabled(idle && has_pages, egui::Button::new("Clear"))
            .clicked()
        {
            if let Err(e) = state.session.clear() {
                state.report(e);
            }
        }

        ui.separator();

        if ui.add_enabled(idle, egui::Button::new("⚙ Settings")).clicked() {
            state.options_draft = Some(state.session.options().clone());
        }

        ui.separator();

        if ui
            .add_enabled(idle && has_pages, egui::Button::new("💾 Save PDF"))
            .clicked()
            && export(state, command_tx, status)
        {
            action = Some(EditorAction::ExportStarted);
        }

        if ui.add_enabled(idle, egui::Button::new("Close")).clicked() {
            action = Some(EditorAction::Close);
        }

        ui.separator();
        ui.label(format!("{} page(s)", state.session.len()));
    });

    // Delete key, unless a text field has focus
    if idle
        && has_selection
        && !ui.ctx().wants_keyboard_input()
        && ui.input(|i| i.key_pressed(egui::Key::Delete))
    {
        request_delete(state);
    }

    action
}

/// Ask for confirmation before the selected page goes away
fn request_delete(state: &mut EditorState) {
    match state.session.delete_selected(false) {
        Ok(_) => state.confirm_delete = true,
        Err(e) => state.report(e),
    }
}

/// Send the sequence to the worker; true once the job is on its way
fn export(
    state: &mut EditorState,
    command_tx: &mpsc::UnboundedSender<PdfCommand>,
    status: &mut String,
) -> bool {
    let job = match state.session.begin_export() {
        Ok(job) => job,
        Err(e) => {
            state.report(e);
            return false;
        }
    };

    let Some(output_path) = dialogs::save_pdf("composed.pdf") else {
        state.session.finish_export();
        return false;
    };

    let image_dpi = state.session.options().image_dpi;
    if command_tx
        .send(PdfCommand::ExportSequence {
            job,
            output_path,
            image_dpi,
        })
        .is_err()
    {
        state.session.finish_export();
        state.notice = Some("Background worker is not running".to_string());
        return false;
    }
    *status = "Saving PDF...".to_string();
    true
}
