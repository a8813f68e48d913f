use eframe::egui;
use pdf_async_runtime::PdfCommand;
use tokio::sync::mpsc;

use super::EditorState;
use crate::ui_components::{dialogs, labeled_drag_clamped};

pub fn show(
    ctx: &egui::Context,
    state: &mut EditorState,
    command_tx: &mpsc::UnboundedSender<PdfCommand>,
) {
    insert_dialog(ctx, state);
    delete_dialog(ctx, state);
    settings_dialog(ctx, state, command_tx);
    notice_dialog(ctx, state);
}

fn modal<'open>(title: &str) -> egui::Window<'open> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
}

fn insert_dialog(ctx: &egui::Context, state: &mut EditorState) {
    let Some(position) = state.pending_insert else {
        return;
    };

    let mut open = true;
    let mut picked = None;
    let mut cancelled = false;

    modal("Insert Pages").open(&mut open).show(ctx, |ui| {
        if position >= state.session.len() {
            ui.label("Add pages after the last page");
        } else {
            ui.label(format!("Insert before page {}", position + 1));
        }
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.button("🖼 Image…").clicked() {
                picked = Some(dialogs::pick_image());
            }
            if ui.button("📄 PDF…").clicked() {
                picked = Some(dialogs::pick_pdf());
            }
            if ui.button("Cancel").clicked() {
                cancelled = true;
            }
        });
    });

    if let Some(choice) = picked {
        state.pending_insert = None;
        if let Some(path) = choice {
            state.insert_at(position, path);
        }
    } else if cancelled || !open {
        state.pending_insert = None;
    }
}

fn delete_dialog(ctx: &egui::Context, state: &mut EditorState) {
    if !state.confirm_delete {
        return;
    }

    let label = state
        .session
        .selected()
        .map(|descriptor| descriptor.origin().label())
        .unwrap_or_default();
    let mut confirmed = false;
    let mut dismissed = false;

    modal("Delete Page").show(ctx, |ui| {
        ui.label(format!("Remove {} from the document?", label));
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.button("Delete").clicked() {
                confirmed = true;
            }
            if ui.button("Cancel").clicked() {
                dismissed = true;
            }
        });
    });

    if confirmed {
        state.confirm_delete = false;
        match state.session.delete_selected(true) {
            Ok(Some(removed)) => log::info!("Deleted {}", removed.origin().label()),
            Ok(None) => {}
            Err(e) => state.report(e),
        }
    } else if dismissed {
        state.confirm_delete = false;
    }
}

fn settings_dialog(
    ctx: &egui::Context,
    state: &mut EditorState,
    command_tx: &mpsc::UnboundedSender<PdfCommand>,
) {
    let Some(draft) = state.options_draft.as_mut() else {
        return;
    };

    let mut open = true;
    let mut apply = false;

    egui::Window::new("Editor Settings")
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .show(ctx, |ui| {
            ui.label("Thumbnails");
            labeled_drag_clamped(ui, "Width:", &mut draft.thumbnail_width, 60..=600, " px");
            labeled_drag_clamped(ui, "Height:", &mut draft.thumbnail_height, 60..=800, " px");
            labeled_drag_clamped(ui, "Render scale:", &mut draft.thumbnail_scale, 0.05..=2.0, "×");

            ui.add_space(5.0);
            ui.label("Grid");
            labeled_drag_clamped(ui, "Columns (0 = fit):", &mut draft.grid_columns, 0..=30, "");
            labeled_drag_clamped(ui, "Spacing:", &mut draft.grid_spacing, 0.0..=64.0, " px");
            labeled_drag_clamped(ui, "Insert slot width:", &mut draft.slot_width, 4.0..=64.0, " px");
            labeled_drag_clamped(ui, "Drag threshold:", &mut draft.drag_threshold, 0.0..=64.0, " px");

            ui.add_space(5.0);
            ui.label("Export");
            labeled_drag_clamped(ui, "Image resolution:", &mut draft.image_dpi, 36.0..=1200.0, " dpi");

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Apply").clicked() {
                    apply = true;
                }
                if ui.button("Defaults").clicked() {
                    *draft = Default::default();
                }
                if ui.button("📂 Load…").clicked() {
                    if let Some(path) = dialogs::pick_options() {
                        let _ = command_tx.send(PdfCommand::LoadOptions { path });
                    }
                }
                if ui.button("💾 Save…").clicked() {
                    if let Some(path) = dialogs::save_options() {
                        let _ = command_tx.send(PdfCommand::SaveOptions {
                            options: draft.clone(),
                            path,
                        });
                    }
                }
            });
        });

    if apply {
        if let Some(options) = state.options_draft.take() {
            state.apply_options(options);
        }
    } else if !open {
        state.options_draft = None;
    }
}

fn notice_dialog(ctx: &egui::Context, state: &mut EditorState) {
    let Some(message) = state.notice.clone() else {
        return;
    };

    let mut dismissed = false;
    modal("Notice").show(ctx, |ui| {
        ui.label(message);
        ui.add_space(5.0);
        if ui.button("OK").clicked() {
            dismissed = true;
        }
    });

    if dismissed {
        state.notice = None;
    }
}
