use eframe::egui;
use pdf_compose::{GestureOutcome, GestureState, GridLayout, Point, Rect, ThumbnailVisual, insert_slots};

use super::EditorState;

/// New textures uploaded per frame; the rest wait for the next repaint
const MAX_UPLOADS_PER_FRAME: usize = 6;

const DROP_TARGET_COLOR: egui::Color32 = egui::Color32::from_rgb(230, 140, 20);

fn to_point(pos: egui::Pos2) -> Point {
    Point::new(pos.x, pos.y)
}

fn to_rect(rect: Rect) -> egui::Rect {
    egui::Rect::from_min_max(
        egui::pos2(rect.min.x, rect.min.y),
        egui::pos2(rect.max.x, rect.max.y),
    )
}

pub fn show(ui: &mut egui::Ui, state: &mut EditorState) {
    let len = state.session.len();
    let available_width = ui.available_width();

    let sizing = state.session.layout(Point::default(), available_width);
    let (width, height) = sizing.total_size(len);
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(width.max(available_width), height),
        egui::Sense::click_and_drag(),
    );
    let layout = state.session.layout(to_point(rect.min), available_width);

    handle_pointer(ui, &response, &layout, state);
    paint(ui, rect, &layout, state);

    if state.session.gesture().is_active() {
        ui.ctx().request_repaint();
    }
}

fn handle_pointer(
    ui: &egui::Ui,
    response: &egui::Response,
    layout: &GridLayout,
    state: &mut EditorState,
) {
    if state.session.is_busy() || state.pending_insert.is_some() {
        return;
    }

    let (pressed, released, escape, pos) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.key_pressed(egui::Key::Escape),
            i.pointer.interact_pos(),
        )
    });

    if escape && state.session.gesture().is_active() {
        state.session.cancel_gesture();
        return;
    }

    let Some(pos) = pos else { return };
    let point = to_point(pos);
    let len = state.session.len();
    let hit = layout.index_at(point, len);
    let steps = pointer_steps(
        pressed && response.hovered(),
        released,
        state.session.gesture().is_active(),
    );

    for step in steps {
        let result = match step {
            PointerStep::Press => {
                if let Some(position) = layout.slot_at(point, len) {
                    state.pending_insert = Some(position);
                    return;
                }
                state.session.press(point, hit)
            }
            // A press on empty space leaves nothing to release
            PointerStep::Release if !state.session.gesture().is_active() => continue,
            PointerStep::Release => state.session.release(point, hit),
            PointerStep::Move => state.session.drag_to(point, hit),
        };

        match result {
            Ok(GestureOutcome::Reorder { from, to }) => {
                log::info!("Moved page {} to position {}", from + 1, to + 1);
            }
            Ok(_) => {}
            Err(e) => {
                state.report(e);
                return;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PointerStep {
    Press,
    Move,
    Release,
}

/// Gesture steps for one frame, in order.
///
/// A quick click can press and release within a single frame; both edges are
/// delivered so the gesture does not stay pressed.
fn pointer_steps(pressed: bool, released: bool, active: bool) -> Vec<PointerStep> {
    match (pressed, released, active) {
        (true, true, _) => vec![PointerStep::Press, PointerStep::Release],
        (true, false, _) => vec![PointerStep::Press],
        (false, true, true) => vec![PointerStep::Release],
        (false, false, true) => vec![PointerStep::Move],
        (false, _, false) => Vec::new(),
    }
}

fn paint(ui: &egui::Ui, rect: egui::Rect, layout: &GridLayout, state: &mut EditorState) {
    let painter = ui.painter_at(rect);
    let visuals = ui.visuals().clone();
    let len = state.session.len();
    let dragging = state.session.gesture().is_dragging();

    // Insertion slots between thumbnails
    for position in insert_slots(len) {
        let slot = to_rect(layout.slot_rect(position));
        if !dragging && ui.rect_contains_pointer(slot) {
            painter.rect_filled(slot, 2.0, visuals.widgets.hovered.bg_fill);
            painter.text(
                slot.center(),
                egui::Align2::CENTER_CENTER,
                "+",
                egui::FontId::proportional(16.0),
                visuals.strong_text_color(),
            );
        } else {
            painter.line_segment(
                [slot.center_top(), slot.center_bottom()],
                egui::Stroke::new(1.0, visuals.widgets.noninteractive.bg_stroke.color),
            );
        }
    }

    let mut uploads = 0;
    for index in 0..len {
        let cell = to_rect(layout.thumbnail_rect(index));
        match texture_for(ui.ctx(), state, index, &mut uploads) {
            Some(texture) => {
                painter.image(
                    texture.id(),
                    cell,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            None => {
                painter.rect_filled(cell, 2.0, visuals.extreme_bg_color);
                ui.ctx().request_repaint();
            }
        }

        let stroke = match state.session.visual_state(index) {
            ThumbnailVisual::Normal => visuals.widgets.noninteractive.bg_stroke,
            ThumbnailVisual::Selected => egui::Stroke::new(3.0, visuals.selection.bg_fill),
            ThumbnailVisual::DropTarget => egui::Stroke::new(3.0, DROP_TARGET_COLOR),
        };
        painter.rect_stroke(cell, 2.0, stroke, egui::StrokeKind::Outside);

        if let Some(descriptor) = state.session.sequence().get(index) {
            let label = format!("{}  {}", index + 1, descriptor.origin().label());
            let galley = painter.layout(
                label,
                egui::FontId::proportional(11.0),
                egui::Color32::BLACK,
                cell.width() - 8.0,
            );
            let pos = egui::pos2(
                cell.center().x - galley.size().x / 2.0,
                cell.max.y - galley.size().y - 4.0,
            );
            painter.rect_filled(
                egui::Rect::from_min_size(pos, galley.size()).expand(2.0),
                2.0,
                egui::Color32::from_white_alpha(200),
            );
            painter.galley(pos, galley, egui::Color32::BLACK);
        }
    }

    paint_drag_ghost(ui, state);
}

/// Faded copy of the dragged thumbnail following the pointer
fn paint_drag_ghost(ui: &egui::Ui, state: &EditorState) {
    let GestureState::Dragging(drag) = state.session.gesture().state() else {
        return;
    };
    let Some(pos) = ui.input(|i| i.pointer.hover_pos()) else {
        return;
    };
    let Some(texture) = state
        .session
        .sequence()
        .get(drag.origin_index)
        .and_then(|descriptor| state.textures.get(&descriptor.id()))
    else {
        return;
    };

    let options = state.session.options();
    let size = egui::vec2(
        options.thumbnail_width as f32 * 0.5,
        options.thumbnail_height as f32 * 0.5,
    );
    let painter = ui.ctx().layer_painter(egui::LayerId::new(
        egui::Order::Tooltip,
        egui::Id::new("page_drag_ghost"),
    ));
    painter.image(
        texture.id(),
        egui::Rect::from_center_size(pos, size),
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::from_white_alpha(160),
    );
}

fn texture_for(
    ctx: &egui::Context,
    state: &mut EditorState,
    index: usize,
    uploads: &mut usize,
) -> Option<egui::TextureHandle> {
    let id = state.session.sequence().get(index)?.id();
    if let Some(texture) = state.textures.get(&id) {
        return Some(texture.clone());
    }
    if *uploads >= MAX_UPLOADS_PER_FRAME {
        return None;
    }
    *uploads += 1;

    let thumbnail = state.session.thumbnail_at(index)?;
    let image = egui::ColorImage::from_rgba_unmultiplied(
        [thumbnail.width() as usize, thumbnail.height() as usize],
        thumbnail.rgba(),
    );
    let texture = ctx.load_texture(
        format!("thumbnail_{}", id.raw()),
        image,
        egui::TextureOptions::LINEAR,
    );
    state.textures.insert(id, texture.clone());
    Some(texture)
}
