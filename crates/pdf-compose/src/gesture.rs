//! Pointer gestures over the thumbnail grid
//!
//! The controller is a small state machine driven by press, move and release
//! events. It knows nothing about any windowing toolkit: callers translate
//! their pointer events into [`Point`]s and resolve which thumbnail, if any,
//! lies under the pointer (see [`GridLayout::index_at`]).

/// Displacement along either axis that turns a press into a drag
pub const DEFAULT_DRAG_THRESHOLD: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn from_min_size(min: Point, width: f32, height: f32) -> Self {
        Self {
            min,
            max: Point::new(min.x + width, min.y + height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }
}

/// Transient record of an active press or drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub origin_index: usize,
    pub pointer_start: Point,
    pub current_target: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Pointer is down on a thumbnail but has not moved past the threshold
    Pressed(DragState),
    Dragging(DragState),
}

/// What a gesture event means for the page sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Nothing changed
    None,
    /// A thumbnail was pressed and becomes the selection
    Selected(usize),
    /// The press turned into a drag
    DragStarted(usize),
    /// The drop target under the pointer changed
    TargetChanged(Option<usize>),
    /// Press and release without a drag: selection only
    Clicked(usize),
    /// Drop over a different thumbnail: move `from` so it lands at `to`
    Reorder { from: usize, to: usize },
    /// Drag ended without a valid target, or was cancelled
    Cancelled,
}

/// How a thumbnail should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailVisual {
    Normal,
    Selected,
    DropTarget,
}

#[derive(Debug, Clone)]
pub struct GestureController {
    state: GestureState,
    threshold: f32,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl GestureController {
    pub fn new(threshold: f32) -> Self {
        Self {
            state: GestureState::Idle,
            threshold,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, GestureState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    /// Pointer went down. `hit` is the thumbnail under the pointer.
    pub fn press(&mut self, point: Point, hit: Option<usize>) -> GestureOutcome {
        match hit {
            Some(index) => {
                self.state = GestureState::Pressed(DragState {
                    origin_index: index,
                    pointer_start: point,
                    current_target: Some(index),
                });
                GestureOutcome::Selected(index)
            }
            None => {
                self.state = GestureState::Idle;
                GestureOutcome::None
            }
        }
    }

    /// Pointer moved while down
    pub fn drag_to(&mut self, point: Point, hit: Option<usize>) -> GestureOutcome {
        match self.state {
            GestureState::Idle => GestureOutcome::None,
            GestureState::Pressed(mut drag) => {
                let dx = (point.x - drag.pointer_start.x).abs();
                let dy = (point.y - drag.pointer_start.y).abs();
                if dx > self.threshold || dy > self.threshold {
                    drag.current_target = hit;
                    self.state = GestureState::Dragging(drag);
                    GestureOutcome::DragStarted(drag.origin_index)
                } else {
                    GestureOutcome::None
                }
            }
            GestureState::Dragging(mut drag) => {
                if drag.current_target == hit {
                    return GestureOutcome::None;
                }
                drag.current_target = hit;
                self.state = GestureState::Dragging(drag);
                GestureOutcome::TargetChanged(hit)
            }
        }
    }

    /// Pointer went up; the gesture ends and the controller returns to idle
    pub fn release(&mut self, point: Point, hit: Option<usize>) -> GestureOutcome {
        // A release can arrive without a final move event
        if matches!(self.state, GestureState::Pressed(_) | GestureState::Dragging(_)) {
            self.drag_to(point, hit);
        }

        match std::mem::take(&mut self.state) {
            GestureState::Idle => GestureOutcome::None,
            GestureState::Pressed(drag) => GestureOutcome::Clicked(drag.origin_index),
            GestureState::Dragging(drag) => match drag.current_target {
                Some(target) if target != drag.origin_index => GestureOutcome::Reorder {
                    from: drag.origin_index,
                    to: target,
                },
                _ => GestureOutcome::Cancelled,
            },
        }
    }

    pub fn cancel(&mut self) -> GestureOutcome {
        match std::mem::take(&mut self.state) {
            GestureState::Idle => GestureOutcome::None,
            _ => GestureOutcome::Cancelled,
        }
    }

    /// Visual state during a gesture; `None` when no gesture is active
    pub fn visual_state(&self, index: usize) -> Option<ThumbnailVisual> {
        let drag = match self.state {
            GestureState::Idle => return None,
            GestureState::Pressed(drag) | GestureState::Dragging(drag) => drag,
        };
        Some(if index == drag.origin_index {
            ThumbnailVisual::Selected
        } else if self.is_dragging() && drag.current_target == Some(index) {
            ThumbnailVisual::DropTarget
        } else {
            ThumbnailVisual::Normal
        })
    }
}

// =============================================================================
// Grid Layout
// =============================================================================

/// Geometry of the thumbnail grid.
///
/// Every cell is an insertion slot stripe followed by the thumbnail, so slot
/// `i` sits just before thumbnail `i` and slot `len` follows the last one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub origin: Point,
    pub columns: usize,
    pub thumbnail_width: f32,
    pub thumbnail_height: f32,
    pub slot_width: f32,
    pub spacing: f32,
}

impl GridLayout {
    /// Fit as many columns as `available_width` allows (at least one)
    pub fn fit(
        origin: Point,
        available_width: f32,
        thumbnail_width: f32,
        thumbnail_height: f32,
        slot_width: f32,
        spacing: f32,
    ) -> Self {
        let cell_width = slot_width + thumbnail_width + spacing;
        let columns = if cell_width > 0.0 {
            ((available_width - slot_width) / cell_width).floor().max(1.0) as usize
        } else {
            1
        };
        Self {
            origin,
            columns,
            thumbnail_width,
            thumbnail_height,
            slot_width,
            spacing,
        }
    }

    fn cell_width(&self) -> f32 {
        self.slot_width + self.thumbnail_width + self.spacing
    }

    fn row_height(&self) -> f32 {
        self.thumbnail_height + self.spacing
    }

    fn cell_origin(&self, position: usize) -> Point {
        let columns = self.columns.max(1);
        let col = position % columns;
        let row = position / columns;
        Point::new(
            self.origin.x + col as f32 * self.cell_width(),
            self.origin.y + row as f32 * self.row_height(),
        )
    }

    pub fn rows(&self, len: usize) -> usize {
        // Slot `len` needs a cell of its own
        (len + 1).div_ceil(self.columns.max(1))
    }

    pub fn total_size(&self, len: usize) -> (f32, f32) {
        let columns = self.columns.max(1).min(len + 1);
        (
            columns as f32 * self.cell_width() + self.slot_width,
            self.rows(len) as f32 * self.row_height(),
        )
    }

    pub fn thumbnail_rect(&self, index: usize) -> Rect {
        let cell = self.cell_origin(index);
        Rect::from_min_size(
            Point::new(cell.x + self.slot_width, cell.y),
            self.thumbnail_width,
            self.thumbnail_height,
        )
    }

    pub fn slot_rect(&self, position: usize) -> Rect {
        let cell = self.cell_origin(position);
        Rect::from_min_size(cell, self.slot_width, self.thumbnail_height)
    }

    /// Thumbnail under `point` among `len` thumbnails
    pub fn index_at(&self, point: Point, len: usize) -> Option<usize> {
        self.cell_at(point, len + 1)
            .filter(|&index| index < len && self.thumbnail_rect(index).contains(point))
    }

    /// Insertion slot under `point`, in `0..=len`
    pub fn slot_at(&self, point: Point, len: usize) -> Option<usize> {
        self.cell_at(point, len + 1)
            .filter(|&position| self.slot_rect(position).contains(point))
    }

    fn cell_at(&self, point: Point, cells: usize) -> Option<usize> {
        let x = point.x - self.origin.x;
        let y = point.y - self.origin.y;
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / self.cell_width()) as usize;
        let row = (y / self.row_height()) as usize;
        if col >= self.columns.max(1) {
            return None;
        }
        let index = row * self.columns.max(1) + col;
        (index < cells).then_some(index)
    }
}

/// Insertion positions offered around `len` thumbnails: both ends and every gap
pub fn insert_slots(len: usize) -> std::ops::RangeInclusive<usize> {
    0..=len
}
