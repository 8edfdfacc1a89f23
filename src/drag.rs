use eframe::egui::{Pos2, Vec2};

/// Height of the strip at the top of the window that moves it when dragged.
pub const TITLE_BAR_HEIGHT: f32 = 52.0;

/// Whether a window-local y coordinate falls inside the drag strip.
pub fn in_title_region(local_y: f32) -> bool {
    (0.0..=TITLE_BAR_HEIGHT).contains(&local_y)
}

/// Tracks an in-progress title bar drag.
#[derive(Debug, Default, Clone)]
pub struct DragState {
    offset: Option<Vec2>,
}

impl DragState {
    /// Start dragging if `local` is inside the title strip. `global` is the
    /// pointer in screen coordinates and `window_pos` the window's top-left.
    pub fn begin(&mut self, local: Pos2, global: Pos2, window_pos: Pos2) -> bool {
        if !in_title_region(local.y) {
            return false;
        }
        self.offset = Some(global - window_pos);
        true
    }

    /// New window position for the pointer at `global`, if dragging.
    pub fn drag_to(&self, global: Pos2) -> Option<Pos2> {
        self.offset.map(|offset| global - offset)
    }

    pub fn end(&mut self) {
        self.offset = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.offset.is_some()
    }
}
