use eframe::egui;

/// The slice of the toolkit context the overlay needs. Implemented for
/// [`egui::Context`] and for recording mocks in tests.
pub trait ViewportCtx {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand);
    fn request_repaint(&self);
}

impl ViewportCtx for egui::Context {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand) {
        egui::Context::send_viewport_cmd(self, cmd);
    }

    fn request_repaint(&self) {
        egui::Context::request_repaint(self);
    }
}

/// Apply the always-on-top flag to the window.
///
/// Some window managers only pick up a level change once the window is shown
/// again, so the level command is followed by a visibility refresh.
pub fn apply_pinned<C: ViewportCtx>(ctx: &C, pinned: bool) {
    let level = if pinned {
        egui::viewport::WindowLevel::AlwaysOnTop
    } else {
        egui::viewport::WindowLevel::Normal
    };
    tracing::debug!(pinned, "applying window level");
    ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(level));
    ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
    ctx.request_repaint();
}

/// Move the window's outer top-left corner to `pos`.
pub fn move_window<C: ViewportCtx>(ctx: &C, pos: egui::Pos2) {
    ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(pos));
}
