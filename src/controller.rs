use crate::autosave::AutosaveTimer;
use crate::clipboard::{ClipboardWriter, SystemClipboard};
use crate::drag::{in_title_region, DragState};
use crate::note_store::{load_note, save_note};
use crate::visibility::{apply_pinned, move_window, ViewportCtx};
use crate::window_style::{ClickThroughSupport, NoopWindowStyle, WindowStyleController};
use chrono::Local;
use eframe::egui::{pos2, Pos2};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowState {
    pub position: Pos2,
    pub pinned: bool,
    pub click_through: bool,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            position: pos2(50.0, 50.0),
            pinned: true,
            click_through: false,
        }
    }
}

/// Owns the note buffer, window flags and the autosave timer.
///
/// All methods run on the UI thread. Failures are logged and surfaced through
/// [`OverlayController::status`]; none of them are fatal and the buffer is
/// never discarded because a write failed.
pub struct OverlayController<C: ViewportCtx> {
    ctx: C,
    buffer: String,
    note_path: PathBuf,
    state: WindowState,
    autosave: AutosaveTimer,
    drag: DragState,
    style: Box<dyn WindowStyleController>,
    clipboard: Box<dyn ClipboardWriter>,
    status: Option<String>,
}

impl<C: ViewportCtx> OverlayController<C> {
    /// Create the controller and load the note at `note_path` if it exists.
    pub fn new(ctx: C, note_path: PathBuf, state: WindowState, autosave_delay: Duration) -> Self {
        let mut controller = Self {
            ctx,
            buffer: String::new(),
            note_path,
            state,
            autosave: AutosaveTimer::new(autosave_delay),
            drag: DragState::default(),
            style: Box::new(NoopWindowStyle),
            clipboard: Box::new(SystemClipboard::default()),
            status: None,
        };
        let path = controller.note_path.clone();
        controller.load_from(&path);
        controller
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardWriter>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn set_style_controller(&mut self, style: Box<dyn WindowStyleController>) {
        tracing::debug!(support = ?style.support(), "click-through backend selected");
        self.style = style;
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Direct access for the text widget. Call
    /// [`OverlayController::on_text_changed`] after it edits the buffer.
    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.buffer
    }

    pub fn note_path(&self) -> &Path {
        &self.note_path
    }

    pub fn state(&self) -> &WindowState {
        &self.state
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn click_through_support(&self) -> ClickThroughSupport {
        self.style.support()
    }

    pub fn has_pending_save(&self) -> bool {
        self.autosave.is_pending()
    }

    /// Replace the whole buffer as if the user typed it.
    pub fn set_text(&mut self, text: &str, now: Instant) {
        self.buffer.clear();
        self.buffer.push_str(text);
        self.on_text_changed(now);
    }

    pub fn on_text_changed(&mut self, now: Instant) {
        self.autosave.restart(now);
    }

    /// Flush the buffer if the autosave timer has expired. Returns `true` if
    /// the timer fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.autosave.poll(now) {
            return false;
        }
        tracing::debug!("autosave timer fired");
        self.flush();
        true
    }

    /// How long until the UI needs to wake up for the next autosave.
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        self.autosave.remaining(now)
    }

    /// Write immediately, bypassing the debounce timer.
    pub fn save_now(&mut self) -> bool {
        self.autosave.cancel();
        self.flush()
    }

    fn flush(&mut self) -> bool {
        // Saves always target the default note, even after another file was
        // opened.
        match save_note(&self.note_path, &self.buffer) {
            Ok(()) => {
                tracing::debug!(path = %self.note_path.display(), bytes = self.buffer.len(), "note saved");
                self.status = Some(format!("Saved {}", Local::now().format("%H:%M:%S")));
                true
            }
            Err(e) => {
                tracing::error!("save failed: {e:#}");
                self.status = Some(format!("Save failed: {e}"));
                false
            }
        }
    }

    fn load_from(&mut self, path: &Path) -> bool {
        match load_note(path) {
            Ok(Some(text)) => {
                tracing::info!(path = %path.display(), "loaded note");
                self.buffer = text;
                true
            }
            Ok(None) => {
                tracing::debug!(path = %path.display(), "no note file yet");
                false
            }
            Err(e) => {
                tracing::error!("failed to load notes: {e:#}");
                self.status = Some(format!("Load failed: {e}"));
                false
            }
        }
    }

    /// Replace the buffer with the contents of `path` and schedule an
    /// autosave, which writes the imported text to the default note. On
    /// failure the buffer is left untouched.
    pub fn open_file(&mut self, path: &Path, now: Instant) -> bool {
        let opened = self.load_from(path);
        if opened {
            self.on_text_changed(now);
            self.status = Some(format!("Opened {}", path.display()));
        }
        opened
    }

    pub fn toggle_pinned(&mut self) -> bool {
        self.state.pinned = !self.state.pinned;
        apply_pinned(&self.ctx, self.state.pinned);
        // Changing the window level rewrites the window's extended style,
        // which drops click-through unless it is requested again.
        if self.state.click_through {
            self.apply_click_through();
        }
        tracing::info!(pinned = self.state.pinned, "pinned toggled");
        self.state.pinned
    }

    /// Flip click-through. The flag is flipped even when the platform can't
    /// honour it so the toggle stays a plain two-state switch.
    pub fn toggle_click_through(&mut self) -> bool {
        self.state.click_through = !self.state.click_through;
        let enabled = self.state.click_through;
        if self.style.support() == ClickThroughSupport::Unsupported {
            tracing::info!(enabled, "click-through not supported on this platform");
        }
        if self.apply_click_through() {
            tracing::info!(enabled, "click-through toggled");
        }
        enabled
    }

    fn apply_click_through(&mut self) -> bool {
        match self.style.set_click_through(self.state.click_through) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("failed to apply click-through: {e:#}");
                self.status = Some(format!("Click-through failed: {e}"));
                false
            }
        }
    }

    pub fn pin_label(&self) -> &'static str {
        if self.state.pinned {
            "Pinned"
        } else {
            "Unpinned"
        }
    }

    pub fn click_through_label(&self) -> &'static str {
        if self.state.click_through {
            "Click-through (ON)"
        } else {
            "Click-through"
        }
    }

    /// Keep the stored position in sync with where the window actually is.
    pub fn sync_position(&mut self, position: Pos2) {
        if !self.drag.is_dragging() {
            self.state.position = position;
        }
    }

    pub fn begin_drag(&mut self, local: Pos2, global: Pos2) -> bool {
        self.drag.begin(local, global, self.state.position)
    }

    pub fn drag_to(&mut self, global: Pos2) -> Option<Pos2> {
        let pos = self.drag.drag_to(global)?;
        if pos != self.state.position {
            self.state.position = pos;
            move_window(&self.ctx, pos);
        }
        Some(pos)
    }

    pub fn end_drag(&mut self) {
        self.drag.end();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Double-click in the title strip toggles pinned.
    pub fn double_click(&mut self, local: Pos2) -> bool {
        if !in_title_region(local.y) {
            return false;
        }
        self.drag.end();
        self.toggle_pinned();
        true
    }

    pub fn copy(&mut self) -> bool {
        match self.clipboard.set_text(&self.buffer) {
            Ok(()) => {
                self.status = Some("Copied".into());
                true
            }
            Err(e) => {
                tracing::warn!("copy failed: {e:#}");
                self.status = Some(format!("Copy failed: {e}"));
                false
            }
        }
    }

    pub fn clear(&mut self, now: Instant) {
        self.set_text("", now);
    }

    /// Flush a pending autosave when the window is going away.
    pub fn shutdown(&mut self, save_pending: bool) {
        if save_pending && self.autosave.is_pending() {
            tracing::info!("saving pending changes before exit");
            self.save_now();
        }
        self.autosave.cancel();
    }
}
