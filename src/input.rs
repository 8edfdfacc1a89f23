//! Keyboard shortcuts and title bar pointer handling, kept apart from the
//! drawing code so they can be driven from plain egui input.

use crate::controller::OverlayController;
use crate::hotkey::Hotkey;
use crate::settings::Settings;
use crate::visibility::ViewportCtx;
use eframe::egui::{self, Pos2};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Save,
    Open,
    ToggleClickThrough,
    TogglePinned,
}

#[derive(Debug, Clone, Copy)]
pub struct Shortcuts {
    pub save: Hotkey,
    pub open: Hotkey,
    pub click_through: Hotkey,
    pub pin: Hotkey,
}

impl Shortcuts {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            save: settings.save_hotkey(),
            open: settings.open_hotkey(),
            click_through: settings.click_through_hotkey(),
            pin: settings.pin_hotkey(),
        }
    }

    /// Consume this frame's shortcut presses, in a fixed order.
    pub fn take_pressed(&self, input: &mut egui::InputState) -> Vec<ShortcutAction> {
        [
            (self.save, ShortcutAction::Save),
            (self.open, ShortcutAction::Open),
            (self.click_through, ShortcutAction::ToggleClickThrough),
            (self.pin, ShortcutAction::TogglePinned),
        ]
        .into_iter()
        .filter(|(hotkey, _)| hotkey.consume(input))
        .map(|(_, action)| action)
        .collect()
    }
}

/// Prompts the user for a file to open.
pub trait FilePicker {
    fn pick_note_file(&mut self) -> Option<PathBuf>;
}

/// The platform's native open dialog.
#[derive(Debug, Default)]
pub struct NativeFilePicker;

impl FilePicker for NativeFilePicker {
    fn pick_note_file(&mut self) -> Option<PathBuf> {
        let start = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
        rfd::FileDialog::new()
            .set_title("Open notes file")
            .set_directory(start)
            .pick_file()
    }
}

pub fn run_shortcut<C: ViewportCtx>(
    controller: &mut OverlayController<C>,
    action: ShortcutAction,
    picker: &mut dyn FilePicker,
    now: Instant,
) {
    tracing::debug!(?action, "shortcut pressed");
    match action {
        ShortcutAction::Save => {
            controller.save_now();
        }
        ShortcutAction::Open => match picker.pick_note_file() {
            Some(path) => {
                controller.open_file(&path, now);
            }
            None => tracing::debug!("open dialog cancelled"),
        },
        ShortcutAction::ToggleClickThrough => {
            controller.toggle_click_through();
        }
        ShortcutAction::TogglePinned => {
            controller.toggle_pinned();
        }
    }
}

/// Pointer activity on the title bar for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitlePointer {
    pub double_clicked: bool,
    pub drag_started: bool,
    pub dragged: bool,
    pub released: bool,
    /// Pointer position inside the window.
    pub local: Option<Pos2>,
    /// Screen position of the window's inner top-left corner.
    pub origin: Option<Pos2>,
}

impl TitlePointer {
    pub fn from_response(bar: &egui::Response, input: &egui::InputState) -> Self {
        Self {
            double_clicked: bar.double_clicked(),
            drag_started: bar.drag_started(),
            dragged: bar.dragged(),
            released: input.pointer.any_released(),
            local: input.pointer.interact_pos(),
            origin: input.viewport().inner_rect.map(|r| r.min),
        }
    }
}

pub fn handle_title_pointer<C: ViewportCtx>(
    controller: &mut OverlayController<C>,
    pointer: TitlePointer,
) {
    if pointer.double_clicked {
        if let Some(local) = pointer.local {
            controller.double_click(local);
        }
    } else if let (Some(local), Some(origin)) = (pointer.local, pointer.origin) {
        let global = origin + local.to_vec2();
        if pointer.drag_started {
            controller.begin_drag(local, global);
        } else if pointer.dragged && controller.is_dragging() {
            controller.drag_to(global);
        }
    }

    if pointer.released {
        controller.end_drag();
    }
}
