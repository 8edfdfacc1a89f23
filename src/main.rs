use note_overlay::gui::{NoteOverlayApp, WINDOW_TITLE};
use note_overlay::logging;
use note_overlay::note_store::default_note_path;
use note_overlay::settings::{settings_path, Settings};
use std::path::PathBuf;

use eframe::egui;

fn main() -> anyhow::Result<()> {
    let settings_path = settings_path().to_string_lossy().into_owned();
    let (settings, settings_err) = match Settings::load(&settings_path) {
        Ok(s) => (s, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    logging::init(settings.debug_logging, settings.log_file.as_ref().map(PathBuf::from));
    // A settings file that failed to parse is left alone on exit.
    let writable_settings = match settings_err {
        Some(e) => {
            tracing::warn!("failed to parse {settings_path}; using defaults: {e:#}");
            None
        }
        None => Some(settings_path),
    };

    let (w, h) = settings.window_size.unwrap_or((600, 320));
    let mut viewport = egui::ViewportBuilder::default()
        .with_title(WINDOW_TITLE)
        .with_inner_size([w as f32, h as f32])
        .with_min_inner_size([240.0, 160.0])
        .with_decorations(false)
        .with_transparent(true)
        .with_taskbar(false);
    if let Some((x, y)) = settings.window_pos {
        viewport = viewport.with_position([x as f32, y as f32]);
    }
    if settings.start_pinned {
        viewport = viewport.with_always_on_top();
    }

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let note_path = default_note_path();
    tracing::info!(note = %note_path.display(), "starting overlay");
    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(move |cc| {
            Box::new(NoteOverlayApp::new(
                &cc.egui_ctx,
                settings,
                writable_settings,
                note_path,
            ))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to run overlay: {e}"))
}
