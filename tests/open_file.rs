use note_overlay::autosave::DEFAULT_AUTOSAVE_DELAY;
use note_overlay::controller::{OverlayController, WindowState};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tempfile::tempdir;

use mock_ctx::MockCtx;

fn new_controller(path: PathBuf) -> OverlayController<MockCtx> {
    OverlayController::new(
        MockCtx::default(),
        path,
        WindowState::default(),
        DEFAULT_AUTOSAVE_DELAY,
    )
}

#[test]
fn starts_empty_without_note_file() {
    let dir = tempdir().unwrap();
    let controller = new_controller(dir.path().join("missing.txt"));
    assert_eq!(controller.buffer(), "");
    assert!(controller.status().is_none());
}

#[test]
fn loads_existing_note_on_startup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "line one\nline two").unwrap();
    let controller = new_controller(path);
    assert_eq!(controller.buffer(), "line one\nline two");
    assert!(!controller.has_pending_save());
}

#[test]
fn unreadable_note_starts_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, [0xc3, 0x28]).unwrap();
    let controller = new_controller(path);
    assert_eq!(controller.buffer(), "");
    assert!(controller.status().unwrap().starts_with("Load failed"));
}

#[test]
fn open_replaces_buffer() {
    let dir = tempdir().unwrap();
    let other = dir.path().join("other.txt");
    std::fs::write(&other, "from elsewhere").unwrap();

    let mut controller = new_controller(dir.path().join("notes.txt"));
    controller.set_text("typed", Instant::now());
    assert!(controller.open_file(&other, Instant::now()));
    assert_eq!(controller.buffer(), "from elsewhere");
}

#[test]
fn open_missing_file_keeps_buffer() {
    let dir = tempdir().unwrap();
    let mut controller = new_controller(dir.path().join("notes.txt"));
    controller.set_text("keep me", Instant::now());
    assert!(!controller.open_file(&dir.path().join("nope.txt"), Instant::now()));
    assert_eq!(controller.buffer(), "keep me");
}

#[test]
fn open_unreadable_file_keeps_buffer() {
    let dir = tempdir().unwrap();
    let mut controller = new_controller(dir.path().join("notes.txt"));
    controller.set_text("keep me", Instant::now());
    assert!(!controller.open_file(dir.path(), Instant::now()));
    assert_eq!(controller.buffer(), "keep me");
    assert!(controller.status().unwrap().starts_with("Load failed"));
}

#[test]
fn save_after_open_still_targets_default_note() {
    let dir = tempdir().unwrap();
    let default = dir.path().join("notes.txt");
    let other = dir.path().join("other.txt");
    std::fs::write(&other, "opened").unwrap();

    let mut controller = new_controller(default.clone());
    controller.open_file(&other, Instant::now());
    controller.buffer_mut().push_str(" and edited");
    assert!(controller.save_now());

    assert_eq!(controller.note_path(), default.as_path());
    assert_eq!(std::fs::read_to_string(&default).unwrap(), "opened and edited");
    assert_eq!(std::fs::read_to_string(&other).unwrap(), "opened");
}

#[test]
fn opened_text_is_autosaved_to_default_note() {
    let dir = tempdir().unwrap();
    let default = dir.path().join("notes.txt");
    let other = dir.path().join("other.txt");
    std::fs::write(&other, "imported text").unwrap();

    let mut controller = new_controller(default.clone());
    let start = Instant::now();
    assert!(controller.open_file(&other, start));
    assert!(controller.has_pending_save());
    assert!(!default.exists());

    assert!(!controller.tick(start + Duration::from_millis(1999)));
    assert!(controller.tick(start + DEFAULT_AUTOSAVE_DELAY));
    assert_eq!(std::fs::read_to_string(&default).unwrap(), "imported text");
    assert_eq!(std::fs::read_to_string(&other).unwrap(), "imported text");
}

#[test]
fn opened_text_is_flushed_on_exit() {
    let dir = tempdir().unwrap();
    let default = dir.path().join("notes.txt");
    let other = dir.path().join("other.txt");
    std::fs::write(&other, "closing soon").unwrap();

    let mut controller = new_controller(default.clone());
    controller.open_file(&other, Instant::now());
    controller.shutdown(true);
    assert_eq!(std::fs::read_to_string(&default).unwrap(), "closing soon");
}

#[test]
fn failed_open_schedules_nothing() {
    let dir = tempdir().unwrap();
    let mut controller = new_controller(dir.path().join("notes.txt"));
    assert!(!controller.open_file(&dir.path().join("nope.txt"), Instant::now()));
    assert!(!controller.has_pending_save());
}
