use eframe::egui::{self, pos2};
use note_overlay::autosave::DEFAULT_AUTOSAVE_DELAY;
use note_overlay::controller::{OverlayController, WindowState};
use tempfile::tempdir;

use mock_ctx::MockCtx;

fn new_controller(ctx: &MockCtx) -> (OverlayController<MockCtx>, tempfile::TempDir) {
    let dir = tempdir().unwrap();
    let state = WindowState {
        position: pos2(100.0, 100.0),
        ..WindowState::default()
    };
    let controller = OverlayController::new(
        ctx.clone(),
        dir.path().join("notes.txt"),
        state,
        DEFAULT_AUTOSAVE_DELAY,
    );
    (controller, dir)
}

#[test]
fn dragging_title_moves_window_by_pointer_delta() {
    let ctx = MockCtx::default();
    let (mut controller, _dir) = new_controller(&ctx);

    assert!(controller.begin_drag(pos2(40.0, 20.0), pos2(140.0, 120.0)));
    assert_eq!(controller.drag_to(pos2(190.0, 150.0)), Some(pos2(150.0, 130.0)));
    assert_eq!(controller.state().position, pos2(150.0, 130.0));

    // position reports from the window are ignored mid-drag
    controller.sync_position(pos2(0.0, 0.0));
    assert_eq!(controller.state().position, pos2(150.0, 130.0));

    controller.end_drag();
    assert!(!controller.is_dragging());
    assert_eq!(controller.drag_to(pos2(500.0, 500.0)), None);

    let cmds = ctx.commands.lock().unwrap();
    assert_eq!(cmds.len(), 1);
    match cmds[0] {
        egui::ViewportCommand::OuterPosition(p) => {
            assert_eq!(p.x, 150.0);
            assert_eq!(p.y, 130.0);
        }
        _ => panic!("unexpected command"),
    }
}

#[test]
fn press_outside_title_does_not_drag() {
    let ctx = MockCtx::default();
    let (mut controller, _dir) = new_controller(&ctx);
    assert!(!controller.begin_drag(pos2(40.0, 120.0), pos2(140.0, 220.0)));
    assert_eq!(controller.drag_to(pos2(300.0, 300.0)), None);
    assert!(ctx.commands.lock().unwrap().is_empty());
}

#[test]
fn double_click_on_title_toggles_pinned() {
    let ctx = MockCtx::default();
    let (mut controller, _dir) = new_controller(&ctx);
    assert!(controller.double_click(pos2(10.0, 30.0)));
    assert!(!controller.state().pinned);
    assert!(!controller.double_click(pos2(10.0, 200.0)));
    assert!(!controller.state().pinned);
}

#[test]
fn sync_position_follows_window_when_idle() {
    let ctx = MockCtx::default();
    let (mut controller, _dir) = new_controller(&ctx);
    controller.sync_position(pos2(320.0, 40.0));
    assert_eq!(controller.state().position, pos2(320.0, 40.0));
}
