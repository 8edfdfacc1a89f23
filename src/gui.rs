use crate::controller::{OverlayController, WindowState};
use crate::drag::TITLE_BAR_HEIGHT;
use crate::input::{
    handle_title_pointer, run_shortcut, FilePicker, NativeFilePicker, Shortcuts, TitlePointer,
};
use crate::settings::Settings;
use crate::window_style;
use eframe::egui;
use std::path::PathBuf;
use std::time::Instant;

pub const WINDOW_TITLE: &str = "Quick Notes";

const OUTER_MARGIN: f32 = 8.0;
const PLACEHOLDER: &str = "Type quick notes...";

pub struct NoteOverlayApp {
    controller: OverlayController<egui::Context>,
    settings: Settings,
    /// `None` when the settings file couldn't be parsed, so it is never
    /// overwritten with defaults.
    settings_path: Option<String>,
    shortcuts: Shortcuts,
    picker: Box<dyn FilePicker>,
    style_ready: bool,
    focus_pending: bool,
}

impl NoteOverlayApp {
    pub fn new(
        ctx: &egui::Context,
        settings: Settings,
        settings_path: Option<String>,
        note_path: PathBuf,
    ) -> Self {
        let position = settings
            .window_pos
            .map(|(x, y)| egui::pos2(x as f32, y as f32))
            .unwrap_or(WindowState::default().position);
        let state = WindowState {
            position,
            pinned: settings.start_pinned,
            click_through: false,
        };
        let controller =
            OverlayController::new(ctx.clone(), note_path, state, settings.autosave_delay());
        apply_theme(ctx);
        Self {
            controller,
            shortcuts: Shortcuts::from_settings(&settings),
            picker: Box::new(NativeFilePicker),
            settings,
            settings_path,
            style_ready: false,
            focus_pending: true,
        }
    }

    pub fn controller(&self) -> &OverlayController<egui::Context> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut OverlayController<egui::Context> {
        &mut self.controller
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let actions = ctx.input_mut(|i| self.shortcuts.take_pressed(i));
        for action in actions {
            run_shortcut(
                &mut self.controller,
                action,
                self.picker.as_mut(),
                Instant::now(),
            );
        }
    }

    /// Remember the window position in the settings file on exit.
    pub fn persist_settings(&mut self) {
        if !self.settings.remember_window_pos {
            return;
        }
        let Some(path) = self.settings_path.as_deref() else {
            tracing::debug!("settings file was not loaded cleanly; leaving it untouched");
            return;
        };
        let pos = self.controller.state().position;
        self.settings.window_pos = Some((pos.x.round() as i32, pos.y.round() as i32));
        if let Err(e) = self.settings.save(path) {
            tracing::warn!("failed to save settings: {e:#}");
        }
    }

    fn title_bar(&mut self, ctx: &egui::Context) {
        let fill = panel_fill(190, 225, 230, self.settings.background_alpha);
        let bar_height = TITLE_BAR_HEIGHT - OUTER_MARGIN;
        egui::TopBottomPanel::top("title_bar")
            .exact_height(bar_height)
            .show_separator_line(false)
            .frame(egui::Frame::none().inner_margin(egui::Margin {
                left: OUTER_MARGIN,
                right: OUTER_MARGIN,
                top: OUTER_MARGIN,
                bottom: 0.0,
            }))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                // Registered before the buttons so they win the hit test.
                let bar = ui.interact(
                    rect,
                    egui::Id::new("title_drag"),
                    egui::Sense::click_and_drag(),
                );
                ui.painter().rect_filled(rect, 10.0, fill);

                ui.horizontal_centered(|ui| {
                    ui.add_space(12.0);
                    ui.add(egui::Label::new(egui::RichText::new(WINDOW_TITLE).strong()).selectable(false));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_space(6.0);
                        if ui.button("Clear").clicked() {
                            self.controller.clear(Instant::now());
                        }
                        if ui.button("Copy").clicked() {
                            self.controller.copy();
                        }
                        let ct = self.controller.state().click_through;
                        if ui
                            .selectable_label(ct, self.controller.click_through_label())
                            .on_hover_text(format!("Toggle with {}", self.shortcuts.click_through))
                            .clicked()
                        {
                            self.controller.toggle_click_through();
                        }
                        let pinned = self.controller.state().pinned;
                        if ui
                            .selectable_label(pinned, self.controller.pin_label())
                            .clicked()
                        {
                            self.controller.toggle_pinned();
                        }
                    });
                });

                let pointer = ctx.input(|i| TitlePointer::from_response(&bar, i));
                handle_title_pointer(&mut self.controller, pointer);
            });
    }

    fn footer(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("footer")
            .show_separator_line(false)
            .frame(egui::Frame::none().inner_margin(egui::Margin {
                left: OUTER_MARGIN + 4.0,
                right: OUTER_MARGIN + 4.0,
                top: 2.0,
                bottom: OUTER_MARGIN,
            }))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "Drag the title bar to move. Double-click title to toggle pinned. {} save.",
                            self.shortcuts.save
                        ))
                        .small()
                        .color(egui::Color32::from_rgb(0xAA, 0xB6, 0xC8)),
                    );
                    if let Some(status) = self.controller.status() {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(egui::RichText::new(status).small());
                        });
                    }
                });
            });
    }

    fn editor(&mut self, ctx: &egui::Context) {
        let fill = panel_fill(226, 236, 233, self.settings.background_alpha);
        egui::CentralPanel::default()
            .frame(egui::Frame::none().inner_margin(egui::Margin::symmetric(OUTER_MARGIN, 6.0)))
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(fill)
                    .rounding(10.0)
                    .inner_margin(egui::Margin::same(10.0))
                    .show(ui, |ui| {
                        egui::ScrollArea::vertical()
                            .auto_shrink([false, false])
                            .show(ui, |ui| {
                                let resp = ui.add(
                                    egui::TextEdit::multiline(self.controller.buffer_mut())
                                        .hint_text(PLACEHOLDER)
                                        .frame(false)
                                        .lock_focus(true)
                                        .desired_rows(10)
                                        .desired_width(f32::INFINITY),
                                );
                                if self.focus_pending {
                                    resp.request_focus();
                                    self.focus_pending = false;
                                }
                                if resp.changed() {
                                    self.controller.on_text_changed(Instant::now());
                                }
                            });
                    });
            });
    }
}

fn panel_fill(r: u8, g: u8, b: u8, alpha: u8) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

fn apply_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = egui::Color32::TRANSPARENT;
    visuals.window_fill = egui::Color32::TRANSPARENT;
    visuals.selection.bg_fill = egui::Color32::from_rgba_unmultiplied(79, 70, 229, 150);
    ctx.set_visuals(visuals);
}

impl eframe::App for NoteOverlayApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        if !self.style_ready {
            self.controller
                .set_style_controller(window_style::detect(frame, ctx));
            self.style_ready = true;
        }

        if let Some(rect) = ctx.input(|i| i.viewport().outer_rect) {
            self.controller.sync_position(rect.min);
        }

        self.handle_shortcuts(ctx);
        self.title_bar(ctx);
        self.footer(ctx);
        self.editor(ctx);

        let now = Instant::now();
        self.controller.tick(now);
        if let Some(wait) = self.controller.next_wakeup(now) {
            ctx.request_repaint_after(wait);
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.controller.shutdown(self.settings.save_on_exit);
        self.persist_settings();
    }
}
