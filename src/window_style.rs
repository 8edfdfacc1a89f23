//! Click-through support.
//!
//! Windows gets the real thing by flipping `WS_EX_TRANSPARENT` on the layered
//! window's extended style. Elsewhere the toolkit's mouse passthrough attribute
//! is used, and when no native window is available the request is ignored.

use crate::visibility::ViewportCtx;
use eframe::egui;
use raw_window_handle::HasWindowHandle;

/// `WS_EX_TRANSPARENT`: mouse input falls through to the window below.
pub const EX_STYLE_TRANSPARENT: u32 = 0x0000_0020;
/// `WS_EX_LAYERED`: required for per-window translucency.
pub const EX_STYLE_LAYERED: u32 = 0x0008_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickThroughSupport {
    /// Extended window style bits are changed directly.
    Native,
    /// The toolkit is asked to let pointer input pass through.
    Toolkit,
    /// Nothing can be done on this platform.
    Unsupported,
}

/// Platform capability for making the overlay ignore the mouse.
pub trait WindowStyleController {
    fn support(&self) -> ClickThroughSupport;
    fn set_click_through(&mut self, enabled: bool) -> anyhow::Result<()>;
}

/// Compute the extended style with click-through switched on or off. The
/// layered bit is kept set either way.
pub fn compose_click_through_ex_style(current: u32, enabled: bool) -> u32 {
    if enabled {
        current | EX_STYLE_TRANSPARENT | EX_STYLE_LAYERED
    } else {
        (current & !EX_STYLE_TRANSPARENT) | EX_STYLE_LAYERED
    }
}

/// Uses the toolkit's mouse passthrough viewport attribute.
pub struct ToolkitPassthrough<C: ViewportCtx> {
    ctx: C,
}

impl<C: ViewportCtx> ToolkitPassthrough<C> {
    pub fn new(ctx: C) -> Self {
        Self { ctx }
    }
}

impl<C: ViewportCtx> WindowStyleController for ToolkitPassthrough<C> {
    fn support(&self) -> ClickThroughSupport {
        ClickThroughSupport::Toolkit
    }

    fn set_click_through(&mut self, enabled: bool) -> anyhow::Result<()> {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::MousePassthrough(enabled));
        self.ctx.request_repaint();
        Ok(())
    }
}

/// Fallback when there is no native window to change.
#[derive(Debug, Default)]
pub struct NoopWindowStyle;

impl WindowStyleController for NoopWindowStyle {
    fn support(&self) -> ClickThroughSupport {
        ClickThroughSupport::Unsupported
    }

    fn set_click_through(&mut self, enabled: bool) -> anyhow::Result<()> {
        tracing::debug!(enabled, "click-through unsupported here; ignoring");
        Ok(())
    }
}

#[cfg(target_os = "windows")]
pub use self::win::LayeredWindowStyle;

#[cfg(target_os = "windows")]
mod win {
    use super::{compose_click_through_ex_style, ClickThroughSupport, WindowStyleController};
    use eframe::egui;
    use raw_window_handle::{HasWindowHandle, RawWindowHandle};
    use windows::Win32::Foundation::{SetLastError, HWND, WIN32_ERROR};
    use windows::Win32::UI::WindowsAndMessaging::{
        GetWindowLongPtrW, SetWindowLongPtrW, GWL_EXSTYLE,
    };

    /// Click-through for a native layered Win32 window.
    ///
    /// winit keeps its own copy of the window flags and rewrites the extended
    /// style from them on level or visibility changes, so the passthrough
    /// request is mirrored to the viewport as well.
    pub struct LayeredWindowStyle {
        hwnd: HWND,
        ctx: egui::Context,
    }

    impl LayeredWindowStyle {
        pub fn new(hwnd: HWND, ctx: egui::Context) -> Self {
            Self { hwnd, ctx }
        }

        /// Extract the HWND from an eframe [`eframe::Frame`].
        pub fn from_frame(frame: &eframe::Frame, ctx: &egui::Context) -> Option<Self> {
            frame
                .window_handle()
                .ok()
                .and_then(|wh| match wh.as_raw() {
                    RawWindowHandle::Win32(handle) => Some(Self::new(
                        HWND(handle.hwnd.get() as *mut core::ffi::c_void),
                        ctx.clone(),
                    )),
                    _ => None,
                })
        }
    }

    impl WindowStyleController for LayeredWindowStyle {
        fn support(&self) -> ClickThroughSupport {
            ClickThroughSupport::Native
        }

        fn set_click_through(&mut self, enabled: bool) -> anyhow::Result<()> {
            unsafe {
                let current = GetWindowLongPtrW(self.hwnd, GWL_EXSTYLE) as u32;
                let next = compose_click_through_ex_style(current, enabled);
                // A zero return is ambiguous, so clear the last error first.
                SetLastError(WIN32_ERROR(0));
                let previous = SetWindowLongPtrW(self.hwnd, GWL_EXSTYLE, next as isize);
                if previous == 0 {
                    let err = windows::core::Error::from_win32();
                    if err.code().is_err() {
                        return Err(anyhow::anyhow!("SetWindowLongPtrW failed: {err}"));
                    }
                }
                tracing::debug!(current, next, "updated extended window style");
            }
            self.ctx
                .send_viewport_cmd(egui::ViewportCommand::MousePassthrough(enabled));
            Ok(())
        }
    }
}

/// Pick the click-through implementation for the running window.
pub fn detect(frame: &eframe::Frame, ctx: &egui::Context) -> Box<dyn WindowStyleController> {
    if frame.window_handle().is_err() {
        tracing::info!("no native window handle; click-through disabled");
        return Box::new(NoopWindowStyle);
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(style) = LayeredWindowStyle::from_frame(frame, ctx) {
            return Box::new(style);
        }
    }

    Box::new(ToolkitPassthrough::new(ctx.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabling_sets_transparent_and_layered() {
        let style = compose_click_through_ex_style(0, true);
        assert_ne!(style & EX_STYLE_TRANSPARENT, 0);
        assert_ne!(style & EX_STYLE_LAYERED, 0);
    }

    #[test]
    fn disabling_clears_transparent_keeps_layered() {
        let on = compose_click_through_ex_style(0x0000_0008, true);
        let off = compose_click_through_ex_style(on, false);
        assert_eq!(off & EX_STYLE_TRANSPARENT, 0);
        assert_ne!(off & EX_STYLE_LAYERED, 0);
        // unrelated bits survive the round trip
        assert_ne!(off & 0x0000_0008, 0);
    }

    #[test]
    fn composing_is_idempotent() {
        let once = compose_click_through_ex_style(0, true);
        assert_eq!(compose_click_through_ex_style(once, true), once);
        let cleared = compose_click_through_ex_style(once, false);
        assert_eq!(compose_click_through_ex_style(cleared, false), cleared);
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn bits_match_win32_constants() {
        use windows::Win32::UI::WindowsAndMessaging::{WS_EX_LAYERED, WS_EX_TRANSPARENT};
        assert_eq!(EX_STYLE_TRANSPARENT, WS_EX_TRANSPARENT.0);
        assert_eq!(EX_STYLE_LAYERED, WS_EX_LAYERED.0);
    }
}
