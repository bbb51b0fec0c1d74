use winit::event::WindowEvent;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by the window runtime.
///
/// The runtime never closes the window on its own: a close request only sets
/// `FrameCtx::should_close`, and the app ends the run by returning
/// `AppControl::Exit`.
pub trait App {
    /// Called for every window event, after input state has been updated.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Resize notification with the framebuffer size in physical pixels.
    ///
    /// Also called once right after the window is created.
    fn on_resize(&mut self, width: u32, height: u32) {
        let _ = (width, height);
    }

    /// Called once per redraw.
    ///
    /// An error ends the run abnormally: the runtime stops and
    /// `Runtime::run` returns it.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> anyhow::Result<AppControl>;
}
