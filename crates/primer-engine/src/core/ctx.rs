use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::frame::FramePlan;
use crate::input::InputState;
use crate::mesh::Mesh;
use crate::program::Program;
use crate::render::{self, RenderCtx, RenderTarget};

use super::app::AppControl;

/// Window handle and immutable window metadata.
pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Returns the framebuffer size as `(width, height)` in physical pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window:       WindowCtx<'a>,
    pub gpu:          &'a mut Gpu<'w>,
    pub input:        &'a InputState,
    /// Window-system close flag (set once the user asked the window to close).
    pub should_close: bool,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Context for creating GPU resources on this window's device.
    pub fn render_ctx(&self) -> RenderCtx<'_> {
        RenderCtx::new(self.gpu.device(), self.gpu.queue(), self.gpu.surface_format())
    }

    /// Encodes `plan` with `program` and `mesh`, then presents the frame.
    ///
    /// Frames with an empty viewport (minimized window) are skipped. Fails
    /// when the surface cannot recover from an acquisition error.
    pub fn render(
        &mut self,
        plan: &FramePlan,
        program: &Program,
        mesh: &Mesh,
    ) -> anyhow::Result<AppControl> {
        let size = self.gpu.size();
        let viewport = plan.viewport.clamped_to(size.width, size.height);
        if viewport.is_empty() {
            return Ok(AppControl::Continue);
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                log::debug!("surface error: {err}");
                let message = err.to_string();
                if self.gpu.handle_surface_error(err) == SurfaceErrorAction::Fatal {
                    anyhow::bail!("surface lost beyond recovery: {message}");
                }
                return Ok(AppControl::Continue);
            }
        };

        let plan = FramePlan { viewport, ..*plan };

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            render::encode_frame(&mut target, &plan, program, mesh);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        Ok(AppControl::Continue)
    }
}
