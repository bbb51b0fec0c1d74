use crate::coords::Viewport;
use crate::input::{InputState, Key};
use crate::mesh::DrawCall;
use crate::paint::Color;

/// Frame loop state. `Closed` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Running,
    Closed,
}

/// What ended the loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CloseReason {
    /// The window-system close flag was set (close button, `request_close`).
    CloseRequested,
    /// The exit key was held when the loop polled input.
    ExitKey,
}

/// Fixed per-run frame loop settings.
#[derive(Debug, Clone)]
pub struct FrameLoopConfig {
    pub clear_color: Color,
    pub exit_key: Key,
}

impl Default for FrameLoopConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::rgb(0.1, 0.1, 0.15),
            exit_key: Key::Escape,
        }
    }
}

/// Everything needed to encode one frame: clear, set viewport, one draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FramePlan {
    pub clear: Color,
    pub viewport: Viewport,
    pub draw: DrawCall,
}

/// Two-state render loop: RUNNING until a close request or the exit key is
/// observed, then CLOSED for good.
///
/// The loop does not touch the GPU. Each [`step`](Self::step) either yields
/// the plan for the next frame or reports that the loop is closed; the caller
/// encodes and presents the plan.
#[derive(Debug)]
pub struct FrameLoop {
    config: FrameLoopConfig,
    draw: DrawCall,
    viewport: Viewport,
    state: LoopState,
    close_flag: bool,
    close_reason: Option<CloseReason>,
    frames: u64,
}

impl FrameLoop {
    pub fn new(config: FrameLoopConfig, draw: DrawCall) -> Self {
        if !config.clear_color.is_finite() {
            log::warn!("clear color {:?} is not finite", config.clear_color);
        }
        Self {
            config,
            draw,
            viewport: Viewport::default(),
            state: LoopState::Running,
            close_flag: false,
            close_reason: None,
            frames: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn close_reason(&self) -> Option<CloseReason> {
        self.close_reason
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Number of frame plans produced so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Resize notification: the viewport follows the framebuffer size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::from_size(width, height);
        log::debug!("viewport set to {width}x{height}");
    }

    /// Sets the close flag; the loop closes at its next step.
    pub fn request_close(&mut self) {
        self.close_flag = true;
    }

    /// Runs one iteration.
    ///
    /// `should_close` is the window-system close flag. Returns the frame to
    /// draw, or `None` once the loop is closed (and on every call after).
    pub fn step(&mut self, should_close: bool, input: &InputState) -> Option<FramePlan> {
        if self.state == LoopState::Closed {
            return None;
        }

        if should_close || self.close_flag {
            self.close(CloseReason::CloseRequested);
            return None;
        }

        if input.key_down(self.config.exit_key) {
            log::debug!("{} held; requesting close", self.config.exit_key);
            self.request_close();
            self.close(CloseReason::ExitKey);
            return None;
        }

        self.frames += 1;
        Some(FramePlan {
            clear: self.config.clear_color,
            viewport: self.viewport,
            draw: self.draw,
        })
    }

    fn close(&mut self, reason: CloseReason) {
        self.state = LoopState::Closed;
        self.close_reason = Some(reason);
        log::info!("frame loop closed ({reason:?}) after {} frame(s)", self.frames);
    }
}
