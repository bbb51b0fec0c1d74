/// Viewport rectangle in physical pixels.
///
/// The draw pass maps clip space onto this rectangle of the color target.
/// Origin is the top-left corner of the surface.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Full-surface viewport for a framebuffer of `width × height`.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clips the viewport to a `width × height` target.
    ///
    /// wgpu rejects viewports that extend past the render target, which can
    /// happen for one frame while a resize is still in flight.
    pub fn clamped_to(self, width: u32, height: u32) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_size_starts_at_origin() {
        assert_eq!(Viewport::from_size(1024, 768), Viewport::new(0, 0, 1024, 768));
    }

    #[test]
    fn zero_dimension_is_empty() {
        assert!(Viewport::from_size(0, 600).is_empty());
        assert!(Viewport::from_size(800, 0).is_empty());
        assert!(!Viewport::from_size(1, 1).is_empty());
    }

    #[test]
    fn clamped_inside_target_is_identity() {
        let vp = Viewport::from_size(800, 600);
        assert_eq!(vp.clamped_to(800, 600), vp);
    }

    #[test]
    fn clamped_shrinks_to_target() {
        let vp = Viewport::from_size(1920, 1080);
        assert_eq!(vp.clamped_to(800, 600), Viewport::from_size(800, 600));
    }

    #[test]
    fn clamped_offset_past_target_is_empty() {
        let vp = Viewport::new(900, 10, 100, 100);
        assert!(vp.clamped_to(800, 600).is_empty());
    }
}
