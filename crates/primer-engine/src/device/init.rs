/// Surface and device settings requested when the GPU context is created.
///
/// Preferences that the surface cannot honor fall back to something it
/// supports (first format, first alpha mode, FIFO).
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format if one exists. When off, a non-sRGB
    /// format is picked, so clear and fragment colors are stored unencoded.
    pub prefer_srgb: bool,

    /// FIFO (vsync) paces the frame loop to the display.
    pub present_mode: wgpu::PresentMode,

    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Hint only; backends may ignore it.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            // One pipeline plus a vertex and an index buffer.
            required_limits: wgpu::Limits::downlevel_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}
