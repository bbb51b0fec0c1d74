use primer_engine::shader::ShaderSource;

const POSITION_VERT: &str = include_str!("../shaders/position.vert.wgsl");
const SOLID_FRAG: &str = include_str!("../shaders/solid.frag.wgsl");

/// Pass-through vertex stage reading positions from location 0.
pub fn vertex() -> ShaderSource {
    ShaderSource::vertex(POSITION_VERT).with_label("position.vert")
}

/// Solid pink fragment stage.
pub fn fragment() -> ShaderSource {
    ShaderSource::fragment(SOLID_FRAG).with_label("solid.frag")
}
