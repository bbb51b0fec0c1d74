//! Demo programs: a triangle and an indexed rectangle.
//!
//! Both binaries run the same app; they differ only in their [`Demo`].

mod app;
mod shaders;

use winit::dpi::LogicalSize;

use primer_engine::device::GpuInit;
use primer_engine::frame::FrameLoopConfig;
use primer_engine::logging::{init_logging, LoggingConfig};
use primer_engine::mesh::MeshData;
use primer_engine::program::{self, LinkError};
use primer_engine::window::{Runtime, RuntimeConfig};

pub use app::MeshApp;

/// Exit code for a normal close.
pub const EXIT_OK: i32 = 0;
/// Exit code when the shaders fail to compile or link.
pub const EXIT_BUILD_FAILED: i32 = 1;
/// Exit code when the window or GPU context cannot be created.
pub const EXIT_ENVIRONMENT: i32 = -1;

/// One demo program: window title plus the mesh it draws.
#[derive(Debug, Clone)]
pub struct Demo {
    pub title: &'static str,
    pub mesh: MeshData,
}

impl Demo {
    pub fn triangle() -> Self {
        Self {
            title: "Beginner Renderer : My First TRIANGLE",
            mesh: MeshData::triangle(),
        }
    }

    pub fn rectangle() -> Self {
        Self {
            title: "Beginner Renderer : My RECTANGLE using indexed vertices",
            mesh: MeshData::rectangle(),
        }
    }
}

/// Runs `demo` to completion and returns the process exit code.
pub fn run(demo: Demo) -> i32 {
    init_logging(LoggingConfig::default());

    let linked = match program::build(&shaders::vertex(), &shaders::fragment()) {
        Ok(linked) => linked,
        Err(err) => {
            log::error!("{err}");
            return EXIT_BUILD_FAILED;
        }
    };

    let config = RuntimeConfig {
        title: demo.title.to_string(),
        initial_size: LogicalSize::new(800.0, 600.0),
        ..RuntimeConfig::default()
    };

    // Plain (non-sRGB) framebuffer: colors are stored as written.
    let gpu_init = GpuInit {
        prefer_srgb: false,
        ..GpuInit::default()
    };

    let app = MeshApp::new(linked, demo.mesh, FrameLoopConfig::default());

    let outcome = Runtime::run(config, gpu_init, app);
    if let Err(err) = &outcome {
        println!("{err:#}");
        log::error!("{err:#}");
    }
    exit_code(&outcome)
}

/// Maps the outcome of a run to the process exit code.
///
/// A program that fails to link against the mesh layout is a build failure,
/// whether it is caught at startup or when the pipeline is created.
pub fn exit_code(outcome: &anyhow::Result<()>) -> i32 {
    match outcome {
        Ok(()) => EXIT_OK,
        Err(err) if err.downcast_ref::<LinkError>().is_some() => EXIT_BUILD_FAILED,
        Err(_) => EXIT_ENVIRONMENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primer_engine::mesh::{DrawCall, Mesh};

    #[test]
    fn bundled_shaders_build() {
        let linked = program::build(&shaders::vertex(), &shaders::fragment()).unwrap();
        assert_eq!(linked.vertex().entry_point, "vs_main");
        assert_eq!(linked.fragment().entry_point, "fs_main");
        assert_eq!(linked.vertex_inputs().len(), 1);
        assert_eq!(linked.vertex_inputs()[0].location, 0);
    }

    #[test]
    fn bundled_shaders_match_the_mesh_layout() {
        let linked = program::build(&shaders::vertex(), &shaders::fragment()).unwrap();
        assert!(linked.check_layout(&Mesh::layout()).is_ok());
    }

    #[test]
    fn normal_close_exits_zero() {
        assert_eq!(exit_code(&Ok(())), EXIT_OK);
    }

    #[test]
    fn environment_failure_exits_minus_one() {
        let outcome = Err(anyhow::anyhow!("surface lost beyond recovery: Out of memory"));
        assert_eq!(exit_code(&outcome), EXIT_ENVIRONMENT);
    }

    #[test]
    fn pipeline_link_failure_exits_as_build_failure() {
        use anyhow::Context;

        let outcome: anyhow::Result<()> = Err(LinkError::MissingColorOutput)
            .context("failed to create the program pipeline");
        assert_eq!(exit_code(&outcome), EXIT_BUILD_FAILED);
    }

    #[test]
    fn triangle_demo() {
        let demo = Demo::triangle();
        assert!(demo.title.ends_with("TRIANGLE"));
        assert_eq!(demo.mesh.draw_call(), DrawCall::Arrays { first: 0, count: 3 });
        assert_eq!(demo.mesh.indices(), None);
    }

    #[test]
    fn rectangle_demo() {
        let demo = Demo::rectangle();
        assert!(demo.title.contains("indexed vertices"));
        assert_eq!(demo.mesh.draw_call(), DrawCall::Indexed { count: 6 });
        assert_eq!(demo.mesh.vertex_count(), 4);
        assert!(demo.mesh.indices().unwrap().iter().all(|&i| i < 4));
    }
}
