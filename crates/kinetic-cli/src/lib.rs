//! # Kinetic CLI
//!
//! Command-line driver for the Kinetic mobile engine.
//!
//! ## Commands
//! - `demo` - Run the sample mobile for a number of simulated frames
//! - `inspect` - Load a mesh file and report its size and bounds
//! - `bounds` - Print the bounds of the sample mobile
//! - `simulate` - Run the sample mobile against the wall clock

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glam::{Mat4, Vec3};

use kinetic_animation::{Camera, CameraAxis, Mobile};
use kinetic_assets::{MeshLibrary, load_mesh};
use kinetic_core::{Bounds, Clock, FrameClock, ManualClock, Mesh, SceneConfig, SystemClock};
use kinetic_renderer::{DrawFlags, DrawList, DrawStats, Material, Projection, SpotLight};

/// Kinetic mobile engine CLI
#[derive(Parser)]
#[command(name = "kinetic")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Scene configuration file (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the sample mobile on a simulated clock
    Demo {
        /// Number of frames to draw
        #[arg(short, long, default_value = "120")]
        frames: u32,

        /// Milliseconds per frame, overriding the configuration
        #[arg(long)]
        frame_ms: Option<f64>,

        /// Move the camera towards the scene while animating
        #[arg(long)]
        dolly: bool,
    },

    /// Report the size and bounds of a .json or .ply mesh
    Inspect {
        /// Mesh file
        file: PathBuf,
    },

    /// Print the bounds of the sample mobile
    Bounds,

    /// Run the sample mobile against the wall clock
    Simulate {
        /// Duration in seconds
        #[arg(short, long, default_value = "5")]
        seconds: f64,
    },
}

/// Outcome of a demo run
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub frames: u64,
    /// Statistics of the last frame
    pub stats: DrawStats,
    pub bounds: Bounds,
    pub projection: Projection,
    /// Final view after camera motion
    pub view: Mat4,
    /// Root spin in degrees at the last frame
    pub root_rotation: f64,
}

/// Load the scene configuration, falling back to defaults
pub fn load_config(path: Option<&Path>) -> Result<SceneConfig> {
    let Some(path) = path else {
        return Ok(SceneConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn primitive(library: &MeshLibrary, name: &str, scale: f32) -> Result<Mesh> {
    let mesh = library
        .get(name)
        .with_context(|| format!("missing primitive {name:?}"))?;
    Ok(mesh.scaled(scale))
}

/// Four-level sample mobile built from the library's primitives
pub fn sample_mobile(library: &MeshLibrary) -> Result<Mobile> {
    let preset = |name: &str| Material::preset(name).with_context(|| format!("missing material {name:?}"));

    let mut builder = Mobile::builder(primitive(library, "sphere", 0.6)?);
    let root = builder
        .root()
        .color(Vec3::new(0.6, 0.5, 0.9))
        .shininess(20.0)
        .radius(4.0)
        .parent_height(3.0)
        .child_height(0.5)
        .spin_speed(0.06)
        .arm_speed(0.03)
        .hanging_from(Vec3::new(0.0, 8.0, 0.0))?
        .id();

    builder
        .at(root)?
        .left(primitive(library, "cube", 0.8)?)?
        .material(preset("ruby")?)
        .parent_height(1.0)
        .spin_speed(0.1);

    let hinge = builder
        .at(root)?
        .empty_right()?
        .radius(2.5)
        .child_height(1.5)
        .arm_speed(0.05)
        .id();

    builder
        .at(hinge)?
        .left(primitive(library, "octahedron", 0.5)?)?
        .material(preset("gold")?)
        .parent_height(0.5)
        .spin_speed(-0.08);

    let tail = builder
        .at(hinge)?
        .right(primitive(library, "sphere", 0.4)?)?
        .material(preset("emerald")?)
        .parent_height(0.5)
        .spin_speed(0.04)
        .id();

    builder
        .at(tail)?
        .left(primitive(library, "cube", 0.3)?)?
        .material(preset("turquoise")?)
        .parent_height(0.3)
        .child_height(0.3);

    Ok(builder.build()?)
}

/// Animate the sample mobile for `frames` frames of `frame_ms` each
pub fn run_demo(config: &SceneConfig, frames: u32, frame_ms: f64, dolly: bool) -> Result<DemoReport> {
    let library = MeshLibrary::with_primitives()?;
    let mut mobile = sample_mobile(&library)?;
    log::info!(
        "Sample mobile: {} nodes, {} levels",
        mobile.node_count(),
        mobile.depth()
    );

    let bounds = mobile.bounds()?;
    let projection = Projection::fit(&bounds, config);
    let mut camera = Camera::new(&config.camera, projection.view);
    let light = SpotLight::default();

    let mut renderer = DrawList::new(DrawFlags::default() | DrawFlags::LIGHT_GUIDES);
    mobile.setup(&mut renderer)?;
    light.prepare(&mut renderer)?;

    let mut clock = FrameClock::new(ManualClock::new(0.0));
    mobile.start_all(0.0);
    if dolly {
        camera.start_moving(CameraAxis::Z, 1.0, 0.0);
    }

    for _ in 0..frames {
        let now = clock.tick();
        let flags = renderer.flags();

        renderer.begin_frame()?;
        mobile.draw(&mut renderer, Mat4::IDENTITY, now)?;
        light.draw(&mut renderer, flags)?;
        renderer.end_frame()?;

        camera.update(now);
        log::trace!("Frame {} at {now} ms: {:?}", clock.frame_count(), renderer.stats());
        clock.clock().advance(frame_ms);
    }

    let report = DemoReport {
        frames: clock.frame_count(),
        stats: renderer.stats().clone(),
        bounds,
        projection,
        view: camera.view(),
        root_rotation: mobile.rotation().peek(),
    };

    log::info!("Drew {} frames over {} ms", report.frames, clock.elapsed());
    log::info!("Last frame: {:?}", report.stats);
    log::info!(
        "Camera at {} looking at {} from {:.2} units",
        projection.eye,
        projection.target,
        projection.distance()
    );
    Ok(report)
}

/// Load a mesh file and log its size and bounds
pub fn inspect(path: &Path) -> Result<Mesh> {
    let mesh = load_mesh(path).with_context(|| format!("loading {}", path.display()))?;
    log::info!(
        "{}: {} vertices, {} faces, {} indices",
        path.display(),
        mesh.vertex_count(),
        mesh.face_count(),
        mesh.index_count()
    );
    match mesh.bounds() {
        Some(bounds) => log::info!("  Bounds: {bounds:?}"),
        None => log::info!("  No vertices"),
    }
    Ok(mesh)
}

/// Run the sample mobile on the wall clock for `seconds`
pub fn simulate(config: &SceneConfig, seconds: f64) -> Result<u64> {
    let library = MeshLibrary::with_primitives()?;
    let mut mobile = sample_mobile(&library)?;
    let mut renderer = DrawList::default();
    mobile.setup(&mut renderer)?;

    let mut clock = FrameClock::new(SystemClock::new());
    let frame = Duration::from_secs_f64(config.frame_ms.max(0.0) / 1000.0);
    mobile.start_all(clock.clock().now());

    while clock.clock().now() < seconds * 1000.0 {
        let now = clock.tick();
        renderer.begin_frame()?;
        mobile.draw(&mut renderer, Mat4::IDENTITY, now)?;
        renderer.end_frame()?;
        std::thread::sleep(frame);
    }

    log::info!(
        "Simulated {} frames at {:.1} fps, root spun {:.1} degrees",
        clock.frame_count(),
        clock.fps(),
        mobile.rotation().peek()
    );
    Ok(clock.frame_count())
}

/// Execute the CLI command
pub fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Demo { frames, frame_ms, dolly } => {
            let frame_ms = frame_ms.unwrap_or(config.frame_ms);
            log::info!("Running {frames} frames of {frame_ms} ms...");
            run_demo(&config, frames, frame_ms, dolly)?;
        }

        Commands::Inspect { file } => {
            inspect(&file)?;
        }

        Commands::Bounds => {
            let library = MeshLibrary::with_primitives()?;
            let bounds = sample_mobile(&library)?.bounds()?;
            println!("{}", serde_json::to_string_pretty(&bounds)?);
        }

        Commands::Simulate { seconds } => {
            log::info!("Simulating for {seconds} seconds...");
            simulate(&config, seconds)?;
        }
    }

    Ok(())
}
