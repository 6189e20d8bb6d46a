//! # Kinetic Renderer
//!
//! Rendering collaborator for the Kinetic mobile engine.
//!
//! ## Features
//! - `Renderer` trait consumed by the scene traversal
//! - Recording `DrawList` for headless runs and tests
//! - Phong materials with the classic preset table
//! - Spot light with planar shadows and guide lines
//! - Perspective projection fitted to scene bounds

pub mod camera;
pub mod lighting;
pub mod material;

pub use camera::Projection;
pub use lighting::SpotLight;
pub use material::Material;

use bitflags::bitflags;
use glam::{Mat4, Vec3};
use kinetic_core::{Mesh, WireMesh};
use thiserror::Error;

/// Renderer errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RendererError {
    #[error("draw call issued outside of a frame")]
    FrameNotActive,

    #[error("frame {0} is already in progress")]
    FrameInProgress(u64),

    #[error("model transform is not finite")]
    NonFiniteTransform,
}

/// Result type for renderer operations
pub type RendererResult<T> = Result<T, RendererError>;

bitflags! {
    /// Which parts of the scene get drawn
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DrawFlags: u8 {
        const MESHES = 0b0001;
        const ARMS = 0b0010;
        const LIGHT_GUIDES = 0b0100;
        const FLAT_SHADING = 0b1000;
    }
}

impl Default for DrawFlags {
    fn default() -> Self {
        DrawFlags::MESHES | DrawFlags::ARMS
    }
}

/// Normal source used when shading a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Interpolated vertex normals
    #[default]
    Smooth,
    /// One normal per face, reflected at the face centroid
    Flat,
}

impl ShadingMode {
    pub fn from_flags(flags: DrawFlags) -> Self {
        if flags.contains(DrawFlags::FLAT_SHADING) {
            ShadingMode::Flat
        } else {
            ShadingMode::Smooth
        }
    }

    /// Per-vertex normals for this mode
    pub fn normals(&self, mesh: &Mesh) -> Vec<Vec3> {
        match self {
            ShadingMode::Smooth => mesh.vertex_normals().to_vec(),
            ShadingMode::Flat => mesh.flat_normals(),
        }
    }

    /// Per-vertex positions at which reflections are evaluated
    pub fn reflection_points(&self, mesh: &Mesh) -> Vec<Vec3> {
        match self {
            ShadingMode::Smooth => mesh.vertices().to_vec(),
            ShadingMode::Flat => mesh.barycenters(),
        }
    }
}

/// Backend that turns scene geometry into draw calls.
///
/// `prepare_*` is called once per resource before the first frame, `draw_*`
/// once per visible resource every frame.
pub trait Renderer {
    fn prepare_mesh(&mut self, mesh: &Mesh) -> RendererResult<()>;

    fn prepare_wire(&mut self, wire: &WireMesh) -> RendererResult<()>;

    fn draw_mesh(&mut self, mesh: &Mesh, material: &Material, model: Mat4) -> RendererResult<()>;

    fn draw_wire(&mut self, wire: &WireMesh, model: Mat4) -> RendererResult<()>;

    /// Draw a single unlit point, used for light sources
    fn draw_point(&mut self, position: Vec3, color: Vec3) -> RendererResult<()>;
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Mesh {
        vertex_count: usize,
        face_count: usize,
        material: Material,
        model: Mat4,
    },
    Wire {
        segment_count: usize,
        model: Mat4,
    },
    Point {
        position: Vec3,
        color: Vec3,
    },
}

/// Renderer statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawStats {
    /// Draw calls this frame
    pub draw_calls: u32,
    /// Meshes drawn
    pub meshes: u32,
    /// Wire meshes drawn
    pub wires: u32,
    /// Triangles after fan triangulation
    pub triangles: u32,
    /// Line segments drawn
    pub segments: u32,
    /// Resources prepared since creation
    pub prepared: u32,
}

/// Renderer that records every call instead of talking to a GPU
#[derive(Debug, Default)]
pub struct DrawList {
    flags: DrawFlags,
    commands: Vec<DrawCommand>,
    stats: DrawStats,
    frame_number: u64,
    in_frame: bool,
    prepared: u32,
}

impl DrawList {
    pub fn new(flags: DrawFlags) -> Self {
        Self {
            flags,
            ..Default::default()
        }
    }

    pub fn flags(&self) -> DrawFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: DrawFlags) {
        self.flags = flags;
    }

    pub fn shading(&self) -> ShadingMode {
        ShadingMode::from_flags(self.flags)
    }

    /// Commands recorded in the current or last frame
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Statistics of the current or last frame
    pub fn stats(&self) -> &DrawStats {
        &self.stats
    }

    /// Get the current frame number
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Begin a new frame, discarding the previous frame's commands
    pub fn begin_frame(&mut self) -> RendererResult<()> {
        if self.in_frame {
            return Err(RendererError::FrameInProgress(self.frame_number));
        }
        self.frame_number += 1;
        self.in_frame = true;
        self.commands.clear();
        self.stats = DrawStats {
            prepared: self.prepared,
            ..Default::default()
        };
        Ok(())
    }

    /// End the current frame
    pub fn end_frame(&mut self) -> RendererResult<()> {
        if !self.in_frame {
            return Err(RendererError::FrameNotActive);
        }
        self.in_frame = false;
        log::trace!(
            "frame {}: {} draw calls, {} triangles, {} segments",
            self.frame_number,
            self.stats.draw_calls,
            self.stats.triangles,
            self.stats.segments
        );
        Ok(())
    }

    /// Model transforms of every recorded mesh draw, in draw order
    pub fn mesh_transforms(&self) -> Vec<Mat4> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Mesh { model, .. } => Some(*model),
                _ => None,
            })
            .collect()
    }

    /// Model transforms of every recorded wire draw, in draw order
    pub fn wire_transforms(&self) -> Vec<Mat4> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Wire { model, .. } => Some(*model),
                _ => None,
            })
            .collect()
    }

    fn check_draw(&self, model: &Mat4) -> RendererResult<()> {
        if !self.in_frame {
            return Err(RendererError::FrameNotActive);
        }
        if !model.is_finite() {
            return Err(RendererError::NonFiniteTransform);
        }
        Ok(())
    }

    fn record(&mut self, command: DrawCommand) {
        self.stats.draw_calls += 1;
        self.commands.push(command);
    }
}

impl Renderer for DrawList {
    fn prepare_mesh(&mut self, mesh: &Mesh) -> RendererResult<()> {
        log::trace!(
            "preparing mesh with {} vertices and {} faces",
            mesh.vertex_count(),
            mesh.face_count()
        );
        self.prepared += 1;
        self.stats.prepared = self.prepared;
        Ok(())
    }

    fn prepare_wire(&mut self, wire: &WireMesh) -> RendererResult<()> {
        log::trace!("preparing wire with {} segments", wire.segment_count());
        self.prepared += 1;
        self.stats.prepared = self.prepared;
        Ok(())
    }

    fn draw_mesh(&mut self, mesh: &Mesh, material: &Material, model: Mat4) -> RendererResult<()> {
        self.check_draw(&model)?;
        if !self.flags.contains(DrawFlags::MESHES) {
            return Ok(());
        }

        self.stats.meshes += 1;
        self.stats.triangles += mesh
            .faces()
            .iter()
            .map(|face| face.len().saturating_sub(2) as u32)
            .sum::<u32>();
        self.record(DrawCommand::Mesh {
            vertex_count: mesh.vertex_count(),
            face_count: mesh.face_count(),
            material: *material,
            model,
        });
        Ok(())
    }

    fn draw_wire(&mut self, wire: &WireMesh, model: Mat4) -> RendererResult<()> {
        self.check_draw(&model)?;
        if !self.flags.contains(DrawFlags::ARMS) {
            return Ok(());
        }

        self.stats.wires += 1;
        self.stats.segments += wire.segment_count() as u32;
        self.record(DrawCommand::Wire {
            segment_count: wire.segment_count(),
            model,
        });
        Ok(())
    }

    fn draw_point(&mut self, position: Vec3, color: Vec3) -> RendererResult<()> {
        self.check_draw(&Mat4::IDENTITY)?;
        self.record(DrawCommand::Point { position, color });
        Ok(())
    }
}
