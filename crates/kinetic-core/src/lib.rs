//! # Kinetic Core
//!
//! Core geometry library for the Kinetic mobile engine.
//!
//! This crate provides the foundational systems for hanging-mobile scenes:
//! - **Math**: Axis-aligned bounds, projections, and axis-angle rotations
//! - **Mesh**: Immutable polyhedral meshes with face and vertex normals
//! - **Time**: Clocks that feed explicit simulation time to the frame loop

pub mod math;
pub mod mesh;
pub mod time;

pub use math::Bounds;
pub use mesh::{Face, Mesh, MeshOptions, WireMesh};
pub use time::{Clock, FrameClock, ManualClock, SystemClock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core geometry errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("cannot compute bounds of an empty point set")]
    EmptyPointSet,

    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("expected {expected} {kind} normals, got {actual}")]
    NormalCountMismatch {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Camera movement configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Translation speed in units per millisecond
    pub move_speed: f64,
    /// Turn speed in degrees per millisecond
    pub turn_speed: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            move_speed: 0.01,
            turn_speed: 0.1,
        }
    }
}

/// Scene and viewing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Horizontal field of view in degrees
    pub x_field_of_view: f32,
    /// Viewport width divided by height
    pub aspect_ratio: f32,
    /// Perspective near plane distance
    pub near_plane: f32,
    /// Perspective far plane distance
    pub far_plane: f32,
    /// Scale applied around the projected scene to leave a margin
    pub margin: f32,
    /// Smallest canvas height the viewer will lay out
    pub min_canvas_height: u32,
    /// Simulated frame length in milliseconds
    pub frame_ms: f64,
    /// Camera movement settings
    pub camera: CameraConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            x_field_of_view: 90.0,
            aspect_ratio: 5.0 / 3.0,
            near_plane: 0.001,
            far_plane: 1000.0,
            margin: 0.9,
            min_canvas_height: 200,
            frame_ms: 16.0,
            camera: CameraConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Vertical field of view in radians
    pub fn y_field_of_view(&self) -> f32 {
        self.x_field_of_view.to_radians() / self.aspect_ratio
    }

    /// Canvas size fitted to the available height and width
    pub fn canvas_size(&self, available_width: u32, available_height: u32) -> (u32, u32) {
        let height = available_height.max(self.min_canvas_height);
        let width = (height as f32 * self.aspect_ratio).round() as u32;
        if width > available_width {
            let height = (available_width as f32 / self.aspect_ratio).round() as u32;
            (available_width, height)
        } else {
            (width, height)
        }
    }
}
