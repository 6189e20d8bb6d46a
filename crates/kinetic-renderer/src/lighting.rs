//! Lighting System
//!
//! A single spot light with planar shadow projection and wireframe guides.

use glam::{Mat4, Vec3, Vec4};
use kinetic_core::WireMesh;

use crate::{DrawFlags, Renderer, RendererResult};

/// Spot light
#[derive(Debug, Clone)]
pub struct SpotLight {
    position: Vec3,
    /// Normalized cone axis
    direction: Vec3,
    /// Cone half angle in degrees, clamped to [0, 180]
    angle: f32,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    /// Box and axis lines locating the light
    guides: WireMesh,
}

impl SpotLight {
    pub fn new(position: Vec3, direction: Vec3, angle: f32) -> Self {
        Self {
            position,
            direction: direction.normalize_or_zero(),
            angle: angle.clamp(0.0, 180.0),
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::ONE,
            specular: Vec3::ONE,
            guides: guide_lines(position),
        }
    }

    pub fn with_colors(mut self, ambient: Vec3, diffuse: Vec3, specular: Vec3) -> Self {
        self.ambient = ambient;
        self.diffuse = diffuse;
        self.specular = specular;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Move the light and rebuild its guide lines
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.guides = guide_lines(position);
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Cone half angle in degrees
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, degrees: f32) {
        self.angle = degrees.clamp(0.0, 180.0);
    }

    pub fn add_angle(&mut self, degrees: f32) {
        self.set_angle(self.angle + degrees);
    }

    /// Cosine of the cone angle, compared against in the shader
    pub fn cos_angle(&self) -> f32 {
        self.angle.to_radians().cos()
    }

    /// Projection flattening geometry onto the `z = 0` plane along rays from
    /// the light; `None` when the light itself lies on that plane
    pub fn shadow_transform(&self) -> Option<Mat4> {
        let p = self.position;
        if p.z == 0.0 {
            return None;
        }

        let flatten = Mat4::from_cols(
            Vec4::X,
            Vec4::Y,
            Vec4::new(0.0, 0.0, 1.0, -1.0 / p.z),
            Vec4::ZERO,
        );
        Some(Mat4::from_translation(p) * flatten * Mat4::from_translation(-p))
    }

    /// Twelve box edges from the origin to the light and three axis lines
    /// through it
    pub fn guide_lines(&self) -> &WireMesh {
        &self.guides
    }

    pub fn prepare(&self, renderer: &mut impl Renderer) -> RendererResult<()> {
        renderer.prepare_wire(&self.guides)
    }

    /// Draw the light source as a white point, with guides when requested
    pub fn draw(&self, renderer: &mut impl Renderer, flags: DrawFlags) -> RendererResult<()> {
        renderer.draw_point(self.position, Vec3::ONE)?;
        if flags.contains(DrawFlags::LIGHT_GUIDES) {
            renderer.draw_wire(&self.guides, Mat4::IDENTITY)?;
        }
        Ok(())
    }
}

impl Default for SpotLight {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 10.0, 10.0), Vec3::new(0.0, -1.0, -1.0), 30.0)
    }
}

const AXIS_REACH: f32 = 1000.0;

fn guide_lines(light: Vec3) -> WireMesh {
    // Corner `i` takes each coordinate from the light when its bit is set
    let mut points: Vec<Vec3> = (0..8u32)
        .map(|i| {
            Vec3::new(
                if i & 1 != 0 { light.x } else { 0.0 },
                if i & 2 != 0 { light.y } else { 0.0 },
                if i & 4 != 0 { light.z } else { 0.0 },
            )
        })
        .collect();

    let mut segments = Vec::with_capacity(15);
    for i in 0..8u32 {
        for bit in [1, 2, 4] {
            if i & bit == 0 {
                segments.push([i, i | bit]);
            }
        }
    }

    for axis in [Vec3::X, Vec3::Z, Vec3::Y] {
        let start = points.len() as u32;
        let keep = Vec3::ONE - axis;
        points.push(light * keep + axis * AXIS_REACH);
        points.push(light * keep - axis * AXIS_REACH);
        segments.push([start, start + 1]);
    }

    WireMesh::new(points, segments)
}
