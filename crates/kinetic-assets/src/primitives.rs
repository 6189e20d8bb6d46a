//! Procedural meshes centered at the origin, faces wound counter-clockwise
//! when seen from outside

use std::f32::consts::PI;

use glam::Vec3;
use kinetic_core::{CoreResult, Face, Mesh};

/// Axis-aligned cube with edge length `size`
pub fn cube(size: f32) -> CoreResult<Mesh> {
    let h = size * 0.5;
    let vertices = vec![
        Vec3::new(-h, -h, -h),
        Vec3::new(h, -h, -h),
        Vec3::new(h, h, -h),
        Vec3::new(-h, h, -h),
        Vec3::new(-h, -h, h),
        Vec3::new(h, -h, h),
        Vec3::new(h, h, h),
        Vec3::new(-h, h, h),
    ];
    let faces = [
        [4, 5, 6, 7],
        [1, 0, 3, 2],
        [5, 1, 2, 6],
        [0, 4, 7, 3],
        [7, 6, 2, 3],
        [0, 1, 5, 4],
    ]
    .iter()
    .map(|f| Face::from_slice(f))
    .collect();
    Mesh::new(vertices, faces)
}

/// Regular octahedron with its corners `radius` from the center
pub fn octahedron(radius: f32) -> CoreResult<Mesh> {
    let vertices = vec![Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];
    let faces = [
        [4, 0, 2],
        [0, 5, 2],
        [5, 1, 2],
        [1, 4, 2],
        [0, 4, 3],
        [5, 0, 3],
        [1, 5, 3],
        [4, 1, 3],
    ]
    .iter()
    .map(|f| Face::from_slice(f))
    .collect();
    Ok(Mesh::unit_poly(vertices, faces)?.scaled(radius))
}

/// Latitude/longitude sphere with smooth normals.
///
/// `segments` is clamped to at least 3 and `rings` to at least 2. The poles
/// are closed with triangle fans; every other band is made of quads.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> CoreResult<Mesh> {
    let segments = segments.max(3);
    let rings = rings.max(2);

    let mut vertices = Vec::with_capacity((2 + (rings - 1) * segments) as usize);
    vertices.push(Vec3::Y);
    for ring in 1..rings {
        let phi = PI * ring as f32 / rings as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for segment in 0..segments {
            let theta = 2.0 * PI * segment as f32 / segments as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            vertices.push(Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta));
        }
    }
    let south = vertices.len() as u32;
    vertices.push(Vec3::NEG_Y);

    // Index of `segment` on ring `ring` (1-based), wrapping around
    let at = |ring: u32, segment: u32| 1 + (ring - 1) * segments + segment % segments;

    let mut faces = Vec::with_capacity((rings * segments) as usize);
    for segment in 0..segments {
        faces.push(Face::from_slice(&[0, at(1, segment), at(1, segment + 1)]));
    }
    for ring in 1..rings - 1 {
        for segment in 0..segments {
            faces.push(Face::from_slice(&[
                at(ring, segment),
                at(ring + 1, segment),
                at(ring + 1, segment + 1),
                at(ring, segment + 1),
            ]));
        }
    }
    for segment in 0..segments {
        faces.push(Face::from_slice(&[
            south,
            at(rings - 1, segment + 1),
            at(rings - 1, segment),
        ]));
    }

    Ok(Mesh::unit_poly(vertices, faces)?.scaled(radius))
}
