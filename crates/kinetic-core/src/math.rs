//! Math utilities
//!
//! Re-exports from glam plus the bounding box and rotation helpers used by
//! meshes, mobiles, and cameras.

pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Axis-aligned bounding box in viewing-volume terms.
///
/// `near` is the larger Z value and `far` the smaller one, matching an
/// orthographic viewing volume looking down negative Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Bounds {
    /// Create bounds from explicit planes
    pub fn new(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
        }
    }

    /// The default viewing volume: a cube from -1 to 1 on every axis
    pub fn basic() -> Self {
        Self::new(-1.0, 1.0, -1.0, 1.0, 1.0, -1.0)
    }

    /// Compute the bounds of a non-empty point set
    pub fn from_points(points: &[Vec3]) -> CoreResult<Self> {
        let (first, rest) = points.split_first().ok_or(CoreError::EmptyPointSet)?;
        let start = Self::new(first.x, first.x, first.y, first.y, first.z, first.z);

        Ok(rest.iter().fold(start, |mut bounds, p| {
            bounds.left = bounds.left.min(p.x);
            bounds.right = bounds.right.max(p.x);
            bounds.bottom = bounds.bottom.min(p.y);
            bounds.top = bounds.top.max(p.y);
            bounds.near = bounds.near.max(p.z);
            bounds.far = bounds.far.min(p.z);
            bounds
        }))
    }

    /// Compute the bounds of a non-empty set of planar points.
    ///
    /// Near and far keep their defaults of 1 and -1.
    pub fn from_points_2d(points: &[Vec2]) -> CoreResult<Self> {
        let (first, rest) = points.split_first().ok_or(CoreError::EmptyPointSet)?;
        let start = Self::new(first.x, first.x, first.y, first.y, 1.0, -1.0);

        Ok(rest.iter().fold(start, |mut bounds, p| {
            bounds.left = bounds.left.min(p.x);
            bounds.right = bounds.right.max(p.x);
            bounds.bottom = bounds.bottom.min(p.y);
            bounds.top = bounds.top.max(p.y);
            bounds
        }))
    }

    /// Center of the box
    pub fn midpoint(&self) -> Vec3 {
        Vec3::new(
            (self.left + self.right) / 2.0,
            (self.bottom + self.top) / 2.0,
            (self.near + self.far) / 2.0,
        )
    }

    pub fn width(&self) -> f32 {
        (self.right - self.left).abs()
    }

    pub fn height(&self) -> f32 {
        (self.top - self.bottom).abs()
    }

    pub fn depth(&self) -> f32 {
        (self.near - self.far).abs()
    }

    /// Half of the box diagonal
    pub fn radius(&self) -> f32 {
        Vec3::new(self.width() / 2.0, self.height() / 2.0, self.depth() / 2.0).length()
    }

    /// Smallest bounds containing both boxes
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            left: self.left.min(other.left),
            right: self.right.max(other.right),
            bottom: self.bottom.min(other.bottom),
            top: self.top.max(other.top),
            near: self.near.max(other.near),
            far: self.far.min(other.far),
        }
    }

    /// Check if a point is inside the box
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.left
            && point.x <= self.right
            && point.y >= self.bottom
            && point.y <= self.top
            && point.z >= self.far
            && point.z <= self.near
    }

    /// Bounds of this box's eight corners after a transform
    pub fn transformed(&self, matrix: &Mat4) -> Bounds {
        let corners = [
            Vec3::new(self.left, self.bottom, self.far),
            Vec3::new(self.right, self.bottom, self.far),
            Vec3::new(self.left, self.top, self.far),
            Vec3::new(self.right, self.top, self.far),
            Vec3::new(self.left, self.bottom, self.near),
            Vec3::new(self.right, self.bottom, self.near),
            Vec3::new(self.left, self.top, self.near),
            Vec3::new(self.right, self.top, self.near),
        ]
        .map(|corner| matrix.transform_point3(corner));

        let first = corners[0];
        let start = Self::new(first.x, first.x, first.y, first.y, first.z, first.z);
        corners[1..].iter().fold(start, |bounds, p| {
            bounds.union(&Self::new(p.x, p.x, p.y, p.y, p.z, p.z))
        })
    }

    /// Orthographic projection onto this viewing volume
    pub fn as_ortho(&self) -> Mat4 {
        Mat4::orthographic_rh_gl(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::basic()
    }
}

/// Skew-symmetric cross-product matrix of a vector, so that `skew(a) * b == a.cross(b)`
pub fn skew(v: Vec3) -> Mat3 {
    Mat3::from_cols(
        Vec3::new(0.0, v.z, -v.y),
        Vec3::new(-v.z, 0.0, v.x),
        Vec3::new(v.y, -v.x, 0.0),
    )
}

/// Right-handed rotation about `axis` by `radians` via Rodrigues' formula:
/// `R = I + sin(t) K + (1 - cos(t)) K^2` with `K = skew(axis)`.
///
/// A zero axis yields the identity.
pub fn rodrigues(axis: Vec3, radians: f32) -> Mat3 {
    let Some(axis) = axis.try_normalize() else {
        return Mat3::IDENTITY;
    };
    let k = skew(axis);
    Mat3::IDENTITY + k * radians.sin() + (k * k) * (1.0 - radians.cos())
}

/// Rotation about `axis` by `degrees` as an affine matrix
pub fn rotation_deg(degrees: f32, axis: Vec3) -> Mat4 {
    rotation_rad(degrees.to_radians(), axis)
}

/// Rotation about `axis` by `radians` as an affine matrix
pub fn rotation_rad(radians: f32, axis: Vec3) -> Mat4 {
    Mat4::from_mat3(rodrigues(axis, radians))
}

/// Rotation about the Y axis by a tracker position in degrees.
///
/// The angle is wrapped in `f64` first so long-running positions keep their precision.
pub fn rotate_y_deg(degrees: f64) -> Mat4 {
    Mat4::from_rotation_y((degrees.rem_euclid(360.0) as f32).to_radians())
}

/// Apply only the linear part of a transform to a normal and renormalize.
///
/// Zero-length results stay zero.
pub fn transform_normal(matrix: &Mat4, normal: Vec3) -> Vec3 {
    matrix.transform_vector3(normal).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_bounds_from_points() {
        let bounds = Bounds::from_points(&[
            Vec3::new(-1.0, 2.0, 3.0),
            Vec3::new(4.0, -5.0, 0.5),
            Vec3::new(0.0, 0.0, -2.0),
        ])
        .unwrap();

        assert_eq!(bounds.left, -1.0);
        assert_eq!(bounds.right, 4.0);
        assert_eq!(bounds.bottom, -5.0);
        assert_eq!(bounds.top, 2.0);
        assert_eq!(bounds.near, 3.0);
        assert_eq!(bounds.far, -2.0);
    }

    #[test]
    fn test_bounds_empty_points() {
        assert_eq!(Bounds::from_points(&[]), Err(CoreError::EmptyPointSet));
        assert_eq!(Bounds::from_points_2d(&[]), Err(CoreError::EmptyPointSet));
    }

    #[test]
    fn test_bounds_single_point() {
        let p = Vec3::new(1.5, -2.0, 7.0);
        let bounds = Bounds::from_points(&[p]).unwrap();
        assert!((bounds.midpoint() - p).length() < EPS);
        assert_eq!(bounds.radius(), 0.0);
    }

    #[test]
    fn test_bounds_2d_keeps_default_depth() {
        let bounds = Bounds::from_points_2d(&[Vec2::new(3.0, 4.0), Vec2::new(-3.0, 0.0)]).unwrap();
        assert_eq!(bounds.near, 1.0);
        assert_eq!(bounds.far, -1.0);
        assert_eq!(bounds.width(), 6.0);
        assert_eq!(bounds.height(), 4.0);
    }

    #[test]
    fn test_bounds_basic() {
        let bounds = Bounds::basic();
        assert_eq!(bounds.midpoint(), Vec3::ZERO);
        assert_eq!(bounds.width(), 2.0);
        assert_eq!(bounds.depth(), 2.0);
        assert!((bounds.radius() - 3.0f32.sqrt()).abs() < EPS);
    }

    #[test]
    fn test_bounds_sizes_ignore_orientation() {
        // Swapped planes still report positive sizes
        let bounds = Bounds::new(1.0, -1.0, 2.0, -2.0, -3.0, 3.0);
        assert_eq!(bounds.width(), 2.0);
        assert_eq!(bounds.height(), 4.0);
        assert_eq!(bounds.depth(), 6.0);
    }

    #[test]
    fn test_bounds_union_and_contains() {
        let a = Bounds::from_points(&[Vec3::ZERO, Vec3::ONE]).unwrap();
        let b = Bounds::from_points(&[Vec3::splat(2.0)]).unwrap();
        let u = a.union(&b);
        assert!(u.contains_point(Vec3::splat(1.5)));
        assert!(!a.contains_point(Vec3::splat(1.5)));
    }

    #[test]
    fn test_bounds_transformed() {
        let bounds = Bounds::from_points(&[Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0)]).unwrap();
        let moved = bounds.transformed(&Mat4::from_translation(Vec3::new(1.0, 0.0, -1.0)));
        assert!((moved.midpoint() - (bounds.midpoint() + Vec3::new(1.0, 0.0, -1.0))).length() < EPS);
        assert!((moved.width() - bounds.width()).abs() < EPS);
    }

    #[test]
    fn test_bounds_as_ortho_maps_corners() {
        let bounds = Bounds::new(0.0, 10.0, 0.0, 5.0, 1.0, -1.0);
        let ortho = bounds.as_ortho();
        let corner = ortho.project_point3(Vec3::new(10.0, 5.0, 0.0));
        assert!((corner.x - 1.0).abs() < EPS);
        assert!((corner.y - 1.0).abs() < EPS);
        let origin = ortho.project_point3(Vec3::new(0.0, 0.0, 0.0));
        assert!((origin.x + 1.0).abs() < EPS);
        assert!((origin.y + 1.0).abs() < EPS);
    }

    #[test]
    fn test_skew_is_cross_product() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-4.0, 0.5, 2.0);
        assert!((skew(a) * b - a.cross(b)).length() < EPS);
    }

    #[test]
    fn test_rodrigues_matches_glam() {
        let axes = [Vec3::X, Vec3::Y, Vec3::Z, Vec3::new(1.0, -2.0, 0.5).normalize()];
        for axis in axes {
            for angle in [0.3f32, 1.0, -2.2, std::f32::consts::PI] {
                let ours = rodrigues(axis, angle);
                let glams = Mat3::from_axis_angle(axis, angle);
                let v = Vec3::new(0.2, -0.7, 1.3);
                assert!((ours * v - glams * v).length() < 1e-4);
            }
        }
    }

    #[test]
    fn test_rodrigues_right_handed() {
        // A quarter turn about +Z takes +X to +Y
        let r = rodrigues(Vec3::Z, std::f32::consts::FRAC_PI_2);
        assert!((r * Vec3::X - Vec3::Y).length() < EPS);
        // A quarter turn about +Y takes +Z to +X
        let r = rodrigues(Vec3::Y, std::f32::consts::FRAC_PI_2);
        assert!((r * Vec3::Z - Vec3::X).length() < EPS);
    }

    #[test]
    fn test_rodrigues_zero_axis() {
        assert_eq!(rodrigues(Vec3::ZERO, 1.0), Mat3::IDENTITY);
    }

    #[test]
    fn test_rotate_y_deg() {
        let r = rotate_y_deg(90.0);
        let p = r.transform_point3(Vec3::X);
        assert!((p - Vec3::NEG_Z).length() < EPS);
    }

    #[test]
    fn test_transform_normal_ignores_translation() {
        let m = Mat4::from_translation(Vec3::new(5.0, 5.0, 5.0)) * Mat4::from_scale(Vec3::splat(3.0));
        let n = transform_normal(&m, Vec3::Y);
        assert!((n - Vec3::Y).length() < EPS);
        assert_eq!(transform_normal(&m, Vec3::ZERO), Vec3::ZERO);
    }
}
