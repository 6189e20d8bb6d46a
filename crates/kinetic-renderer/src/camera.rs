//! Camera projection fitted to a scene's bounds

use glam::{Mat4, Vec3};
use kinetic_core::{Bounds, SceneConfig};

/// Distance padding applied on top of the fitted viewing distance
const DISTANCE_PADDING: f32 = 1.1;

/// Perspective projection and view looking at a scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Perspective projection with the margin applied
    pub projection: Mat4,
    /// World to eye transform
    pub view: Mat4,
    pub eye: Vec3,
    pub target: Vec3,
}

impl Projection {
    /// Place the eye on the +Z side of `bounds`, far enough back that the whole
    /// box fits the horizontal and vertical fields of view.
    pub fn fit(bounds: &Bounds, config: &SceneConfig) -> Self {
        let fov_x = config.x_field_of_view.to_radians();
        let fov_y = config.y_field_of_view();

        let width_distance = bounds.width() / (2.0 * (fov_x / 2.0).tan());
        let height_distance = bounds.height() / (2.0 * (fov_y / 2.0).tan());
        let camera_z = bounds.near + width_distance.max(height_distance) * DISTANCE_PADDING;

        let target = bounds.midpoint();
        let eye = Vec3::new(target.x, target.y, camera_z);
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);

        let perspective = Mat4::perspective_rh_gl(
            fov_y,
            config.aspect_ratio,
            config.near_plane,
            config.far_plane,
        );
        let margins = Mat4::from_scale(Vec3::splat(config.margin));

        Self {
            projection: margins * perspective,
            view,
            eye,
            target,
        }
    }

    /// Combined world to clip transform
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Distance from the eye to the point it looks at
    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }
}
