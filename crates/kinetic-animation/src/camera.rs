//! Tracker-driven fly camera

use std::fmt;
use std::str::FromStr;

use glam::{Mat4, Vec3};
use kinetic_core::math;
use kinetic_core::CameraConfig;

use crate::tracker::{AnimationTracker, Direction};

/// One of the camera's six degrees of freedom, in eye coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraAxis {
    X,
    Y,
    Z,
    Pitch,
    Yaw,
    Roll,
}

impl CameraAxis {
    pub const ALL: [CameraAxis; 6] = [
        CameraAxis::X,
        CameraAxis::Y,
        CameraAxis::Z,
        CameraAxis::Pitch,
        CameraAxis::Yaw,
        CameraAxis::Roll,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn is_rotation(self) -> bool {
        matches!(self, CameraAxis::Pitch | CameraAxis::Yaw | CameraAxis::Roll)
    }
}

impl fmt::Display for CameraAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CameraAxis::X => "x",
            CameraAxis::Y => "y",
            CameraAxis::Z => "z",
            CameraAxis::Pitch => "rx",
            CameraAxis::Yaw => "ry",
            CameraAxis::Roll => "rz",
        };
        f.write_str(name)
    }
}

impl FromStr for CameraAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CameraAxis::ALL
            .into_iter()
            .find(|axis| axis.to_string() == s)
            .ok_or_else(|| format!("unknown camera axis {s:?}"))
    }
}

/// Camera whose view matrix is nudged by six trackers every frame
#[derive(Debug, Clone)]
pub struct Camera {
    trackers: [AnimationTracker; 6],
    view: Mat4,
}

impl Camera {
    pub fn new(config: &CameraConfig, view: Mat4) -> Self {
        let trackers = CameraAxis::ALL.map(|axis| {
            let speed = if axis.is_rotation() {
                config.turn_speed
            } else {
                config.move_speed
            };
            AnimationTracker::new(speed)
        });
        Self { trackers, view }
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn set_view(&mut self, view: Mat4) {
        self.view = view;
    }

    pub fn tracker(&self, axis: CameraAxis) -> &AnimationTracker {
        &self.trackers[axis.index()]
    }

    /// Start moving along `axis` in the direction of `sign`
    pub fn start_moving(&mut self, axis: CameraAxis, sign: f64, now: f64) {
        let tracker = &mut self.trackers[axis.index()];
        tracker.set_direction(Direction::from_sign(sign));
        tracker.start(now);
    }

    /// Stop moving along `axis`, unless it has since been reversed
    pub fn stop_moving(&mut self, axis: CameraAxis, sign: f64, now: f64) {
        let tracker = &mut self.trackers[axis.index()];
        if tracker.direction() == Direction::from_sign(sign) {
            tracker.stop(now);
        }
    }

    pub fn is_moving(&self) -> bool {
        self.trackers.iter().any(AnimationTracker::is_running)
    }

    /// Apply the motion accumulated since the last update and return the new view.
    ///
    /// Translations are in eye space and turns are in degrees; every tracker
    /// restarts from zero afterwards.
    pub fn update(&mut self, now: f64) -> Mat4 {
        let [dx, dy, dz, rx, ry, rz] = self.trackers.each_mut().map(|t| t.advance(now) as f32);
        for tracker in &mut self.trackers {
            tracker.reset();
        }

        self.view = Mat4::from_rotation_z(rz.to_radians())
            * Mat4::from_rotation_x(rx.to_radians())
            * Mat4::from_rotation_y(ry.to_radians())
            * Mat4::from_translation(Vec3::new(dx, dy, dz))
            * self.view;
        self.view
    }

    /// Turn the view about an eye-space `axis` by `degrees`
    pub fn reorient(&mut self, axis: Vec3, degrees: f32) {
        self.view = math::rotation_deg(degrees, axis) * self.view;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraConfig::default(), Mat4::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_translation_moves_view() {
        let mut camera = Camera::default();
        camera.start_moving(CameraAxis::X, 1.0, 0.0);
        let view = camera.update(100.0);
        // 0.01 units per millisecond
        let shifted = view.transform_point3(Vec3::ZERO);
        assert!((shifted - Vec3::new(1.0, 0.0, 0.0)).length() < EPS);
        assert_eq!(camera.tracker(CameraAxis::X).peek(), 0.0);
        assert!(camera.is_moving());
    }

    #[test]
    fn test_update_is_incremental() {
        let mut camera = Camera::default();
        camera.start_moving(CameraAxis::Z, -1.0, 0.0);
        camera.update(50.0);
        let view = camera.update(100.0);
        assert!((view.transform_point3(Vec3::ZERO).z + 1.0).abs() < EPS);
    }

    #[test]
    fn test_stop_requires_matching_direction() {
        let mut camera = Camera::default();
        camera.start_moving(CameraAxis::Y, 1.0, 0.0);
        camera.stop_moving(CameraAxis::Y, -1.0, 10.0);
        assert!(camera.tracker(CameraAxis::Y).is_running());
        camera.stop_moving(CameraAxis::Y, 1.0, 10.0);
        assert!(!camera.is_moving());
    }

    #[test]
    fn test_yaw_turns_view() {
        let mut camera = Camera::default();
        camera.start_moving(CameraAxis::Yaw, 1.0, 0.0);
        // 0.1 degrees per millisecond
        let view = camera.update(900.0);
        let expected = Mat4::from_rotation_y(90f32.to_radians());
        assert!(view.abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn test_roll_turns_view() {
        let mut camera = Camera::default();
        camera.start_moving(CameraAxis::Roll, -1.0, 0.0);
        let view = camera.update(900.0);
        let expected = Mat4::from_rotation_z(-90f32.to_radians());
        assert!(view.abs_diff_eq(expected, 1e-4));
        assert!((view.transform_vector3(Vec3::Y) - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_reorient_is_right_handed() {
        let mut camera = Camera::default();
        camera.reorient(Vec3::Z, 90.0);
        let turned = camera.view().transform_vector3(Vec3::X);
        assert!((turned - Vec3::Y).length() < EPS);
    }

    #[test]
    fn test_axis_names() {
        assert_eq!("ry".parse::<CameraAxis>(), Ok(CameraAxis::Yaw));
        assert!("w".parse::<CameraAxis>().is_err());
    }
}
