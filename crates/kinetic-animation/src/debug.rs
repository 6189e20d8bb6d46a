//! Interactive helpers for poking at a running mobile

use crate::mobile::Mobile;

/// Zero every rotation, optionally stopping the trackers first
pub fn reset_rotations(mobile: &mut Mobile, stop: bool, now: f64) {
    mobile.for_each_mut(|node| {
        if stop {
            node.rotation.stop(now);
            node.arm_rotation.stop(now);
        }
        node.rotation.reset();
        node.arm_rotation.reset();
    });
}

/// Multiply every arm's spin speed by `factor`
pub fn scale_arm_speed(mobile: &mut Mobile, factor: f64) {
    mobile.for_each_mut(|node| {
        let scaled = node.arm_rotation.speed().scaled(factor);
        node.arm_rotation.set_speed(scaled);
    });
}

/// Move every tracker to `t`, or forward by `t` when `add` is set
pub fn set_time(mobile: &mut Mobile, t: f64, add: bool) {
    mobile.for_each_mut(|node| {
        for tracker in [&mut node.rotation, &mut node.arm_rotation] {
            if add {
                tracker.offset(t);
            } else {
                tracker.set_position(t);
            }
        }
    });
}

pub fn start(mobile: &mut Mobile, now: f64) {
    mobile.start_all(now);
}

pub fn stop(mobile: &mut Mobile, now: f64) {
    mobile.stop_all(now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_core::Mesh;

    fn hinge_pair() -> Mobile {
        let mut builder = Mobile::builder(Mesh::empty());
        builder
            .root()
            .radius(2.0)
            .parent_height(1.0)
            .child_height(1.0)
            .spin_speed(0.5)
            .arm_speed(0.25);
        builder.root().empty_left().unwrap().spin_speed(1.0);
        builder.root().empty_right().unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_set_time() {
        let mut mobile = hinge_pair();
        set_time(&mut mobile, 30.0, false);
        set_time(&mut mobile, 15.0, true);
        mobile.for_each(|node| {
            assert_eq!(node.rotation().peek(), 45.0);
            assert_eq!(node.arm_rotation().peek(), 45.0);
        });
    }

    #[test]
    fn test_reset_rotations() {
        let mut mobile = hinge_pair();
        start(&mut mobile, 0.0);
        set_time(&mut mobile, 10.0, true);

        reset_rotations(&mut mobile, false, 5.0);
        mobile.for_each(|node| {
            assert_eq!(node.rotation().peek(), 0.0);
            assert!(node.rotation().is_running());
        });

        reset_rotations(&mut mobile, true, 6.0);
        mobile.for_each(|node| {
            assert_eq!(node.arm_rotation().peek(), 0.0);
            assert!(!node.arm_rotation().is_running());
        });
    }

    #[test]
    fn test_scale_arm_speed() {
        let mut mobile = hinge_pair();
        scale_arm_speed(&mut mobile, 4.0);
        mobile.for_each(|node| assert_eq!(node.arm_rotation().speed().get(), 1.0));
        // Spin speeds are untouched
        assert_eq!(mobile.rotation().speed().get(), 0.5);
    }

    #[test]
    fn test_start_stop() {
        let mut mobile = hinge_pair();
        start(&mut mobile, 0.0);
        stop(&mut mobile, 100.0);
        assert_eq!(mobile.rotation().peek(), 50.0);
        assert_eq!(mobile.left().unwrap().rotation().peek(), 100.0);
        // The right hinge was built with zero spin
        assert_eq!(mobile.right().unwrap().rotation().peek(), 0.0);
    }
}
