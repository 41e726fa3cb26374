//! Self-righting torque

use glam::Vec3;

use super::body::{ForceMode, RigidBody};
use crate::consts::{STABILITY_ANGULAR_DAMPING, TILT_DEAD_ZONE_DEG};

/// Angle between the hull's up axis and world up, in degrees
pub fn tilt_degrees(up: Vec3) -> f32 {
    let up = up.normalize_or_zero();
    if up == Vec3::ZERO {
        return 0.0;
    }
    up.dot(Vec3::Y).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Corrective torque for the current pose, or `None` inside the dead-zone
pub fn righting_torque(up: Vec3, angular_velocity: Vec3, stability: f32) -> Option<Vec3> {
    if tilt_degrees(up) <= TILT_DEAD_ZONE_DEG {
        return None;
    }
    let correction = up.cross(Vec3::Y) * stability;
    Some(correction - angular_velocity * STABILITY_ANGULAR_DAMPING)
}

/// Apply the righting torque (acceleration mode). Returns what was applied.
pub fn stabilize<B: RigidBody + ?Sized>(body: &mut B, stability: f32) -> Option<Vec3> {
    let torque = righting_torque(body.up(), body.angular_velocity(), stability)?;
    let torque = crate::sanitize(torque);
    body.add_torque(torque, ForceMode::Acceleration);
    Some(torque)
}

#[cfg(test)]
mod tests {
    use glam::Quat;
    use proptest::prelude::*;

    use super::*;
    use crate::sim::testing::RecordingBody;

    #[test]
    fn upright_hull_has_no_tilt() {
        assert_eq!(tilt_degrees(Vec3::Y), 0.0);
    }

    #[test]
    fn small_tilt_is_ignored() {
        let mut body = RecordingBody {
            rotation: Quat::from_rotation_z(4.0f32.to_radians()),
            angular_velocity: Vec3::new(0.5, 0.0, 0.0),
            ..Default::default()
        };
        assert!(stabilize(&mut body, 10.0).is_none());
        assert_eq!(body.torque_calls(), 0);
    }

    #[test]
    fn large_tilt_rights_the_hull() {
        let mut body = RecordingBody {
            rotation: Quat::from_rotation_z(30.0f32.to_radians()),
            ..Default::default()
        };
        let torque = stabilize(&mut body, 10.0).unwrap();
        // Rolled toward +Z rotation; correction rolls back
        assert!(torque.z < 0.0);
        assert_eq!(body.total_torque(ForceMode::Acceleration), torque);
    }

    #[test]
    fn spin_is_damped() {
        let up = Quat::from_rotation_x(20.0f32.to_radians()) * Vec3::Y;
        let still = righting_torque(up, Vec3::ZERO, 10.0).unwrap();
        let spinning = righting_torque(up, Vec3::Y * 2.0, 10.0).unwrap();
        assert!((still - spinning - Vec3::Y * 0.2).length() < 1e-6);
    }

    proptest! {
        #[test]
        fn dead_zone_applies_no_torque(angle in -4.9f32..4.9, spin in -5.0f32..5.0) {
            let mut body = RecordingBody {
                rotation: Quat::from_rotation_x(angle.to_radians()),
                angular_velocity: Vec3::splat(spin),
                ..Default::default()
            };
            prop_assert!(stabilize(&mut body, 10.0).is_none());
            prop_assert_eq!(body.total_torque(ForceMode::Acceleration), Vec3::ZERO);
        }
    }
}
