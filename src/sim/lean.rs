//! Visual lean
//!
//! Purely cosmetic roll of the visual model; never touches the rigid body.

use glam::Quat;

use super::input::ManeuverIntent;
use crate::consts::{DRAW_LEAN_FACTOR, WAVE_LEAN_FACTOR};

/// Target roll in degrees for this step
///
/// `wave` is the water's wave signal, or `None` when no surface is wired.
pub fn target_lean(intent: &ManeuverIntent, lean_amount: f32, wave: Option<f32>) -> f32 {
    let mut target = -intent.horizontal * lean_amount;

    if intent.draw_left {
        target = lean_amount * DRAW_LEAN_FACTOR;
    } else if intent.draw_right {
        target = -lean_amount * DRAW_LEAN_FACTOR;
    }

    // Going straight: rock with the waves instead
    if intent.vertical.abs() > 0.0 && intent.horizontal.abs() <= f32::EPSILON {
        if let Some(wave) = wave.filter(|w| w.is_finite()) {
            target = wave * -lean_amount * WAVE_LEAN_FACTOR;
        }
    }

    target
}

/// Smoothed local roll of the visual model
#[derive(Debug, Clone, Copy)]
pub struct LeanModel {
    rotation: Quat,
    target_deg: f32,
}

impl Default for LeanModel {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            target_deg: 0.0,
        }
    }
}

impl LeanModel {
    /// Local rotation to hand to the renderer
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn target_degrees(&self) -> f32 {
        self.target_deg
    }

    /// Current roll in degrees (signed, about the forward axis)
    pub fn roll_degrees(&self) -> f32 {
        let (axis, angle) = self.rotation.to_axis_angle();
        (angle * axis.z.signum()).to_degrees()
    }

    /// Slerp toward `target_deg` at `lean_speed` per second
    pub fn update(&mut self, target_deg: f32, lean_speed: f32, dt: f32) {
        self.target_deg = target_deg;
        let target = Quat::from_rotation_z(target_deg.to_radians());
        let t = (dt * lean_speed).clamp(0.0, 1.0);
        self.rotation = self.rotation.slerp(target, t).normalize();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lean_opposes_horizontal() {
        let intent = ManeuverIntent {
            horizontal: 1.0,
            ..Default::default()
        };
        assert_eq!(target_lean(&intent, 10.0, None), -10.0);
    }

    #[test]
    fn draw_leans_harder() {
        let left = ManeuverIntent {
            draw_left: true,
            ..Default::default()
        };
        let right = ManeuverIntent {
            draw_right: true,
            ..Default::default()
        };
        assert_eq!(target_lean(&left, 10.0, Some(0.5)), 11.25);
        assert_eq!(target_lean(&right, 10.0, Some(0.5)), -11.25);
    }

    #[test]
    fn straight_paddling_rocks_with_waves() {
        let intent = ManeuverIntent {
            vertical: 1.0,
            ..Default::default()
        };
        assert!((target_lean(&intent, 10.0, Some(0.5)) + 1.0).abs() < 1e-6);
        // No surface wired: plain lean
        assert_eq!(target_lean(&intent, 10.0, None), 0.0);
    }

    #[test]
    fn smoothing_approaches_target() {
        let mut lean = LeanModel::default();
        lean.update(10.0, 5.0, 0.02);
        let first = lean.roll_degrees();
        assert!(first > 0.0 && first < 10.0);

        for _ in 0..200 {
            lean.update(10.0, 5.0, 0.02);
        }
        assert!((lean.roll_degrees() - 10.0).abs() < 0.01);
    }

    #[test]
    fn large_step_snaps_to_target() {
        let mut lean = LeanModel::default();
        lean.update(-8.0, 5.0, 1.0);
        assert!((lean.roll_degrees() + 8.0).abs() < 1e-3);
    }
}
