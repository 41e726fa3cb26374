//! Kayak Runner - kayak physics and control core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (buoyancy, paddle strokes, lean, health)
//! - `tuning`: Data-driven kayak coefficients
//! - `settings`: Control scheme and audio preferences
//! - `audio`: Owned one-shot audio service
//! - `platform`: Host-side sink adapters (logging backends for the native demo)

pub mod audio;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use settings::{ControlSettings, InputSource};
pub use tuning::KayakTuning;

use glam::Vec3;

/// Simulation constants
pub mod consts {
    /// Fixed simulation timestep (50 Hz physics)
    pub const SIM_DT: f32 = 1.0 / 50.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Gravity used to scale buoyancy (m/s²)
    pub const GRAVITY: f32 = 9.81;

    /// Per-step decay factors (glide, lateral scrub) are tuned against this step
    pub const REFERENCE_STEP: f32 = 0.02;

    /// Stabilization does nothing below this tilt (degrees)
    pub const TILT_DEAD_ZONE_DEG: f32 = 5.0;
    /// Fraction of angular velocity removed while stabilizing
    pub const STABILITY_ANGULAR_DAMPING: f32 = 0.1;

    /// Analog dead-band for stick and draw axes
    pub const AXIS_THRESHOLD: f32 = 0.1;
    /// Glide below this magnitude is dropped
    pub const GLIDE_EPSILON: f32 = 0.01;

    /// Lean multiplier while a draw stroke is held
    pub const DRAW_LEAN_FACTOR: f32 = 1.125;
    /// Lean multiplier applied to the wave signal when paddling straight
    pub const WAVE_LEAN_FACTOR: f32 = 0.2;

    /// Starting (and maximum) health
    pub const MAX_HEALTH: u8 = 100;
}

/// Replace a non-finite vector with zero
#[inline]
pub fn sanitize(v: Vec3) -> Vec3 {
    if v.is_finite() { v } else { Vec3::ZERO }
}

/// Clamp a vector's magnitude to `max`, preserving direction
///
/// Non-finite input collapses to zero rather than propagating NaN into the body.
#[inline]
pub fn clamp_magnitude(v: Vec3, max: f32) -> Vec3 {
    let v = sanitize(v);
    let len = v.length();
    if len > max && len > 0.0 {
        v * (max / len)
    } else {
        v
    }
}

/// Scale a per-reference-step factor to an arbitrary `dt`
///
/// `factor` is what one `REFERENCE_STEP` multiplies by; the result keeps the
/// decay rate independent of the host's fixed step.
#[inline]
pub fn step_factor(factor: f32, dt: f32) -> f32 {
    factor.powf(dt / consts::REFERENCE_STEP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_magnitude_preserves_direction() {
        let v = Vec3::new(3.0, 0.0, 4.0);
        let c = clamp_magnitude(v, 2.5);
        assert!((c.length() - 2.5).abs() < 1e-5);
        assert!(c.normalize().abs_diff_eq(v.normalize(), 1e-6));
    }

    #[test]
    fn clamp_magnitude_leaves_slow_vectors() {
        let v = Vec3::new(0.5, 0.1, 0.0);
        assert_eq!(clamp_magnitude(v, 6.0), v);
    }

    #[test]
    fn clamp_magnitude_rejects_nan() {
        assert_eq!(clamp_magnitude(Vec3::new(f32::NAN, 1.0, 0.0), 6.0), Vec3::ZERO);
    }

    #[test]
    fn step_factor_matches_reference_step() {
        assert_eq!(step_factor(0.95, consts::REFERENCE_STEP), 0.95);
        let two = step_factor(0.95, consts::REFERENCE_STEP * 2.0);
        assert!((two - 0.95 * 0.95).abs() < 1e-6);
    }
}
