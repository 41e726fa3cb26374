//! Buoyancy and water drag
//!
//! Buoyancy samples the surface under each hull point and pushes up in
//! proportion to depth. Drag is recomputed from the current speed every
//! step because the integrator only honours the damping it is handed for
//! that step.

use glam::Vec3;

use super::body::{ForceMode, RigidBody};
use super::water::WaterSurface;
use crate::consts::GRAVITY;
use crate::tuning::KayakTuning;
use crate::step_factor;

/// Upward lift at a single hull point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lift {
    pub point: Vec3,
    pub depth: f32,
    pub force: Vec3,
}

/// Submersion depth of a world point (positive when under water)
#[inline]
pub fn depth_at(water: &dyn WaterSurface, point: Vec3) -> f32 {
    let depth = water.surface_height(point) - point.y;
    if depth.is_finite() { depth } else { 0.0 }
}

/// Multi-point buoyancy, falling back to the body origin when no points are set
pub fn apply_buoyancy<B: RigidBody + ?Sized>(
    body: &mut B,
    water: &dyn WaterSurface,
    points: &[Vec3],
) -> Vec<Lift> {
    if points.is_empty() {
        return apply_simple_buoyancy(body, water).into_iter().collect();
    }

    let mut lifts = Vec::with_capacity(points.len());
    for &local in points {
        let point = body.transform_point(local);
        let depth = depth_at(water, point);
        if depth > 0.0 {
            let force = Vec3::Y * depth * GRAVITY;
            body.add_force_at(force, point, ForceMode::Acceleration);
            lifts.push(Lift { point, depth, force });
        }
    }
    lifts
}

/// Whole-body buoyancy from the reference position only
pub fn apply_simple_buoyancy<B: RigidBody + ?Sized>(
    body: &mut B,
    water: &dyn WaterSurface,
) -> Option<Lift> {
    let point = body.position();
    let depth = depth_at(water, point).max(0.0);
    if depth <= 0.0 {
        return None;
    }
    let force = Vec3::Y * depth * GRAVITY;
    body.add_force(force, ForceMode::Acceleration);
    Some(Lift { point, depth, force })
}

/// Speed-proportional damping plus sideslip scrub
pub fn apply_drag<B: RigidBody + ?Sized>(body: &mut B, tuning: &KayakTuning, dt: f32) {
    let speed = body.linear_velocity().length();
    let spin = body.angular_velocity().length();
    let linear = tuning.drag_in_water + speed * tuning.drag_speed_factor;
    let angular = tuning.angular_drag_in_water + spin * tuning.angular_drag_speed_factor;
    if linear.is_finite() && angular.is_finite() {
        body.set_damping(linear, angular);
    }

    let mut local = body.inverse_transform_direction(body.linear_velocity());
    local.x *= step_factor(tuning.lateral_scrub, dt);
    let scrubbed = body.transform_direction(local);
    body.set_linear_velocity(crate::sanitize(scrubbed));
}

/// Constant push from flowing water, if configured
pub fn apply_current<B: RigidBody + ?Sized>(body: &mut B, tuning: &KayakTuning) {
    if let Some(current) = tuning.water_current {
        body.add_force(current.acceleration(), ForceMode::Acceleration);
    }
}
