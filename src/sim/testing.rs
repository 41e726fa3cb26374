//! Test support: a body that records every force request

use glam::{Quat, Vec3};

use super::body::{ForceMode, RigidBody};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Applied {
    Force { force: Vec3, mode: ForceMode },
    ForceAt { force: Vec3, point: Vec3, mode: ForceMode },
    Torque { torque: Vec3, mode: ForceMode },
}

#[derive(Debug, Clone)]
pub struct RecordingBody {
    pub position: Vec3,
    pub rotation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub damping: (f32, f32),
    pub applied: Vec<Applied>,
}

impl Default for RecordingBody {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            damping: (0.0, 0.0),
            applied: Vec::new(),
        }
    }
}

impl RecordingBody {
    pub fn clear(&mut self) {
        self.applied.clear();
    }

    /// Sum of all forces in `mode`, including point forces
    pub fn total_force(&self, mode: ForceMode) -> Vec3 {
        self.applied
            .iter()
            .map(|a| match *a {
                Applied::Force { force, mode: m } | Applied::ForceAt { force, mode: m, .. }
                    if m == mode =>
                {
                    force
                }
                _ => Vec3::ZERO,
            })
            .sum()
    }

    pub fn total_torque(&self, mode: ForceMode) -> Vec3 {
        self.applied
            .iter()
            .map(|a| match *a {
                Applied::Torque { torque, mode: m } if m == mode => torque,
                _ => Vec3::ZERO,
            })
            .sum()
    }

    pub fn point_forces(&self) -> Vec<(Vec3, Vec3, ForceMode)> {
        self.applied
            .iter()
            .filter_map(|a| match *a {
                Applied::ForceAt { force, point, mode } => Some((force, point, mode)),
                _ => None,
            })
            .collect()
    }

    pub fn torque_calls(&self) -> usize {
        self.applied
            .iter()
            .filter(|a| matches!(a, Applied::Torque { .. }))
            .count()
    }
}

impl RigidBody for RecordingBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn linear_velocity(&self) -> Vec3 {
        self.linear_velocity
    }

    fn set_linear_velocity(&mut self, vel: Vec3) {
        self.linear_velocity = vel;
    }

    fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    fn set_angular_velocity(&mut self, vel: Vec3) {
        self.angular_velocity = vel;
    }

    fn set_damping(&mut self, linear: f32, angular: f32) {
        self.damping = (linear, angular);
    }

    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        self.applied.push(Applied::Force { force, mode });
    }

    fn add_force_at(&mut self, force: Vec3, point: Vec3, mode: ForceMode) {
        self.applied.push(Applied::ForceAt { force, point, mode });
    }

    fn add_torque(&mut self, torque: Vec3, mode: ForceMode) {
        self.applied.push(Applied::Torque { torque, mode });
    }
}
