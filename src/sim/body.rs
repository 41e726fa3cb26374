//! Rigid body contract
//!
//! The physics integrator belongs to the host engine. The kayak only reads
//! its pose and velocities and queues forces through [`RigidBody`].
//! [`SimBody`] is a small reference integrator used by the native demo and
//! by tests.

use glam::{Quat, Vec3};

/// How a force or torque is interpreted by the integrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Divided by mass (or inertia) before integrating
    Force,
    /// Mass-independent acceleration
    Acceleration,
}

/// Body axes: -Z forward, +X right, +Y up. A negative yaw torque turns right.
pub trait RigidBody {
    fn position(&self) -> Vec3;
    fn rotation(&self) -> Quat;
    fn linear_velocity(&self) -> Vec3;
    fn set_linear_velocity(&mut self, vel: Vec3);
    fn angular_velocity(&self) -> Vec3;
    fn set_angular_velocity(&mut self, vel: Vec3);
    /// Damping used for the next integration step
    fn set_damping(&mut self, linear: f32, angular: f32);
    fn add_force(&mut self, force: Vec3, mode: ForceMode);
    /// Force applied at a world-space point (produces torque about the center of mass)
    fn add_force_at(&mut self, force: Vec3, point: Vec3, mode: ForceMode);
    fn add_torque(&mut self, torque: Vec3, mode: ForceMode);

    fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    fn up(&self) -> Vec3 {
        self.rotation() * Vec3::Y
    }

    /// World point to body-local space
    fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation().inverse() * (point - self.position())
    }

    /// Body-local point to world space
    fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position() + self.rotation() * point
    }

    fn inverse_transform_direction(&self, dir: Vec3) -> Vec3 {
        self.rotation().inverse() * dir
    }

    fn transform_direction(&self, dir: Vec3) -> Vec3 {
        self.rotation() * dir
    }
}

/// Minimal semi-implicit Euler rigid body
#[derive(Debug, Clone)]
pub struct SimBody {
    pub position: Vec3,
    pub rotation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub mass: f32,
    /// Scalar moment of inertia
    pub inertia: f32,
    /// Gravity acceleration applied every step
    pub gravity: Vec3,
    linear_damping: f32,
    angular_damping: f32,
    accel: Vec3,
    angular_accel: Vec3,
}

impl Default for SimBody {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl SimBody {
    pub fn new(mass: f32, inertia: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass: mass.max(f32::EPSILON),
            inertia: inertia.max(f32::EPSILON),
            gravity: Vec3::ZERO,
            linear_damping: 0.0,
            angular_damping: 0.0,
            accel: Vec3::ZERO,
            angular_accel: Vec3::ZERO,
        }
    }

    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn damping(&self) -> (f32, f32) {
        (self.linear_damping, self.angular_damping)
    }

    /// Acceleration queued for the next step
    pub fn pending_acceleration(&self) -> Vec3 {
        self.accel
    }

    pub fn pending_angular_acceleration(&self) -> Vec3 {
        self.angular_accel
    }

    /// Advance by `dt`, consuming queued forces
    pub fn integrate(&mut self, dt: f32) {
        self.linear_velocity += (self.accel + self.gravity) * dt;
        self.linear_velocity *= 1.0 / (1.0 + dt * self.linear_damping);
        self.position += self.linear_velocity * dt;

        self.angular_velocity += self.angular_accel * dt;
        self.angular_velocity *= 1.0 / (1.0 + dt * self.angular_damping);
        let delta = Quat::from_scaled_axis(self.angular_velocity * dt);
        self.rotation = (delta * self.rotation).normalize();

        self.accel = Vec3::ZERO;
        self.angular_accel = Vec3::ZERO;
    }
}

impl RigidBody for SimBody {
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
        self.linear_damping = linear.max(0.0);
        self.angular_damping = angular.max(0.0);
    }

    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        self.accel += match mode {
            ForceMode::Force => force / self.mass,
            ForceMode::Acceleration => force,
        };
    }

    fn add_force_at(&mut self, force: Vec3, point: Vec3, mode: ForceMode) {
        self.add_force(force, mode);
        let torque = (point - self.position).cross(force);
        self.add_torque(torque, mode);
    }

    fn add_torque(&mut self, torque: Vec3, mode: ForceMode) {
        self.angular_accel += match mode {
            ForceMode::Force => torque / self.inertia,
            ForceMode::Acceleration => torque,
        };
    }
}
