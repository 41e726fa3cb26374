//! Paddle-stroke controller
//!
//! Blade contacts arrive as discrete events from the host's paddle collider;
//! everything else (glide carry-over, draw strokes, continuous drive) runs
//! once per physics step.

use glam::Vec3;

use super::body::{ForceMode, RigidBody};
use super::input::ManeuverIntent;
use crate::consts::{AXIS_THRESHOLD, GLIDE_EPSILON};
use crate::tuning::KayakTuning;
use crate::step_factor;

/// Forward nudge per contact when paddling straight (× forward_stroke_force)
const STRAIGHT_NUDGE: f32 = 0.1;
/// Forward nudge per contact while turning, and continuous drive strength
const TURN_NUDGE: f32 = 0.05;

#[derive(Debug, Clone, Default)]
pub struct PaddleStroke {
    glide: Vec3,
    draw_amount: f32,
    paddle_in_water: bool,
    reload_draw: bool,
    /// A draw was held on the previous step
    was_drawing: bool,
}

impl PaddleStroke {
    pub fn new() -> Self {
        Self::default()
    }

    /// Residual stroke force still being applied
    pub fn glide(&self) -> Vec3 {
        self.glide
    }

    /// Remaining draw-stroke force
    pub fn draw_amount(&self) -> f32 {
        self.draw_amount
    }

    pub fn paddle_in_water(&self) -> bool {
        self.paddle_in_water
    }

    /// Blade entered or left the water. Entering reloads the draw stroke;
    /// so does starting a draw with the blade already in.
    pub fn set_paddle_in_water(&mut self, in_water: bool) {
        if in_water && !self.paddle_in_water {
            self.reload_draw = true;
        }
        self.paddle_in_water = in_water;
    }

    /// No draw held this frame: the accumulator empties at once
    pub fn release_draw(&mut self) {
        self.draw_amount = 0.0;
        self.was_drawing = false;
    }

    /// Drop stroke state (scene restart)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Blade contact at `contact_point` moving with `paddle_velocity`
    pub fn apply_contact<B: RigidBody + ?Sized>(
        &mut self,
        body: &mut B,
        intent: &ManeuverIntent,
        tuning: &KayakTuning,
        contact_point: Vec3,
        paddle_velocity: Vec3,
    ) {
        // Draw strokes move the boat sideways on their own
        if intent.is_drawing() {
            return;
        }
        if !contact_point.is_finite() || !paddle_velocity.is_finite() {
            log::debug!("Ignoring non-finite paddle contact");
            return;
        }

        let forward = body.forward();
        let strength = paddle_velocity.length().clamp(0.0, tuning.forward_stroke_force);
        let push = forward * strength * intent.vertical;

        if intent.is_straight() {
            body.add_force_at(push, contact_point, ForceMode::Force);

            // Yaw follows the blade's lateral offset, at most one unit either side
            let local = body.inverse_transform_point(contact_point);
            let side = local.x.clamp(-1.0, 1.0);
            body.add_torque(Vec3::Y * side * tuning.turning_torque, ForceMode::Force);
        }

        self.glide = push * 0.5;

        let nudge = forward * tuning.forward_stroke_force * intent.vertical;
        if intent.horizontal.abs() < AXIS_THRESHOLD {
            body.add_force(nudge * STRAIGHT_NUDGE, ForceMode::Force);
        } else {
            body.add_force(nudge * TURN_NUDGE, ForceMode::Force);
            let steer = tuning.steer_torque_multiplier * tuning.turning_torque * -intent.horizontal;
            body.add_torque(Vec3::Y * steer, ForceMode::Force);
        }
    }

    /// Per-step stroke forces
    pub fn step<B: RigidBody + ?Sized>(
        &mut self,
        body: &mut B,
        intent: &ManeuverIntent,
        tuning: &KayakTuning,
        dt: f32,
    ) {
        self.apply_glide(body, tuning, dt);
        self.apply_draw(body, intent, tuning, dt);

        if !intent.is_drawing() {
            let direction = if intent.autopilot_forward {
                1
            } else {
                intent.move_direction
            };
            if direction != 0 {
                drive(body, tuning, direction as f32);
            }
        }
    }

    fn apply_glide<B: RigidBody + ?Sized>(&mut self, body: &mut B, tuning: &KayakTuning, dt: f32) {
        if self.glide.length() > GLIDE_EPSILON {
            body.add_force(self.glide, ForceMode::Force);
            self.glide *= step_factor(tuning.glide_decay, dt);
        } else {
            self.glide = Vec3::ZERO;
        }
    }

    fn apply_draw<B: RigidBody + ?Sized>(
        &mut self,
        body: &mut B,
        intent: &ManeuverIntent,
        tuning: &KayakTuning,
        dt: f32,
    ) {
        let entered = std::mem::take(&mut self.reload_draw);
        let started = !std::mem::replace(&mut self.was_drawing, intent.is_drawing());
        if !intent.is_drawing() {
            self.draw_amount = 0.0;
            return;
        }
        if entered || (started && self.paddle_in_water) {
            self.draw_amount = tuning.draw_stroke_force;
        }

        self.draw_amount = (self.draw_amount - tuning.draw_stroke_decay * dt).max(0.0);
        if self.draw_amount <= 0.0 {
            return;
        }

        let right = body.right();
        if intent.draw_left {
            body.add_force(-right * self.draw_amount, ForceMode::Force);
        }
        if intent.draw_right {
            body.add_force(right * self.draw_amount, ForceMode::Force);
        }
    }
}

/// Push toward `direction` (±1) until cruise speed is reached
fn drive<B: RigidBody + ?Sized>(body: &mut B, tuning: &KayakTuning, direction: f32) {
    let heading = body.forward() * direction;
    let speed = body.linear_velocity().dot(heading);
    if speed < tuning.cruise_speed() {
        body.add_force(heading * tuning.forward_stroke_force * TURN_NUDGE, ForceMode::Force);
    }
}
