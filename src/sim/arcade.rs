//! One-touch arcade steering
//!
//! Mobile control scheme: the kayak always accelerates forward and two hold
//! buttons yaw it left or right. A paddle splash plays at most once per
//! `paddle_sound_delay`, panned toward the turn.

use glam::Vec3;

use super::body::{ForceMode, RigidBody};
use super::input::{ManeuverState, Side};
use crate::audio::{AudioService, SoundThrottle};
use crate::clamp_magnitude;
use crate::tuning::ArcadeTuning;

#[derive(Debug, Clone, Default)]
pub struct ArcadeSteering {
    turning_left: bool,
    turning_right: bool,
    sound: SoundThrottle,
}

impl ArcadeSteering {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, side: Side) {
        match side {
            Side::Left => self.turning_left = true,
            Side::Right => self.turning_right = true,
        }
    }

    pub fn release(&mut self, side: Side) {
        match side {
            Side::Left => self.turning_left = false,
            Side::Right => self.turning_right = false,
        }
    }

    /// Held turn, left taking priority
    pub fn turn(&self) -> Option<Side> {
        if self.turning_left {
            Some(Side::Left)
        } else if self.turning_right {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Maneuver shown by the paddler
    pub fn maneuver(&self) -> ManeuverState {
        match self.turn() {
            Some(side) => ManeuverState::ForwardTurn(side),
            None => ManeuverState::Forward,
        }
    }

    /// Forward push, angular clamp and steering for one step
    pub fn step<B: RigidBody + ?Sized>(
        &mut self,
        body: &mut B,
        tuning: &ArcadeTuning,
        audio: Option<&mut AudioService>,
        now: f32,
    ) {
        body.add_force(body.forward() * tuning.forward_speed, ForceMode::Acceleration);

        let spin = body.angular_velocity();
        body.set_angular_velocity(clamp_magnitude(spin, tuning.max_angular_velocity));

        let (yaw, pan) = match self.turn() {
            Some(Side::Left) => (tuning.steer_amount, -tuning.steer_pan),
            Some(Side::Right) => (-tuning.steer_amount, tuning.steer_pan),
            None => (0.0, 0.0),
        };
        if yaw != 0.0 {
            body.add_torque(Vec3::Y * yaw, ForceMode::Acceleration);
        }

        if let Some(audio) = audio {
            if self.sound.ready(now, tuning.paddle_sound_delay) {
                audio.play_one_shot(pan);
            }
        }
    }
}
