//! Fixed timestep kayak phases
//!
//! The host drives three entry points:
//! - [`sample_input`] once per rendered frame
//! - [`tick`] once per fixed physics step
//! - [`handle_contact`] for each collision the physics engine reports
//!
//! Paddle blade contacts arrive through [`apply_paddle_force`].

use glam::Vec3;

use super::body::RigidBody;
use super::buoyancy::{apply_buoyancy, apply_current, apply_drag};
use super::health::{ContactEvent, Damage};
use super::input::{AnimFlags, ManeuverIntent, ManeuverState, RawInput, Side};
use super::lean::target_lean;
use super::stability::stabilize;
use super::state::{Kayak, KayakPhase};
use crate::clamp_magnitude;

/// Sample the active input source and publish animation flags
pub fn sample_input<B: RigidBody>(kayak: &mut Kayak<B>, raw: &RawInput) -> ManeuverIntent {
    if kayak.phase == KayakPhase::Sunk {
        kayak.intent = ManeuverIntent::default();
        kayak.maneuver = ManeuverState::Idle;
        publish_flags(kayak, AnimFlags::default());
        return kayak.intent;
    }

    let mut intent = kayak.input.sample(raw);

    let flags = match kayak.arcade.as_ref() {
        Some(arcade) => {
            // Always moving forward; the held button is the only steering
            intent.vertical = 1.0;
            intent.horizontal = match arcade.turn() {
                Some(Side::Left) => -1.0,
                Some(Side::Right) => 1.0,
                None => 0.0,
            };
            intent.draw_left = false;
            intent.draw_right = false;
            kayak.maneuver = arcade.maneuver();
            AnimFlags::from_state(kayak.maneuver)
        }
        None => {
            kayak.maneuver = ManeuverState::from_intent(&intent);
            AnimFlags::from_state(kayak.maneuver).with_move_direction(intent.move_direction)
        }
    };

    if !intent.is_drawing() {
        kayak.paddle.release_draw();
    }

    kayak.intent = intent;
    publish_flags(kayak, flags);
    intent
}

fn publish_flags<B: RigidBody>(kayak: &mut Kayak<B>, flags: AnimFlags) {
    if let Some(sink) = kayak.animation.as_deref_mut() {
        flags.apply(sink);
    }
}

/// Advance one fixed physics step of `dt` seconds
pub fn tick<B: RigidBody>(kayak: &mut Kayak<B>, dt: f32) {
    if kayak.phase == KayakPhase::Sunk {
        return;
    }
    if !(dt.is_finite() && dt > 0.0) {
        log::debug!("Skipping tick with invalid dt {dt}");
        return;
    }

    kayak.time += dt;
    kayak.ticks += 1;

    // Water forces
    if !kayak.tuning.external_buoyancy {
        if let Some(water) = kayak.water.as_deref() {
            let lifts = apply_buoyancy(&mut kayak.body, water, &kayak.tuning.buoyancy_points);
            log::trace!("Buoyancy: {} submerged points", lifts.len());
        }
    }
    if !kayak.tuning.external_drag {
        apply_drag(&mut kayak.body, &kayak.tuning, dt);
    }
    stabilize(&mut kayak.body, kayak.tuning.stability);
    apply_current(&mut kayak.body, &kayak.tuning);

    // Visual lean
    let wave = kayak.water.as_ref().map(|water| water.wave_frequency());
    let target = target_lean(&kayak.intent, kayak.tuning.lean_amount, wave);
    kayak.lean.update(target, kayak.tuning.lean_speed, dt);

    // Propulsion
    match (kayak.arcade.as_mut(), kayak.tuning.arcade.as_ref()) {
        (Some(arcade), Some(arcade_tuning)) => {
            arcade.step(&mut kayak.body, arcade_tuning, kayak.audio.as_mut(), kayak.time);
        }
        _ => {
            kayak.paddle.step(&mut kayak.body, &kayak.intent, &kayak.tuning, dt);
        }
    }

    // Speed caps
    let velocity = kayak.body.linear_velocity();
    kayak
        .body
        .set_linear_velocity(clamp_magnitude(velocity, kayak.tuning.max_velocity));
    let spin = kayak.body.angular_velocity();
    kayak
        .body
        .set_angular_velocity(clamp_magnitude(spin, kayak.tuning.max_angular_velocity));
}

/// Paddle blade contact reported by the host's paddle collider
pub fn apply_paddle_force<B: RigidBody>(kayak: &mut Kayak<B>, contact_point: Vec3, paddle_velocity: Vec3) {
    if kayak.phase == KayakPhase::Sunk || kayak.arcade.is_some() {
        return;
    }
    kayak.paddle.apply_contact(
        &mut kayak.body,
        &kayak.intent,
        &kayak.tuning,
        contact_point,
        paddle_velocity,
    );
}

/// Collision with another object
pub fn handle_contact<B: RigidBody>(kayak: &mut Kayak<B>, event: &ContactEvent) -> Option<Damage> {
    if kayak.phase == KayakPhase::Sunk {
        return None;
    }

    let damage = kayak.health.on_contact(event)?;

    if let Some(sink) = kayak.health_sink.as_deref_mut() {
        sink.health_changed(damage.health);
        if damage.fatal {
            sink.game_over();
        }
    }

    if damage.fatal {
        kayak.phase = KayakPhase::Sunk;
        log::info!("Kayak sunk at t={:.2}s after {} ticks", kayak.time, kayak.ticks);
    }

    Some(damage)
}
