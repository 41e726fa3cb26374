//! Deterministic kayak simulation
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Fixed timestep only; every decay and smoothing rate is scaled by `dt`
//! - Seeded RNG only (audio jitter)
//! - No rendering or engine dependencies: the rigid body, water, animator
//!   and health display are traits the host implements

pub mod arcade;
pub mod body;
pub mod buoyancy;
pub mod health;
pub mod input;
pub mod lean;
pub mod paddle;
pub mod stability;
pub mod state;
pub mod tick;
pub mod water;

#[cfg(test)]
pub(crate) mod testing;

pub use arcade::ArcadeSteering;
pub use body::{ForceMode, RigidBody, SimBody};
pub use buoyancy::{Lift, apply_buoyancy, apply_drag};
pub use health::{ContactEvent, Damage, HealthModel, HealthSink, ObstacleClass, ObstacleId};
pub use input::{
    AnimFlag, AnimFlags, AnimationSink, Button, InputAdapter, KeyState, ManeuverIntent,
    ManeuverState, RawInput, Side, TouchPhase, TouchSample,
};
pub use lean::LeanModel;
pub use paddle::PaddleStroke;
pub use stability::stabilize;
pub use state::{Kayak, KayakBuilder, KayakPhase};
pub use tick::{apply_paddle_force, handle_contact, sample_input, tick};
pub use water::{FlatWater, WaterSurface, WaveWater};
