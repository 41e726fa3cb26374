//! Kayak aggregate and assembly
//!
//! A `Kayak` owns its rigid-body handle and every per-craft controller.
//! Collaborators are injected through [`KayakBuilder`]; missing optional
//! ones disable the behaviour that needs them instead of failing later.

use glam::Quat;
use serde::{Deserialize, Serialize};

use super::arcade::ArcadeSteering;
use super::body::RigidBody;
use super::health::{HealthModel, HealthSink};
use super::input::{AnimationSink, Button, InputAdapter, ManeuverIntent, ManeuverState, Side};
use super::lean::LeanModel;
use super::paddle::PaddleStroke;
use super::water::WaterSurface;
use crate::audio::{AudioService, OneShot};
use crate::error::ConfigError;
use crate::settings::ControlSettings;
use crate::tuning::KayakTuning;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KayakPhase {
    /// Normal play
    Paddling,
    /// Health hit zero; the host freezes the scene
    Sunk,
}

/// A single simulated kayak
pub struct Kayak<B: RigidBody> {
    pub tuning: KayakTuning,
    pub(crate) body: B,
    pub(crate) water: Option<Box<dyn WaterSurface>>,
    pub(crate) animation: Option<Box<dyn AnimationSink>>,
    pub(crate) health_sink: Option<Box<dyn HealthSink>>,
    pub(crate) audio: Option<AudioService>,
    pub(crate) input: InputAdapter,
    pub(crate) paddle: PaddleStroke,
    pub(crate) lean: LeanModel,
    pub(crate) health: HealthModel,
    pub(crate) arcade: Option<ArcadeSteering>,
    pub(crate) intent: ManeuverIntent,
    pub(crate) maneuver: ManeuverState,
    pub(crate) phase: KayakPhase,
    /// Simulation time in seconds
    pub(crate) time: f32,
    pub(crate) ticks: u64,
}

impl<B: RigidBody> Kayak<B> {
    pub fn body(&self) -> &B {
        &self.body
    }

    /// Host integrator access
    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    pub fn intent(&self) -> &ManeuverIntent {
        &self.intent
    }

    pub fn maneuver(&self) -> ManeuverState {
        self.maneuver
    }

    pub fn phase(&self) -> KayakPhase {
        self.phase
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn health(&self) -> u8 {
        self.health.health()
    }

    pub fn health_model(&self) -> &HealthModel {
        &self.health
    }

    pub fn paddle(&self) -> &PaddleStroke {
        &self.paddle
    }

    pub fn input(&self) -> &InputAdapter {
        &self.input
    }

    /// Local rotation for the visual model
    pub fn visual_tilt(&self) -> Quat {
        self.lean.rotation()
    }

    pub fn lean(&self) -> &LeanModel {
        &self.lean
    }

    pub fn is_arcade(&self) -> bool {
        self.arcade.is_some()
    }

    pub fn has_water(&self) -> bool {
        self.water.is_some()
    }

    /// Paddle blade entered or left the water
    pub fn set_paddle_in_water(&mut self, in_water: bool) {
        self.paddle.set_paddle_in_water(in_water);
    }

    /// On-screen button pressed
    pub fn button_down(&mut self, button: Button) {
        match self.arcade.as_mut() {
            Some(arcade) => arcade.press(button_side(button)),
            None => self.input.button_down(button),
        }
    }

    /// On-screen button released
    pub fn button_up(&mut self, button: Button) {
        match self.arcade.as_mut() {
            Some(arcade) => arcade.release(button_side(button)),
            None => self.input.button_up(button),
        }
    }

    /// Stroke splash, e.g. from an animation event
    pub fn play_paddle_sound(&mut self, pan: f32) -> Option<OneShot> {
        self.audio.as_mut()?.play_one_shot(pan)
    }

    /// Scene restart: full health, no stroke state, back to paddling
    pub fn restart(&mut self) {
        self.health.reset();
        self.paddle.reset();
        self.lean.reset();
        self.intent = ManeuverIntent::default();
        self.maneuver = ManeuverState::Idle;
        self.phase = KayakPhase::Paddling;
        self.time = 0.0;
        self.ticks = 0;
        if let Some(sink) = self.health_sink.as_mut() {
            sink.health_changed(self.health.health());
        }
        log::info!("Kayak restarted");
    }
}

fn button_side(button: Button) -> Side {
    match button {
        Button::LeftUp | Button::LeftDown => Side::Left,
        Button::RightUp | Button::RightDown => Side::Right,
    }
}

/// Wires a kayak to its collaborators
pub struct KayakBuilder<B: RigidBody> {
    tuning: KayakTuning,
    settings: ControlSettings,
    body: Option<B>,
    water: Option<Box<dyn WaterSurface>>,
    animation: Option<Box<dyn AnimationSink>>,
    health_sink: Option<Box<dyn HealthSink>>,
    audio: Option<AudioService>,
}

impl<B: RigidBody> KayakBuilder<B> {
    pub fn new(tuning: KayakTuning) -> Self {
        Self {
            tuning,
            settings: ControlSettings::default(),
            body: None,
            water: None,
            animation: None,
            health_sink: None,
            audio: None,
        }
    }

    pub fn settings(mut self, settings: ControlSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    pub fn water(mut self, water: impl WaterSurface + 'static) -> Self {
        self.water = Some(Box::new(water));
        self
    }

    pub fn animation(mut self, sink: impl AnimationSink + 'static) -> Self {
        self.animation = Some(Box::new(sink));
        self
    }

    pub fn health_sink(mut self, sink: impl HealthSink + 'static) -> Self {
        self.health_sink = Some(Box::new(sink));
        self
    }

    pub fn audio(mut self, audio: AudioService) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Validate tuning and wiring
    pub fn build(self) -> Result<Kayak<B>, ConfigError> {
        self.tuning.validate()?;
        let body = self.body.ok_or(ConfigError::MissingRigidBody)?;

        if self.water.is_none() && !self.tuning.external_buoyancy {
            log::warn!("No water surface wired - buoyancy and wave lean disabled");
        }
        if self.animation.is_none() {
            log::warn!("No animation sink wired - stroke animations disabled");
        }
        if self.health_sink.is_none() {
            log::info!("No health sink wired - health changes are not displayed");
        }
        if self.audio.is_none() {
            log::info!("No audio service wired - paddle sounds disabled");
        }

        let arcade = self.tuning.arcade.map(|_| ArcadeSteering::new());
        let health = HealthModel::new(self.tuning.hit_cooldown, self.tuning.hit_record_ttl_cooldowns);

        log::info!(
            "Kayak assembled: input={}, autopilot={}, arcade={}, buoyancy points={}",
            self.settings.input_source.as_str(),
            self.settings.autopilot,
            arcade.is_some(),
            self.tuning.buoyancy_points.len()
        );

        Ok(Kayak {
            input: InputAdapter::from_settings(&self.settings),
            tuning: self.tuning,
            body,
            water: self.water,
            animation: self.animation,
            health_sink: self.health_sink,
            audio: self.audio,
            paddle: PaddleStroke::new(),
            lean: LeanModel::default(),
            health,
            arcade,
            intent: ManeuverIntent::default(),
            maneuver: ManeuverState::Idle,
            phase: KayakPhase::Paddling,
            time: 0.0,
            ticks: 0,
        })
    }
}
