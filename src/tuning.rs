//! Kayak tuning
//!
//! Designer-facing coefficients, kept separate from runtime settings
//! (input source, volumes). Loaded from JSON; any missing field falls back
//! to the default feel.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Constant push from flowing water (acceleration mode)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterCurrent {
    /// Direction of the current; only the horizontal part is used
    pub direction: Vec3,
    pub multiplier: f32,
}

impl WaterCurrent {
    /// Acceleration applied to the hull every step
    pub fn acceleration(&self) -> Vec3 {
        Vec3::new(self.direction.x, 0.0, self.direction.z) * self.multiplier
    }
}

/// One-touch mobile steering coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeTuning {
    /// Constant forward acceleration
    pub forward_speed: f32,
    /// Yaw acceleration while a steer button is held
    pub steer_amount: f32,
    /// Angular speed cap for arcade mode (rad/s)
    pub max_angular_velocity: f32,
    /// Minimum seconds between paddle splashes
    pub paddle_sound_delay: f32,
    /// Stereo pan of the splash when steering
    pub steer_pan: f32,
}

impl Default for ArcadeTuning {
    fn default() -> Self {
        Self {
            forward_speed: 4.0,
            steer_amount: 1.5,
            max_angular_velocity: 3.0,
            paddle_sound_delay: 0.6,
            steer_pan: 0.3,
        }
    }
}

/// Gameplay tuning for the kayak
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KayakTuning {
    /// Cap on paddle-contact propulsion
    pub forward_stroke_force: f32,
    /// Linear speed cap (m/s)
    pub max_velocity: f32,
    /// Angular speed cap (rad/s)
    pub max_angular_velocity: f32,
    /// Base linear damping in water
    pub drag_in_water: f32,
    /// Base angular damping in water
    pub angular_drag_in_water: f32,
    /// Linear damping added per m/s of speed
    pub drag_speed_factor: f32,
    /// Angular damping added per rad/s of spin
    pub angular_drag_speed_factor: f32,
    /// Fraction of sideways velocity kept per reference step
    pub lateral_scrub: f32,
    /// Righting gain
    pub stability: f32,
    pub turning_torque: f32,
    pub steer_torque_multiplier: f32,
    /// Draw-stroke accumulator reload value
    pub draw_stroke_force: f32,
    /// Draw-stroke accumulator drain per second
    pub draw_stroke_decay: f32,
    /// Glide kept per reference step
    pub glide_decay: f32,
    /// Continuous drive stops above this fraction of `max_velocity`
    pub autopilot_speed_fraction: f32,
    /// Visual lean in degrees at full horizontal input
    pub lean_amount: f32,
    pub lean_speed: f32,
    /// Seconds before the same obstacle can hurt again
    pub hit_cooldown: f32,
    /// Evict hit records older than this many cooldowns (unbounded if `None`)
    pub hit_record_ttl_cooldowns: Option<f32>,
    /// Hull sample points in kayak-local space
    pub buoyancy_points: Vec<Vec3>,
    /// Buoyancy is supplied by a host plugin
    pub external_buoyancy: bool,
    /// Drag is supplied by a host plugin
    pub external_drag: bool,
    pub water_current: Option<WaterCurrent>,
    /// Enables the one-touch arcade steering mode
    pub arcade: Option<ArcadeTuning>,
}

impl Default for KayakTuning {
    fn default() -> Self {
        Self {
            forward_stroke_force: 12.0,
            max_velocity: 6.0,
            max_angular_velocity: 5.0,
            drag_in_water: 1.5,
            angular_drag_in_water: 3.0,
            drag_speed_factor: 0.05,
            angular_drag_speed_factor: 0.025,
            lateral_scrub: 0.8,
            stability: 10.0,
            turning_torque: 6.0,
            steer_torque_multiplier: 2.0,
            draw_stroke_force: 15.0,
            draw_stroke_decay: 15.0,
            glide_decay: 0.95,
            autopilot_speed_fraction: 0.6,
            lean_amount: 10.0,
            lean_speed: 5.0,
            hit_cooldown: 3.0,
            hit_record_ttl_cooldowns: None,
            buoyancy_points: Vec::new(),
            external_buoyancy: false,
            external_drag: false,
            water_current: None,
            arcade: None,
        }
    }
}

impl KayakTuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded kayak tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject coefficients that would make the step produce garbage
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("forward_stroke_force", self.forward_stroke_force),
            ("max_velocity", self.max_velocity),
            ("max_angular_velocity", self.max_angular_velocity),
            ("drag_in_water", self.drag_in_water),
            ("angular_drag_in_water", self.angular_drag_in_water),
            ("drag_speed_factor", self.drag_speed_factor),
            ("angular_drag_speed_factor", self.angular_drag_speed_factor),
            ("stability", self.stability),
            ("turning_torque", self.turning_torque),
            ("steer_torque_multiplier", self.steer_torque_multiplier),
            ("draw_stroke_force", self.draw_stroke_force),
            ("draw_stroke_decay", self.draw_stroke_decay),
            ("autopilot_speed_fraction", self.autopilot_speed_fraction),
            ("lean_speed", self.lean_speed),
            ("hit_cooldown", self.hit_cooldown),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTuning { field, value });
            }
        }

        let unit_interval = [
            ("lateral_scrub", self.lateral_scrub),
            ("glide_decay", self.glide_decay),
        ];
        for (field, value) in unit_interval {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidTuning { field, value });
            }
        }

        if !self.lean_amount.is_finite() {
            return Err(ConfigError::InvalidTuning {
                field: "lean_amount",
                value: self.lean_amount,
            });
        }

        if let Some(ttl) = self.hit_record_ttl_cooldowns {
            if !ttl.is_finite() || ttl < 1.0 {
                return Err(ConfigError::InvalidTuning {
                    field: "hit_record_ttl_cooldowns",
                    value: ttl,
                });
            }
        }

        if self.buoyancy_points.iter().any(|p| !p.is_finite()) {
            return Err(ConfigError::InvalidTuning {
                field: "buoyancy_points",
                value: f32::NAN,
            });
        }

        if let Some(arcade) = &self.arcade {
            let arcade_fields = [
                ("arcade.forward_speed", arcade.forward_speed),
                ("arcade.steer_amount", arcade.steer_amount),
                ("arcade.max_angular_velocity", arcade.max_angular_velocity),
                ("arcade.paddle_sound_delay", arcade.paddle_sound_delay),
            ];
            for (field, value) in arcade_fields {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::InvalidTuning { field, value });
                }
            }
        }

        Ok(())
    }

    /// Speed below which continuous drive keeps pushing
    pub fn cruise_speed(&self) -> f32 {
        self.max_velocity * self.autopilot_speed_fraction
    }
}
