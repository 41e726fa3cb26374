//! Control settings and preferences
//!
//! Chosen per build or per session by the host; never persisted by this crate.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which device drives the kayak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputSource {
    /// Two-axis stick plus a draw axis (gamepad)
    Analog,
    /// Discrete keys (W/S/A/D + Q/E draws), on-screen buttons still override
    #[default]
    Keyboard,
    /// On-screen directional buttons only
    Buttons,
    /// Vertical touch drags latch forward/reverse
    TouchDrag,
}

impl InputSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputSource::Analog => "Analog",
            InputSource::Keyboard => "Keyboard",
            InputSource::Buttons => "Buttons",
            InputSource::TouchDrag => "TouchDrag",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "analog" | "gamepad" => Some(InputSource::Analog),
            "keyboard" | "keys" => Some(InputSource::Keyboard),
            "buttons" => Some(InputSource::Buttons),
            "touch" | "touchdrag" => Some(InputSource::TouchDrag),
            _ => None,
        }
    }

    /// Whether on-screen button latches are honoured for this source
    pub fn uses_buttons(&self) -> bool {
        matches!(self, InputSource::Keyboard | InputSource::Buttons)
    }
}

/// Control and audio preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    /// Active input source
    pub input_source: InputSource,
    /// Always paddle forward regardless of input
    pub autopilot: bool,
    /// Minimum vertical drag (pixels) before a touch latches a direction
    pub drag_threshold_px: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    /// Seed for audio jitter
    pub audio_seed: u64,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            input_source: InputSource::Keyboard,
            autopilot: false,
            drag_threshold_px: 50.0,

            master_volume: 1.0,
            sfx_volume: 1.0,
            muted: false,

            audio_seed: 0x6b61_7961_6b,
        }
    }
}

impl ControlSettings {
    /// Settings for a mobile build: touch input, always moving forward
    pub fn mobile() -> Self {
        Self {
            input_source: InputSource::TouchDrag,
            autopilot: true,
            ..Self::default()
        }
    }

    /// Parse settings from JSON, clamping volumes into range
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        if !settings.drag_threshold_px.is_finite() || settings.drag_threshold_px < 0.0 {
            return Err(ConfigError::InvalidTuning {
                field: "drag_threshold_px",
                value: settings.drag_threshold_px,
            });
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_source_round_trips_names() {
        for source in [
            InputSource::Analog,
            InputSource::Keyboard,
            InputSource::Buttons,
            InputSource::TouchDrag,
        ] {
            assert_eq!(InputSource::from_str(source.as_str()), Some(source));
        }
        assert_eq!(InputSource::from_str("joystick"), None);
    }

    #[test]
    fn json_volumes_are_clamped() {
        let settings =
            ControlSettings::from_json(r#"{ "master_volume": 3.0, "input_source": "Analog" }"#)
                .unwrap();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.input_source, InputSource::Analog);
        assert_eq!(settings.drag_threshold_px, 50.0);
    }

    #[test]
    fn mobile_preset_enables_autopilot() {
        let settings = ControlSettings::mobile();
        assert!(settings.autopilot);
        assert_eq!(settings.input_source, InputSource::TouchDrag);
    }
}
