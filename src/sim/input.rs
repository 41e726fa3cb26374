//! Input adapter
//!
//! Turns whichever input source is active into one [`ManeuverIntent`] per
//! input-sample tick, and maps that intent to a single [`ManeuverState`]
//! whose animation flags come from one table.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::AXIS_THRESHOLD;
use crate::settings::{ControlSettings, InputSource};

/// Discrete key state for the keyboard source
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyState {
    pub forward: bool,
    pub reverse: bool,
    pub left: bool,
    pub right: bool,
    pub draw_left: bool,
    pub draw_right: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    Canceled,
}

/// Primary touch for this frame, in screen pixels (y up)
#[derive(Debug, Clone, Copy)]
pub struct TouchSample {
    pub phase: TouchPhase,
    pub position: Vec2,
}

/// Raw device snapshot supplied by the host each frame
#[derive(Debug, Clone, Copy, Default)]
pub struct RawInput {
    /// Stick axes: x = horizontal, y = vertical
    pub stick: Vec2,
    /// Draw axis: negative = left draw, positive = right draw
    pub draw_axis: f32,
    pub keys: KeyState,
    pub touch: Option<TouchSample>,
}

/// On-screen steering buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

/// Normalized per-tick intent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ManeuverIntent {
    /// -1 reverse .. 1 forward
    pub vertical: f32,
    /// -1 left .. 1 right
    pub horizontal: f32,
    pub draw_left: bool,
    pub draw_right: bool,
    /// Autopilot forced vertical to full forward
    pub autopilot_forward: bool,
    /// Latched drive from buttons or touch drag: -1, 0 or 1
    pub move_direction: i8,
}

impl ManeuverIntent {
    #[inline]
    pub fn is_drawing(&self) -> bool {
        self.draw_left || self.draw_right
    }

    /// Paddling straight: vertical input with no horizontal input at all
    #[inline]
    pub fn is_straight(&self) -> bool {
        self.vertical.abs() > AXIS_THRESHOLD && self.horizontal == 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Mutually exclusive maneuver for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ManeuverState {
    #[default]
    Idle,
    Forward,
    Reverse,
    /// Forward while turning toward `Side`
    ForwardTurn(Side),
    /// Reverse while turning toward `Side`
    ReverseTurn(Side),
    /// Turning in place toward `Side`
    Sweep(Side),
    Draw(Side),
    DrawBoth,
}

impl ManeuverState {
    pub fn from_intent(intent: &ManeuverIntent) -> Self {
        let forward = intent.vertical > AXIS_THRESHOLD;
        let reverse = intent.vertical < -AXIS_THRESHOLD;
        let right = intent.horizontal > AXIS_THRESHOLD;
        let left = intent.horizontal < -AXIS_THRESHOLD;

        match (forward, reverse, left, right) {
            (true, _, _, true) => Self::ForwardTurn(Side::Right),
            (true, _, true, _) => Self::ForwardTurn(Side::Left),
            (_, true, _, true) => Self::ReverseTurn(Side::Right),
            (_, true, true, _) => Self::ReverseTurn(Side::Left),
            // Draws suppress every other stroke
            _ if intent.draw_left && intent.draw_right => Self::DrawBoth,
            _ if intent.draw_left => Self::Draw(Side::Left),
            _ if intent.draw_right => Self::Draw(Side::Right),
            (true, ..) => Self::Forward,
            (_, true, ..) => Self::Reverse,
            (.., true) => Self::Sweep(Side::Right),
            (_, _, true, _) => Self::Sweep(Side::Left),
            _ => Self::Idle,
        }
    }

    /// Animation flags raised by this state. Strokes that turn the boat are
    /// taken on the opposite side.
    pub fn flags(self) -> &'static [AnimFlag] {
        use AnimFlag::*;
        match self {
            Self::Idle => &[],
            Self::Forward => &[ForwardStroking],
            Self::Reverse => &[ReverseStroking],
            Self::ForwardTurn(Side::Right) => &[LeftForwardStroking],
            Self::ForwardTurn(Side::Left) => &[RightForwardStroking],
            Self::ReverseTurn(Side::Right) => &[LeftReverseStroking],
            Self::ReverseTurn(Side::Left) => &[RightReverseStroking],
            Self::Sweep(Side::Right) => &[LeftSweepStroking],
            Self::Sweep(Side::Left) => &[RightSweepStroking],
            Self::Draw(Side::Left) => &[LeftDrawStroking],
            Self::Draw(Side::Right) => &[RightDrawStroking],
            Self::DrawBoth => &[LeftDrawStroking, RightDrawStroking],
        }
    }
}

/// Animator boolean parameters driven by the kayak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimFlag {
    ForwardStroking,
    ReverseStroking,
    LeftForwardStroking,
    RightForwardStroking,
    LeftReverseStroking,
    RightReverseStroking,
    LeftSweepStroking,
    RightSweepStroking,
    LeftDrawStroking,
    RightDrawStroking,
}

impl AnimFlag {
    pub const ALL: [AnimFlag; 10] = [
        AnimFlag::ForwardStroking,
        AnimFlag::ReverseStroking,
        AnimFlag::LeftForwardStroking,
        AnimFlag::RightForwardStroking,
        AnimFlag::LeftReverseStroking,
        AnimFlag::RightReverseStroking,
        AnimFlag::LeftSweepStroking,
        AnimFlag::RightSweepStroking,
        AnimFlag::LeftDrawStroking,
        AnimFlag::RightDrawStroking,
    ];

    /// Parameter name on the animator
    pub fn name(self) -> &'static str {
        match self {
            AnimFlag::ForwardStroking => "ForwardStroking",
            AnimFlag::ReverseStroking => "ReverseStroking",
            AnimFlag::LeftForwardStroking => "LeftForwardStroking",
            AnimFlag::RightForwardStroking => "RightForwardStroking",
            AnimFlag::LeftReverseStroking => "LeftReverseStroking",
            AnimFlag::RightReverseStroking => "RightReverseStroking",
            AnimFlag::LeftSweepStroking => "LeftSweepStroking",
            AnimFlag::RightSweepStroking => "RightSweepStroking",
            AnimFlag::LeftDrawStroking => "LeftDrawStroking",
            AnimFlag::RightDrawStroking => "RightDrawStroking",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Host animator
pub trait AnimationSink {
    fn set_bool(&mut self, name: &'static str, value: bool);
}

/// Complete flag set for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimFlags([bool; 10]);

impl AnimFlags {
    pub fn from_state(state: ManeuverState) -> Self {
        let mut flags = Self::default();
        for &flag in state.flags() {
            flags.set(flag, true);
        }
        flags
    }

    /// A latched drive direction forces the straight stroke flags
    pub fn with_move_direction(mut self, direction: i8) -> Self {
        match direction {
            1 => {
                self.set(AnimFlag::ForwardStroking, true);
                self.set(AnimFlag::ReverseStroking, false);
            }
            -1 => {
                self.set(AnimFlag::ForwardStroking, false);
                self.set(AnimFlag::ReverseStroking, true);
            }
            _ => {}
        }
        self
    }

    pub fn get(&self, flag: AnimFlag) -> bool {
        self.0[flag.index()]
    }

    pub fn set(&mut self, flag: AnimFlag, value: bool) {
        self.0[flag.index()] = value;
    }

    /// Write every flag, clearing the ones not raised this tick
    pub fn apply(&self, sink: &mut dyn AnimationSink) {
        for flag in AnimFlag::ALL {
            sink.set_bool(flag.name(), self.get(flag));
        }
    }
}

/// Samples the active input source and keeps button / touch latches
#[derive(Debug, Clone)]
pub struct InputAdapter {
    pub source: InputSource,
    pub autopilot: bool,
    drag_threshold: f32,
    turn_left: bool,
    turn_right: bool,
    move_direction: i8,
    drag_start: Option<Vec2>,
}

impl InputAdapter {
    pub fn new(source: InputSource, autopilot: bool, drag_threshold: f32) -> Self {
        Self {
            source,
            autopilot,
            drag_threshold: drag_threshold.max(0.0),
            turn_left: false,
            turn_right: false,
            move_direction: 0,
            drag_start: None,
        }
    }

    pub fn from_settings(settings: &ControlSettings) -> Self {
        Self::new(settings.input_source, settings.autopilot, settings.drag_threshold_px)
    }

    pub fn move_direction(&self) -> i8 {
        self.move_direction
    }

    /// Pointer-down on an on-screen button
    pub fn button_down(&mut self, button: Button) {
        if !self.source.uses_buttons() {
            return;
        }
        match button {
            Button::LeftUp | Button::LeftDown => self.turn_left = true,
            Button::RightUp | Button::RightDown => self.turn_right = true,
        }
        self.move_direction = match button {
            Button::LeftUp | Button::RightUp => 1,
            Button::LeftDown | Button::RightDown => -1,
        };
    }

    /// Pointer-up on an on-screen button
    pub fn button_up(&mut self, button: Button) {
        if !self.source.uses_buttons() {
            return;
        }
        match button {
            Button::LeftUp | Button::LeftDown => self.turn_left = false,
            Button::RightUp | Button::RightDown => self.turn_right = false,
        }
        self.move_direction = 0;
    }

    /// Produce this tick's intent from the active source
    pub fn sample(&mut self, raw: &RawInput) -> ManeuverIntent {
        let mut intent = ManeuverIntent::default();

        match self.source {
            InputSource::Analog => {
                intent.vertical = axis(raw.stick.y);
                intent.horizontal = axis(raw.stick.x);
                let draw = axis(raw.draw_axis);
                intent.draw_left = draw < -AXIS_THRESHOLD;
                intent.draw_right = draw > AXIS_THRESHOLD;
            }
            InputSource::Keyboard => {
                intent.vertical = key_axis(raw.keys.reverse, raw.keys.forward);
                intent.horizontal = key_axis(raw.keys.left, raw.keys.right);
                intent.draw_left = raw.keys.draw_left;
                intent.draw_right = raw.keys.draw_right;
            }
            InputSource::Buttons => {}
            InputSource::TouchDrag => {
                if let Some(touch) = raw.touch {
                    self.track_touch(touch);
                }
            }
        }

        if self.source.uses_buttons() {
            if self.turn_left {
                intent.horizontal = -1.0;
            } else if self.turn_right {
                intent.horizontal = 1.0;
            }
        }

        if self.autopilot {
            intent.vertical = 1.0;
            intent.autopilot_forward = true;
        }

        intent.move_direction = self.move_direction;
        intent
    }

    fn track_touch(&mut self, touch: TouchSample) {
        match touch.phase {
            TouchPhase::Began => self.drag_start = Some(touch.position),
            TouchPhase::Moved => {
                let Some(start) = self.drag_start else { return };
                let delta = touch.position - start;
                if delta.y.abs() > self.drag_threshold {
                    self.move_direction = if delta.y > 0.0 { 1 } else { -1 };
                    // Re-anchor so a long drag doesn't retrigger every frame
                    self.drag_start = Some(touch.position);
                    log::debug!("Touch drag latched direction {}", self.move_direction);
                }
            }
            TouchPhase::Ended | TouchPhase::Canceled => self.drag_start = None,
        }
    }
}

#[inline]
fn axis(value: f32) -> f32 {
    if value.is_finite() { value.clamp(-1.0, 1.0) } else { 0.0 }
}

#[inline]
fn key_axis(negative: bool, positive: bool) -> f32 {
    (positive as i8 - negative as i8) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter(source: InputSource) -> InputAdapter {
        InputAdapter::new(source, false, 50.0)
    }

    fn touch(phase: TouchPhase, x: f32, y: f32) -> RawInput {
        RawInput {
            touch: Some(TouchSample {
                phase,
                position: Vec2::new(x, y),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn analog_reads_stick_and_draw_axis() {
        let mut input = adapter(InputSource::Analog);
        let raw = RawInput {
            stick: Vec2::new(0.5, -2.0),
            draw_axis: 0.4,
            ..Default::default()
        };
        let intent = input.sample(&raw);
        assert_eq!(intent.vertical, -1.0);
        assert_eq!(intent.horizontal, 0.5);
        assert!(intent.draw_right && !intent.draw_left);
    }

    #[test]
    fn analog_draw_axis_has_dead_band() {
        let mut input = adapter(InputSource::Analog);
        let raw = RawInput {
            draw_axis: -0.05,
            ..Default::default()
        };
        assert!(!input.sample(&raw).is_drawing());
    }

    #[test]
    fn non_finite_axes_read_as_zero() {
        let mut input = adapter(InputSource::Analog);
        let raw = RawInput {
            stick: Vec2::new(f32::NAN, f32::INFINITY),
            ..Default::default()
        };
        let intent = input.sample(&raw);
        assert_eq!(intent.vertical, 0.0);
        assert_eq!(intent.horizontal, 0.0);
    }

    #[test]
    fn keyboard_keys_map_to_axes() {
        let mut input = adapter(InputSource::Keyboard);
        let raw = RawInput {
            keys: KeyState {
                forward: true,
                left: true,
                draw_right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let intent = input.sample(&raw);
        assert_eq!(intent.vertical, 1.0);
        assert_eq!(intent.horizontal, -1.0);
        assert!(intent.draw_right);
    }

    #[test]
    fn button_latch_overrides_horizontal_until_released() {
        let mut input = adapter(InputSource::Keyboard);
        let raw = RawInput {
            keys: KeyState {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };

        input.button_down(Button::LeftUp);
        let intent = input.sample(&raw);
        assert_eq!(intent.horizontal, -1.0);
        assert_eq!(intent.move_direction, 1);

        // Latch persists across ticks
        assert_eq!(input.sample(&raw).horizontal, -1.0);

        input.button_up(Button::LeftUp);
        let intent = input.sample(&raw);
        assert_eq!(intent.horizontal, 1.0);
        assert_eq!(intent.move_direction, 0);
    }

    #[test]
    fn down_buttons_latch_reverse() {
        let mut input = adapter(InputSource::Buttons);
        input.button_down(Button::RightDown);
        let intent = input.sample(&RawInput::default());
        assert_eq!(intent.horizontal, 1.0);
        assert_eq!(intent.move_direction, -1);
    }

    #[test]
    fn analog_source_ignores_buttons() {
        let mut input = adapter(InputSource::Analog);
        input.button_down(Button::LeftUp);
        let intent = input.sample(&RawInput::default());
        assert_eq!(intent.horizontal, 0.0);
        assert_eq!(intent.move_direction, 0);
    }

    #[test]
    fn touch_drag_needs_threshold() {
        let mut input = adapter(InputSource::TouchDrag);
        input.sample(&touch(TouchPhase::Began, 100.0, 100.0));
        input.sample(&touch(TouchPhase::Moved, 100.0, 140.0));
        assert_eq!(input.move_direction(), 0);

        input.sample(&touch(TouchPhase::Moved, 100.0, 160.0));
        assert_eq!(input.move_direction(), 1);
    }

    #[test]
    fn touch_drag_latch_survives_release() {
        let mut input = adapter(InputSource::TouchDrag);
        input.sample(&touch(TouchPhase::Began, 0.0, 200.0));
        input.sample(&touch(TouchPhase::Moved, 0.0, 120.0));
        input.sample(&touch(TouchPhase::Ended, 0.0, 120.0));
        assert_eq!(input.sample(&RawInput::default()).move_direction, -1);

        // A move without a fresh touch-down does nothing
        input.sample(&touch(TouchPhase::Moved, 0.0, 400.0));
        assert_eq!(input.move_direction(), -1);
    }

    #[test]
    fn autopilot_forces_full_forward() {
        let mut input = InputAdapter::new(InputSource::Keyboard, true, 50.0);
        let raw = RawInput {
            keys: KeyState {
                reverse: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let intent = input.sample(&raw);
        assert_eq!(intent.vertical, 1.0);
        assert!(intent.autopilot_forward);
    }

    #[test]
    fn turning_strokes_take_opposite_side() {
        let intent = ManeuverIntent {
            vertical: 1.0,
            horizontal: 1.0,
            ..Default::default()
        };
        let state = ManeuverState::from_intent(&intent);
        assert_eq!(state, ManeuverState::ForwardTurn(Side::Right));
        assert_eq!(state.flags(), &[AnimFlag::LeftForwardStroking]);
    }

    #[test]
    fn draw_suppresses_straight_strokes() {
        let intent = ManeuverIntent {
            vertical: 1.0,
            draw_left: true,
            ..Default::default()
        };
        let flags = AnimFlags::from_state(ManeuverState::from_intent(&intent));
        assert!(flags.get(AnimFlag::LeftDrawStroking));
        assert!(!flags.get(AnimFlag::ForwardStroking));
    }

    #[test]
    fn sweep_without_vertical() {
        let intent = ManeuverIntent {
            horizontal: -1.0,
            ..Default::default()
        };
        assert_eq!(
            ManeuverState::from_intent(&intent),
            ManeuverState::Sweep(Side::Left)
        );
    }

    #[test]
    fn every_flag_is_reachable() {
        let states = [
            ManeuverState::Forward,
            ManeuverState::Reverse,
            ManeuverState::ForwardTurn(Side::Left),
            ManeuverState::ForwardTurn(Side::Right),
            ManeuverState::ReverseTurn(Side::Left),
            ManeuverState::ReverseTurn(Side::Right),
            ManeuverState::Sweep(Side::Left),
            ManeuverState::Sweep(Side::Right),
            ManeuverState::DrawBoth,
        ];
        for flag in AnimFlag::ALL {
            assert!(
                states.iter().any(|s| s.flags().contains(&flag)),
                "{} unreachable",
                flag.name()
            );
        }
    }

    #[test]
    fn move_direction_overrides_stroke_flags() {
        let flags = AnimFlags::from_state(ManeuverState::Reverse).with_move_direction(1);
        assert!(flags.get(AnimFlag::ForwardStroking));
        assert!(!flags.get(AnimFlag::ReverseStroking));
    }

    #[test]
    fn apply_clears_unset_flags() {
        struct Sink(Vec<(&'static str, bool)>);
        impl AnimationSink for Sink {
            fn set_bool(&mut self, name: &'static str, value: bool) {
                self.0.push((name, value));
            }
        }

        let mut sink = Sink(Vec::new());
        AnimFlags::from_state(ManeuverState::Forward).apply(&mut sink);
        assert_eq!(sink.0.len(), AnimFlag::ALL.len());
        assert_eq!(sink.0.iter().filter(|(_, v)| *v).count(), 1);
        assert!(sink.0.contains(&("ForwardStroking", true)));
        assert!(sink.0.contains(&("LeftDrawStroking", false)));
    }
}
