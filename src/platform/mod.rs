//! Platform abstraction layer
//!
//! Host-side sinks for running the core without an engine. Each one
//! reports through the `log` facade, so the native demo's output is
//! controlled by `RUST_LOG`.

use crate::audio::{AudioSink, OneShot};
use crate::sim::health::HealthSink;
use crate::sim::input::{AnimFlag, AnimationSink};

/// Animator stand-in that logs flag transitions only
#[derive(Debug, Default)]
pub struct LogAnimationSink {
    raised: Vec<&'static str>,
}

impl LogAnimationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flags currently set
    pub fn raised(&self) -> &[&'static str] {
        &self.raised
    }
}

impl AnimationSink for LogAnimationSink {
    fn set_bool(&mut self, name: &'static str, value: bool) {
        let was = self.raised.contains(&name);
        match (was, value) {
            (false, true) => {
                self.raised.push(name);
                log::debug!("anim {name} on");
            }
            (true, false) => {
                self.raised.retain(|&n| n != name);
                log::debug!("anim {name} off");
            }
            _ => {}
        }
    }
}

/// Audio backend that just reports what would play
#[derive(Debug, Default)]
pub struct LogAudioSink {
    played: u32,
}

impl LogAudioSink {
    pub fn played(&self) -> u32 {
        self.played
    }
}

impl AudioSink for LogAudioSink {
    fn play_one_shot(&mut self, shot: &OneShot) {
        self.played += 1;
        log::debug!(
            "sfx {} pan={:+.2} pitch={:.2} vol={:.2}",
            shot.clip,
            shot.pan,
            shot.pitch,
            shot.volume
        );
    }
}

/// Health display stand-in
#[derive(Debug, Default)]
pub struct LogHealthSink;

impl HealthSink for LogHealthSink {
    fn health_changed(&mut self, health: u8) {
        log::info!("Health: {health}");
    }

    fn game_over(&mut self) {
        log::warn!("Game over");
    }
}

/// Every flag name the animator is expected to expose
pub fn animator_parameters() -> impl Iterator<Item = &'static str> {
    AnimFlag::ALL.into_iter().map(AnimFlag::name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_sink_tracks_transitions() {
        let mut sink = LogAnimationSink::new();
        sink.set_bool("ForwardStroking", true);
        sink.set_bool("ForwardStroking", true);
        sink.set_bool("LeftDrawStroking", false);
        assert_eq!(sink.raised(), ["ForwardStroking"]);

        sink.set_bool("ForwardStroking", false);
        assert!(sink.raised().is_empty());
    }

    #[test]
    fn animator_parameters_are_unique() {
        let mut names: Vec<_> = animator_parameters().collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), AnimFlag::ALL.len());
    }
}
