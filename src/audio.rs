//! Paddle audio
//!
//! The kayak only ever asks for one-shot splashes. The service owns the
//! jitter RNG and volume state; the host supplies the backend that actually
//! plays a clip.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::ControlSettings;

/// A resolved one-shot ready for the backend
#[derive(Debug, Clone, PartialEq)]
pub struct OneShot {
    /// Clip name picked from the pool
    pub clip: String,
    /// Stereo pan (-1 left, +1 right)
    pub pan: f32,
    pub pitch: f32,
    /// Final volume, already scaled by master and sfx volume
    pub volume: f32,
}

/// Host audio backend
pub trait AudioSink {
    fn play_one_shot(&mut self, shot: &OneShot);
}

/// Owned audio service for one play session
pub struct AudioService {
    sink: Box<dyn AudioSink>,
    rng: Pcg32,
    clips: Vec<String>,
    pitch_range: (f32, f32),
    volume_range: (f32, f32),
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioService {
    pub fn new(sink: Box<dyn AudioSink>, clips: Vec<String>, seed: u64) -> Self {
        if clips.is_empty() {
            log::warn!("Audio service has no clips - paddle sounds disabled");
        }
        Self {
            sink,
            rng: Pcg32::seed_from_u64(seed),
            clips,
            pitch_range: (0.85, 1.15),
            volume_range: (0.8, 1.0),
            master_volume: 1.0,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Build a service using the volumes and seed from control settings
    pub fn from_settings(sink: Box<dyn AudioSink>, clips: Vec<String>, settings: &ControlSettings) -> Self {
        let mut service = Self::new(sink, clips, settings.audio_seed);
        service.set_master_volume(settings.master_volume);
        service.set_sfx_volume(settings.sfx_volume);
        service.set_muted(settings.muted);
        service
    }

    /// Override the pitch jitter range
    pub fn with_pitch_range(mut self, min: f32, max: f32) -> Self {
        self.pitch_range = (min.min(max), min.max(max));
        self
    }

    /// Override the volume jitter range
    pub fn with_volume_range(mut self, min: f32, max: f32) -> Self {
        self.volume_range = (min.min(max), min.max(max));
        self
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a random clip with jittered pitch and volume
    ///
    /// Returns the shot handed to the backend, or `None` if nothing played.
    pub fn play_one_shot(&mut self, pan: f32) -> Option<OneShot> {
        let vol = self.effective_volume();
        if vol <= 0.0 || self.clips.is_empty() {
            return None;
        }

        let clip = self.clips[self.rng.random_range(0..self.clips.len())].clone();
        let pitch = jitter(&mut self.rng, self.pitch_range);
        let volume = jitter(&mut self.rng, self.volume_range) * vol;

        let shot = OneShot {
            clip,
            pan: pan.clamp(-1.0, 1.0),
            pitch,
            volume,
        };
        self.sink.play_one_shot(&shot);
        Some(shot)
    }
}

fn jitter(rng: &mut Pcg32, (min, max): (f32, f32)) -> f32 {
    if max > min { rng.random_range(min..=max) } else { min }
}

/// Rate limiter for repeated sounds, driven by simulation time
#[derive(Debug, Clone, Default)]
pub struct SoundThrottle {
    next_time: f32,
}

impl SoundThrottle {
    /// Returns true (and re-arms) if `now` has reached the next allowed time
    pub fn ready(&mut self, now: f32, delay: f32) -> bool {
        if now >= self.next_time {
            self.next_time = now + delay;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<OneShot>>>);

    impl AudioSink for Recorder {
        fn play_one_shot(&mut self, shot: &OneShot) {
            self.0.borrow_mut().push(shot.clone());
        }
    }

    fn clips() -> Vec<String> {
        vec!["splash_a".into(), "splash_b".into(), "splash_c".into()]
    }

    #[test]
    fn one_shot_stays_within_jitter_ranges() {
        let rec = Recorder::default();
        let mut audio = AudioService::new(Box::new(rec.clone()), clips(), 7);
        audio.set_master_volume(0.5);

        for _ in 0..200 {
            let shot = audio.play_one_shot(-0.3).unwrap();
            assert!((0.85..=1.15).contains(&shot.pitch));
            assert!((0.4..=0.5).contains(&shot.volume));
            assert_eq!(shot.pan, -0.3);
            assert!(clips().contains(&shot.clip));
        }
        assert_eq!(rec.0.borrow().len(), 200);
    }

    #[test]
    fn muted_service_plays_nothing() {
        let rec = Recorder::default();
        let mut audio = AudioService::new(Box::new(rec.clone()), clips(), 7);
        audio.set_muted(true);
        assert!(audio.play_one_shot(0.0).is_none());
        assert!(rec.0.borrow().is_empty());
    }

    #[test]
    fn empty_pool_plays_nothing() {
        let mut audio = AudioService::new(Box::new(Recorder::default()), Vec::new(), 7);
        assert!(audio.play_one_shot(0.0).is_none());
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = AudioService::new(Box::new(Recorder::default()), clips(), 42);
        let mut b = AudioService::new(Box::new(Recorder::default()), clips(), 42);
        for _ in 0..20 {
            assert_eq!(a.play_one_shot(0.0), b.play_one_shot(0.0));
        }
    }

    #[test]
    fn throttle_waits_for_delay() {
        let mut throttle = SoundThrottle::default();
        assert!(throttle.ready(0.0, 0.6));
        assert!(!throttle.ready(0.3, 0.6));
        assert!(throttle.ready(0.6, 0.6));
        assert!(!throttle.ready(1.0, 0.6));
    }
}
