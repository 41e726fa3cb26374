//! Collision damage and hit cooldowns

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_HEALTH;

/// Stable identity of an obstacle instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u64);

/// Obstacle severity classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleClass {
    Small,
    Medium,
    Large,
}

impl ObstacleClass {
    /// Category tag used by the host scene
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "SmallObstacle" => Some(Self::Small),
            "MediumObstacle" => Some(Self::Medium),
            "LargeObstacle" => Some(Self::Large),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Small => "SmallObstacle",
            Self::Medium => "MediumObstacle",
            Self::Large => "LargeObstacle",
        }
    }

    pub fn damage(self) -> u8 {
        match self {
            Self::Small => 10,
            Self::Medium => 20,
            Self::Large => 30,
        }
    }
}

/// Contact reported by the host collision system
#[derive(Debug, Clone)]
pub struct ContactEvent {
    pub obstacle: ObstacleId,
    /// Category tag of the other object (may be empty)
    pub tag: String,
    pub point: Vec3,
    /// Simulation time of the contact, in seconds
    pub time: f32,
}

impl ContactEvent {
    pub fn new(obstacle: ObstacleId, tag: impl Into<String>, time: f32) -> Self {
        Self {
            obstacle,
            tag: tag.into(),
            point: Vec3::ZERO,
            time,
        }
    }

    pub fn at(mut self, point: Vec3) -> Self {
        self.point = point;
        self
    }
}

/// Result of a contact that dealt damage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Damage {
    pub class: ObstacleClass,
    pub amount: u8,
    pub health: u8,
    /// This hit took health to zero
    pub fatal: bool,
}

/// Host health display
pub trait HealthSink {
    fn health_changed(&mut self, health: u8);
    fn game_over(&mut self);
}

/// Health plus the per-obstacle hit record
#[derive(Debug, Clone)]
pub struct HealthModel {
    health: u8,
    cooldown: f32,
    ttl_cooldowns: Option<f32>,
    last_hits: HashMap<ObstacleId, f32>,
}

impl HealthModel {
    pub fn new(cooldown: f32, ttl_cooldowns: Option<f32>) -> Self {
        Self {
            health: MAX_HEALTH,
            cooldown: cooldown.max(0.0),
            ttl_cooldowns,
            last_hits: HashMap::new(),
        }
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn is_depleted(&self) -> bool {
        self.health == 0
    }

    /// Override health (scene setup)
    pub fn set_health(&mut self, health: u8) {
        self.health = health.min(MAX_HEALTH);
    }

    pub fn last_hit(&self, obstacle: ObstacleId) -> Option<f32> {
        self.last_hits.get(&obstacle).copied()
    }

    pub fn tracked_obstacles(&self) -> usize {
        self.last_hits.len()
    }

    /// Restore full health and forget every hit
    pub fn reset(&mut self) {
        self.health = MAX_HEALTH;
        self.last_hits.clear();
    }

    /// Handle one contact. The first hit inside a cooldown window wins; later
    /// ones are ignored entirely.
    pub fn on_contact(&mut self, event: &ContactEvent) -> Option<Damage> {
        self.evict_stale(event.time);

        let class = ObstacleClass::from_tag(&event.tag)?;

        if let Some(last) = self.last_hits.get(&event.obstacle) {
            if event.time - last < self.cooldown {
                log::trace!("Ignoring repeat hit on {:?} inside cooldown", event.obstacle);
                return None;
            }
        }
        self.last_hits.insert(event.obstacle, event.time);

        let was_alive = self.health > 0;
        let amount = class.damage();
        self.health = self.health.saturating_sub(amount);

        let damage = Damage {
            class,
            amount,
            health: self.health,
            fatal: was_alive && self.health == 0,
        };
        log::info!(
            "Hit {} ({:?}): -{} -> health {}",
            class.tag(),
            event.obstacle,
            amount,
            self.health
        );
        Some(damage)
    }

    fn evict_stale(&mut self, now: f32) {
        let Some(ttl) = self.ttl_cooldowns else { return };
        let horizon = ttl * self.cooldown;
        self.last_hits.retain(|_, &mut last| now - last <= horizon);
    }
}
