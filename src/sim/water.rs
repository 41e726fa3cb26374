//! Water surface providers

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

/// Host water surface
pub trait WaterSurface {
    /// Surface height under a world position
    fn surface_height(&self, position: Vec3) -> f32;
    /// Current wave signal, roughly in [-1, 1]; drives visual rocking
    fn wave_frequency(&self) -> f32;
}

/// Shared handle, so the host can keep animating a surface the kayak samples
impl<W: WaterSurface> WaterSurface for Rc<RefCell<W>> {
    fn surface_height(&self, position: Vec3) -> f32 {
        self.borrow().surface_height(position)
    }

    fn wave_frequency(&self) -> f32 {
        self.borrow().wave_frequency()
    }
}

/// Still water at a fixed height
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatWater {
    pub height: f32,
}

impl WaterSurface for FlatWater {
    fn surface_height(&self, _position: Vec3) -> f32 {
        self.height
    }

    fn wave_frequency(&self) -> f32 {
        0.0
    }
}

/// Single travelling sine wave
#[derive(Debug, Clone, Copy)]
pub struct WaveWater {
    pub base_height: f32,
    pub amplitude: f32,
    pub wavelength: f32,
    /// Radians per second
    pub speed: f32,
    /// Current simulation time (advanced by the host)
    pub time: f32,
}

impl Default for WaveWater {
    fn default() -> Self {
        Self {
            base_height: 0.0,
            amplitude: 0.15,
            wavelength: 8.0,
            speed: 1.5,
            time: 0.0,
        }
    }
}

impl WaveWater {
    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
    }

    fn phase(&self, along: f32) -> f32 {
        let k = std::f32::consts::TAU / self.wavelength.max(0.1);
        k * along - self.speed * self.time
    }
}

impl WaterSurface for WaveWater {
    fn surface_height(&self, position: Vec3) -> f32 {
        self.base_height + self.amplitude * self.phase(position.z).sin()
    }

    fn wave_frequency(&self) -> f32 {
        (self.speed * self.time).sin()
    }
}
