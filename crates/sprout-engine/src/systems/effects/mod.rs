//! Visual effects state: celebration particles and the wall crack.
//!
//! The core only simulates effects. Hosts read positions and alphas from
//! here (or counts from the HUD) and draw them however they like.

mod rng;
mod particle;
mod crack;

pub use rng::Rng;
pub use particle::{Particle, Rgb};
pub use crack::{CrackLine, WallCrack, FIELD_SIZE};

use glam::Vec2;

/// Particle count for the clear burst at the wall.
pub const CLEAR_BURST: usize = 100;
/// Particle count for the result screen celebration.
pub const RESULT_BURST: usize = 300;

/// All effects owned by one scene or session.
pub struct EffectsState {
    pub particles: Vec<Particle>,
    pub crack: WallCrack,
    pub rng: Rng,
}

impl EffectsState {
    pub fn new(seed: u64) -> Self {
        EffectsState {
            particles: Vec::with_capacity(RESULT_BURST),
            crack: WallCrack::default(),
            rng: Rng::new(seed.wrapping_add(7919)),
        }
    }

    /// Spray `count` particles from `center` in random directions.
    /// `color` of `None` picks a random warm colour per particle.
    pub fn burst(&mut self, center: Vec2, count: usize, color: Option<Rgb>) {
        for _ in 0..count {
            let angle = self.rng.range(0.0, std::f32::consts::TAU);
            let speed = self.rng.range(2.0, 7.0);
            let color = color.unwrap_or_else(|| Particle::warm_color(&mut self.rng));
            self.particles.push(Particle::new(center, speed, angle, color));
        }
    }

    /// Crack the wall at `impact`.
    pub fn crack_at(&mut self, impact: Vec2) {
        self.crack.trigger(impact, &mut self.rng);
    }

    /// Advance every effect by one tick and drop expired particles.
    pub fn tick(&mut self) {
        self.particles.retain_mut(|p| p.tick());
        self.crack.tick();
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn is_idle(&self) -> bool {
        self.particles.is_empty() && !self.crack.is_visible()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.crack.clear();
    }
}
