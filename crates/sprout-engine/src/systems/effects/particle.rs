//! Celebration particles: ballistic dots that fade out over 100 ticks.

use glam::Vec2;

use super::rng::Rng;

/// RGB, 0..=255 per channel.
pub type Rgb = [u8; 3];

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// 1.0 at spawn, dead at 0.
    pub life: f32,
    pub color: Rgb,
}

impl Particle {
    pub const GRAVITY: f32 = 0.2;
    pub const HORIZONTAL_DRAG: f32 = 0.98;
    pub const LIFE_DECAY: f32 = 0.01;

    pub fn new(position: Vec2, speed: f32, angle: f32, color: Rgb) -> Self {
        Particle {
            position,
            velocity: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: 1.0,
            color,
        }
    }

    /// Random warm colour: red to orange to yellow.
    pub fn warm_color(rng: &mut Rng) -> Rgb {
        [
            rng.range(155.0, 255.0) as u8,
            rng.range(100.0, 200.0) as u8,
            rng.range(0.0, 50.0) as u8,
        ]
    }

    /// Advance one tick. Returns false when expired.
    pub fn tick(&mut self) -> bool {
        self.position += self.velocity;
        self.velocity.y += Self::GRAVITY;
        self.velocity.x *= Self::HORIZONTAL_DRAG;
        self.life -= Self::LIFE_DECAY;
        self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Draw alpha, 0..=255.
    pub fn alpha(&self) -> f32 {
        self.life.max(0.0) * 255.0
    }
}
