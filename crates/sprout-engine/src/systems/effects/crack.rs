//! Wall crack: radial fracture lines around the point where the plant
//! broke through, fading out over roughly three seconds.

use glam::Vec2;

use super::rng::Rng;

/// Play field the crack lengths are proportional to.
pub const FIELD_SIZE: Vec2 = Vec2::new(800.0, 600.0);
pub const MAIN_LINES: usize = 12;
const DECAY: f32 = 0.98;
const VISIBLE_CUTOFF: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrackLine {
    pub start: Vec2,
    pub end: Vec2,
    /// Main fractures are drawn thicker than branches.
    pub is_branch: bool,
}

#[derive(Debug, Clone, Default)]
pub struct WallCrack {
    pub lines: Vec<CrackLine>,
    /// 1.0 right after impact, decays to 0.
    pub intensity: f32,
}

impl WallCrack {
    /// Regenerate the fracture pattern around `impact` and light it up.
    pub fn trigger(&mut self, impact: Vec2, rng: &mut Rng) {
        self.lines.clear();
        self.intensity = 1.0;

        for i in 0..MAIN_LINES {
            let angle = i as f32 / MAIN_LINES as f32 * std::f32::consts::TAU;
            let length = rng.range(0.08, 0.23);
            let offset = Vec2::new(angle.cos(), angle.sin()) * length * FIELD_SIZE;
            self.lines.push(CrackLine { start: impact, end: impact + offset, is_branch: false });

            if rng.chance(0.5) {
                let branch_angle = angle + rng.range(-0.5, 0.5) * std::f32::consts::FRAC_PI_3;
                let branch_length = length * rng.range(0.4, 0.7);
                let start = impact + offset * rng.range(0.5, 0.8);
                let branch = Vec2::new(branch_angle.cos(), branch_angle.sin()) * branch_length * FIELD_SIZE;
                self.lines.push(CrackLine { start, end: start + branch, is_branch: true });
            }
        }
    }

    pub fn tick(&mut self) {
        if self.intensity > VISIBLE_CUTOFF {
            self.intensity *= DECAY;
        } else {
            self.intensity = 0.0;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.intensity > VISIBLE_CUTOFF
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.intensity = 0.0;
    }
}
