use crate::api::types::{HudFrame, SoundEvent, GameEvent};
use crate::config::{GameSettings, DEFAULT_TICK_RATE};
use crate::input::queue::InputQueue;

/// Configuration for the runner, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl GameConfig {
    /// Default configuration running at `tick_rate` ticks per second.
    pub fn with_tick_rate(tick_rate: u32) -> Self {
        Self {
            fixed_dt: 1.0 / tick_rate.max(1) as f32,
            ..Self::default()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / DEFAULT_TICK_RATE as f32,
            world_width: 800.0,
            world_height: 600.0,
            max_sounds: 32,
            max_events: 32,
        }
    }
}

/// The contract between a game and the fixed-step runner.
pub trait Game {
    /// Return runner configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state and enter the first scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed tick. `input` carries this frame's events and, on the
    /// first tick of a frame only, the feature sample.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only pass that fills the HUD snapshot.
    fn render(&self, _ctx: &mut RenderContext) {}

    /// Settings loaded by the host after init. Values are already clamped.
    fn apply_settings(&mut self, _settings: &GameSettings) {}
}

/// Per-frame outputs collected from the game, passed to init and update.
#[derive(Debug, Default)]
pub struct EngineContext {
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a sound event to be forwarded to the host.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }

    /// Drop anything past the configured per-frame limits.
    pub fn truncate_to(&mut self, config: &GameConfig) {
        if self.sounds.len() > config.max_sounds {
            log::warn!("dropping {} sound events over the frame limit", self.sounds.len() - config.max_sounds);
            self.sounds.truncate(config.max_sounds);
        }
        if self.events.len() > config.max_events {
            log::warn!("dropping {} game events over the frame limit", self.events.len() - config.max_events);
            self.events.truncate(config.max_events);
        }
    }
}

/// Render context for filling the HUD snapshot.
pub struct RenderContext<'a> {
    pub hud: &'a mut HudFrame,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_data_is_cleared_and_capped() {
        let mut ctx = EngineContext::new();
        let config = GameConfig { max_sounds: 2, ..GameConfig::default() };
        for _ in 0..5 {
            ctx.emit_sound(SoundEvent::COUNTDOWN);
        }
        ctx.emit_event(GameEvent::default());
        ctx.truncate_to(&config);
        assert_eq!(ctx.sounds.len(), 2);
        assert_eq!(ctx.events.len(), 1);
        ctx.clear_frame_data();
        assert!(ctx.sounds.is_empty() && ctx.events.is_empty());
    }

    #[test]
    fn tick_rate_sets_fixed_dt() {
        let config = GameConfig::with_tick_rate(30);
        assert!((config.fixed_dt - 1.0 / 30.0).abs() < 1e-6);
    }
}
