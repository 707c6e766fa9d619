//! One play run: the plant plus everything that only lives as long as the
//! run does (clear effects, the clear banner, the last frequency reading).
//!
//! The whole session is rebuilt on reset, so nothing from a previous run
//! can leak into the next one.

use glam::Vec2;

use crate::api::game::EngineContext;
use crate::api::types::{GameEvent, GameResult, HudFrame, SoundEvent};
use crate::config::GameSettings;
use crate::core::timer::TickTimer;
use crate::input::source::AudioFrame;
use crate::systems::effects::{EffectsState, CLEAR_BURST};

use super::plant::{PlantState, PlantStateMachine, PlantTransition};

/// Ground line the plant grows up from, in world units (y grows downward).
pub const GROUND_Y: f32 = 420.0;
/// Horizontal position of the stem.
pub const PLANT_X: f32 = 400.0;
/// How long the clear banner stays up before the run hands over to the result.
pub const CLEAR_BANNER_SECONDS: f32 = 2.0;

pub struct PlaySession {
    plant: PlantStateMachine,
    effects: EffectsState,
    clear_banner: TickTimer,
    last_frequency: f32,
    finished: bool,
    seed: u64,
}

impl PlaySession {
    pub fn new(settings: &GameSettings, seed: u64) -> Self {
        PlaySession {
            plant: PlantStateMachine::new(settings),
            effects: EffectsState::new(seed),
            clear_banner: TickTimer::from_seconds(CLEAR_BANNER_SECONDS, settings.tick_rate),
            last_frequency: 0.0,
            finished: false,
            seed,
        }
    }

    /// Rebuild the session from the plant's current settings, including
    /// anything applied through `configure`.
    pub fn reset(&mut self) {
        let settings = *self.plant.settings();
        *self = PlaySession::new(&settings, self.seed);
    }

    pub fn configure(&mut self, settings: &GameSettings) {
        self.plant.configure(settings);
    }

    /// Advance one tick. Returns the outcome once the run is over: GameOver
    /// on the tick the voice is lost, Clear once the clear banner has run out.
    /// An outcome is reported at most once per session.
    pub fn tick(&mut self, frame: Option<AudioFrame>, ctx: &mut EngineContext) -> Option<GameResult> {
        self.effects.tick();
        if let Some(frame) = frame {
            self.last_frequency = frame.frequency_average;
        }

        let transition = self.plant.update(frame.map(|f| f.volume));

        if self.plant.take_clear_signal() {
            let impact = Vec2::new(PLANT_X, self.wall_y());
            self.effects.burst(impact, CLEAR_BURST, None);
            self.effects.crack_at(impact);
            self.clear_banner.start();
            ctx.emit_sound(SoundEvent::CLEAR);
            ctx.emit_event(GameEvent::cleared(self.plant.height(), self.plant.clear_line()));
        }

        let banner_done = self.clear_banner.tick();
        let outcome = match (transition, self.plant.plant_state()) {
            (Some(PlantTransition::GameOver), _) => Some(GameResult::GameOver),
            (_, PlantState::Cleared) if banner_done => Some(GameResult::Clear),
            _ => None,
        };

        if self.finished {
            return None;
        }
        if let Some(result) = outcome {
            self.finished = true;
            log::info!("session finished: {:?} at height {:.1}", result, self.plant.height());
        }
        outcome
    }

    /// Screen y of the wall, measured from the ground line.
    pub fn wall_y(&self) -> f32 {
        GROUND_Y - self.plant.clear_line()
    }

    pub fn plant(&self) -> &PlantStateMachine {
        &self.plant
    }

    pub fn effects(&self) -> &EffectsState {
        &self.effects
    }

    pub fn is_banner_visible(&self) -> bool {
        self.clear_banner.is_running()
    }

    pub fn draw(&self, hud: &mut HudFrame) {
        hud.plant_height = self.plant.height();
        hud.clear_line = Some(self.plant.clear_line());
        hud.prompt = self.plant.voice_prompt();
        hud.particle_count = self.effects.particle_count();
        hud.crack_intensity = self.effects.crack.intensity;
        hud.clear_banner = self.is_banner_visible();
        hud.frequency_average = self.last_frequency;
    }
}
