use glam::Vec2;

use crate::api::game::EngineContext;
use crate::api::types::{GameResult, HudFrame};
use crate::input::queue::{custom, find_custom};
use crate::systems::effects::{EffectsState, RESULT_BURST};

use super::manager::{Scene, SceneCommand, SceneFrame, SceneName};

const SHAKE_TICKS: u32 = 10;
const SHAKE_INTENSITY: f32 = 20.0;
const FADE_STEP: f32 = 8.0;
const BURST_CENTER: Vec2 = Vec2::new(400.0, 300.0);
const SEED: u64 = 777;

/// Final screen. The outcome is handed over explicitly before the switch;
/// entering never substitutes a default for it.
pub struct ResultScene {
    outcome: Option<GameResult>,
    effects: EffectsState,
    shake_ticks: u32,
    shake: Vec2,
    fade_alpha: f32,
}

impl ResultScene {
    pub fn new() -> Self {
        Self {
            outcome: None,
            effects: EffectsState::new(SEED),
            shake_ticks: 0,
            shake: Vec2::ZERO,
            fade_alpha: 0.0,
        }
    }

    fn roll_shake(&mut self) {
        if self.shake_ticks == 0 {
            self.shake = Vec2::ZERO;
            return;
        }
        let intensity = self.shake_ticks as f32 / SHAKE_TICKS as f32 * SHAKE_INTENSITY;
        let rng = &mut self.effects.rng;
        self.shake = Vec2::new(rng.range(-1.0, 1.0), rng.range(-1.0, 1.0)) * intensity;
    }
}

impl Default for ResultScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for ResultScene {
    fn on_enter(&mut self, _ctx: &mut EngineContext) {
        match self.outcome {
            Some(GameResult::Clear) => {
                self.shake_ticks = 0;
                self.fade_alpha = 255.0;
                self.effects.burst(BURST_CENTER, RESULT_BURST, None);
            }
            Some(GameResult::GameOver) => {
                self.shake_ticks = SHAKE_TICKS;
                self.fade_alpha = 0.0;
            }
            None => {
                log::warn!("result scene entered without an outcome");
                self.shake_ticks = 0;
                self.fade_alpha = 255.0;
            }
        }
        self.roll_shake();
    }

    fn on_exit(&mut self, _ctx: &mut EngineContext) {
        self.effects.clear();
        self.outcome = None;
        self.shake = Vec2::ZERO;
    }

    fn update(&mut self, frame: &SceneFrame, _ctx: &mut EngineContext) -> SceneCommand {
        self.effects.tick();
        if self.outcome == Some(GameResult::GameOver) {
            if self.shake_ticks > 0 {
                self.shake_ticks -= 1;
            }
            if self.shake_ticks == 0 && self.fade_alpha < 255.0 {
                self.fade_alpha = (self.fade_alpha + FADE_STEP).min(255.0);
            }
        }
        self.roll_shake();

        if find_custom(frame.events, custom::BACK).is_some() {
            return SceneCommand::SwitchTo(SceneName::ModeSelect);
        }
        SceneCommand::None
    }

    fn draw(&self, hud: &mut HudFrame) {
        hud.result = self.outcome;
        hud.overlay_alpha = self.fade_alpha;
        hud.shake = self.shake;
        hud.particle_count = self.effects.particle_count();
    }

    fn set_result(&mut self, result: GameResult) {
        self.outcome = Some(result);
    }

    fn result(&self) -> Option<GameResult> {
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GameMode;
    use crate::input::queue::InputEvent;

    fn idle_frame(events: &[InputEvent]) -> SceneFrame<'_> {
        SceneFrame { audio: None, events, mode: GameMode::Test }
    }

    #[test]
    fn entering_keeps_the_outcome_it_was_given() {
        let mut ctx = EngineContext::new();
        for outcome in [GameResult::Clear, GameResult::GameOver] {
            let mut scene = ResultScene::new();
            scene.set_result(outcome);
            scene.on_enter(&mut ctx);
            assert_eq!(scene.result(), Some(outcome));
        }
    }

    #[test]
    fn entering_without_outcome_does_not_invent_one() {
        let mut scene = ResultScene::new();
        scene.on_enter(&mut EngineContext::new());
        assert_eq!(scene.result(), None);
    }

    #[test]
    fn clear_celebrates_with_particles() {
        let mut ctx = EngineContext::new();
        let mut scene = ResultScene::new();
        scene.set_result(GameResult::Clear);
        scene.on_enter(&mut ctx);
        let mut hud = HudFrame::default();
        scene.draw(&mut hud);
        assert_eq!(hud.particle_count, RESULT_BURST);
        assert_eq!(hud.shake, Vec2::ZERO);

        scene.on_exit(&mut ctx);
        scene.draw(&mut hud);
        assert_eq!(hud.particle_count, 0);
        assert_eq!(scene.result(), None);
    }

    #[test]
    fn game_over_shakes_then_fades_in() {
        let mut ctx = EngineContext::new();
        let mut scene = ResultScene::new();
        scene.set_result(GameResult::GameOver);
        scene.on_enter(&mut ctx);
        let mut hud = HudFrame::default();
        scene.draw(&mut hud);
        assert!(hud.shake.length() > 0.0);
        assert!(hud.shake.x.abs() <= SHAKE_INTENSITY && hud.shake.y.abs() <= SHAKE_INTENSITY);
        assert_eq!(hud.overlay_alpha, 0.0);

        for _ in 0..10 {
            scene.update(&idle_frame(&[]), &mut ctx);
        }
        scene.draw(&mut hud);
        assert_eq!(hud.shake, Vec2::ZERO);
        assert_eq!(hud.overlay_alpha, FADE_STEP);

        for _ in 0..40 {
            scene.update(&idle_frame(&[]), &mut ctx);
        }
        scene.draw(&mut hud);
        assert_eq!(hud.overlay_alpha, 255.0);
    }

    #[test]
    fn back_returns_to_mode_select() {
        let mut ctx = EngineContext::new();
        let mut scene = ResultScene::new();
        scene.set_result(GameResult::Clear);
        scene.on_enter(&mut ctx);
        let back = [InputEvent::custom(custom::BACK, 0.0)];
        assert_eq!(scene.update(&idle_frame(&back), &mut ctx), SceneCommand::SwitchTo(SceneName::ModeSelect));
    }
}
