use crate::api::game::EngineContext;
use crate::api::types::{GameEvent, GameMode, GameResult, HudFrame, SoundEvent};
use crate::config::GameSettings;
use crate::gameplay::session::PlaySession;
use crate::input::queue::{custom, find_custom};

use super::manager::{Scene, SceneCommand, SceneFrame, SceneName};

const TEST_SEED: u64 = 42;
const CHALLENGE_SEED: u64 = 4242;

/// The run itself. Both modes share this scene; Test additionally lets the
/// player abort back to its idle screen.
pub struct PlayingScene {
    mode: GameMode,
    session: PlaySession,
}

impl PlayingScene {
    pub fn test(settings: &GameSettings) -> Self {
        Self { mode: GameMode::Test, session: PlaySession::new(settings, TEST_SEED) }
    }

    pub fn challenge(settings: &GameSettings) -> Self {
        Self { mode: GameMode::Challenge, session: PlaySession::new(settings, CHALLENGE_SEED) }
    }

    pub fn session(&self) -> &PlaySession {
        &self.session
    }
}

impl Scene for PlayingScene {
    fn on_enter(&mut self, _ctx: &mut EngineContext) {
        self.session.reset();
    }

    fn update(&mut self, frame: &SceneFrame, ctx: &mut EngineContext) -> SceneCommand {
        if self.mode == GameMode::Test && find_custom(frame.events, custom::BACK).is_some() {
            return SceneCommand::SwitchTo(SceneName::TestIdle);
        }

        match self.session.tick(frame.audio, ctx) {
            Some(result) => {
                if result == GameResult::GameOver {
                    ctx.emit_sound(SoundEvent::GAME_OVER);
                }
                ctx.emit_event(GameEvent::result(result, self.session.plant().height()));
                SceneCommand::Finish(result)
            }
            None => SceneCommand::None,
        }
    }

    fn draw(&self, hud: &mut HudFrame) {
        hud.overlay_alpha = 0.0;
        self.session.draw(hud);
    }

    fn configure(&mut self, settings: &GameSettings) {
        self.session.configure(settings);
    }
}
