use crate::api::game::EngineContext;
use crate::api::types::{GameMode, HudFrame};
use crate::input::queue::{custom, find_custom, ButtonArea};

use super::manager::{Scene, SceneCommand, SceneFrame};

pub const TEST_BUTTON: ButtonArea = ButtonArea::new(300.0, 200.0, 200.0, 60.0);
pub const CHALLENGE_BUTTON: ButtonArea = ButtonArea::new(280.0, 320.0, 240.0, 60.0);

/// First screen: pick Test or Challenge.
#[derive(Debug, Default)]
pub struct ModeSelectScene;

impl ModeSelectScene {
    pub fn new() -> Self {
        ModeSelectScene
    }
}

impl Scene for ModeSelectScene {
    fn update(&mut self, frame: &SceneFrame, _ctx: &mut EngineContext) -> SceneCommand {
        if let Some(a) = find_custom(frame.events, custom::SELECT_MODE) {
            let mode = if a == 0.0 { GameMode::Test } else { GameMode::Challenge };
            return SceneCommand::ChooseMode(mode);
        }
        if TEST_BUTTON.pressed(frame.events) {
            return SceneCommand::ChooseMode(GameMode::Test);
        }
        if CHALLENGE_BUTTON.pressed(frame.events) {
            return SceneCommand::ChooseMode(GameMode::Challenge);
        }
        SceneCommand::None
    }

    fn draw(&self, _hud: &mut HudFrame) {}
}
