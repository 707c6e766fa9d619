//! Idle screens shown after a mode is picked, before the message and
//! countdown. Neither one owns a session.

use crate::api::game::EngineContext;
use crate::api::types::HudFrame;
use crate::config::GameSettings;
use crate::gameplay::growth::MAX_HEIGHT;
use crate::input::queue::{custom, find_custom, ButtonArea};
use crate::input::source::amplify_volume;

use super::manager::{Scene, SceneCommand, SceneFrame, SceneName};

pub const CHALLENGE_START_BUTTON: ButtonArea = ButtonArea::new(250.0, 530.0, 300.0, 50.0);
/// Per-tick approach factor of the preview plant.
const PREVIEW_SMOOTHING: f32 = 0.2;

fn idle_command(frame: &SceneFrame) -> Option<SceneCommand> {
    if find_custom(frame.events, custom::START).is_some() {
        return Some(SceneCommand::SwitchTo(SceneName::Message));
    }
    if find_custom(frame.events, custom::BACK).is_some() {
        return Some(SceneCommand::SwitchTo(SceneName::ModeSelect));
    }
    None
}

/// Test mode idle: a live frequency visualizer and a start button.
#[derive(Debug, Default)]
pub struct TestIdleScene {
    frequency_average: f32,
}

impl TestIdleScene {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scene for TestIdleScene {
    fn on_enter(&mut self, _ctx: &mut EngineContext) {
        self.frequency_average = 0.0;
    }

    fn update(&mut self, frame: &SceneFrame, _ctx: &mut EngineContext) -> SceneCommand {
        if let Some(audio) = frame.audio {
            self.frequency_average = audio.frequency_average;
        }
        idle_command(frame).unwrap_or(SceneCommand::None)
    }

    fn draw(&self, hud: &mut HudFrame) {
        hud.frequency_average = self.frequency_average;
    }
}

/// Challenge idle: the plant previews the live volume (boosted) without
/// any session state, so the player can check the microphone first.
#[derive(Debug)]
pub struct ChallengeIdleScene {
    preview_height: f32,
    frequency_average: f32,
    gain: f32,
}

impl ChallengeIdleScene {
    pub fn new(settings: &GameSettings) -> Self {
        Self {
            preview_height: 0.0,
            frequency_average: 0.0,
            gain: settings.easy_mode_gain,
        }
    }

    pub fn preview_height(&self) -> f32 {
        self.preview_height
    }
}

impl Scene for ChallengeIdleScene {
    fn on_enter(&mut self, _ctx: &mut EngineContext) {
        self.preview_height = 0.0;
        self.frequency_average = 0.0;
    }

    fn update(&mut self, frame: &SceneFrame, _ctx: &mut EngineContext) -> SceneCommand {
        if let Some(audio) = frame.audio {
            let target = amplify_volume(audio.volume, self.gain) * MAX_HEIGHT;
            self.preview_height += (target - self.preview_height) * PREVIEW_SMOOTHING;
            self.frequency_average = audio.frequency_average;
        }
        if CHALLENGE_START_BUTTON.pressed(frame.events) {
            return SceneCommand::SwitchTo(SceneName::Message);
        }
        idle_command(frame).unwrap_or(SceneCommand::None)
    }

    fn draw(&self, hud: &mut HudFrame) {
        hud.plant_height = self.preview_height;
        hud.frequency_average = self.frequency_average;
    }

    fn configure(&mut self, settings: &GameSettings) {
        self.gain = settings.easy_mode_gain;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GameMode;
    use crate::input::queue::InputEvent;
    use crate::input::source::AudioFrame;

    fn frame<'a>(audio: Option<AudioFrame>, events: &'a [InputEvent]) -> SceneFrame<'a> {
        SceneFrame { audio, events, mode: GameMode::Challenge }
    }

    #[test]
    fn start_goes_to_message() {
        let mut ctx = EngineContext::new();
        let start = [InputEvent::custom(custom::START, 0.0)];
        assert_eq!(TestIdleScene::new().update(&frame(None, &start), &mut ctx), SceneCommand::SwitchTo(SceneName::Message));

        let mut challenge = ChallengeIdleScene::new(&GameSettings::default());
        let tap = [InputEvent::PointerDown { x: 400.0, y: 550.0 }];
        assert_eq!(challenge.update(&frame(None, &tap), &mut ctx), SceneCommand::SwitchTo(SceneName::Message));
    }

    #[test]
    fn preview_follows_volume_and_holds_on_missing_samples() {
        let mut ctx = EngineContext::new();
        let mut scene = ChallengeIdleScene::new(&GameSettings::default());
        for _ in 0..100 {
            scene.update(&frame(AudioFrame::volume(0.05), &[]), &mut ctx);
        }
        // 0.05 boosted ×10 is half the field.
        assert!((scene.preview_height() - 200.0).abs() < 0.5);
        let held = scene.preview_height();
        scene.update(&frame(None, &[]), &mut ctx);
        assert_eq!(scene.preview_height(), held);
        scene.on_enter(&mut ctx);
        assert_eq!(scene.preview_height(), 0.0);
    }
}
