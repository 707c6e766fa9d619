use crate::api::game::EngineContext;
use crate::api::types::HudFrame;
use crate::core::timer::TickTimer;

use super::manager::{Scene, SceneCommand, SceneFrame, SceneName};

const SHOW_SECONDS: f32 = 2.0;
const FADE_SECONDS: f32 = 0.5;

/// "Get ready" card between idle and countdown.
#[derive(Debug)]
pub struct MessageScene {
    timer: TickTimer,
    fade_ticks: u32,
}

impl MessageScene {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            timer: TickTimer::from_seconds(SHOW_SECONDS, tick_rate),
            fade_ticks: (FADE_SECONDS * tick_rate as f32).round().max(1.0) as u32,
        }
    }

    fn alpha(&self) -> f32 {
        (self.timer.elapsed() as f32 / self.fade_ticks as f32).min(1.0) * 255.0
    }
}

impl Scene for MessageScene {
    fn on_enter(&mut self, _ctx: &mut EngineContext) {
        self.timer.start();
    }

    fn on_exit(&mut self, _ctx: &mut EngineContext) {
        self.timer.stop();
    }

    fn update(&mut self, _frame: &SceneFrame, _ctx: &mut EngineContext) -> SceneCommand {
        if self.timer.tick() {
            return SceneCommand::SwitchTo(SceneName::Countdown);
        }
        SceneCommand::None
    }

    fn draw(&self, hud: &mut HudFrame) {
        hud.overlay_alpha = self.alpha();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GameMode;

    #[test]
    fn shows_for_two_seconds_then_counts_down() {
        let mut ctx = EngineContext::new();
        let mut scene = MessageScene::new(60);
        scene.on_enter(&mut ctx);
        let frame = SceneFrame { audio: None, events: &[], mode: GameMode::Test };
        for _ in 0..119 {
            assert_eq!(scene.update(&frame, &mut ctx), SceneCommand::None);
        }
        assert_eq!(scene.update(&frame, &mut ctx), SceneCommand::SwitchTo(SceneName::Countdown));
    }

    #[test]
    fn fades_in_over_half_a_second() {
        let mut ctx = EngineContext::new();
        let mut scene = MessageScene::new(60);
        scene.on_enter(&mut ctx);
        let frame = SceneFrame { audio: None, events: &[], mode: GameMode::Test };
        let mut hud = HudFrame::default();
        scene.draw(&mut hud);
        assert_eq!(hud.overlay_alpha, 0.0);
        for _ in 0..15 {
            scene.update(&frame, &mut ctx);
        }
        scene.draw(&mut hud);
        assert!((hud.overlay_alpha - 127.5).abs() < 1e-3);
        for _ in 0..30 {
            scene.update(&frame, &mut ctx);
        }
        scene.draw(&mut hud);
        assert_eq!(hud.overlay_alpha, 255.0);
    }
}
