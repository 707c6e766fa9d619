use crate::api::game::EngineContext;
use crate::api::types::{HudFrame, SoundEvent};

use super::manager::{Scene, SceneCommand, SceneFrame};

pub const COUNTDOWN_FROM: i32 = 5;
const FADE_TICKS: u32 = 30;

/// 5, 4, 3, 2, 1, START, one count per second, then the play scene of the
/// persisted mode.
#[derive(Debug)]
pub struct CountdownScene {
    ticks_per_count: u32,
    count: i32,
    frame_counter: u32,
    done: bool,
}

impl CountdownScene {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            ticks_per_count: tick_rate.max(1),
            count: COUNTDOWN_FROM,
            frame_counter: 0,
            done: false,
        }
    }

    /// Number on screen, `Some(0)` being "START".
    pub fn shown(&self) -> Option<u8> {
        u8::try_from(self.count).ok()
    }
}

impl Scene for CountdownScene {
    fn on_enter(&mut self, _ctx: &mut EngineContext) {
        self.count = COUNTDOWN_FROM;
        self.frame_counter = 0;
        self.done = false;
    }

    fn update(&mut self, frame: &SceneFrame, ctx: &mut EngineContext) -> SceneCommand {
        if self.done {
            return SceneCommand::None;
        }
        self.frame_counter += 1;
        if self.frame_counter < self.ticks_per_count {
            return SceneCommand::None;
        }

        self.frame_counter = 0;
        self.count -= 1;
        match self.count {
            c if c > 0 => ctx.emit_sound(SoundEvent::COUNTDOWN),
            0 => ctx.emit_sound(SoundEvent::START),
            _ => {
                self.done = true;
                return SceneCommand::SwitchTo(frame.mode.play_scene());
            }
        }
        SceneCommand::None
    }

    fn draw(&self, hud: &mut HudFrame) {
        hud.countdown = self.shown();
        hud.overlay_alpha = (self.frame_counter as f32 / FADE_TICKS as f32).min(1.0) * 255.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GameMode;
    use crate::scenes::SceneName;

    #[test]
    fn counts_down_with_sounds_then_routes_by_mode() {
        let mut ctx = EngineContext::new();
        let mut scene = CountdownScene::new(60);
        scene.on_enter(&mut ctx);
        assert_eq!(scene.shown(), Some(5));
        assert!(ctx.sounds.is_empty());

        let frame = SceneFrame { audio: None, events: &[], mode: GameMode::Challenge };
        let mut commands = Vec::new();
        for _ in 0..360 {
            let command = scene.update(&frame, &mut ctx);
            if command != SceneCommand::None {
                commands.push(command);
            }
        }
        assert_eq!(commands, [SceneCommand::SwitchTo(SceneName::ChallengePlaying)]);
        let beeps = ctx.sounds.iter().filter(|s| **s == SoundEvent::COUNTDOWN).count();
        assert_eq!(beeps, 4);
        assert_eq!(ctx.sounds.last(), Some(&SoundEvent::START));

        for _ in 0..600 {
            assert_eq!(scene.update(&frame, &mut ctx), SceneCommand::None);
        }
    }

    #[test]
    fn number_fades_in_each_second() {
        let mut ctx = EngineContext::new();
        let mut scene = CountdownScene::new(60);
        scene.on_enter(&mut ctx);
        let frame = SceneFrame { audio: None, events: &[], mode: GameMode::Test };
        for _ in 0..75 {
            scene.update(&frame, &mut ctx);
        }
        let mut hud = HudFrame::default();
        scene.draw(&mut hud);
        assert_eq!(hud.countdown, Some(4));
        assert!((hud.overlay_alpha - 127.5).abs() < 1e-3);
    }
}
