use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::gameplay::plant::VoicePrompt;
use crate::scenes::SceneName;

/// A sound cue emitted by the game logic.
/// The numeric value maps to a clip in the host's sound manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

impl SoundEvent {
    /// One countdown beep (5 down to 1).
    pub const COUNTDOWN: SoundEvent = SoundEvent(1);
    /// Countdown reached zero.
    pub const START: SoundEvent = SoundEvent(2);
    /// The plant broke through the wall.
    pub const CLEAR: SoundEvent = SoundEvent(3);
    pub const GAME_OVER: SoundEvent = SoundEvent(4);
}

/// A game event forwarded from Rust to the host.
/// `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// `a` = new scene index, `b` = previous scene index (-1 if none).
    pub const SCENE_CHANGED: f32 = 1.0;
    /// `a` = mode index.
    pub const MODE_CHANGED: f32 = 2.0;
    /// `a` = result index, `b` = final plant height.
    pub const RESULT: f32 = 3.0;
    /// `a` = snapshot height, `b` = clear line.
    pub const CLEARED: f32 = 4.0;

    pub fn scene_changed(to: SceneName, from: Option<SceneName>) -> Self {
        GameEvent {
            kind: Self::SCENE_CHANGED,
            a: to.index() as f32,
            b: from.map_or(-1.0, |s| s.index() as f32),
            c: 0.0,
        }
    }

    pub fn mode_changed(mode: GameMode) -> Self {
        GameEvent { kind: Self::MODE_CHANGED, a: mode.index() as f32, ..Default::default() }
    }

    pub fn result(result: GameResult, height: f32) -> Self {
        GameEvent { kind: Self::RESULT, a: result.index() as f32, b: height, c: 0.0 }
    }

    pub fn cleared(height: f32, clear_line: f32) -> Self {
        GameEvent { kind: Self::CLEARED, a: height, b: clear_line, c: 0.0 }
    }
}

/// Which flow the player picked on the mode select screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    #[default]
    Test,
    Challenge,
}

impl GameMode {
    pub fn index(self) -> u8 {
        match self {
            GameMode::Test => 0,
            GameMode::Challenge => 1,
        }
    }

    /// Idle screen shown before a run in this mode.
    pub fn idle_scene(self) -> SceneName {
        match self {
            GameMode::Test => SceneName::TestIdle,
            GameMode::Challenge => SceneName::ChallengeIdle,
        }
    }

    /// Play screen the countdown hands over to.
    pub fn play_scene(self) -> SceneName {
        match self {
            GameMode::Test => SceneName::TestPlaying,
            GameMode::Challenge => SceneName::ChallengePlaying,
        }
    }
}

/// Outcome of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    Clear,
    GameOver,
}

impl GameResult {
    pub fn index(self) -> u8 {
        match self {
            GameResult::Clear => 0,
            GameResult::GameOver => 1,
        }
    }
}

/// Read-only per-frame snapshot for the host's renderer.
/// Rebuilt from scratch by the active scene every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudFrame {
    pub scene: SceneName,
    pub mode: GameMode,
    /// Fade overlay, 0..=255.
    pub overlay_alpha: f32,
    /// Number currently shown by the countdown.
    pub countdown: Option<u8>,
    pub plant_height: f32,
    /// Height of the wall, `None` outside play screens.
    pub clear_line: Option<f32>,
    pub result: Option<GameResult>,
    pub shake: Vec2,
    pub prompt: VoicePrompt,
    pub particle_count: usize,
    pub crack_intensity: f32,
    pub clear_banner: bool,
    pub frequency_average: f32,
}

impl Default for HudFrame {
    fn default() -> Self {
        HudFrame {
            scene: SceneName::ModeSelect,
            mode: GameMode::Test,
            overlay_alpha: 255.0,
            countdown: None,
            plant_height: 0.0,
            clear_line: None,
            result: None,
            shake: Vec2::ZERO,
            prompt: VoicePrompt::Hidden,
            particle_count: 0,
            crack_intensity: 0.0,
            clear_banner: false,
            frequency_average: 0.0,
        }
    }
}

impl HudFrame {
    pub const FLOATS: usize = 14;

    /// Reset per-scene fields, keeping scene and mode.
    pub fn begin(&mut self, scene: SceneName, mode: GameMode) {
        *self = HudFrame { scene, mode, ..HudFrame::default() };
    }

    /// Flat layout for the host: absent values are written as -1.
    pub fn to_floats(&self) -> [f32; Self::FLOATS] {
        [
            self.scene.index() as f32,
            self.mode.index() as f32,
            self.overlay_alpha,
            self.countdown.map_or(-1.0, f32::from),
            self.plant_height,
            self.clear_line.unwrap_or(-1.0),
            self.result.map_or(-1.0, |r| r.index() as f32),
            self.shake.x,
            self.shake.y,
            match self.prompt {
                VoicePrompt::Hidden => 0.0,
                VoicePrompt::StartSpeaking => 1.0,
                VoicePrompt::KeepGoing => 2.0,
            },
            self.particle_count as f32,
            self.crack_intensity,
            if self.clear_banner { 1.0 } else { 0.0 },
            self.frequency_average,
        ]
    }
}
