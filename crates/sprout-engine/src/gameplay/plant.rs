//! The per-session plant: growth plus dropout detection, folded into
//! Growing / Cleared / GameOver.
//!
//! Cleared is a hard barrier. Once the plant reaches the clear line no
//! amount of later silence can turn the run into a GameOver.

use crate::config::GameSettings;
use super::growth::{GrowthEngine, MAX_HEIGHT};
use super::voice::VoiceContinuityDetector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlantState {
    #[default]
    Growing,
    /// Terminal.
    Cleared,
    /// Terminal until an explicit reset.
    GameOver,
}

/// A state change produced by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlantTransition {
    Cleared { height: f32 },
    GameOver,
}

/// What the HUD should ask the player to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoicePrompt {
    StartSpeaking,
    KeepGoing,
    #[default]
    Hidden,
}

pub struct PlantStateMachine {
    growth: GrowthEngine,
    voice: VoiceContinuityDetector,
    state: PlantState,
    cleared_height: Option<f32>,
    clear_signal_pending: bool,
    settings: GameSettings,
}

impl PlantStateMachine {
    pub fn new(settings: &GameSettings) -> Self {
        Self {
            growth: GrowthEngine::new(settings.volume_threshold, settings.tick_rate),
            voice: VoiceContinuityDetector::from_settings(settings),
            state: PlantState::Growing,
            cleared_height: None,
            clear_signal_pending: false,
            settings: *settings,
        }
    }

    /// Advance one tick. `None` means the host had no reading this tick:
    /// nothing moves, neither growth nor the silence counter.
    pub fn update(&mut self, sample: Option<f32>) -> Option<PlantTransition> {
        let volume = sample?;
        if self.state != PlantState::Growing {
            return None;
        }

        self.voice.update(volume);
        self.growth.update(volume);

        // Clear is checked first so a run that reaches the line on the same
        // tick its voice drops out still counts as a success.
        let height = self.growth.height();
        if height >= self.clear_line() {
            self.state = PlantState::Cleared;
            self.cleared_height = Some(height);
            self.clear_signal_pending = true;
            log::debug!("plant: cleared at height {:.1}", height);
            return Some(PlantTransition::Cleared { height });
        }

        if self.voice.is_voice_lost() && self.request_game_over() {
            return Some(PlantTransition::GameOver);
        }
        None
    }

    /// Move to GameOver if still Growing. Returns whether the request took effect.
    pub fn request_game_over(&mut self) -> bool {
        if self.state != PlantState::Growing {
            return false;
        }
        self.state = PlantState::GameOver;
        log::debug!("plant: voice lost at height {:.1}", self.growth.height());
        true
    }

    /// Start a fresh session. Engine, detector and flags are rebuilt
    /// together and swapped in at once.
    pub fn reset(&mut self) {
        *self = Self::new(&self.settings);
    }

    /// One-shot clear signal: true exactly once per session, on the first
    /// call after the plant clears.
    pub fn take_clear_signal(&mut self) -> bool {
        std::mem::take(&mut self.clear_signal_pending)
    }

    pub fn plant_state(&self) -> PlantState {
        self.state
    }

    /// Reported height. Frozen at the snapshot once cleared.
    pub fn height(&self) -> f32 {
        self.cleared_height.unwrap_or_else(|| self.growth.height())
    }

    pub fn cleared_height(&self) -> Option<f32> {
        self.cleared_height
    }

    /// Height the plant has to reach for Clear.
    pub fn clear_line(&self) -> f32 {
        self.settings.clear_threshold * MAX_HEIGHT
    }

    /// Sessions have no countdown timer; always `None`.
    pub fn remaining_time(&self) -> Option<f32> {
        None
    }

    /// Resets are instantaneous; always true.
    pub fn is_reset_complete(&self) -> bool {
        true
    }

    pub fn voice_prompt(&self) -> VoicePrompt {
        match self.state {
            PlantState::Growing if self.voice.has_voice_started() => VoicePrompt::KeepGoing,
            PlantState::Growing => VoicePrompt::StartSpeaking,
            _ => VoicePrompt::Hidden,
        }
    }

    pub fn growth(&self) -> &GrowthEngine {
        &self.growth
    }

    pub fn voice(&self) -> &VoiceContinuityDetector {
        &self.voice
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Take on new settings mid-session. The tick rate stays the one this
    /// machine was built with; everything else applies from the next tick
    /// and survives `reset`.
    pub fn configure(&mut self, settings: &GameSettings) {
        let tick_rate = self.settings.tick_rate;
        self.settings = GameSettings { tick_rate, ..settings.sanitized() };
        self.growth.set_growth_threshold(self.settings.volume_threshold);
        self.voice.set_volume_threshold(self.settings.volume_threshold);
        self.voice.set_silence_limit_ticks(self.settings.silence_limit_ticks);
        self.voice.set_grace_ticks(self.settings.grace_ticks());
    }

    pub fn set_clear_threshold(&mut self, threshold: f32) {
        self.settings.set_clear_threshold(threshold);
    }

    /// Applies to both growth arming and dropout detection.
    pub fn set_volume_threshold(&mut self, threshold: f32) {
        self.settings.set_volume_threshold(threshold);
        self.growth.set_growth_threshold(self.settings.volume_threshold);
        self.voice.set_volume_threshold(self.settings.volume_threshold);
    }
}
