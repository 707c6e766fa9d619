//! Voice dropout detection.
//!
//! Counts consecutive quiet ticks once the player has spoken at least once.
//! Dropout is only reported after the grace window has passed.
//!
//! A player who never speaks never arms the detector, so this cannot act as
//! an absolute session timeout.

use crate::config::GameSettings;

#[derive(Debug, Clone, PartialEq)]
pub struct VoiceContinuityDetector {
    volume_threshold: f32,
    /// Longest silent run that is still tolerated.
    silence_limit_ticks: u32,
    grace_ticks: u32,
    elapsed_ticks: u32,
    silent_tick_run: u32,
    has_voice_started: bool,
}

impl VoiceContinuityDetector {
    pub fn new(volume_threshold: f32, silence_limit_ticks: u32, grace_ticks: u32) -> Self {
        Self {
            volume_threshold,
            silence_limit_ticks: silence_limit_ticks.max(1),
            grace_ticks,
            elapsed_ticks: 0,
            silent_tick_run: 0,
            has_voice_started: false,
        }
    }

    pub fn from_settings(settings: &GameSettings) -> Self {
        Self::new(
            settings.volume_threshold,
            settings.silence_limit_ticks,
            settings.grace_ticks(),
        )
    }

    /// Advance one tick.
    pub fn update(&mut self, volume: f32) {
        self.elapsed_ticks = self.elapsed_ticks.saturating_add(1);
        if volume >= self.volume_threshold {
            self.has_voice_started = true;
            self.silent_tick_run = 0;
        } else {
            self.silent_tick_run = self.silent_tick_run.saturating_add(1);
        }
    }

    /// True once voice has started, the grace window is over, and the
    /// current silent run has outlasted the tolerated limit.
    pub fn is_voice_lost(&self) -> bool {
        self.has_voice_started
            && self.elapsed_ticks >= self.grace_ticks
            && self.silent_tick_run > self.silence_limit_ticks
    }

    pub fn reset(&mut self) {
        self.elapsed_ticks = 0;
        self.silent_tick_run = 0;
        self.has_voice_started = false;
    }

    pub fn has_voice_started(&self) -> bool {
        self.has_voice_started
    }

    pub fn is_in_grace_period(&self) -> bool {
        self.elapsed_ticks < self.grace_ticks
    }

    pub fn silent_tick_run(&self) -> u32 {
        self.silent_tick_run
    }

    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    pub fn volume_threshold(&self) -> f32 {
        self.volume_threshold
    }

    pub fn set_volume_threshold(&mut self, threshold: f32) {
        self.volume_threshold = threshold.clamp(0.0, 1.0);
    }

    pub fn set_silence_limit_ticks(&mut self, ticks: u32) {
        self.silence_limit_ticks = ticks.max(1);
    }

    pub fn silence_limit_ticks(&self) -> u32 {
        self.silence_limit_ticks
    }

    pub fn set_grace_ticks(&mut self, ticks: u32) {
        self.grace_ticks = ticks;
    }

    pub fn grace_ticks(&self) -> u32 {
        self.grace_ticks
    }
}

impl Default for VoiceContinuityDetector {
    fn default() -> Self {
        Self::from_settings(&GameSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed_detector() -> VoiceContinuityDetector {
        let mut d = VoiceContinuityDetector::new(0.05, 90, 180);
        for _ in 0..180 {
            d.update(0.3);
        }
        assert!(!d.is_in_grace_period());
        d
    }

    #[test]
    fn dropout_fires_on_the_91st_silent_tick() {
        let mut d = armed_detector();
        for i in 1..=90 {
            d.update(0.0);
            assert!(!d.is_voice_lost(), "fired early at silent tick {}", i);
        }
        d.update(0.0);
        assert!(d.is_voice_lost());
    }

    #[test]
    fn never_speaking_never_drops_out() {
        let mut d = VoiceContinuityDetector::default();
        for _ in 0..10_000 {
            d.update(0.01);
            assert!(!d.has_voice_started());
            assert!(!d.is_voice_lost());
        }
    }

    #[test]
    fn loud_tick_resets_silent_run() {
        let mut d = armed_detector();
        for _ in 0..50 {
            d.update(0.0);
        }
        d.update(0.05);
        assert_eq!(d.silent_tick_run(), 0);
    }

    #[test]
    fn oscillating_voice_never_drops_out() {
        let mut d = VoiceContinuityDetector::default();
        for i in 0..20_000u32 {
            // 89 quiet ticks then one loud tick, forever.
            d.update(if i % 90 == 0 { 0.5 } else { 0.0 });
            assert!(!d.is_voice_lost(), "dropout at tick {}", i);
        }
    }

    #[test]
    fn grace_period_suppresses_dropout() {
        let mut d = VoiceContinuityDetector::new(0.05, 10, 120);
        d.update(0.5);
        for _ in 0..100 {
            d.update(0.0);
        }
        assert!(d.silent_tick_run() > 10);
        assert!(d.is_in_grace_period());
        assert!(!d.is_voice_lost());
        for _ in 0..19 {
            d.update(0.0);
        }
        assert!(!d.is_in_grace_period());
        assert!(d.is_voice_lost());
    }

    #[test]
    fn retuned_limits_apply_to_the_running_count() {
        let mut d = armed_detector();
        for _ in 0..10 {
            d.update(0.0);
        }
        assert!(!d.is_voice_lost());
        d.set_silence_limit_ticks(9);
        assert!(d.is_voice_lost());

        d.set_silence_limit_ticks(0);
        assert_eq!(d.silence_limit_ticks(), 1);
        d.set_grace_ticks(10_000);
        assert!(d.is_in_grace_period());
        assert!(!d.is_voice_lost());
    }

    #[test]
    fn reset_disarms() {
        let mut d = armed_detector();
        for _ in 0..200 {
            d.update(0.0);
        }
        assert!(d.is_voice_lost());
        d.reset();
        assert!(!d.is_voice_lost());
        assert!(!d.has_voice_started());
        assert_eq!(d.elapsed_ticks(), 0);
    }
}
