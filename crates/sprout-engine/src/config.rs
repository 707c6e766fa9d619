//! Session settings loaded from JSON and adjusted by UI sliders.
//!
//! Every value is clamped here, at the configuration boundary, so the
//! simulation loop never sees an out-of-range threshold.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tick rate the whole core is tuned for.
pub const DEFAULT_TICK_RATE: u32 = 60;
/// Fraction of the maximum height needed for Clear.
pub const DEFAULT_CLEAR_THRESHOLD: f32 = 0.8;
/// Volume that arms growth and counts as "voiced".
pub const DEFAULT_VOLUME_THRESHOLD: f32 = 0.05;
/// Longest tolerated silent run (1.5 s at 60 Hz).
pub const DEFAULT_SILENCE_LIMIT_TICKS: u32 = 90;
/// Dropout is never reported during this opening window.
pub const DEFAULT_GRACE_SECONDS: f32 = 3.0;
/// Easy Mode volume multiplier.
pub const DEFAULT_EASY_MODE_GAIN: f32 = 10.0;

pub const CLEAR_THRESHOLD_RANGE: (f32, f32) = (0.5, 1.0);
/// Authoritative volume threshold range shared by growth and dropout detection.
pub const VOLUME_THRESHOLD_RANGE: (f32, f32) = (0.001, 0.26);
pub const TICK_RATE_RANGE: (u32, u32) = (10, 240);
pub const SILENCE_LIMIT_RANGE: (u32, u32) = (1, 600);
pub const GRACE_SECONDS_RANGE: (f32, f32) = (0.0, 10.0);
pub const EASY_MODE_GAIN_RANGE: (f32, f32) = (1.0, 20.0);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for one play session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub tick_rate: u32,
    pub clear_threshold: f32,
    pub volume_threshold: f32,
    pub silence_limit_ticks: u32,
    pub grace_seconds: f32,
    pub easy_mode: bool,
    pub easy_mode_gain: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            clear_threshold: DEFAULT_CLEAR_THRESHOLD,
            volume_threshold: DEFAULT_VOLUME_THRESHOLD,
            silence_limit_ticks: DEFAULT_SILENCE_LIMIT_TICKS,
            grace_seconds: DEFAULT_GRACE_SECONDS,
            easy_mode: false,
            easy_mode_gain: DEFAULT_EASY_MODE_GAIN,
        }
    }
}

impl GameSettings {
    /// Parse settings from a JSON string. Missing fields take their defaults,
    /// out-of-range fields are clamped.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let parsed: GameSettings = serde_json::from_str(json)?;
        Ok(parsed.sanitized())
    }

    /// Copy of these settings with every field clamped into its valid range.
    pub fn sanitized(mut self) -> Self {
        self.tick_rate = clamp_u32("tick_rate", self.tick_rate, TICK_RATE_RANGE);
        self.clear_threshold = clamp_f32("clear_threshold", self.clear_threshold, CLEAR_THRESHOLD_RANGE);
        self.volume_threshold = clamp_f32("volume_threshold", self.volume_threshold, VOLUME_THRESHOLD_RANGE);
        self.silence_limit_ticks =
            clamp_u32("silence_limit_ticks", self.silence_limit_ticks, SILENCE_LIMIT_RANGE);
        self.grace_seconds = clamp_f32("grace_seconds", self.grace_seconds, GRACE_SECONDS_RANGE);
        self.easy_mode_gain = clamp_f32("easy_mode_gain", self.easy_mode_gain, EASY_MODE_GAIN_RANGE);
        self
    }

    pub fn set_clear_threshold(&mut self, value: f32) {
        self.clear_threshold = clamp_f32("clear_threshold", value, CLEAR_THRESHOLD_RANGE);
    }

    pub fn set_volume_threshold(&mut self, value: f32) {
        self.volume_threshold = clamp_f32("volume_threshold", value, VOLUME_THRESHOLD_RANGE);
    }

    /// Grace period expressed in ticks.
    pub fn grace_ticks(&self) -> u32 {
        (self.grace_seconds * self.tick_rate as f32).round() as u32
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }
}

fn clamp_f32(name: &str, value: f32, (lo, hi): (f32, f32)) -> f32 {
    if value.is_nan() {
        log::warn!("settings: {} is NaN, using {}", name, lo);
        return lo;
    }
    let clamped = value.clamp(lo, hi);
    if clamped != value {
        log::warn!("settings: {} = {} clamped to {}", name, value, clamped);
    }
    clamped
}

fn clamp_u32(name: &str, value: u32, (lo, hi): (u32, u32)) -> u32 {
    let clamped = value.clamp(lo, hi);
    if clamped != value {
        log::warn!("settings: {} = {} clamped to {}", name, value, clamped);
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let settings = GameSettings::from_json("{}").unwrap();
        assert_eq!(settings, GameSettings::default());
    }

    #[test]
    fn partial_json_overrides_named_fields() {
        let settings = GameSettings::from_json(r#"{ "clear_threshold": 0.6, "easy_mode": true }"#).unwrap();
        assert_eq!(settings.clear_threshold, 0.6);
        assert!(settings.easy_mode);
        assert_eq!(settings.tick_rate, DEFAULT_TICK_RATE);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let json = r#"{
            "clear_threshold": 1.7,
            "volume_threshold": 0.0,
            "silence_limit_ticks": 0,
            "grace_seconds": -2.0
        }"#;
        let settings = GameSettings::from_json(json).unwrap();
        assert_eq!(settings.clear_threshold, 1.0);
        assert_eq!(settings.volume_threshold, 0.001);
        assert_eq!(settings.silence_limit_ticks, 1);
        assert_eq!(settings.grace_seconds, 0.0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = GameSettings::from_json("{ clear_threshold: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn slider_setters_clamp() {
        let mut settings = GameSettings::default();
        settings.set_clear_threshold(0.2);
        assert_eq!(settings.clear_threshold, 0.5);
        settings.set_volume_threshold(0.5);
        assert_eq!(settings.volume_threshold, 0.26);
    }

    #[test]
    fn grace_ticks_follow_tick_rate() {
        let settings = GameSettings { grace_seconds: 2.5, ..GameSettings::default() };
        assert_eq!(settings.grace_ticks(), 150);
    }

    #[test]
    fn json_round_trip_keeps_values() {
        let settings = GameSettings { clear_threshold: 0.7, ..GameSettings::default() };
        let back = GameSettings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back, settings);
    }
}
