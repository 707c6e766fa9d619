//! Two-phase growth: a short sampling window sets a target height and a
//! level cap from the player's average loudness, then a table of volume
//! thresholds drives steady growth for as long as the voice holds up.
//!
//! Everything is counted in ticks so a replayed sequence reproduces the
//! same heights bit for bit.

/// Height of a fully grown plant, in pixels.
pub const MAX_HEIGHT: f32 = 400.0;
/// Volume that arms growth (first voiced tick).
pub const DEFAULT_GROWTH_THRESHOLD: f32 = 0.05;

/// Length of the sampling window, in voiced seconds.
pub const SAMPLING_SECONDS: f32 = 0.8;
/// Quick-growth first leg: 0 → [`QUICK_RAMP_HEIGHT`] in this many seconds.
pub const QUICK_RAMP_SECONDS: f32 = 0.3;
pub const QUICK_RAMP_HEIGHT: f32 = 260.0;
/// Sampling average at or above which the quick path latches.
pub const QUICK_GROWTH_AVERAGE: f32 = 0.15;

const TARGET_BASE: f32 = 0.65;
const TARGET_SPAN: f32 = 0.15;

/// Sampling-average boundaries for levels 3..=10. Below the first is level 2.
pub const LEVEL_BOUNDARIES: [f32; 8] = [0.06, 0.09, 0.11, 0.13, 0.15, 0.17, 0.19, 0.22];
pub const MAX_LEVEL: u8 = 10;

/// One row of the sustained-growth table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthRow {
    /// Minimum volume for this row.
    pub threshold: f32,
    /// Growth in px per second.
    pub rate: f32,
}

/// Sustained-phase table, index 0 = level 1.
pub const GROWTH_TABLE: [GrowthRow; 10] = [
    GrowthRow { threshold: 0.05, rate: 24.0 },
    GrowthRow { threshold: 0.07, rate: 30.0 },
    GrowthRow { threshold: 0.09, rate: 36.0 },
    GrowthRow { threshold: 0.11, rate: 42.0 },
    GrowthRow { threshold: 0.13, rate: 48.0 },
    GrowthRow { threshold: 0.15, rate: 55.0 },
    GrowthRow { threshold: 0.17, rate: 62.0 },
    GrowthRow { threshold: 0.20, rate: 70.0 },
    GrowthRow { threshold: 0.23, rate: 80.0 },
    GrowthRow { threshold: 0.26, rate: 90.0 },
];

/// Level cap for a sampling-phase average. Boundaries resolve upward.
pub fn level_for_average(average: f32) -> u8 {
    let passed = LEVEL_BOUNDARIES.iter().take_while(|&&b| average >= b).count();
    2 + passed as u8
}

/// Growth rate (px/s) for one sustained tick, never using a row above `max_level`.
pub fn sustained_rate(volume: f32, max_level: u8) -> f32 {
    let top = max_level.clamp(1, MAX_LEVEL) as usize;
    GROWTH_TABLE[..top]
        .iter()
        .rev()
        .find(|row| volume >= row.threshold)
        .map_or(0.0, |row| row.rate)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrowthPhase {
    #[default]
    Sampling,
    Sustained,
}

/// Per-session growth state. Read it through [`GrowthEngine::state`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GrowthState {
    /// Current height in [0, MAX_HEIGHT].
    pub accumulated_height: f32,
    pub phase: GrowthPhase,
    /// Latched on the first tick at or above the growth threshold.
    pub voice_started: bool,
    /// Ticks since voice first started (the arming tick included).
    pub voiced_ticks: u32,
    /// Samples seen during Sampling, in order.
    pub volume_samples: Vec<f32>,
    pub baseline_target: f32,
    pub is_quick_growth: bool,
    /// Fixed once at the end of Sampling.
    pub max_allowed_level: Option<u8>,
}

impl GrowthState {
    pub fn sampling_average(&self) -> f32 {
        if self.volume_samples.is_empty() {
            return 0.0;
        }
        self.volume_samples.iter().sum::<f32>() / self.volume_samples.len() as f32
    }
}

pub struct GrowthEngine {
    state: GrowthState,
    growth_threshold: f32,
    tick_rate: f32,
    sampling_ticks: u32,
}

impl GrowthEngine {
    pub fn new(growth_threshold: f32, tick_rate: u32) -> Self {
        let tick_rate = tick_rate.max(1);
        let sampling_ticks = ((SAMPLING_SECONDS * tick_rate as f32).round() as u32).max(1);
        Self {
            state: GrowthState::default(),
            growth_threshold,
            tick_rate: tick_rate as f32,
            sampling_ticks,
        }
    }

    /// Advance one tick with this tick's volume.
    pub fn update(&mut self, volume: f32) {
        if !self.state.voice_started {
            if volume < self.growth_threshold {
                return;
            }
            self.state.voice_started = true;
        }

        self.state.voiced_ticks += 1;
        match self.state.phase {
            GrowthPhase::Sampling => self.sample(volume),
            GrowthPhase::Sustained => self.sustain(volume),
        }
    }

    fn sample(&mut self, volume: f32) {
        let sampling_ticks = self.sampling_ticks;
        let s = &mut self.state;
        s.volume_samples.push(volume);

        let average = s.sampling_average();
        s.baseline_target = (TARGET_BASE + average * TARGET_SPAN) * MAX_HEIGHT;
        if average >= QUICK_GROWTH_AVERAGE {
            s.is_quick_growth = true;
        }

        let progress = (s.voiced_ticks as f32 / sampling_ticks as f32).min(1.0);
        let ramp = if s.is_quick_growth {
            let split = QUICK_RAMP_SECONDS / SAMPLING_SECONDS;
            if progress <= split {
                QUICK_RAMP_HEIGHT * progress / split
            } else {
                lerp(QUICK_RAMP_HEIGHT, s.baseline_target, (progress - split) / (1.0 - split))
            }
        } else {
            s.baseline_target * progress
        };
        // A falling average may lower the target; the plant never shrinks.
        s.accumulated_height = ramp.max(s.accumulated_height).min(MAX_HEIGHT);

        if s.voiced_ticks >= sampling_ticks {
            let level = level_for_average(average);
            s.max_allowed_level = Some(level);
            s.phase = GrowthPhase::Sustained;
            log::debug!(
                "growth: sampling done avg={:.3} target={:.1} quick={} level={}",
                average, s.baseline_target, s.is_quick_growth, level
            );
        }
    }

    fn sustain(&mut self, volume: f32) {
        let level = self.state.max_allowed_level.unwrap_or(MAX_LEVEL);
        let rate = sustained_rate(volume, level);
        let height = self.state.accumulated_height + rate / self.tick_rate;
        self.state.accumulated_height = height.min(MAX_HEIGHT);
    }

    /// Zero all per-session fields. Thresholds and tick rate are kept.
    pub fn reset(&mut self) {
        self.state = GrowthState::default();
    }

    pub fn height(&self) -> f32 {
        self.state.accumulated_height
    }

    pub fn phase(&self) -> GrowthPhase {
        self.state.phase
    }

    pub fn state(&self) -> &GrowthState {
        &self.state
    }

    /// Voiced time in seconds.
    pub fn voiced_seconds(&self) -> f32 {
        self.state.voiced_ticks as f32 / self.tick_rate
    }

    pub fn growth_threshold(&self) -> f32 {
        self.growth_threshold
    }

    pub fn set_growth_threshold(&mut self, threshold: f32) {
        self.growth_threshold = threshold;
    }

    pub fn sampling_ticks(&self) -> u32 {
        self.sampling_ticks
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
