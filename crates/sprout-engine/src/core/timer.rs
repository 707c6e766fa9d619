/// One-shot countdown measured in simulation ticks.
///
/// Stands in for wall-clock callbacks ("hide after 2000 ms"): a scene starts
/// the timer and ticks it from its own update, so replaying the same tick
/// sequence always expires it on the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickTimer {
    duration: u32,
    elapsed: u32,
    running: bool,
}

impl TickTimer {
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            elapsed: 0,
            running: false,
        }
    }

    /// Timer lasting `seconds` at `tick_rate` ticks per second.
    pub fn from_seconds(seconds: f32, tick_rate: u32) -> Self {
        Self::new((seconds * tick_rate as f32).round().max(0.0) as u32)
    }

    /// Start (or restart) from zero.
    pub fn start(&mut self) {
        self.elapsed = 0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance one tick. Returns true exactly on the tick the timer expires.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed += 1;
        if self.elapsed >= self.duration {
            self.running = false;
            return true;
        }
        false
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Fraction of the duration elapsed, in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration == 0 {
            return 1.0;
        }
        (self.elapsed as f32 / self.duration as f32).min(1.0)
    }
}
