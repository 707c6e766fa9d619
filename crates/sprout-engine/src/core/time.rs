/// Fixed timestep accumulator.
/// Turns variable host frame times into whole simulation ticks so the
/// session core always advances at its configured tick rate.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Total ticks handed out since construction.
    tick: u64,
}

impl FixedTimestep {
    /// Upper bound on ticks produced by a single host frame.
    pub const MAX_STEPS_PER_FRAME: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            tick: 0,
        }
    }

    /// Timestep for a whole-number tick rate (e.g. 60 ticks per second).
    pub fn from_tick_rate(ticks_per_second: u32) -> Self {
        Self::new(1.0 / ticks_per_second.max(1) as f32)
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death
        self.accumulator = self.accumulator.min(self.dt * Self::MAX_STEPS_PER_FRAME as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        self.tick += steps as u64;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Total number of ticks produced so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }
}
