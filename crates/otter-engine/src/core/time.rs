/// Fixed timestep accumulator.
/// Turns variable frame deltas into a whole number of equal simulation ticks.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_steps: u32,
    /// Total fixed ticks handed out so far.
    ticks: u64,
}

impl FixedTimestep {
    /// Timestep of `dt` seconds, capped at 10 ticks per frame.
    pub fn new(dt: f32) -> Self {
        Self::with_max_steps(dt, 10)
    }

    pub fn with_max_steps(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: max_steps.max(1),
            ticks: 0,
        }
    }

    /// Add frame time and return how many fixed ticks to run now.
    ///
    /// Time beyond `max_steps` ticks is dropped, so a long stall doesn't
    /// snowball into ever longer frames.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_nan() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        let steps = if self.accumulator >= self.dt * self.max_steps as f32 {
            self.accumulator = 0.0;
            self.max_steps
        } else {
            let steps = (self.accumulator / self.dt) as u32;
            self.accumulator -= steps as f32 * self.dt;
            steps
        };
        self.ticks += u64::from(steps);
        steps
    }

    /// How far the next tick has progressed (0.0 to 1.0), for render interpolation.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
