/// Fixed timestep accumulator.
/// Turns variable frame deltas into a whole number of fixed physics steps.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per step.
    dt: f32,
    /// Upper bound on steps per frame.
    max_steps: u32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            max_steps,
            accumulator: 0.0,
        }
    }

    /// Change step size and cap, keeping accumulated time.
    pub fn configure(&mut self, dt: f32, max_steps: u32) {
        self.dt = dt;
        self.max_steps = max_steps;
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Time beyond `max_steps` worth is dropped, not carried over.
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }
}
