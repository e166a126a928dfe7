use super::world::PhysicsWorld;

/// Upper bound on catch-up steps per tick (tab was backgrounded, etc.)
const MAX_STEPS_PER_TICK: u32 = 4;

/// Fixed-step runner: turns wall-clock ticks into whole `delta_ms` steps.
#[derive(Clone, Debug)]
pub struct Runner {
    delta_ms: f64,
    accumulator: f64,
    running: bool,
}

impl Runner {
    pub fn new(delta_ms: f64) -> Self {
        Self {
            delta_ms: delta_ms.max(1.0),
            accumulator: 0.0,
            running: false,
        }
    }

    pub fn delta_ms(&self) -> f64 {
        self.delta_ms
    }

    pub fn start(&mut self) {
        self.running = true;
        self.accumulator = 0.0;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance `world` by the whole steps that fit in `elapsed_ms`.
    /// Returns the number of steps taken.
    pub fn tick(&mut self, world: &mut PhysicsWorld, elapsed_ms: f64) -> u32 {
        if !self.running || !(elapsed_ms > 0.0) {
            return 0;
        }

        let budget = self.delta_ms * MAX_STEPS_PER_TICK as f64;
        self.accumulator = (self.accumulator + elapsed_ms).min(budget);

        let mut steps = 0;
        while self.accumulator >= self.delta_ms && steps < MAX_STEPS_PER_TICK {
            world.step(self.delta_ms);
            self.accumulator -= self.delta_ms;
            steps += 1;
        }
        steps
    }
}
