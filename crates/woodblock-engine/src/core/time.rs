/// Fixed timestep accumulator.
/// Keeps stage timers advancing at a steady rate regardless of frame time.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // At most 10 steps per frame.
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// A cancellable periodic timer driven by elapsed milliseconds.
///
/// Nothing runs in the background: the owner advances it from its tick and
/// reacts to the number of periods that fired.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period_ms: f32,
    phase_ms: f32,
    running: bool,
}

impl IntervalTimer {
    pub fn new(period_ms: f32) -> Self {
        Self {
            period_ms: period_ms.max(1.0),
            phase_ms: 0.0,
            running: false,
        }
    }

    /// Start (or restart) the timer from a zero phase.
    pub fn start(&mut self) {
        self.phase_ms = 0.0;
        self.running = true;
    }

    /// Stop the timer. Further `advance` calls fire nothing.
    pub fn cancel(&mut self) {
        self.running = false;
        self.phase_ms = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by `elapsed_ms`; returns how many periods elapsed.
    pub fn advance(&mut self, elapsed_ms: f32) -> u32 {
        if !self.running {
            return 0;
        }
        self.phase_ms += elapsed_ms.max(0.0);
        let fired = (self.phase_ms / self.period_ms) as u32;
        self.phase_ms -= fired as f32 * self.period_ms;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0), 10);
    }

    #[test]
    fn idle_timer_never_fires() {
        let mut timer = IntervalTimer::new(50.0);
        assert_eq!(timer.advance(500.0), 0);
        assert!(!timer.is_running());
    }

    #[test]
    fn fires_once_per_period() {
        let mut timer = IntervalTimer::new(50.0);
        timer.start();
        assert_eq!(timer.advance(30.0), 0);
        assert_eq!(timer.advance(30.0), 1);
        assert_eq!(timer.advance(100.0), 2);
    }

    #[test]
    fn cancel_stops_and_restart_resets_phase() {
        let mut timer = IntervalTimer::new(50.0);
        timer.start();
        timer.advance(40.0);
        timer.cancel();
        assert_eq!(timer.advance(100.0), 0);

        timer.start();
        assert_eq!(timer.advance(40.0), 0);
        assert_eq!(timer.advance(10.0), 1);
    }
}
