use crate::core::time::IntervalTimer;

/// Qualitative band of a carving force, shown next to the force meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceLevel {
    Light,
    Medium,
    Heavy,
    Full,
}

impl ForceLevel {
    pub fn from_force(force: f32) -> Self {
        if force < 0.3 {
            ForceLevel::Light
        } else if force < 0.6 {
            ForceLevel::Medium
        } else if force < 0.85 {
            ForceLevel::Heavy
        } else {
            ForceLevel::Full
        }
    }

    /// Event wire code (light = 0 … full = 3).
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn label(self) -> &'static str {
        match self {
            ForceLevel::Light => "light",
            ForceLevel::Medium => "medium",
            ForceLevel::Heavy => "heavy",
            ForceLevel::Full => "full",
        }
    }
}

/// Force after holding for `elapsed_ms`: a linear ramp saturating at 1.
pub fn force_at(elapsed_ms: f32, ramp_ms: f32) -> f32 {
    if ramp_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / ramp_ms).clamp(0.0, 1.0)
}

/// Press-duration force model.
///
/// While pressed, elapsed time accumulates from the owner's ticks and a
/// sampling timer refreshes the published force every period. A move can ask
/// for the current force at any time with [`ForceAccumulator::sample`].
#[derive(Debug, Clone)]
pub struct ForceAccumulator {
    ramp_ms: f32,
    elapsed_ms: f32,
    sampler: IntervalTimer,
    force: f32,
    pressed: bool,
}

impl ForceAccumulator {
    pub fn new(ramp_ms: f32, sample_ms: f32) -> Self {
        Self {
            ramp_ms,
            elapsed_ms: 0.0,
            sampler: IntervalTimer::new(sample_ms),
            force: 0.0,
            pressed: false,
        }
    }

    /// Start a press. Force restarts from 0.
    pub fn press(&mut self) {
        self.pressed = true;
        self.elapsed_ms = 0.0;
        self.force = 0.0;
        self.sampler.start();
    }

    /// Advance the press clock. Returns the new force when the sampler fired.
    pub fn tick(&mut self, dt_ms: f32) -> Option<f32> {
        if !self.pressed {
            return None;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        if self.sampler.advance(dt_ms) > 0 {
            self.force = force_at(self.elapsed_ms, self.ramp_ms);
            Some(self.force)
        } else {
            None
        }
    }

    /// Evaluate the force right now (used for every carve move).
    pub fn sample(&mut self) -> f32 {
        if self.pressed {
            self.force = force_at(self.elapsed_ms, self.ramp_ms);
        }
        self.force
    }

    /// End the press. Force drops to 0 and the sampler stops.
    pub fn release(&mut self) {
        self.pressed = false;
        self.elapsed_ms = 0.0;
        self.force = 0.0;
        self.sampler.cancel();
    }

    /// Last published force.
    pub fn force(&self) -> f32 {
        self.force
    }

    pub fn level(&self) -> ForceLevel {
        ForceLevel::from_force(self.force)
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_sampling(&self) -> bool {
        self.sampler.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_saturates() {
        assert_eq!(force_at(0.0, 2000.0), 0.0);
        assert_eq!(force_at(1000.0, 2000.0), 0.5);
        assert_eq!(force_at(2000.0, 2000.0), 1.0);
        assert_eq!(force_at(9000.0, 2000.0), 1.0);
    }

    #[test]
    fn levels_follow_thresholds() {
        assert_eq!(ForceLevel::from_force(0.0), ForceLevel::Light);
        assert_eq!(ForceLevel::from_force(0.3), ForceLevel::Medium);
        assert_eq!(ForceLevel::from_force(0.6), ForceLevel::Heavy);
        assert_eq!(ForceLevel::from_force(0.85), ForceLevel::Full);
        assert_eq!(ForceLevel::Full.label(), "full");
    }

    #[test]
    fn samples_on_the_interval() {
        let mut acc = ForceAccumulator::new(2000.0, 50.0);
        acc.press();
        assert_eq!(acc.force(), 0.0);
        assert_eq!(acc.tick(30.0), None);
        assert_eq!(acc.tick(30.0), Some(0.03));
        for _ in 0..40 {
            acc.tick(50.0);
        }
        assert_eq!(acc.force(), 1.0);
    }

    #[test]
    fn held_still_for_a_second_is_half() {
        let mut acc = ForceAccumulator::new(2000.0, 50.0);
        acc.press();
        for _ in 0..20 {
            acc.tick(50.0);
        }
        assert!((acc.sample() - 0.5).abs() < 1e-5);
        assert_eq!(acc.level(), ForceLevel::Medium);
    }

    #[test]
    fn release_resets_and_stops_sampling() {
        let mut acc = ForceAccumulator::new(2000.0, 50.0);
        acc.press();
        acc.tick(500.0);
        acc.release();
        assert_eq!(acc.force(), 0.0);
        assert!(!acc.is_sampling());
        assert_eq!(acc.tick(500.0), None);
        assert_eq!(acc.sample(), 0.0);
    }

    #[test]
    fn idle_ticks_do_nothing() {
        let mut acc = ForceAccumulator::new(2000.0, 50.0);
        assert_eq!(acc.tick(1000.0), None);
        assert_eq!(acc.sample(), 0.0);
        assert!(!acc.is_pressed());
    }
}
