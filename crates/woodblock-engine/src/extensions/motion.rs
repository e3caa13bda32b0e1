// extensions/motion.rs
//
// Cosmetic motion helpers: easing curves and a critically-damped spring.
// Pure math, never consulted by gameplay rules.

use glam::Vec2;

/// Easing curve for short UI animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    #[default]
    Linear,
    /// Slow end.
    QuadOut,
    /// Slow start and end.
    CubicInOut,
}

impl Easing {
    /// Apply the curve to a normalized time `t` (clamped to [0, 1]).
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Critically-damped spring following a moving target.
///
/// Uses the closed-form solution, so it is stable for any `dt` and never
/// overshoots: the displayed value approaches the target monotonically.
#[derive(Debug, Clone, Copy)]
pub struct Spring {
    pub position: Vec2,
    velocity: Vec2,
    /// Angular frequency; higher settles faster (settle time ≈ 4 / omega).
    omega: f32,
}

impl Spring {
    pub fn new(position: Vec2, omega: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            omega,
        }
    }

    /// Advance toward `target` by `dt` seconds.
    pub fn step(&mut self, target: Vec2, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let delta = self.position - target;
        let decay = (-self.omega * dt).exp();
        let temp = (self.velocity + delta * self.omega) * dt;
        self.velocity = (self.velocity - temp * self.omega) * decay;
        self.position = target + (delta + temp) * decay;
    }

    /// Jump to `position` and stop.
    pub fn snap(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
    }
}

/// A one-shot eased transition between 0 and 1 (e.g. a flip).
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
    easing: Easing,
}

impl Transition {
    pub fn settled(value: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from: value,
            to: value,
            elapsed: duration,
            duration,
            easing,
        }
    }

    /// Retarget from the current value.
    pub fn retarget(&mut self, to: f32) {
        self.from = self.value();
        self.to = to;
        self.elapsed = 0.0;
    }

    pub fn tick(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    pub fn value(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        lerp(self.from, self.to, self.easing.apply(self.elapsed / self.duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints() {
        for easing in [Easing::Linear, Easing::QuadOut, Easing::CubicInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
        assert!(Easing::QuadOut.apply(0.5) > 0.5);
    }

    #[test]
    fn spring_converges_without_overshoot() {
        let target = Vec2::new(100.0, 0.0);
        let mut spring = Spring::new(Vec2::ZERO, 18.0);
        let mut last = 0.0;
        for _ in 0..120 {
            spring.step(target, 1.0 / 60.0);
            assert!(spring.position.x >= last - 1e-3);
            assert!(spring.position.x <= target.x + 1e-3);
            last = spring.position.x;
        }
        assert!((spring.position.x - target.x).abs() < 0.5);
    }

    #[test]
    fn snap_stops_motion() {
        let mut spring = Spring::new(Vec2::ZERO, 18.0);
        spring.step(Vec2::new(50.0, 50.0), 0.05);
        spring.snap(Vec2::ZERO);
        spring.step(Vec2::ZERO, 0.1);
        assert_eq!(spring.position, Vec2::ZERO);
    }

    #[test]
    fn transition_reaches_target() {
        let mut t = Transition::settled(0.0, 0.3, Easing::CubicInOut);
        assert_eq!(t.value(), 0.0);
        t.retarget(1.0);
        t.tick(0.15);
        assert!((t.value() - 0.5).abs() < 1e-4);
        t.tick(1.0);
        assert_eq!(t.value(), 1.0);
    }
}
