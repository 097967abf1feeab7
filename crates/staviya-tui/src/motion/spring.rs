//! L4 Atomic Layer: Damped spring used as the scroll progress low-pass filter
//!
//! With the default parameters (stiffness 100, damping 30, mass 1) the spring
//! is overdamped, so a value released from rest approaches its target without
//! overshooting.

use std::time::Duration;

use super::config::SpringConfig;

/// Integration step upper bound; keeps semi-implicit Euler stable for stiff springs
const MAX_SUBSTEP_SECS: f64 = 0.001;
/// Upper bound on substeps per call, so a very long frame cannot stall the loop
const MAX_SUBSTEPS: u32 = 2_000;

#[derive(Debug, Clone)]
pub struct Spring {
    config: SpringConfig,
    position: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    /// Spring at rest on `initial`
    pub fn new(config: SpringConfig, initial: f64) -> Self {
        Self {
            config,
            position: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Place the spring on `value` with no motion
    pub fn jump_to(&mut self, value: f64) {
        self.position = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// True once the spring sits exactly on its target with no velocity
    #[inline]
    pub fn is_at_rest(&self) -> bool {
        self.position == self.target && self.velocity == 0.0
    }

    /// Advance the simulation by `dt` and return the new position.
    ///
    /// When both the distance to the target and the speed fall under the
    /// configured rest thresholds, the spring snaps onto the target.
    pub fn step(&mut self, dt: Duration) -> f64 {
        if self.is_at_rest() {
            return self.position;
        }

        let total = dt.as_secs_f64();
        if total > 0.0 {
            let substeps = ((total / MAX_SUBSTEP_SECS).ceil() as u32).clamp(1, MAX_SUBSTEPS);
            let h = total / substeps as f64;
            let mass = if self.config.mass > 0.0 { self.config.mass } else { 1.0 };

            for _ in 0..substeps {
                let displacement = self.position - self.target;
                let force = -self.config.stiffness * displacement - self.config.damping * self.velocity;
                self.velocity += force / mass * h;
                self.position += self.velocity * h;
            }
        }

        if (self.position - self.target).abs() < self.config.rest_delta
            && self.velocity.abs() < self.config.rest_speed
        {
            self.position = self.target;
            self.velocity = 0.0;
        }

        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_rest_spring_does_not_move() {
        let mut spring = Spring::new(SpringConfig::default(), 0.3);
        assert!(spring.is_at_rest());
        assert_eq!(spring.step(FRAME), 0.3);
    }

    #[test]
    fn test_converges_without_overshoot() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.set_target(1.0);

        let mut prev = 0.0;
        let mut frames = 0;
        while !spring.is_at_rest() {
            let value = spring.step(FRAME);
            assert!(value >= prev, "went backwards at frame {}", frames);
            assert!(value <= 1.0, "overshot to {}", value);
            prev = value;
            frames += 1;
            assert!(frames < 600, "did not settle within 10s");
        }
        assert_eq!(spring.position(), 1.0);
        // Slowest mode of the default spring decays at ~3.8/s
        assert!(frames > 30);
    }

    #[test]
    fn test_retarget_mid_flight() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.set_target(1.0);
        for _ in 0..10 {
            spring.step(FRAME);
        }
        spring.set_target(0.0);
        for _ in 0..600 {
            spring.step(FRAME);
            if spring.is_at_rest() {
                break;
            }
        }
        assert!(spring.is_at_rest());
        assert_eq!(spring.position(), 0.0);
    }

    #[test]
    fn test_long_frame_is_stable() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.set_target(1.0);
        let value = spring.step(Duration::from_secs(1));
        assert!(value.is_finite());
        assert!((0.0..=1.0).contains(&value));
    }

    #[test]
    fn test_jump_to_stops_motion() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.set_target(1.0);
        spring.step(FRAME);
        spring.jump_to(0.5);
        assert!(spring.is_at_rest());
        assert_eq!(spring.velocity(), 0.0);
        assert_eq!(spring.target(), 0.5);
    }
}
