//! Timing curves for anchor scrolling and entrance transitions.
//!
//! A curve maps normalized time to normalized progress. Both ends are pinned:
//! input is clamped to [0, 1] and every curve starts at 0 and lands on 1.

pub use staviya_core::EasingType;

/// Evaluate an [`EasingType`] at a point in time
pub trait EasingTypeExt {
    /// Progress at normalized time `t`, clamped to [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None if t < 1.0 => 0.0,
            EasingType::None => 1.0,
            EasingType::Linear => t,
            EasingType::Cubic => decelerate(t, 3),
            EasingType::Quintic => decelerate(t, 5),
            EasingType::EaseOut => exponential(t),
            EasingType::CssEaseOut => CubicBezier::EASE_OUT.at(t),
        }
    }
}

/// Polynomial deceleration of degree `power`
#[inline]
fn decelerate(t: f64, power: i32) -> f64 {
    1.0 - (1.0 - t).powi(power)
}

/// Halves the remaining distance every tenth of the run. Snaps at the end
/// since 2^-10 is not quite zero.
#[inline]
fn exponential(t: f64) -> f64 {
    if t >= 1.0 {
        return 1.0;
    }
    1.0 - (-10.0 * t).exp2()
}

/// A `cubic-bezier(x1, y1, x2, y2)` timing function as browsers define it,
/// anchored at (0, 0) and (1, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    /// The `ease-out` keyword
    pub const EASE_OUT: Self = Self {
        x1: 0.0,
        y1: 0.0,
        x2: 0.58,
        y2: 1.0,
    };

    /// Control point x values are clamped to [0, 1] so x stays monotonic
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    /// Output at input `x`
    pub fn at(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }
        bezier(self.y1, self.y2, self.solve(x))
    }

    /// Curve parameter whose x coordinate is `x`
    fn solve(&self, x: f64) -> f64 {
        const EPSILON: f64 = 1e-7;

        let mut s = x;
        for _ in 0..8 {
            let error = bezier(self.x1, self.x2, s) - x;
            if error.abs() < EPSILON {
                return s;
            }
            let slope = bezier_slope(self.x1, self.x2, s);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= error / slope;
        }

        // Flat spot: bisect, x(s) is monotonic on [0, 1]
        let (mut lo, mut hi) = (0.0, 1.0);
        s = x;
        while hi - lo > EPSILON {
            if bezier(self.x1, self.x2, s) < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        s
    }
}

/// One coordinate of the curve at parameter `s`, given its two inner
/// control values
#[inline]
fn bezier(p1: f64, p2: f64, s: f64) -> f64 {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    ((a * s + b) * s + c) * s
}

#[inline]
fn bezier_slope(p1: f64, p2: f64, s: f64) -> f64 {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    (3.0 * a * s + 2.0 * b) * s + c
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [EasingType; 5] = [
        EasingType::Linear,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
        EasingType::CssEaseOut,
    ];

    #[test]
    fn test_curves_are_pinned_at_both_ends() {
        for easing in CURVES {
            assert!(easing.apply(0.0).abs() < 1e-9, "{:?} at t=0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{:?} at t=1", easing);
        }
        assert_eq!(EasingType::None.apply(0.99), 0.0);
        assert_eq!(EasingType::None.apply(1.0), 1.0);
    }

    #[test]
    fn test_curves_never_move_backwards() {
        for easing in CURVES {
            let mut prev = 0.0;
            for i in 0..=40 {
                let t = i as f64 / 40.0;
                let v = easing.apply(t);
                assert!(v >= prev, "{:?} went backwards at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        for easing in CURVES {
            assert_eq!(easing.apply(-0.5), easing.apply(0.0));
            assert_eq!(easing.apply(1.5), easing.apply(1.0));
        }
    }

    #[test]
    fn test_power_curves() {
        assert!((EasingType::Cubic.apply(0.5) - 0.875).abs() < 1e-12);
        assert!((EasingType::Quintic.apply(0.5) - 0.96875).abs() < 1e-12);
        assert!((EasingType::EaseOut.apply(0.1) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_bezier_matches_browser_values() {
        // Symmetric about the midpoint when the control points are
        let symmetric = CubicBezier::new(0.42, 0.0, 0.58, 1.0);
        assert!((symmetric.at(0.5) - 0.5).abs() < 1e-6);
        assert!((symmetric.at(0.25) + symmetric.at(0.75) - 1.0).abs() < 1e-6);

        // Straight line when the control points sit on the diagonal
        let line = CubicBezier::new(0.25, 0.25, 0.75, 0.75);
        for i in 0..=10 {
            let x = i as f64 / 10.0;
            assert!((line.at(x) - x).abs() < 1e-6);
        }

        // Decelerating curves run ahead of linear time
        assert!(CubicBezier::EASE_OUT.at(0.5) > 0.5);
        assert!(CubicBezier::new(0.25, 0.1, 0.25, 1.0).at(0.5) > 0.5);
    }

    #[test]
    fn test_bezier_clamps_control_x() {
        let wild = CubicBezier::new(-1.0, 0.0, 2.0, 1.0);
        assert_eq!(wild, CubicBezier::new(0.0, 0.0, 1.0, 1.0));
        assert!(wild.at(0.3).is_finite());
    }
}
