//! L3 Molecular Layer: Parallax bindings
//!
//! Derived visual values (offsets, opacities) computed from a scroll progress
//! signal. Every value is recomputed from the current signal, never
//! accumulated from deltas, so rapid or out-of-order scroll input cannot
//! drift a binding.

use tokio::sync::watch;

use super::timing::map_range;

/// Name of the hero block's vertical offset binding (pixels)
pub const HERO_OFFSET: &str = "hero_offset";
/// Name of the hero block's opacity binding
pub const HERO_OPACITY: &str = "hero_opacity";

/// Linear map from an input range to an output range, clamped at both ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolation {
    pub input: [f64; 2],
    pub output: [f64; 2],
}

impl Interpolation {
    pub const fn new(input: [f64; 2], output: [f64; 2]) -> Self {
        Self { input, output }
    }

    #[inline]
    pub fn apply(&self, signal: f64) -> f64 {
        map_range(
            signal,
            (self.input[0], self.input[1]),
            (self.output[0], self.output[1]),
        )
    }
}

/// One-off binding without a binder
#[inline]
pub fn bind(signal: f64, input: [f64; 2], output: [f64; 2]) -> f64 {
    Interpolation::new(input, output).apply(signal)
}

/// Named interpolations over one read-only progress signal
#[derive(Debug, Clone)]
pub struct ParallaxBinder {
    signal: watch::Receiver<f64>,
    bindings: Vec<(String, Interpolation)>,
}

impl ParallaxBinder {
    pub fn new(signal: watch::Receiver<f64>) -> Self {
        Self {
            signal,
            bindings: Vec::new(),
        }
    }

    /// Binder carrying the hero block presets: the block drifts down 200px and
    /// fades out over the first fifth of the page
    pub fn hero(signal: watch::Receiver<f64>) -> Self {
        let mut binder = Self::new(signal);
        binder
            .bind(HERO_OFFSET, Interpolation::new([0.0, 0.2], [0.0, 200.0]))
            .bind(HERO_OPACITY, Interpolation::new([0.0, 0.2], [1.0, 0.0]));
        binder
    }

    /// Register or replace a named binding
    pub fn bind(&mut self, name: impl Into<String>, interpolation: Interpolation) -> &mut Self {
        let name = name.into();
        match self.bindings.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = interpolation,
            None => self.bindings.push((name, interpolation)),
        }
        self
    }

    pub fn unbind(&mut self, name: &str) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|(n, _)| n != name);
        self.bindings.len() != before
    }

    /// Current value of the source signal
    #[inline]
    pub fn signal(&self) -> f64 {
        *self.signal.borrow()
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        let signal = self.signal();
        self.bindings
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, interpolation)| interpolation.apply(signal))
    }

    /// All bindings in registration order
    pub fn values(&self) -> Vec<(&str, f64)> {
        let signal = self.signal();
        self.bindings
            .iter()
            .map(|(name, interpolation)| (name.as_str(), interpolation.apply(signal)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hero_offset_clamps_outside_input_range() {
        let hero_offset = Interpolation::new([0.0, 0.2], [0.0, 200.0]);
        assert_eq!(hero_offset.apply(-0.1), 0.0);
        assert!((hero_offset.apply(0.1) - 100.0).abs() < 1e-9);
        assert_eq!(hero_offset.apply(1.0), 200.0);
    }

    #[test]
    fn test_bind_free_function() {
        assert_eq!(bind(1.0, [0.0, 0.2], [1.0, 0.0]), 0.0);
        assert_eq!(bind(0.0, [0.0, 0.2], [1.0, 0.0]), 1.0);
    }

    #[test]
    fn test_degenerate_input_range_steps() {
        let step = Interpolation::new([0.5, 0.5], [10.0, 20.0]);
        assert_eq!(step.apply(0.4), 10.0);
        assert_eq!(step.apply(0.5), 20.0);
    }

    #[test]
    fn test_binder_follows_signal() {
        let (tx, rx) = watch::channel(0.0);
        let binder = ParallaxBinder::hero(rx);

        assert_eq!(binder.value(HERO_OFFSET), Some(0.0));
        assert_eq!(binder.value(HERO_OPACITY), Some(1.0));

        tx.send_replace(0.1);
        assert!((binder.value(HERO_OFFSET).unwrap() - 100.0).abs() < 1e-9);
        assert!((binder.value(HERO_OPACITY).unwrap() - 0.5).abs() < 1e-9);

        tx.send_replace(0.8);
        assert_eq!(binder.values(), vec![(HERO_OFFSET, 200.0), (HERO_OPACITY, 0.0)]);

        // Going back recomputes from the signal, no accumulated drift
        tx.send_replace(0.0);
        assert_eq!(binder.value(HERO_OFFSET), Some(0.0));
    }

    #[test]
    fn test_bindings_are_independent() {
        let (_tx, rx) = watch::channel(0.5);
        let mut binder = ParallaxBinder::new(rx);
        binder
            .bind("slow", Interpolation::new([0.0, 1.0], [0.0, 10.0]))
            .bind("fast", Interpolation::new([0.0, 0.25], [0.0, 10.0]));

        assert_eq!(binder.value("slow"), Some(5.0));
        assert_eq!(binder.value("fast"), Some(10.0));
        assert_eq!(binder.value("missing"), None);

        binder.bind("slow", Interpolation::new([0.0, 1.0], [0.0, 100.0]));
        assert_eq!(binder.len(), 2);
        assert_eq!(binder.value("slow"), Some(50.0));
        assert_eq!(binder.value("fast"), Some(10.0));

        assert!(binder.unbind("fast"));
        assert!(!binder.unbind("fast"));
        assert_eq!(binder.len(), 1);
    }
}
