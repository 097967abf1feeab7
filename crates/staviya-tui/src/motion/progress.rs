//! L3 Molecular Layer: Scroll progress tracker
//!
//! Converts raw scroll offsets into a smoothed, normalized progress signal and
//! pushes it to subscribers on every frame while the spring is converging.

use std::time::Duration;

use tokio::sync::watch;

use super::config::SpringConfig;
use super::spring::Spring;
use super::timing::inverse_lerp;

/// Scroll offsets (in page pixels) mapped to progress 0 and 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRange {
    pub start: f64,
    pub end: f64,
}

impl ScrollRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Whole document: 0 at the top, 1 once the last screenful is visible
    pub fn document(content_height: f64, viewport_height: f64) -> Self {
        Self::new(0.0, (content_height - viewport_height).max(0.0))
    }

    /// From the element's top meeting the viewport top to its bottom
    /// meeting the viewport bottom
    pub fn element(top: f64, height: f64, viewport_height: f64) -> Self {
        Self::new(top, top + height - viewport_height)
    }

    /// `clamp((offset - start) / (end - start), 0, 1)`.
    /// A range with `end <= start` is a step at `start`.
    pub fn raw_progress(&self, offset: f64) -> f64 {
        if self.end <= self.start {
            return if offset < self.start { 0.0 } else { 1.0 };
        }
        inverse_lerp(self.start, self.end, offset)
    }
}

pub struct ScrollProgressTracker {
    range: ScrollRange,
    offset: f64,
    raw: f64,
    spring: Spring,
    signal_tx: watch::Sender<f64>,
    suspended: bool,
}

impl ScrollProgressTracker {
    /// Tracker at rest on the progress of offset 0
    pub fn new(range: ScrollRange, spring: SpringConfig) -> Self {
        let raw = range.raw_progress(0.0);
        let (signal_tx, _) = watch::channel(raw);
        Self {
            range,
            offset: 0.0,
            raw,
            spring: Spring::new(spring, raw),
            signal_tx,
            suspended: true,
        }
    }

    /// Read-only view of the published signal
    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.signal_tx.subscribe()
    }

    pub fn range(&self) -> ScrollRange {
        self.range
    }

    /// Latest unsmoothed progress
    #[inline]
    pub fn raw(&self) -> f64 {
        self.raw
    }

    /// Latest published (smoothed) progress
    #[inline]
    pub fn value(&self) -> f64 {
        *self.signal_tx.borrow()
    }

    /// True while the signal is still converging and frames must keep coming
    #[inline]
    pub fn needs_frame(&self) -> bool {
        !self.suspended
    }

    /// Scroll event: recompute the raw progress and resume ticking if it moved
    pub fn on_scroll(&mut self, offset: f64) {
        self.offset = offset;
        self.retarget();
    }

    /// Resize event: the range moved under the same offset
    pub fn set_range(&mut self, range: ScrollRange) {
        self.range = range;
        self.retarget();
    }

    /// Place the signal on the current raw progress without smoothing
    pub fn settle(&mut self) {
        self.spring.jump_to(self.raw);
        self.signal_tx.send_replace(self.raw);
        self.suspended = true;
    }

    fn retarget(&mut self) {
        let raw = self.range.raw_progress(self.offset);
        self.raw = raw;
        if raw != self.spring.target() || !self.spring.is_at_rest() {
            self.spring.set_target(raw);
            self.suspended = false;
        }
    }

    /// Frame tick. Publishes a new value while converging and suspends once
    /// the spring comes to rest. Returns whether anything was published.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.suspended {
            return false;
        }

        let value = self.spring.step(dt).clamp(0.0, 1.0);
        self.signal_tx.send_replace(value);

        if self.spring.is_at_rest() {
            tracing::trace!("Scroll progress settled at {:.4}", value);
            self.suspended = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn tracker() -> ScrollProgressTracker {
        ScrollProgressTracker::new(ScrollRange::new(0.0, 1000.0), SpringConfig::default())
    }

    #[test]
    fn test_raw_progress_clamps() {
        let range = ScrollRange::new(100.0, 300.0);
        assert_eq!(range.raw_progress(0.0), 0.0);
        assert_eq!(range.raw_progress(200.0), 0.5);
        assert_eq!(range.raw_progress(900.0), 1.0);
    }

    #[test]
    fn test_degenerate_range_is_step() {
        let range = ScrollRange::document(500.0, 800.0);
        assert_eq!(range, ScrollRange::new(0.0, 0.0));
        assert_eq!(range.raw_progress(-1.0), 0.0);
        assert_eq!(range.raw_progress(0.0), 1.0);
    }

    #[test]
    fn test_element_range() {
        let range = ScrollRange::element(200.0, 3000.0, 800.0);
        assert_eq!(range, ScrollRange::new(200.0, 2400.0));
    }

    #[test]
    fn test_idle_tracker_does_not_tick() {
        let mut tracker = tracker();
        assert!(!tracker.needs_frame());
        assert!(!tracker.tick(FRAME));
    }

    #[test]
    fn test_publishes_until_converged_then_suspends() {
        let mut tracker = tracker();
        let mut rx = tracker.subscribe();

        tracker.on_scroll(500.0);
        assert_eq!(tracker.raw(), 0.5);
        assert!(tracker.needs_frame());

        let mut published = 0;
        let mut prev = 0.0;
        while tracker.needs_frame() {
            assert!(tracker.tick(FRAME));
            assert!(rx.has_changed().unwrap());
            let value = *rx.borrow_and_update();
            assert!(value >= prev && value <= 0.5);
            prev = value;
            published += 1;
            assert!(published < 1000);
        }

        assert_eq!(tracker.value(), 0.5);
        // Converged: further ticks are no-ops and publish nothing
        assert!(!tracker.tick(FRAME));
        assert!(!tracker.tick(FRAME));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_signal_lags_raw_input() {
        let mut tracker = tracker();
        tracker.on_scroll(1000.0);
        tracker.tick(FRAME);
        assert!(tracker.value() > 0.0);
        assert!(tracker.value() < tracker.raw());
    }

    #[test]
    fn test_scroll_within_clamped_region_stays_suspended() {
        let mut tracker = tracker();
        tracker.on_scroll(-50.0);
        assert!(!tracker.needs_frame());
        assert_eq!(tracker.raw(), 0.0);
    }

    #[test]
    fn test_resize_retargets() {
        let mut tracker = tracker();
        tracker.on_scroll(500.0);
        tracker.settle();
        assert_eq!(tracker.value(), 0.5);
        assert!(!tracker.needs_frame());

        tracker.set_range(ScrollRange::new(0.0, 2000.0));
        assert_eq!(tracker.raw(), 0.25);
        assert!(tracker.needs_frame());
    }

    #[test]
    fn test_rapid_input_never_leaves_unit_range() {
        let mut tracker = tracker();
        let mut rx = tracker.subscribe();
        for (i, offset) in [900.0, 0.0, 1000.0, 50.0, 2000.0, -300.0].iter().enumerate() {
            tracker.on_scroll(*offset);
            for _ in 0..(i + 1) {
                tracker.tick(FRAME);
                let value = *rx.borrow_and_update();
                assert!((0.0..=1.0).contains(&value));
            }
        }
    }
}
