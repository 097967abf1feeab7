//! L3 Molecular Layer: Viewport reveal detection
//!
//! Tracks which page elements have been scrolled into view. The `has_entered`
//! flag of an element is write-once: after it flips to true it never resets,
//! no matter how the viewport moves afterwards.

use std::collections::HashMap;

/// Vertical extent of an element in page coordinates (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Visible window of the page: `top` is the current scroll offset
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub top: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Grow (positive) or shrink (negative) the viewport on both edges
    fn with_margin(&self, margin: f64) -> Rect {
        Rect::new(self.top - margin, (self.height + 2.0 * margin).max(0.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    /// Fraction of the element that must be visible; 0 means any intersection
    pub threshold: f64,
    /// Pixels added to each viewport edge before testing
    pub margin: f64,
    /// Stop observing after the first entry
    pub once: bool,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            margin: 0.0,
            once: true,
        }
    }
}

impl RevealOptions {
    pub fn with_margin(margin: f64) -> Self {
        Self {
            margin,
            ..Default::default()
        }
    }

    /// Whether `bounds` is sufficiently visible in `viewport`
    pub fn is_satisfied(&self, bounds: Rect, viewport: Viewport) -> bool {
        let area = viewport.with_margin(self.margin);
        if area.height <= 0.0 {
            return false;
        }

        if bounds.height <= 0.0 {
            return bounds.top >= area.top && bounds.top <= area.bottom();
        }

        let overlap = bounds.bottom().min(area.bottom()) - bounds.top.max(area.top);
        if overlap <= 0.0 {
            return false;
        }
        let threshold = self.threshold.clamp(0.0, 1.0);
        threshold == 0.0 || overlap / bounds.height >= threshold
    }
}

#[derive(Debug, Clone)]
struct Observed {
    key: String,
    bounds: Rect,
    options: RevealOptions,
    has_entered: bool,
    in_view: bool,
}

impl Observed {
    #[inline]
    fn is_active(&self) -> bool {
        !(self.options.once && self.has_entered)
    }
}

/// Arena of observed elements keyed by content item id
#[derive(Debug, Clone, Default)]
pub struct ViewportRevealDetector {
    entries: Vec<Observed>,
    index: HashMap<String, usize>,
}

impl ViewportRevealDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing `key`. Re-observing a known key updates its bounds and
    /// options but keeps its reveal state.
    pub fn observe(&mut self, key: impl Into<String>, bounds: Rect, options: RevealOptions) {
        let key = key.into();
        if let Some(&i) = self.index.get(&key) {
            let entry = &mut self.entries[i];
            entry.bounds = bounds;
            entry.options = options;
            return;
        }

        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(Observed {
            key,
            bounds,
            options,
            has_entered: false,
            in_view: false,
        });
    }

    /// Layout change for an observed element. Returns false for unknown keys.
    pub fn set_bounds(&mut self, key: &str, bounds: Rect) -> bool {
        match self.index.get(key) {
            Some(&i) => {
                self.entries[i].bounds = bounds;
                true
            }
            None => false,
        }
    }

    pub fn unobserve(&mut self, key: &str) -> bool {
        let Some(i) = self.index.remove(key) else {
            return false;
        };
        self.entries.remove(i);
        for (pos, entry) in self.entries.iter().enumerate().skip(i) {
            self.index.insert(entry.key.clone(), pos);
        }
        true
    }

    /// Drop every element whose key fails `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries.retain(|entry| keep(&entry.key));
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.key.clone(), i))
            .collect();
    }

    /// Test every active element against `viewport` and return the keys whose
    /// `has_entered` flipped on this call, in observation order.
    pub fn update(&mut self, viewport: Viewport) -> Vec<String> {
        let mut entered = Vec::new();

        for entry in self.entries.iter_mut().filter(|e| e.is_active()) {
            let visible = entry.options.is_satisfied(entry.bounds, viewport);
            entry.in_view = visible;
            if visible && !entry.has_entered {
                entry.has_entered = true;
                entered.push(entry.key.clone());
            }
        }

        if !entered.is_empty() {
            tracing::debug!("{} element(s) entered the viewport", entered.len());
        }
        entered
    }

    pub fn has_entered(&self, key: &str) -> bool {
        self.get(key).is_some_and(|e| e.has_entered)
    }

    /// Current visibility; only maintained for elements observed with
    /// `once = false` (one-shot elements report their state at entry)
    pub fn in_view(&self, key: &str) -> bool {
        self.get(key).is_some_and(|e| e.in_view)
    }

    pub fn is_observing(&self, key: &str) -> bool {
        self.get(key).is_some_and(|e| e.is_active())
    }

    /// Number of elements still waiting for updates
    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_active()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get(&self, key: &str) -> Option<&Observed> {
        self.index.get(key).map(|&i| &self.entries[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp(top: f64) -> Viewport {
        Viewport::new(top, 800.0)
    }

    #[test]
    fn test_enters_once_and_never_resets() {
        let mut detector = ViewportRevealDetector::new();
        detector.observe("svc-1", Rect::new(1200.0, 200.0), RevealOptions::default());

        assert!(detector.update(vp(0.0)).is_empty());
        assert!(!detector.has_entered("svc-1"));

        assert_eq!(detector.update(vp(500.0)), vec!["svc-1".to_string()]);
        assert!(detector.has_entered("svc-1"));
        assert!(!detector.is_observing("svc-1"));

        // Scrolling away and back neither resets nor re-triggers
        assert!(detector.update(vp(0.0)).is_empty());
        assert!(detector.has_entered("svc-1"));
        assert!(detector.update(vp(500.0)).is_empty());
    }

    #[test]
    fn test_negative_margin_delays_entry() {
        let mut detector = ViewportRevealDetector::new();
        detector.observe("ms-1", Rect::new(850.0, 300.0), RevealOptions::with_margin(-100.0));

        // Top edge 50px into the viewport, still inside the shrunk margin
        assert!(detector.update(vp(100.0)).is_empty());
        // 150px in: past the 100px margin
        assert_eq!(detector.update(vp(200.0)).len(), 1);
    }

    #[test]
    fn test_positive_margin_reveals_early() {
        let options = RevealOptions::with_margin(50.0);
        assert!(options.is_satisfied(Rect::new(820.0, 100.0), vp(0.0)));
        assert!(!RevealOptions::default().is_satisfied(Rect::new(820.0, 100.0), vp(0.0)));
    }

    #[test]
    fn test_threshold_requires_visible_fraction() {
        let options = RevealOptions {
            threshold: 0.5,
            ..Default::default()
        };
        let bounds = Rect::new(700.0, 200.0);
        // 100 of 200 px visible
        assert!(options.is_satisfied(bounds, vp(0.0)));
        // 60 of 200 px visible
        assert!(!options.is_satisfied(bounds, vp(-40.0)));
    }

    #[test]
    fn test_edge_touching_is_not_intersecting() {
        let options = RevealOptions::default();
        assert!(!options.is_satisfied(Rect::new(800.0, 100.0), vp(0.0)));
        assert!(options.is_satisfied(Rect::new(799.0, 100.0), vp(0.0)));
    }

    #[test]
    fn test_repeating_observer_tracks_in_view() {
        let mut detector = ViewportRevealDetector::new();
        let options = RevealOptions {
            once: false,
            ..Default::default()
        };
        detector.observe("stat-1", Rect::new(1000.0, 100.0), options);

        assert_eq!(detector.update(vp(400.0)).len(), 1);
        assert!(detector.in_view("stat-1"));

        assert!(detector.update(vp(0.0)).is_empty());
        assert!(!detector.in_view("stat-1"));
        assert!(detector.has_entered("stat-1"));

        // Coming back sets in_view but does not report a second entry
        assert!(detector.update(vp(400.0)).is_empty());
        assert!(detector.in_view("stat-1"));
        assert!(detector.is_observing("stat-1"));
    }

    #[test]
    fn test_reobserve_keeps_state() {
        let mut detector = ViewportRevealDetector::new();
        detector.observe("tech-1", Rect::new(0.0, 50.0), RevealOptions::default());
        detector.update(vp(0.0));
        assert!(detector.has_entered("tech-1"));

        detector.observe("tech-1", Rect::new(5000.0, 50.0), RevealOptions::default());
        assert!(detector.has_entered("tech-1"));
        assert_eq!(detector.len(), 1);
    }

    #[test]
    fn test_set_bounds_moves_element_into_view() {
        let mut detector = ViewportRevealDetector::new();
        detector.observe("a", Rect::new(3000.0, 100.0), RevealOptions::default());
        detector.observe("b", Rect::new(4000.0, 100.0), RevealOptions::default());
        assert!(detector.update(vp(0.0)).is_empty());

        assert!(detector.set_bounds("b", Rect::new(100.0, 100.0)));
        assert!(!detector.set_bounds("missing", Rect::default()));
        assert_eq!(detector.update(vp(0.0)), vec!["b".to_string()]);
        assert_eq!(detector.active_count(), 1);
    }

    #[test]
    fn test_unobserve_reindexes() {
        let mut detector = ViewportRevealDetector::new();
        for (i, key) in ["a", "b", "c"].iter().enumerate() {
            detector.observe(*key, Rect::new(i as f64 * 1000.0, 10.0), RevealOptions::default());
        }
        assert!(detector.unobserve("a"));
        assert!(!detector.unobserve("a"));
        assert!(detector.set_bounds("c", Rect::new(0.0, 10.0)));
        assert_eq!(detector.update(vp(0.0)), vec!["c".to_string()]);
        assert!(!detector.has_entered("b"));
    }
}
