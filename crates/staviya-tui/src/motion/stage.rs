//! L2 Organism Layer: Motion stage
//!
//! The single owner of all scroll-driven motion state on the page: the
//! smooth scroller, the document progress tracker, the hero parallax
//! bindings, the reveal detector, one stagger sequencer per section and the
//! entrance timeline. The view feeds it input and calls `frame()` while
//! `needs_frame()` is true.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::{Duration, Instant};

use tokio::sync::watch;

use staviya_core::content::CollectionName;
use staviya_core::{Anchor, Error, Result};

use super::animation::ScrollAnimator;
use super::config::MotionConfig;
use super::entrance::{EntrancePhase, EntrancePreset, EntranceTimeline, Pose};
use super::parallax::{ParallaxBinder, HERO_OFFSET, HERO_OPACITY};
use super::progress::{ScrollProgressTracker, ScrollRange};
use super::reveal::{Rect, Viewport, ViewportRevealDetector};
use super::stagger::StaggerSequencer;

/// Position of one animated content item on the page
#[derive(Debug, Clone, PartialEq)]
pub struct ItemLayout {
    pub key: String,
    pub collection: CollectionName,
    pub bounds: Rect,
}

/// Geometry of the whole page in pixels
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub viewport_height: f64,
    pub content_height: f64,
    /// Top offset of each section anchor
    pub anchors: Vec<(Anchor, f64)>,
    /// Items in page order; within a section this is the stagger order
    pub items: Vec<ItemLayout>,
}

impl PageLayout {
    pub fn max_scroll(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }
}

/// What one frame changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub offset: f64,
    pub progress: f64,
    /// Items that entered the viewport on this frame
    pub revealed: Vec<String>,
    /// Entrance state transitions fired on this frame
    pub transitions: usize,
}

pub struct MotionStage {
    viewport_height: f64,
    content_height: f64,
    anchors: HashMap<Anchor, f64>,
    /// Offset last pushed to the tracker and detector
    offset: f64,
    scroller: ScrollAnimator,
    tracker: ScrollProgressTracker,
    hero: ParallaxBinder,
    reveal: ViewportRevealDetector,
    sequencers: BTreeMap<CollectionName, StaggerSequencer>,
    timeline: EntranceTimeline,
    reveal_dirty: bool,
    laid_out: bool,
}

impl MotionStage {
    pub fn new(config: &MotionConfig) -> Self {
        let tracker = ScrollProgressTracker::new(ScrollRange::document(0.0, 0.0), config.spring);
        let hero = ParallaxBinder::hero(tracker.subscribe());
        let sequencers = CollectionName::ALL
            .into_iter()
            .map(|name| {
                let interval = EntrancePreset::for_collection(name).interval;
                (name, StaggerSequencer::new(interval))
            })
            .collect();

        Self {
            viewport_height: 0.0,
            content_height: 0.0,
            anchors: HashMap::new(),
            offset: 0.0,
            scroller: ScrollAnimator::new(config.clone()),
            tracker,
            hero,
            reveal: ViewportRevealDetector::new(),
            sequencers,
            timeline: EntranceTimeline::new(),
            reveal_dirty: false,
            laid_out: false,
        }
    }

    /// Apply a new page geometry (initial mount, data landing, resize)
    pub fn set_layout(&mut self, layout: &PageLayout) {
        self.viewport_height = layout.viewport_height.max(0.0);
        self.content_height = layout.content_height.max(0.0);
        self.anchors = layout.anchors.iter().copied().collect();

        let mut by_collection: BTreeMap<CollectionName, Vec<&ItemLayout>> = BTreeMap::new();
        for item in &layout.items {
            by_collection.entry(item.collection).or_default().push(item);
        }

        for (name, sequencer) in self.sequencers.iter_mut() {
            let items = by_collection.get(name).map(Vec::as_slice).unwrap_or_default();
            sequencer.sync(items.iter().map(|item| item.key.as_str()));

            let preset = EntrancePreset::for_collection(*name);
            for (index, item) in items.iter().enumerate() {
                self.timeline.register(item.key.as_str(), *name, index);
                self.reveal.observe(item.key.as_str(), item.bounds, preset.reveal);
            }
        }

        let keys: HashSet<&str> = layout.items.iter().map(|item| item.key.as_str()).collect();
        self.timeline.retain(|key| keys.contains(key));
        self.reveal.retain(|key| keys.contains(key));

        self.tracker
            .set_range(ScrollRange::document(self.content_height, self.viewport_height));
        // The first layout places the signal; later ones animate towards it
        if !self.laid_out {
            self.tracker.settle();
            self.laid_out = true;
        }

        let max_scroll = self.max_scroll();
        if self.scroller.target_offset() > max_scroll {
            self.scroller.set_offset(self.scroller.current_offset().min(max_scroll));
        }
        self.reveal_dirty = true;

        tracing::debug!(
            "Layout: {} item(s), content {:.0}px, viewport {:.0}px",
            layout.items.len(),
            self.content_height,
            self.viewport_height
        );
    }

    #[inline]
    pub fn max_scroll(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Absolute scroll position reported by the host; cancels any smooth scroll
    pub fn on_scroll(&mut self, offset: f64) {
        let offset = offset.clamp(0.0, self.max_scroll());
        self.scroller.set_offset(offset);
        self.apply_offset(offset);
    }

    /// Relative scroll input (wheel, keys); batched until the next frame
    pub fn scroll_by(&mut self, delta: f64) {
        let max_scroll = self.max_scroll();
        self.scroller.scroll_by(delta, max_scroll);
    }

    pub fn page_down(&mut self) {
        let (viewport, max_scroll) = (self.viewport_height, self.max_scroll());
        self.scroller.page_down(viewport, max_scroll);
    }

    pub fn page_up(&mut self) {
        let (viewport, max_scroll) = (self.viewport_height, self.max_scroll());
        self.scroller.page_up(viewport, max_scroll);
    }

    /// Smoothly scroll to an absolute offset
    pub fn scroll_to(&mut self, offset: f64, now: Instant) {
        let max_scroll = self.max_scroll();
        self.scroller.scroll_to(offset, max_scroll, now);
    }

    /// Smoothly scroll the section's top to the top of the viewport
    pub fn scroll_to_anchor(&mut self, anchor: Anchor, now: Instant) -> Result<()> {
        let top = *self
            .anchors
            .get(&anchor)
            .ok_or_else(|| Error::UnknownAnchor(anchor.id().to_string()))?;
        tracing::debug!("Scrolling to #{} at {:.0}px", anchor, top);
        let max_scroll = self.max_scroll();
        self.scroller.scroll_to(top, max_scroll, now);
        Ok(())
    }

    fn apply_offset(&mut self, offset: f64) {
        if offset != self.offset {
            self.offset = offset;
            self.tracker.on_scroll(offset);
            self.reveal_dirty = true;
        }
    }

    /// Advance every motion component to `now`. `dt` is the time since the
    /// previous frame and drives the progress spring.
    pub fn frame(&mut self, now: Instant, dt: Duration) -> FrameReport {
        let max_scroll = self.max_scroll();
        let offset = self.scroller.update(now, max_scroll);
        self.apply_offset(offset);

        let revealed = if self.reveal_dirty {
            self.reveal_dirty = false;
            self.reveal.update(self.viewport())
        } else {
            Vec::new()
        };
        for key in &revealed {
            self.timeline.arm(key, now);
        }

        let transitions = self.timeline.advance(now);
        self.tracker.tick(dt);

        FrameReport {
            offset: self.offset,
            progress: self.tracker.value(),
            revealed,
            transitions,
        }
    }

    /// False once the progress signal converged, no smooth scroll is in
    /// flight and no entrance is pending
    pub fn needs_frame(&self) -> bool {
        self.reveal_dirty
            || self.scroller.needs_update()
            || self.scroller.current_offset() != self.offset
            || self.tracker.needs_frame()
            || self.timeline.is_animating()
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.offset, self.viewport_height)
    }

    /// Smoothed document progress
    pub fn progress(&self) -> f64 {
        self.tracker.value()
    }

    pub fn raw_progress(&self) -> f64 {
        self.tracker.raw()
    }

    pub fn subscribe_progress(&self) -> watch::Receiver<f64> {
        self.tracker.subscribe()
    }

    /// Hero block downward drift in pixels
    pub fn hero_offset(&self) -> f64 {
        self.hero.value(HERO_OFFSET).unwrap_or(0.0)
    }

    pub fn hero_opacity(&self) -> f64 {
        self.hero.value(HERO_OPACITY).unwrap_or(1.0)
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroller.is_animating()
    }

    pub fn anchor_offset(&self, anchor: Anchor) -> Option<f64> {
        self.anchors.get(&anchor).copied()
    }

    pub fn has_entered(&self, key: &str) -> bool {
        self.reveal.has_entered(key)
    }

    pub fn phase(&self, key: &str) -> Option<EntrancePhase> {
        self.timeline.phase(key)
    }

    pub fn pose(&self, key: &str, now: Instant) -> Pose {
        self.timeline.pose(key, now)
    }

    pub fn pose_after(&self, key: &str, now: Instant, extra: Duration) -> Pose {
        self.timeline.pose_after(key, now, extra)
    }

    pub fn delay_of(&self, key: &str) -> Option<Duration> {
        self.timeline.delay(key)
    }

    pub fn sequencer(&self, collection: CollectionName) -> Option<&StaggerSequencer> {
        self.sequencers.get(&collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn item(key: &str, collection: CollectionName, top: f64) -> ItemLayout {
        ItemLayout {
            key: key.to_string(),
            collection,
            bounds: Rect::new(top, 100.0),
        }
    }

    fn layout() -> PageLayout {
        PageLayout {
            viewport_height: 800.0,
            content_height: 5000.0,
            anchors: vec![
                (Anchor::Story, 900.0),
                (Anchor::Services, 2000.0),
                (Anchor::Contact, 4500.0),
            ],
            items: vec![
                item("ms-1", CollectionName::Milestones, 1000.0),
                item("svc-1", CollectionName::Services, 2100.0),
                item("svc-2", CollectionName::Services, 2100.0),
                item("svc-3", CollectionName::Services, 2400.0),
            ],
        }
    }

    fn run_until_idle(stage: &mut MotionStage, mut now: Instant) -> Instant {
        let mut frames = 0;
        while stage.needs_frame() {
            now += FRAME;
            stage.frame(now, FRAME);
            frames += 1;
            assert!(frames < 2000, "stage never went idle");
        }
        now
    }

    #[test]
    fn test_idle_until_layout() {
        let stage = MotionStage::new(&MotionConfig::default());
        assert!(!stage.needs_frame());
        assert_eq!(stage.hero_opacity(), 1.0);
        assert_eq!(stage.hero_offset(), 0.0);
    }

    #[test]
    fn test_layout_plans_stagger_per_section() {
        let mut stage = MotionStage::new(&MotionConfig::default());
        stage.set_layout(&layout());

        assert_eq!(stage.delay_of("svc-1"), Some(Duration::ZERO));
        assert_eq!(stage.delay_of("svc-3"), Some(Duration::from_millis(200)));
        assert_eq!(stage.delay_of("ms-1"), Some(Duration::ZERO));
        assert_eq!(
            stage.sequencer(CollectionName::Services).map(|s| s.len()),
            Some(3)
        );
        assert_eq!(stage.max_scroll(), 4200.0);
    }

    #[test]
    fn test_scroll_reveals_and_settles() {
        let t0 = Instant::now();
        let mut stage = MotionStage::new(&MotionConfig::default());
        stage.set_layout(&layout());

        // Nothing on the first screen
        let report = stage.frame(t0, FRAME);
        assert!(report.revealed.is_empty());

        stage.on_scroll(1500.0);
        let report = stage.frame(t0 + FRAME, FRAME);
        assert_eq!(report.revealed, vec!["svc-1".to_string(), "svc-2".to_string()]);
        assert!(stage.has_entered("svc-1"));
        assert!(!stage.has_entered("svc-3"));
        assert!(stage.needs_frame());

        let end = run_until_idle(&mut stage, t0 + FRAME);
        assert_eq!(stage.phase("svc-2"), Some(EntrancePhase::Settled));
        assert_eq!(stage.phase("svc-3"), Some(EntrancePhase::Idle));
        assert_eq!(stage.progress(), stage.raw_progress());
        assert_eq!(stage.pose("svc-2", end), Pose::IDENTITY);

        // Past the hero fade range
        assert_eq!(stage.hero_opacity(), 0.0);
        assert_eq!(stage.hero_offset(), 200.0);
    }

    #[test]
    fn test_scroll_to_anchor() {
        let t0 = Instant::now();
        let mut stage = MotionStage::new(&MotionConfig::default());
        stage.set_layout(&layout());

        stage.scroll_to_anchor(Anchor::Services, t0).unwrap();
        assert!(stage.is_scrolling());
        let end = run_until_idle(&mut stage, t0);
        assert!(end >= t0 + Duration::from_millis(600));
        assert_eq!(stage.offset(), 2000.0);
        assert!(stage.has_entered("svc-3"));

        // Contact sits past the last full screen: clamped
        stage.scroll_to_anchor(Anchor::Contact, end).unwrap();
        run_until_idle(&mut stage, end);
        assert_eq!(stage.offset(), 4200.0);
        assert_eq!(stage.progress(), 1.0);
    }

    #[test]
    fn test_scroll_to_missing_anchor_fails() {
        let mut stage = MotionStage::new(&MotionConfig::default());
        stage.set_layout(&layout());
        let err = stage
            .scroll_to_anchor(Anchor::WhyChoose, Instant::now())
            .unwrap_err();
        assert!(matches!(err, Error::UnknownAnchor(ref id) if id == "why-choose"));
    }

    #[test]
    fn test_relayout_keeps_entered_state() {
        let t0 = Instant::now();
        let mut stage = MotionStage::new(&MotionConfig::default());
        stage.set_layout(&layout());
        stage.on_scroll(1500.0);
        run_until_idle(&mut stage, t0);

        let mut relaid = layout();
        relaid.items.retain(|item| item.key != "ms-1");
        relaid.items.push(item("svc-4", CollectionName::Services, 2600.0));
        stage.set_layout(&relaid);

        assert!(stage.has_entered("svc-1"));
        assert_eq!(stage.phase("svc-1"), Some(EntrancePhase::Settled));
        assert_eq!(stage.phase("ms-1"), None);
        assert_eq!(stage.delay_of("svc-4"), Some(Duration::from_millis(300)));
    }

    #[test]
    fn test_batched_wheel_input() {
        let t0 = Instant::now();
        let mut stage = MotionStage::new(&MotionConfig::default());
        stage.set_layout(&layout());
        let now = run_until_idle(&mut stage, t0);
        assert_eq!(stage.progress(), 0.0);

        stage.scroll_by(60.0);
        stage.scroll_by(60.0);
        assert!(stage.needs_frame());
        let now = run_until_idle(&mut stage, now);
        assert_eq!(stage.offset(), 120.0);

        stage.scroll_by(-1000.0);
        run_until_idle(&mut stage, now);
        assert_eq!(stage.offset(), 0.0);
    }
}
