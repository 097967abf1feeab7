//! L3 Molecular Layer: Smooth page scrolling
//!
//! Animates the page scroll offset towards a target (an anchor jump or a
//! batch of wheel/key deltas). Time is passed in by the caller so the same
//! animation can be driven by a terminal loop or replayed headless.

use std::time::{Duration, Instant};

use super::config::{MotionConfig, MotionConfigExt};
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

/// Scroll animation controller
///
/// Call `scroll_to()` or `scroll_by()` to request movement, then `update()`
/// each frame to get the current interpolated offset.
#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: MotionConfig,
    /// Current offset in page pixels (always up-to-date)
    current: f64,
    /// Pending delta for batching multiple scroll events within one frame
    pending_delta: f64,
}

impl ScrollAnimator {
    pub fn new(config: MotionConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn set_config(&mut self, config: MotionConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Check if there's pending work (animation or pending delta)
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0.0
    }

    /// Final offset once the running animation completes
    pub fn target_offset(&self) -> f64 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current)
    }

    #[inline]
    pub fn current_offset(&self) -> f64 {
        self.current
    }

    /// Set the offset immediately (no animation)
    pub fn set_offset(&mut self, offset: f64) {
        self.animation = None;
        self.current = offset;
        self.pending_delta = 0.0;
    }

    /// Start an animation towards `target`, clamped to `[0, max_scroll]`.
    ///
    /// Jumps immediately when smooth scrolling is disabled.
    pub fn scroll_to(&mut self, target: f64, max_scroll: f64, now: Instant) {
        let target = target.clamp(0.0, max_scroll.max(0.0));
        self.pending_delta = 0.0;

        if !self.config.is_smooth() {
            self.current = target;
            self.animation = None;
            return;
        }

        if self.current == target {
            self.animation = None;
            return;
        }

        self.start_animation(target, now);
    }

    /// Scroll by a delta (positive = down). Deltas arriving before the next
    /// `update()` are batched into one animation.
    pub fn scroll_by(&mut self, delta: f64, max_scroll: f64) {
        if !self.config.is_smooth() {
            self.current = (self.current + delta).clamp(0.0, max_scroll.max(0.0));
            self.animation = None;
            return;
        }

        self.pending_delta += delta;
    }

    pub fn page_down(&mut self, viewport_height: f64, max_scroll: f64) {
        self.scroll_by(viewport_height, max_scroll);
    }

    pub fn page_up(&mut self, viewport_height: f64, max_scroll: f64) {
        self.scroll_by(-viewport_height, max_scroll);
    }

    fn start_animation(&mut self, to: f64, now: Instant) {
        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current,
            to,
            duration: self.config.scroll_duration(),
            easing: self.config.easing,
        });
    }

    /// Advance to `now` and return the current offset
    pub fn update(&mut self, now: Instant, max_scroll: f64) -> f64 {
        let max_scroll = max_scroll.max(0.0);

        if self.pending_delta != 0.0 {
            let target = (self.target_offset() + self.pending_delta).clamp(0.0, max_scroll);
            self.pending_delta = 0.0;

            if target != self.current {
                self.start_animation(target, now);
            } else {
                self.animation = None;
            }
        }

        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, now, anim.duration) {
                self.current = anim.to.min(max_scroll);
                self.animation = None;
            } else {
                let t = anim.easing.apply(progress(anim.start, now, anim.duration));
                self.current = lerp(anim.from, anim.to, t).min(max_scroll);
            }
        }

        self.current
    }

    /// Stop at the current offset
    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_delta = 0.0;
    }

    pub fn reset(&mut self) {
        self.set_offset(0.0);
    }
}
