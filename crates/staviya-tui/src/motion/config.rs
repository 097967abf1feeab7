//! L4 Atomic Layer: Configuration types for the motion engine
//!
//! Re-exports configuration from staviya-core and adds duration helpers.

use std::time::Duration;

// Re-export config types from core
pub use staviya_core::{EasingType, MotionConfig, SpringConfig};

/// Extension trait for MotionConfig with utility methods
pub trait MotionConfigExt {
    /// Duration of a scroll-to-section animation
    fn scroll_duration(&self) -> Duration;

    /// Frame interval while something is animating
    fn frame_duration(&self) -> Duration;

    /// Check if smooth scrolling is effectively enabled
    fn is_smooth(&self) -> bool;
}

impl MotionConfigExt for MotionConfig {
    #[inline]
    fn scroll_duration(&self) -> Duration {
        Duration::from_millis(self.scroll_duration_ms)
    }

    #[inline]
    fn frame_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_scroll_enabled && self.scroll_duration_ms > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MotionConfig::default();
        assert!(config.smooth_scroll_enabled);
        assert_eq!(config.scroll_duration_ms, 600);
        assert_eq!(config.easing, EasingType::Cubic);
        assert_eq!(config.animation_fps, 60);
        assert_eq!(config.spring, SpringConfig::default());
    }

    #[test]
    fn test_frame_duration() {
        let mut config = MotionConfig::default();
        assert_eq!(config.frame_duration(), Duration::from_millis(16));
        config.animation_fps = 0;
        assert_eq!(config.frame_duration(), Duration::from_millis(16));
        config.animation_fps = 30;
        assert_eq!(config.frame_duration(), Duration::from_millis(33));
    }

    #[test]
    fn test_is_smooth() {
        let mut config = MotionConfig::default();
        assert!(config.is_smooth());

        config.smooth_scroll_enabled = false;
        assert!(!config.is_smooth());

        config.smooth_scroll_enabled = true;
        config.scroll_duration_ms = 0;
        assert!(!config.is_smooth());
    }
}
