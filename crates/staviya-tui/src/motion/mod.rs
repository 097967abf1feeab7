//! Scroll-driven motion engine for the Staviya page
//!
//! Converts scroll position into a smoothed progress signal, derives parallax
//! values from it, detects first entry of page elements into the viewport and
//! plays staggered one-shot entrance transitions.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Timing curves (power, exponential, CSS cubic-bezier)
//! - `timing` - Time and range arithmetic (progress, interpolation)
//! - `spring` - Damped spring used to smooth the progress signal
//! - `config` - Configuration types and defaults (re-exported from staviya-core)
//!
//! ## L3 Molecular Layer
//! - `animation` - Smooth scroll-to-offset controller
//! - `progress` - Scroll progress tracker publishing through a watch channel
//! - `parallax` - Named interpolations over a progress signal
//! - `reveal` - One-shot viewport entry detection
//! - `stagger` - Per-item delay planning
//! - `entrance` - Per-item entrance state machine and section presets
//!
//! ## L2 Organism Layer
//! - `stage` - Owns all of the above and drives them from one frame tick
//!
//! # Usage
//!
//! ```ignore
//! use staviya_tui::motion::{MotionStage, PageLayout};
//!
//! let mut stage = MotionStage::new(&config.motion);
//! stage.set_layout(&layout);
//!
//! // On input
//! stage.scroll_by(60.0);
//!
//! // In main loop, while work remains
//! if stage.needs_frame() {
//!     let report = stage.frame(now, dt);
//! }
//! ```

// L4 Atomic Layer
pub mod config;
pub mod easing;
pub mod spring;
pub mod timing;

// L3 Molecular Layer
pub mod animation;
pub mod entrance;
pub mod parallax;
pub mod progress;
pub mod reveal;
pub mod stagger;

// L2 Organism Layer
pub mod stage;

// Re-exports for convenient access
pub use animation::ScrollAnimator;
pub use config::{MotionConfig, MotionConfigExt, SpringConfig};
pub use easing::{EasingType, EasingTypeExt};
pub use entrance::{EntrancePhase, EntrancePreset, EntranceTimeline, Pose, TIMELINE_NODE_DELAY};
pub use parallax::{bind, Interpolation, ParallaxBinder, HERO_OFFSET, HERO_OPACITY};
pub use progress::{ScrollProgressTracker, ScrollRange};
pub use reveal::{Rect, RevealOptions, Viewport, ViewportRevealDetector};
pub use spring::Spring;
pub use stagger::{plan, Staged, StaggerSequencer};
pub use stage::{FrameReport, ItemLayout, MotionStage, PageLayout};
