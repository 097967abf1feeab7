//! L3 Molecular Layer: Entrance timeline
//!
//! Per-item state machine for one-shot entrance transitions:
//!
//! ```text
//! Idle --arm--> Armed(at) --delay elapsed--> Playing(since) --duration--> Settled
//! ```
//!
//! Each transition fires at most once per item. Poses are interpolated from
//! the section's starting pose to the identity pose.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use staviya_core::content::CollectionName;

use super::easing::{EasingType, EasingTypeExt};
use super::reveal::RevealOptions;
use super::stagger::delay_at;
use super::timing::{lerp, progress};

/// Delay of the timeline node marker relative to its milestone card
pub const TIMELINE_NODE_DELAY: Duration = Duration::from_millis(200);

/// Visual transform of an item at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub opacity: f64,
    /// Downward offset in pixels
    pub offset_y: f64,
    pub scale: f64,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        opacity: 1.0,
        offset_y: 0.0,
        scale: 1.0,
    };

    /// Blend from `self` to the identity pose by `t` in [0, 1]
    pub fn towards_identity(&self, t: f64) -> Pose {
        Pose {
            opacity: lerp(self.opacity, 1.0, t),
            offset_y: lerp(self.offset_y, 0.0, t),
            scale: lerp(self.scale, 1.0, t),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Entrance parameters shared by every item of one section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntrancePreset {
    /// Stagger step between consecutive items
    pub interval: Duration,
    pub duration: Duration,
    pub easing: EasingType,
    pub from: Pose,
    pub reveal: RevealOptions,
}

impl EntrancePreset {
    pub fn for_collection(collection: CollectionName) -> Self {
        match collection {
            CollectionName::Milestones => Self {
                interval: Duration::ZERO,
                duration: Duration::from_millis(800),
                easing: EasingType::CssEaseOut,
                from: Pose {
                    opacity: 0.0,
                    offset_y: 50.0,
                    scale: 1.0,
                },
                reveal: RevealOptions::with_margin(-100.0),
            },
            CollectionName::Services => Self {
                interval: Duration::from_millis(100),
                duration: Duration::from_millis(500),
                easing: EasingType::Cubic,
                from: Pose {
                    opacity: 0.0,
                    offset_y: 30.0,
                    scale: 1.0,
                },
                reveal: RevealOptions::default(),
            },
            CollectionName::Technologies => Self {
                interval: Duration::from_millis(50),
                duration: Duration::from_millis(400),
                easing: EasingType::Cubic,
                from: Pose {
                    opacity: 0.0,
                    offset_y: 0.0,
                    scale: 0.9,
                },
                reveal: RevealOptions::default(),
            },
            CollectionName::Stats => Self {
                interval: Duration::from_millis(100),
                duration: Duration::from_millis(600),
                easing: EasingType::Cubic,
                from: Pose {
                    opacity: 0.0,
                    offset_y: 20.0,
                    scale: 1.0,
                },
                reveal: RevealOptions::default(),
            },
        }
    }

    /// Delay of the item at `index`
    pub fn delay(&self, index: usize) -> Duration {
        delay_at(index, self.interval)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrancePhase {
    Idle,
    Armed { at: Instant },
    Playing { since: Instant },
    Settled,
}

#[derive(Debug, Clone)]
struct Entry {
    preset: EntrancePreset,
    delay: Duration,
    phase: EntrancePhase,
    /// When playback began; kept after settling for trailing elements
    started: Option<Instant>,
}

/// Entrance state of every animated item, keyed by content item id
#[derive(Debug, Clone, Default)]
pub struct EntranceTimeline {
    entries: HashMap<String, Entry>,
}

impl EntranceTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item at `index` of its section. Items already past `Idle`
    /// keep their delay so a running entrance is never retimed.
    pub fn register(&mut self, key: impl Into<String>, collection: CollectionName, index: usize) {
        let preset = EntrancePreset::for_collection(collection);
        let delay = preset.delay(index);
        self.entries
            .entry(key.into())
            .and_modify(|entry| {
                if entry.phase == EntrancePhase::Idle {
                    entry.preset = preset;
                    entry.delay = delay;
                }
            })
            .or_insert(Entry {
                preset,
                delay,
                phase: EntrancePhase::Idle,
                started: None,
            });
    }

    /// Drop items that are no longer on the page
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries.retain(|key, _| keep(key));
    }

    /// `Idle -> Armed`. Returns false if the item is unknown or already armed.
    pub fn arm(&mut self, key: &str, now: Instant) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) if entry.phase == EntrancePhase::Idle => {
                entry.phase = EntrancePhase::Armed { at: now };
                true
            }
            _ => false,
        }
    }

    /// Fire every transition that is due at `now`; returns how many fired
    pub fn advance(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        for entry in self.entries.values_mut() {
            if let EntrancePhase::Armed { at } = entry.phase {
                let start = at + entry.delay;
                if now >= start {
                    entry.phase = EntrancePhase::Playing { since: start };
                    entry.started = Some(start);
                    fired += 1;
                }
            }
            if let EntrancePhase::Playing { since } = entry.phase {
                if now >= since + entry.preset.duration {
                    entry.phase = EntrancePhase::Settled;
                    fired += 1;
                }
            }
        }
        fired
    }

    pub fn phase(&self, key: &str) -> Option<EntrancePhase> {
        self.entries.get(key).map(|e| e.phase)
    }

    pub fn delay(&self, key: &str) -> Option<Duration> {
        self.entries.get(key).map(|e| e.delay)
    }

    /// Pose of `key` at `now`; unknown items are drawn as-is
    pub fn pose(&self, key: &str, now: Instant) -> Pose {
        self.pose_after(key, now, Duration::ZERO)
    }

    /// Pose of a secondary element of `key` whose transition starts `extra`
    /// after the item's own
    pub fn pose_after(&self, key: &str, now: Instant, extra: Duration) -> Pose {
        let Some(entry) = self.entries.get(key) else {
            return Pose::IDENTITY;
        };
        let preset = &entry.preset;
        let start = match entry.phase {
            EntrancePhase::Idle => return preset.from,
            EntrancePhase::Armed { at } => at + entry.delay,
            EntrancePhase::Playing { since } => since,
            EntrancePhase::Settled => match entry.started {
                Some(since) if !extra.is_zero() => since,
                _ => return Pose::IDENTITY,
            },
        };
        let start = start + extra;

        if now < start {
            return preset.from;
        }
        let t = progress(start, now, preset.duration);
        preset.from.towards_identity(preset.easing.apply(t))
    }

    /// True while any item is armed or playing
    pub fn is_animating(&self) -> bool {
        self.entries.values().any(|e| {
            matches!(
                e.phase,
                EntrancePhase::Armed { .. } | EntrancePhase::Playing { .. }
            )
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_presets() {
        let services = EntrancePreset::for_collection(CollectionName::Services);
        assert_eq!(services.delay(4), ms(400));
        assert_eq!(services.from.offset_y, 30.0);

        let tech = EntrancePreset::for_collection(CollectionName::Technologies);
        assert_eq!(tech.delay(3), ms(150));
        assert_eq!(tech.from.scale, 0.9);

        let timeline = EntrancePreset::for_collection(CollectionName::Milestones);
        assert_eq!(timeline.delay(7), Duration::ZERO);
        assert_eq!(timeline.reveal.margin, -100.0);
        assert_eq!(timeline.duration, ms(800));
        assert_eq!(timeline.easing, EasingType::CssEaseOut);
    }

    #[test]
    fn test_delay_is_honored() {
        let t0 = Instant::now();
        let mut timeline = EntranceTimeline::new();
        timeline.register("svc-3", CollectionName::Services, 2);
        assert_eq!(timeline.phase("svc-3"), Some(EntrancePhase::Idle));

        // Never plays before it is armed, however much time passes
        assert_eq!(timeline.advance(t0 + ms(5000)), 0);

        assert!(timeline.arm("svc-3", t0));
        assert_eq!(timeline.advance(t0 + ms(199)), 0);
        assert_eq!(
            timeline.phase("svc-3"),
            Some(EntrancePhase::Armed { at: t0 })
        );

        assert_eq!(timeline.advance(t0 + ms(200)), 1);
        assert_eq!(
            timeline.phase("svc-3"),
            Some(EntrancePhase::Playing { since: t0 + ms(200) })
        );

        assert_eq!(timeline.advance(t0 + ms(700)), 1);
        assert_eq!(timeline.phase("svc-3"), Some(EntrancePhase::Settled));
        assert!(!timeline.is_animating());
    }

    #[test]
    fn test_no_transition_fires_twice() {
        let t0 = Instant::now();
        let mut timeline = EntranceTimeline::new();
        timeline.register("stat-1", CollectionName::Stats, 0);

        assert!(timeline.arm("stat-1", t0));
        assert!(!timeline.arm("stat-1", t0 + ms(10)));
        assert!(!timeline.arm("unknown", t0));

        assert_eq!(timeline.advance(t0 + ms(10_000)), 2);
        assert_eq!(timeline.advance(t0 + ms(20_000)), 0);
        assert!(!timeline.arm("stat-1", t0 + ms(20_000)));
        assert_eq!(timeline.phase("stat-1"), Some(EntrancePhase::Settled));
    }

    #[test]
    fn test_pose_interpolates_to_identity() {
        let t0 = Instant::now();
        let mut timeline = EntranceTimeline::new();
        timeline.register("tech-1", CollectionName::Technologies, 0);

        let idle = timeline.pose("tech-1", t0);
        assert_eq!(idle.opacity, 0.0);
        assert_eq!(idle.scale, 0.9);

        timeline.arm("tech-1", t0);
        timeline.advance(t0);
        let mid = timeline.pose("tech-1", t0 + ms(200));
        assert!(mid.opacity > 0.0 && mid.opacity < 1.0);
        assert!(mid.scale > 0.9 && mid.scale < 1.0);

        timeline.advance(t0 + ms(400));
        assert_eq!(timeline.pose("tech-1", t0 + ms(400)), Pose::IDENTITY);
        assert_eq!(timeline.pose("not-registered", t0), Pose::IDENTITY);
    }

    #[test]
    fn test_armed_item_holds_start_pose_during_delay() {
        let t0 = Instant::now();
        let mut timeline = EntranceTimeline::new();
        timeline.register("svc-5", CollectionName::Services, 4);
        timeline.arm("svc-5", t0);
        timeline.advance(t0 + ms(300));
        let pose = timeline.pose("svc-5", t0 + ms(300));
        assert_eq!(pose.opacity, 0.0);
        assert_eq!(pose.offset_y, 30.0);
    }

    #[test]
    fn test_node_marker_trails_card() {
        let t0 = Instant::now();
        let mut timeline = EntranceTimeline::new();
        timeline.register("ms-1", CollectionName::Milestones, 0);
        timeline.arm("ms-1", t0);
        timeline.advance(t0 + ms(100));

        let card = timeline.pose("ms-1", t0 + ms(100));
        let node = timeline.pose_after("ms-1", t0 + ms(100), TIMELINE_NODE_DELAY);
        assert!(card.opacity > 0.0);
        assert_eq!(node.opacity, 0.0);
    }

    #[test]
    fn test_register_does_not_retime_running_entrance() {
        let t0 = Instant::now();
        let mut timeline = EntranceTimeline::new();
        timeline.register("svc-2", CollectionName::Services, 1);
        timeline.arm("svc-2", t0);
        timeline.register("svc-2", CollectionName::Services, 3);
        assert_eq!(timeline.delay("svc-2"), Some(ms(100)));

        timeline.register("svc-9", CollectionName::Services, 1);
        timeline.register("svc-9", CollectionName::Services, 3);
        assert_eq!(timeline.delay("svc-9"), Some(ms(300)));

        timeline.retain(|key| key != "svc-9");
        assert_eq!(timeline.len(), 1);
    }
}
