use std::time::{Duration, Instant};

use anyhow::Result;

use staviya_core::content::{open_store, CollectionLoader};
use staviya_core::{Anchor, AppConfig};
use staviya_tui::motion::{FrameReport, MotionConfigExt, MotionStage};
use staviya_tui::page::Page;

/// Where the simulated reader scrolls
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    /// Stay at the top and let the initial entrances play
    Stay,
    Anchor(Anchor),
    Offset(f64),
}

pub struct Options {
    pub target: Target,
    pub viewport: f64,
    pub every: usize,
    pub max_frames: usize,
}

/// One simulated frame
#[derive(Debug, Clone)]
pub struct Sample {
    pub frame: usize,
    pub elapsed: Duration,
    pub report: FrameReport,
    pub hero_offset: f64,
    pub hero_opacity: f64,
}

pub async fn run(config: &AppConfig, options: Options) -> Result<()> {
    let loader = CollectionLoader::new(open_store(config)?);
    let state = loader.load_all().await?;

    let px_per_row = config.ui.px_per_row.max(1.0);
    let rows = (options.viewport / px_per_row).round().max(1.0) as u16;
    let page = Page::build(&state, rows);
    let layout = page.layout(rows, px_per_row);

    let mut stage = MotionStage::new(&config.motion);
    stage.set_layout(&layout);
    println!(
        "Page {:.0}px, viewport {:.0}px, {} animated items",
        layout.content_height,
        layout.viewport_height,
        layout.items.len()
    );

    let dt = config.motion.frame_duration();
    let samples = trace(&mut stage, options.target, dt, options.max_frames)?;

    println!(
        "{:>5} {:>7} {:>8} {:>8} {:>7} {:>7}  revealed",
        "frame", "t(ms)", "offset", "progress", "hero_y", "hero_a"
    );
    let last = samples.len().saturating_sub(1);
    for (i, sample) in samples.iter().enumerate() {
        if i % options.every != 0 && i != last && sample.report.revealed.is_empty() {
            continue;
        }
        println!(
            "{:>5} {:>7} {:>8.1} {:>8.4} {:>7.1} {:>7.3}  {}",
            sample.frame,
            sample.elapsed.as_millis(),
            sample.report.offset,
            sample.report.progress,
            sample.hero_offset,
            sample.hero_opacity,
            sample.report.revealed.join(", ")
        );
    }

    if stage.needs_frame() {
        println!("\nStopped after {} frames with motion still running", samples.len());
    } else {
        println!("\nSettled after {} frames", samples.len());
    }
    Ok(())
}

/// Drive `stage` on a synthetic clock until it goes idle or `max_frames` ran
fn trace(
    stage: &mut MotionStage,
    target: Target,
    dt: Duration,
    max_frames: usize,
) -> Result<Vec<Sample>> {
    let start = Instant::now();
    let mut now = start;
    let mut samples = Vec::new();

    let mut record = |stage: &mut MotionStage, frame: usize, now: Instant| {
        let report = stage.frame(now, dt);
        samples.push(Sample {
            frame,
            elapsed: now - start,
            report,
            hero_offset: stage.hero_offset(),
            hero_opacity: stage.hero_opacity(),
        });
    };

    // Mount: reveal what is initially on screen
    record(stage, 0, now);

    match target {
        Target::Stay => {}
        Target::Anchor(anchor) => stage.scroll_to_anchor(anchor, now)?,
        Target::Offset(offset) => stage.scroll_to(offset, now),
    }

    let mut frame = 1;
    while stage.needs_frame() && frame < max_frames {
        now += dt;
        record(stage, frame, now);
        frame += 1;
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use staviya_core::content::demo_store;
    use staviya_core::MotionConfig;

    use super::*;

    async fn demo_stage(rows: u16) -> MotionStage {
        let loader = CollectionLoader::new(std::sync::Arc::new(demo_store()));
        let state = loader.load_all().await.unwrap();
        let page = Page::build(&state, rows);
        let mut stage = MotionStage::new(&MotionConfig::default());
        stage.set_layout(&page.layout(rows, 20.0));
        stage
    }

    #[tokio::test]
    async fn test_scroll_to_anchor_settles_on_section() {
        let mut stage = demo_stage(40).await;
        let samples = trace(
            &mut stage,
            Target::Anchor(Anchor::Services),
            Duration::from_millis(16),
            5000,
        )
        .unwrap();

        assert!(!stage.needs_frame());
        let target = stage.anchor_offset(Anchor::Services).unwrap();
        assert_eq!(samples.last().unwrap().report.offset, target);

        // Offsets only move towards the section
        assert!(samples
            .windows(2)
            .all(|w| w[1].report.offset >= w[0].report.offset));
        // Scrolling past the hero fades it
        assert!(stage.hero_opacity() < 1.0);
        assert!(samples.iter().any(|s| !s.report.revealed.is_empty()));
    }

    #[tokio::test]
    async fn test_max_frames_caps_the_run() {
        let mut stage = demo_stage(40).await;
        let samples = trace(
            &mut stage,
            Target::Offset(10_000.0),
            Duration::from_millis(16),
            10,
        )
        .unwrap();
        assert_eq!(samples.len(), 10);
        assert!(stage.needs_frame());
    }
}
