use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use staviya_core::{Anchor, AppConfig, ContentSource};

mod commands;

#[derive(Parser)]
#[command(name = "staviya")]
#[command(author, version, about = "Preview and inspect the Staviya landing page")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ~/.config/staviya/config.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Read collections from `<dir>/<collection>.json` instead of the configured source
    #[arg(short = 'd', long, global = true)]
    content_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load every collection and print the page sections
    List,
    /// Run the motion stage headlessly and print what each frame does
    Simulate {
        /// Smooth-scroll to a section (story, services, technology, why-choose, contact)
        #[arg(short = 't', long, conflicts_with = "offset")]
        to: Option<Anchor>,
        /// Smooth-scroll to an absolute offset in pixels
        #[arg(short = 'o', long)]
        offset: Option<f64>,
        /// Viewport height in pixels
        #[arg(long, default_value_t = 800.0)]
        viewport: f64,
        /// Print every n-th frame (frames with reveals are always printed)
        #[arg(long, default_value_t = 5)]
        every: usize,
        /// Stop after this many frames even if motion is still running
        #[arg(long, default_value_t = 1200)]
        max_frames: usize,
    },
    /// Open the interactive terminal preview of the page
    Preview,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load()?,
    };
    if let Some(dir) = cli.content_dir {
        config.content.source = ContentSource::File;
        config.content.content_dir = dir;
    }
    let config = Arc::new(config);

    // The preview owns the terminal, so its logs go to a file
    let log_file = match cli.command {
        Some(Commands::Preview) => Some(open_log_file(&config)?),
        _ => None,
    };
    init_logging(&config, log_file);

    match cli.command {
        Some(Commands::List) | None => commands::list::run(&config).await,
        Some(Commands::Simulate {
            to,
            offset,
            viewport,
            every,
            max_frames,
        }) => {
            let target = match (to, offset) {
                (Some(anchor), _) => commands::simulate::Target::Anchor(anchor),
                (None, Some(px)) => commands::simulate::Target::Offset(px),
                (None, None) => commands::simulate::Target::Stay,
            };
            let options = commands::simulate::Options {
                target,
                viewport,
                every: every.max(1),
                max_frames,
            };
            commands::simulate::run(&config, options).await
        }
        Some(Commands::Preview) => commands::preview::run(config).await,
    }
}

fn open_log_file(config: &AppConfig) -> Result<File> {
    let path = config.log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

fn init_logging(config: &AppConfig, log_file: Option<File>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        Some(file) => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        None => registry.with(fmt::layer().with_target(false)).init(),
    }
}
