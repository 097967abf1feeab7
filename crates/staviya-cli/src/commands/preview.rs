use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use staviya_core::content::{open_store, CollectionLoader};
use staviya_core::{AppConfig, Error};
use staviya_tui::{
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    widgets::{PageWidget, ProgressBarWidget, StatusBarWidget},
    App,
};

/// Rows taken by the progress bar and the status bar
const CHROME_ROWS: u16 = 2;

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    let loader = Arc::new(CollectionLoader::new(open_store(&config)?));
    let content_rx = loader.subscribe();

    // Load in the background; the page shows placeholders until it lands
    let load_task = {
        let loader = Arc::clone(&loader);
        tokio::spawn(async move {
            match loader.load_all().await {
                Ok(_) | Err(Error::TornDown) => {}
                Err(e) => tracing::error!("Failed to load content: {}", e),
            }
        })
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Staviya"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let rows = terminal.size()?.height.saturating_sub(CHROME_ROWS);
    let mut app = App::new(config.clone(), content_rx, rows);

    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.motion.animation_fps);

    let result = run_loop(&mut terminal, &mut app, &event_handler);

    // The view is gone: drop whatever is still in flight
    loader.teardown();
    load_task.abort();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    // Checked at the end of each iteration to pick the next poll interval
    let mut needs_fast_update = true;

    loop {
        app.sync_content();

        let now = Instant::now();
        let report = app.frame(now);
        if !report.revealed.is_empty() {
            tracing::debug!("Revealed: {}", report.revealed.join(", "));
        }

        let view: &App = app;
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Min(1),
                    Constraint::Length(1),
                ])
                .split(frame.area());

            ProgressBarWidget::render(frame, layout[0], view.stage.progress(), &view.theme);
            PageWidget::render(frame, layout[1], view, now);
            StatusBarWidget::render(frame, layout[2], view);
        })?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app);
                    app.clear_status();
                    app.handle_action(action, Instant::now());
                }
                AppEvent::Wheel(notches) => app.wheel(notches),
                AppEvent::Resize(_, height) => app.resize(height.saturating_sub(CHROME_ROWS)),
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_frame();

        if app.should_quit {
            return Ok(());
        }
    }
}
