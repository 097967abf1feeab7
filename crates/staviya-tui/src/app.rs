use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;

use staviya_core::content::{ContentItem, LoadState};
use staviya_core::form::{ContactFormState, FieldError, FormField};
use staviya_core::{Anchor, AppConfig};

use crate::input::Action;
use crate::motion::{FrameReport, MotionStage};
use crate::page::{BlockKind, Page};
use crate::theme::Theme;

/// Upper bound on the time step fed to the motion stage
const MAX_FRAME_STEP: Duration = Duration::from_millis(100);
const DEFAULT_FRAME_STEP: Duration = Duration::from_millis(16);

/// Where key input goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Page,
    Form(FormField),
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    /// Subscription to the loader's aggregate state
    content_rx: watch::Receiver<LoadState>,
    /// Last content snapshot the page was built from
    pub content: LoadState,
    pub page: Page,
    pub stage: MotionStage,
    pub form: ContactFormState,
    pub form_errors: Vec<FieldError>,
    pub focus: Focus,
    /// Rows available to the page (terminal height minus chrome)
    pub viewport_rows: u16,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
    last_frame: Option<Instant>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, content_rx: watch::Receiver<LoadState>, viewport_rows: u16) -> Self {
        let content = content_rx.borrow().clone();
        let mut app = Self {
            stage: MotionStage::new(&config.motion),
            config,
            theme: Theme::default(),
            content_rx,
            page: Page::default(),
            content,
            form: ContactFormState::default(),
            form_errors: Vec::new(),
            focus: Focus::Page,
            viewport_rows,
            should_quit: false,
            status_message: None,
            last_frame: None,
        };
        app.rebuild();
        app
    }

    #[inline]
    pub fn px_per_row(&self) -> f64 {
        self.config.ui.px_per_row.max(1.0)
    }

    /// Pick up a new loader state if one was published. Returns true if the
    /// page was rebuilt.
    pub fn sync_content(&mut self) -> bool {
        if !self.content_rx.has_changed().unwrap_or(false) {
            return false;
        }
        self.content = self.content_rx.borrow_and_update().clone();
        if self.content.is_ready() {
            tracing::info!(
                "Content ready: {} item(s)",
                self.content.collections.values().map(Vec::len).sum::<usize>()
            );
        }
        self.rebuild();
        true
    }

    fn rebuild(&mut self) {
        self.page = Page::build(&self.content, self.viewport_rows);
        let layout = self.page.layout(self.viewport_rows, self.px_per_row());
        self.stage.set_layout(&layout);
    }

    pub fn resize(&mut self, viewport_rows: u16) {
        if viewport_rows != self.viewport_rows {
            self.viewport_rows = viewport_rows;
            self.rebuild();
        }
    }

    /// Top visible page row, fractional while scrolling
    pub fn scroll_row(&self) -> f64 {
        self.stage.offset() / self.px_per_row()
    }

    pub fn current_section(&self) -> Option<Anchor> {
        self.page.section_at(self.scroll_row().round() as u32)
    }

    pub fn item(&self, kind: &BlockKind) -> Option<&ContentItem> {
        match kind {
            BlockKind::Item {
                collection, index, ..
            } => self.content.items(*collection).get(*index),
            _ => None,
        }
    }

    /// True while anything on screen is still moving
    pub fn needs_frame(&self) -> bool {
        self.stage.needs_frame() || self.form.is_submitted()
    }

    /// Advance motion and timers to `now`
    pub fn frame(&mut self, now: Instant) -> FrameReport {
        let dt = self
            .last_frame
            .map(|last| now.saturating_duration_since(last).min(MAX_FRAME_STEP))
            .unwrap_or(DEFAULT_FRAME_STEP);

        if self.form.tick(now) {
            self.set_status("Ready for a new transmission");
        }

        let report = self.stage.frame(now, dt);
        // Idle time between bursts must not count as one long frame
        self.last_frame = self.needs_frame().then_some(now);
        report
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.stage.scroll_by(self.config.ui.scroll_step_px),
            Action::ScrollUp => self.stage.scroll_by(-self.config.ui.scroll_step_px),
            Action::PageDown => self.stage.page_down(),
            Action::PageUp => self.stage.page_up(),
            Action::JumpToTop => self.stage.scroll_to(0.0, now),
            Action::JumpToBottom => {
                let bottom = self.stage.max_scroll();
                self.stage.scroll_to(bottom, now);
            }
            Action::JumpTo(anchor) => self.jump_to(anchor, now),
            Action::Activate(cta) => {
                self.jump_to(cta.target(), now);
                if cta.target() == Anchor::Contact {
                    self.focus = Focus::Form(FormField::Name);
                }
            }
            Action::OpenLink => self.open_link(),
            Action::FocusForm => {
                self.jump_to(Anchor::Contact, now);
                self.focus = Focus::Form(FormField::Name);
            }
            Action::NextField => self.cycle_field(1),
            Action::PrevField => self.cycle_field(FormField::ALL.len() - 1),
            Action::InputChar(c) => {
                if let Focus::Form(field) = self.focus {
                    if !self.form.is_submitted() {
                        self.form.form.field_mut(field).push(c);
                    }
                }
            }
            Action::Backspace => {
                if let Focus::Form(field) = self.focus {
                    self.form.form.field_mut(field).pop();
                }
            }
            Action::Submit => self.submit_form(now),
            Action::ExitForm => self.focus = Focus::Page,
            Action::None => {}
        }
    }

    /// Wheel notches scroll like arrow keys
    pub fn wheel(&mut self, notches: i32) {
        self.stage
            .scroll_by(notches as f64 * self.config.ui.scroll_step_px);
    }

    fn jump_to(&mut self, anchor: Anchor, now: Instant) {
        if let Err(e) = self.stage.scroll_to_anchor(anchor, now) {
            self.set_status(format!("Cannot scroll: {}", e));
        }
    }

    fn cycle_field(&mut self, step: usize) {
        if let Focus::Form(field) = self.focus {
            let fields = FormField::ALL;
            let current = fields.iter().position(|f| *f == field).unwrap_or(0);
            self.focus = Focus::Form(fields[(current + step) % fields.len()]);
        }
    }

    fn submit_form(&mut self, now: Instant) {
        match self.form.submit(now) {
            Ok(()) => {
                self.form_errors.clear();
                self.focus = Focus::Page;
                self.set_status("Transmission received. We will decode your message and respond shortly.");
            }
            Err(errors) => {
                if let Some(first) = errors.first() {
                    self.set_status(first.to_string());
                }
                self.form_errors = errors;
            }
        }
    }

    /// Open the link of the first fully visible card that has one
    fn open_link(&mut self) {
        let top = self.scroll_row();
        let bottom = top + self.viewport_rows as f64;
        let link = self
            .page
            .items()
            .filter(|block| block.top as f64 >= top && block.bottom() as f64 <= bottom)
            .find_map(|block| self.item(&block.kind).and_then(ContentItem::link));

        match link {
            Some(url) => {
                tracing::info!("Opening {}", url);
                if let Err(e) = open::that(url.as_str()) {
                    self.set_status(format!("Failed to open link: {}", e));
                }
            }
            None => self.set_status("No link on screen"),
        }
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
