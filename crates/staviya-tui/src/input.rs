use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use staviya_core::{Anchor, CallToAction};

use crate::app::{App, Focus};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    JumpToTop,
    JumpToBottom,
    JumpTo(Anchor),
    Activate(CallToAction),
    OpenLink,
    // Contact form
    FocusForm,
    NextField,
    PrevField,
    InputChar(char),
    Backspace,
    Submit,
    ExitForm,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return Action::Quit;
    }

    match app.focus {
        Focus::Form(_) => handle_form_mode(key),
        Focus::Page => handle_page_mode(key),
    }
}

fn handle_page_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => Action::Quit,

        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Action::ScrollUp,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) | (KeyCode::Char(' '), _) => {
            Action::PageDown
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => Action::PageUp,
        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Action::JumpToBottom,

        // Section shortcuts in header order
        (KeyCode::Char(c @ '1'..='5'), KeyModifiers::NONE) => {
            let index = c as usize - '1' as usize;
            Anchor::ALL
                .get(index)
                .copied()
                .map(Action::JumpTo)
                .unwrap_or(Action::None)
        }

        // Hero buttons
        (KeyCode::Char('i'), KeyModifiers::NONE) => Action::Activate(CallToAction::InitiateProject),
        (KeyCode::Char('e'), KeyModifiers::NONE) => Action::Activate(CallToAction::ExploreSystems),

        (KeyCode::Char('o'), KeyModifiers::NONE) => Action::OpenLink,
        (KeyCode::Tab, _) | (KeyCode::Char('c'), KeyModifiers::NONE) => Action::FocusForm,

        _ => Action::None,
    }
}

fn handle_form_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::ExitForm,
        KeyCode::Tab | KeyCode::Down => Action::NextField,
        KeyCode::BackTab | KeyCode::Up => Action::PrevField,
        KeyCode::Enter => Action::Submit,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}
