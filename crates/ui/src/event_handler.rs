use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::Result;

use crate::state::AppState;

/// Actions the event loop must carry out beyond plain state edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Submit the staged input and schedule the delayed reply
    Send,
    /// Abandon the current conversation and start the next script
    NewScript,
    /// Open the latest citation in the default browser
    OpenSource,
    /// Quit the application
    Exit,
}

/// Event handler for the TUI application
pub struct EventHandler;

impl EventHandler {
    /// Read a single event from the terminal, waiting at most 100 ms
    pub fn read() -> Result<Option<Event>> {
        match crossterm::event::poll(std::time::Duration::from_millis(100)) {
            Ok(true) => Ok(Some(crossterm::event::read()?)),
            _ => Ok(None),
        }
    }

    /// Handle a keyboard event; edits apply directly, the rest map to actions
    pub fn handle_key_event(event: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                KeyCode::Char('c') => Some(KeyAction::Exit),
                KeyCode::Char('n') => Some(KeyAction::NewScript),
                KeyCode::Char('o') => Some(KeyAction::OpenSource),
                _ => None,
            };
        }

        match event.code {
            KeyCode::Esc => Some(KeyAction::Exit),
            KeyCode::Enter => Some(KeyAction::Send),
            KeyCode::F(2) => Some(KeyAction::NewScript),
            KeyCode::PageUp => {
                state.scroll_up(5);
                None
            }
            KeyCode::PageDown => {
                state.scroll_down(5);
                None
            }
            KeyCode::Up => {
                state.scroll_up(1);
                None
            }
            KeyCode::Down => {
                state.scroll_down(1);
                None
            }
            _ => Self::handle_edit_key(event, state),
        }
    }

    /// Editing keys; ignored once the script is exhausted
    fn handle_edit_key(event: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
        if !state.can_edit() {
            return None;
        }

        match event.code {
            KeyCode::Char(c) => state.input.insert_char(c),
            KeyCode::Backspace => state.input.backspace(),
            KeyCode::Delete => state.input.delete(),
            KeyCode::Left => state.input.move_left(),
            KeyCode::Right => state.input.move_right(),
            KeyCode::Home => state.input.move_home(),
            KeyCode::End => state.input.move_end(),
            _ => {}
        }
        None
    }
}
