// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app loop, or into local ViewState mutations (settings panel, path
// prompts, history scroll).

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{PathPrompt, PromptTarget, ViewState};
use crate::protocol::UserCommand;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app loop. Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Some terminals report both Press and Release
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    // Any key dismisses the current notice.
    view_state.notice = None;

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    if view_state.prompt.is_some() {
        return handle_prompt(key_event, view_state);
    }

    // Settings-only keys; anything else falls through to normal dispatch
    if view_state.settings_open {
        match key_event.code {
            KeyCode::Char('i') => return open_prompt(view_state, PromptTarget::Roster),
            KeyCode::Char('m') => return open_prompt(view_state, PromptTarget::Music),
            KeyCode::Char('b') => return open_prompt(view_state, PromptTarget::Background),
            KeyCode::Char('d') => return Some(UserCommand::ClearBackground),
            _ => {}
        }
    }

    match key_event.code {
        KeyCode::Char(' ') | KeyCode::Enter => Some(UserCommand::ToggleDraw),
        KeyCode::Char('r') => {
            if view_state.is_drawing() {
                None
            } else {
                view_state.history_scroll = 0;
                Some(UserCommand::Reset)
            }
        }
        KeyCode::Char('p') => Some(UserCommand::ToggleMusic),
        KeyCode::Char('s') => {
            view_state.settings_open = !view_state.settings_open;
            None
        }
        KeyCode::Esc => {
            view_state.settings_open = false;
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.history_scroll = view_state.history_scroll.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let max = view_state.draw.winners.len().saturating_sub(1);
            view_state.history_scroll = (view_state.history_scroll + 1).min(max);
            None
        }
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }
        _ => None,
    }
}

fn open_prompt(view_state: &mut ViewState, target: PromptTarget) -> Option<UserCommand> {
    view_state.prompt = Some(PathPrompt {
        target,
        text: String::new(),
    });
    None
}

fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('q') => Some(UserCommand::Quit),
        KeyCode::Char('n') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// Text entry for a file path. Enter submits, Esc cancels.
fn handle_prompt(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let prompt = view_state.prompt.as_mut()?;
    match key_event.code {
        KeyCode::Esc => {
            view_state.prompt = None;
            None
        }
        KeyCode::Enter => {
            let target = prompt.target;
            let text = prompt.text.trim().to_string();
            view_state.prompt = None;
            if text.is_empty() {
                None
            } else {
                Some(target.command(PathBuf::from(text)))
            }
        }
        KeyCode::Backspace => {
            prompt.text.pop();
            None
        }
        KeyCode::Char(c) => {
            prompt.text.push(c);
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
