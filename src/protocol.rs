// Message types passed between the TUI and the application loop.

use std::path::PathBuf;

use crate::draw::engine::DrawState;
use crate::roster::participant::{Participant, Winner};

// ---------------------------------------------------------------------------
// TUI -> app
// ---------------------------------------------------------------------------

/// Operator actions forwarded from the TUI to the application loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// The main draw button: start a round, or stop the running one.
    ToggleDraw,
    /// Clear all winners and restart at round 1.
    Reset,
    /// Replace the roster from a CSV/TSV file.
    ImportRoster(PathBuf),
    /// Set the background music file.
    LoadMusic(PathBuf),
    /// Play or pause the background music.
    ToggleMusic,
    /// Set the stage backdrop image.
    SetBackground(PathBuf),
    /// Return to the default backdrop.
    ClearBackground,
    Quit,
}

// ---------------------------------------------------------------------------
// app -> TUI
// ---------------------------------------------------------------------------

/// Severity of an operator-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A one-line message for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Full draw state for the TUI to render.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawSnapshot {
    pub state: DrawState,
    pub total_participants: usize,
    pub remaining: usize,
    /// Round number of the next (or running) draw.
    pub round: u32,
    /// Winner ledger in draw order.
    pub winners: Vec<Winner>,
    pub current_winner: Option<Winner>,
    pub rolling: Option<Participant>,
    pub music: MusicStatus,
    /// File name of the custom backdrop, if any.
    pub background: Option<String>,
}

impl Default for DrawSnapshot {
    fn default() -> Self {
        DrawSnapshot {
            state: DrawState::Idle,
            total_participants: 0,
            remaining: 0,
            round: 1,
            winners: Vec::new(),
            current_winner: None,
            rolling: None,
            music: MusicStatus::default(),
            background: None,
        }
    }
}

/// Background music summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MusicStatus {
    /// Title of the loaded track, if any.
    pub track: Option<String>,
    pub playing: bool,
    /// False when no sound device is attached.
    pub audible: bool,
}

/// Updates pushed from the application loop to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Replace the whole draw view.
    Snapshot(Box<DrawSnapshot>),
    /// A new rolling-display value during a draw.
    Rolling(Participant),
    /// Show a message to the operator.
    Notice(Notice),
}
