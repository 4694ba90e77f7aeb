// TUI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the draw state. The app loop
// pushes `UiUpdate` messages over an mpsc channel; the TUI applies them to
// `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::draw::engine::DrawState;
use crate::protocol::{DrawSnapshot, Notice, UiUpdate, UserCommand};

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Which file a path prompt is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTarget {
    Roster,
    Music,
    Background,
}

impl PromptTarget {
    pub fn label(self) -> &'static str {
        match self {
            PromptTarget::Roster => "Roster file (.xlsx / .xls / .csv / .tsv)",
            PromptTarget::Music => "Music file (.mp3 / .wav / .ogg)",
            PromptTarget::Background => "Background image",
        }
    }

    /// Build the command that loads `path` for this target.
    pub fn command(self, path: PathBuf) -> UserCommand {
        match self {
            PromptTarget::Roster => UserCommand::ImportRoster(path),
            PromptTarget::Music => UserCommand::LoadMusic(path),
            PromptTarget::Background => UserCommand::SetBackground(path),
        }
    }
}

/// An open file-path text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrompt {
    pub target: PromptTarget,
    pub text: String,
}

/// TUI-local state that mirrors the application state for rendering.
pub struct ViewState {
    pub title: String,
    pub subtitle: String,
    /// Latest draw state from the app loop.
    pub draw: DrawSnapshot,
    /// Message shown in the help bar until the next key press.
    pub notice: Option<Notice>,
    pub settings_open: bool,
    pub prompt: Option<PathPrompt>,
    pub confirm_quit: bool,
    /// First visible row of the winner history.
    pub history_scroll: usize,
    /// Render frames drawn so far; drives the spinner.
    pub frame_count: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            title: "Lucky Draw".to_string(),
            subtitle: String::new(),
            draw: DrawSnapshot::default(),
            notice: None,
            settings_open: false,
            prompt: None,
            confirm_quit: false,
            history_scroll: 0,
            frame_count: 0,
        }
    }
}

impl ViewState {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        ViewState {
            title: title.into(),
            subtitle: subtitle.into(),
            ..Default::default()
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.draw.state == DrawState::Drawing
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Snapshot(snapshot) => {
            state.draw = *snapshot;
        }
        UiUpdate::Rolling(participant) => {
            // A late tick may arrive after the stop snapshot.
            if state.is_drawing() {
                state.draw.rolling = Some(participant);
            }
        }
        UiUpdate::Notice(notice) => {
            state.notice = Some(notice);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete screen.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::banner::render(frame, layout.banner, state);
    widgets::stats::render(frame, layout.stats, state);
    widgets::stage::render(frame, layout.stage, state);
    widgets::winners::render(frame, layout.history, state);
    widgets::footer::render(frame, layout.footer, state);
    widgets::help_bar::render(frame, layout.help_bar, state);

    if state.settings_open {
        widgets::settings::render(frame, frame.area(), state);
    }
    if let Some(prompt) = &state.prompt {
        widgets::overlay::render_prompt(frame, frame.area(), prompt);
    }
    if state.confirm_quit {
        widgets::overlay::render_quit_confirm(frame, frame.area());
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    mut view_state: ViewState,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // App loop is gone
                    None => break Ok(()),
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events need no handling
                    }
                    Some(Err(e)) => break Err(anyhow::Error::new(e).context("terminal input error")),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                view_state.frame_count = view_state.frame_count.wrapping_add(1);
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::new(e).context("failed to draw frame"));
                }
            }
        }
    };

    ratatui::restore();

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
