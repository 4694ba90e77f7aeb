// Footer: participant total, music indicator, backdrop.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::MusicStatus;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::styled(
        format!(" {} participants", state.draw.total_participants),
        Style::default().fg(Color::White),
    )];

    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
    let (music, music_color) = music_label(&state.draw.music);
    spans.push(Span::styled(music, Style::default().fg(music_color)));

    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
    let backdrop = match &state.draw.background {
        Some(name) => format!("Backdrop: {}", name),
        None => "Backdrop: default".to_string(),
    };
    spans.push(Span::styled(backdrop, Style::default().fg(Color::Gray)));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Music indicator text and color. Without a sound device the label says
/// so instead of claiming the track is playing.
pub fn music_label(music: &MusicStatus) -> (String, Color) {
    let Some(title) = &music.track else {
        return ("♪ no music".to_string(), Color::DarkGray);
    };
    match (music.audible, music.playing) {
        (true, true) => (format!("♪ {} (playing)", title), Color::Green),
        (true, false) => (format!("♪ {} (paused)", title), Color::Yellow),
        (false, true) => (format!("♪ {} (on, no audio device)", title), Color::DarkGray),
        (false, false) => (format!("♪ {} (off, no audio device)", title), Color::DarkGray),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
