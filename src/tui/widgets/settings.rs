// Settings panel overlay: roster import, music, and backdrop controls.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::footer::music_label;
use super::overlay::centered_rect;
use crate::tui::ViewState;

const PANEL_WIDTH: u16 = 54;
const PANEL_HEIGHT: u16 = 12;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let panel = centered_rect(PANEL_WIDTH, PANEL_HEIGHT, area);
    frame.render_widget(Clear, panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Settings ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(panel_lines(state))
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, panel);
}

fn key_line(key: &'static str, action: &'static str, detail: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {} ", key),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{:<18}", action), Style::default().fg(Color::White)),
        Span::styled(detail, Style::default().fg(Color::Gray)),
    ])
}

fn panel_lines(state: &ViewState) -> Vec<Line<'static>> {
    let draw = &state.draw;
    let (music, _) = music_label(&draw.music);
    let backdrop = draw
        .background
        .clone()
        .unwrap_or_else(|| "default".to_string());

    vec![
        Line::default(),
        key_line(
            "i",
            "Import roster",
            format!("{} loaded", draw.total_participants),
        ),
        key_line("m", "Load music", music),
        key_line("p", "Music on / off", String::new()),
        key_line("b", "Set background", backdrop),
        key_line("d", "Default background", String::new()),
        Line::default(),
        Line::from(Span::styled(
            "  Roster files: XLSX, XLS, CSV or TSV, Name + Department columns",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "  Esc or s to close",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_text(state: &ViewState) -> Vec<String> {
        panel_lines(state)
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn panel_shows_current_media() {
        let mut state = ViewState::default();
        state.draw.total_participants = 12;
        state.draw.background = Some("hall.png".into());
        let text = lines_text(&state);
        assert!(text.iter().any(|l| l.contains("12 loaded")));
        assert!(text.iter().any(|l| l.contains("hall.png")));
        assert!(text.iter().any(|l| l.contains("no music")));
    }

    #[test]
    fn panel_reports_missing_audio_device() {
        let mut state = ViewState::default();
        state.draw.music.track = Some("gala.mp3".into());
        state.draw.music.playing = true;
        let text = lines_text(&state);
        assert!(text.iter().any(|l| l.contains("gala.mp3 (on, no audio device)")));
        assert!(!text.iter().any(|l| l.contains("playing")));
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
