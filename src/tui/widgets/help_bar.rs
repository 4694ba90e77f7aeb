// Help bar: key hints for the current mode, replaced by a notice when one
// is pending.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::NoticeLevel;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let line = match &state.notice {
        Some(notice) => Line::from(Span::styled(
            format!(" {}", notice.text),
            Style::default()
                .fg(notice_color(notice.level))
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            hint_text(state),
            Style::default().fg(Color::DarkGray),
        )),
    };
    let paragraph = Paragraph::new(line).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

pub fn notice_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Info => Color::Cyan,
        NoticeLevel::Error => Color::Red,
    }
}

/// Key hints for whichever mode currently owns the keyboard.
pub fn hint_text(state: &ViewState) -> &'static str {
    if state.confirm_quit {
        " y:Quit | n:Cancel"
    } else if state.prompt.is_some() {
        " Enter:Load | Esc:Cancel"
    } else if state.settings_open {
        " i:Import | m:Music | p:Music on/off | b:Background | d:Default | Esc:Close"
    } else if state.is_drawing() {
        " Space:Stop | p:Music | q:Quit"
    } else {
        " Space:Draw | r:Reset | s:Settings | p:Music | j/k:Scroll | q:Quit"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
