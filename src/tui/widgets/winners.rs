// Winner history widget: every winner so far, newest first.
//
// Each row: "R{round}  {name} ({department})  {HH:MM:SS}"

use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::Frame;

use crate::roster::participant::Winner;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let winners = &state.draw.winners;
    if winners.is_empty() {
        let paragraph = Paragraph::new("  No winners yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Winners"));
        frame.render_widget(paragraph, area);
        return;
    }

    // Subtract 2 for borders
    let visible_rows = (area.height as usize).saturating_sub(2);
    let total = winners.len();
    let max_offset = total.saturating_sub(visible_rows);
    let scroll_offset = state.history_scroll.min(max_offset);

    let latest_round = winners.last().map(|w| w.round);
    let items: Vec<ListItem> = winners
        .iter()
        .rev()
        .skip(scroll_offset)
        .take(visible_rows.max(1))
        .map(|winner| {
            let style = if Some(winner.round) == latest_round {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(format_winner(winner), style)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Winners ({})", total)),
    );
    frame.render_widget(list, area);

    if total > visible_rows {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(visible_rows)).position(scroll_offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

pub fn format_winner(winner: &Winner) -> String {
    format!(
        "R{:<3} {}  {}",
        winner.round,
        winner.employee,
        winner.drawn_at.format("%H:%M:%S")
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
