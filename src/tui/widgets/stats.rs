// Stat cards: remaining participants, current round, winners so far.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

/// A single card: label and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub color: Color,
}

/// Build the three cards in display order.
pub fn stat_cards(state: &ViewState) -> [StatCard; 3] {
    let remaining_color = if state.draw.remaining == 0 {
        Color::Red
    } else {
        Color::Green
    };
    [
        StatCard {
            label: "Remaining",
            value: state.draw.remaining.to_string(),
            color: remaining_color,
        },
        StatCard {
            label: "Round",
            value: state.draw.round.to_string(),
            color: Color::Cyan,
        },
        StatCard {
            label: "Winners",
            value: state.draw.winners.len().to_string(),
            color: Color::Yellow,
        },
    ]
}

pub fn render(frame: &mut Frame, areas: [Rect; 3], state: &ViewState) {
    for (card, area) in stat_cards(state).into_iter().zip(areas) {
        let lines = vec![
            Line::from(Span::styled(
                card.value,
                Style::default().fg(card.color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(card.label, Style::default().fg(Color::Gray))),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::participant::{Participant, Winner};

    #[test]
    fn cards_reflect_snapshot() {
        let mut state = ViewState::default();
        state.draw.remaining = 9;
        state.draw.round = 3;
        state.draw.winners = vec![
            Winner::new(Participant::new("A", "D"), 1),
            Winner::new(Participant::new("B", "D"), 2),
        ];
        let cards = stat_cards(&state);
        assert_eq!(cards[0].label, "Remaining");
        assert_eq!(cards[0].value, "9");
        assert_eq!(cards[1].value, "3");
        assert_eq!(cards[2].value, "2");
    }

    #[test]
    fn empty_pool_is_highlighted() {
        let state = ViewState::default();
        assert_eq!(stat_cards(&state)[0].color, Color::Red);
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(60, 5);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| {
                let area = frame.area();
                let third = area.width / 3;
                let areas = [
                    Rect::new(0, 0, third, area.height),
                    Rect::new(third, 0, third, area.height),
                    Rect::new(third * 2, 0, third, area.height),
                ];
                render(frame, areas, &state)
            })
            .unwrap();
    }
}
