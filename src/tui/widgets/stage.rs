// Stage widget: the centre of the screen.
//
// While drawing: a spinner and the rolling name.
// After a stop: the winner announcement.
// Otherwise: "Ready for round N", or why a round cannot start.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::draw::engine::DrawState;
use crate::roster::participant::{Participant, Winner};
use crate::tui::ViewState;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// What the stage is currently showing.
#[derive(Debug, Clone, PartialEq)]
pub enum StageView<'a> {
    Rolling {
        round: u32,
        current: Option<&'a Participant>,
    },
    Winner(&'a Winner),
    Ready {
        round: u32,
    },
    Exhausted,
    EmptyRoster,
}

pub fn stage_view(state: &ViewState) -> StageView<'_> {
    let draw = &state.draw;
    if draw.state == DrawState::Drawing {
        return StageView::Rolling {
            round: draw.round,
            current: draw.rolling.as_ref(),
        };
    }
    if let Some(winner) = &draw.current_winner {
        return StageView::Winner(winner);
    }
    if draw.total_participants == 0 {
        StageView::EmptyRoster
    } else if draw.remaining == 0 {
        StageView::Exhausted
    } else {
        StageView::Ready { round: draw.round }
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let view = stage_view(state);
    let border_color = match view {
        StageView::Rolling { .. } => Color::Cyan,
        StageView::Winner(_) => Color::Yellow,
        _ => Color::Gray,
    };

    let mut title = String::from("Stage");
    if let Some(name) = &state.draw.background {
        title = format!("Stage [{}]", name);
    }

    // Push the content towards the vertical middle
    let lines = stage_lines(&view, state.frame_count);
    let inner_height = area.height.saturating_sub(2) as usize;
    let pad = inner_height.saturating_sub(lines.len()) / 2;
    let mut padded = vec![Line::default(); pad];
    padded.extend(lines);

    let paragraph = Paragraph::new(padded)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(title),
        );
    frame.render_widget(paragraph, area);
}

fn stage_lines(view: &StageView, frame_count: u64) -> Vec<Line<'static>> {
    let big = |text: String, color: Color| {
        Line::from(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    };
    let dim = |text: String| Line::from(Span::styled(text, Style::default().fg(Color::Gray)));

    match view {
        StageView::Rolling { round, current } => {
            let spinner = SPINNER[(frame_count % SPINNER.len() as u64) as usize];
            let mut lines = vec![dim(format!("{} Drawing round {} {}", spinner, round, spinner))];
            lines.push(Line::default());
            match current {
                Some(p) => {
                    lines.push(big(p.name.clone(), Color::Cyan));
                    lines.push(dim(p.department.clone()));
                }
                None => lines.push(big("...".to_string(), Color::Cyan)),
            }
            lines.push(Line::default());
            lines.push(dim("Press Space to stop".to_string()));
            lines
        }
        StageView::Winner(winner) => vec![
            big("Congratulations!".to_string(), Color::Yellow),
            Line::default(),
            big(winner.employee.name.clone(), Color::White),
            dim(winner.employee.department.clone()),
            Line::default(),
            dim(format!("Winner of round {}", winner.round)),
        ],
        StageView::Ready { round } => vec![
            big(format!("Ready for round {}", round), Color::Green),
            Line::default(),
            dim("Press Space to start".to_string()),
        ],
        StageView::Exhausted => vec![
            big("Everyone has already won!".to_string(), Color::Red),
            Line::default(),
            dim("Press r to reset".to_string()),
        ],
        StageView::EmptyRoster => vec![
            big("No participants".to_string(), Color::Red),
            Line::default(),
            dim("Press s, then i to import a roster".to_string()),
        ],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
