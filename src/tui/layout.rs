// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Banner: title + subtitle (3 rows)                 |
// +----------------+----------------+----------------+
// | Remaining      | Round          | Winners        |  (5 rows)
// +----------------+-------+--------+----------------+
// | Stage (60%)            | Winner history (40%)    |
// +------------------------+-------------------------+
// | Footer (1 row)                                    |
// | Help bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub banner: Rect,
    /// Row of three stat cards.
    pub stats: [Rect; 3],
    /// Rolling name or winner announcement.
    pub stage: Rect,
    pub history: Rect,
    /// Participant total, music and backdrop status.
    pub footer: Rect,
    /// Key hints, or the current notice.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // banner
            Constraint::Length(5), // stat cards
            Constraint::Min(8),    // stage + history
            Constraint::Length(1), // footer
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(vertical[1]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(vertical[2]);

    AppLayout {
        banner: vertical[0],
        stats: [cards[0], cards[1], cards[2]],
        stage: middle[0],
        history: middle[1],
        footer: vertical[3],
        help_bar: vertical[4],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
