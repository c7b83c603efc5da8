use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};
use ratatui::Frame;

use crate::app::App;
use crate::format::COLUMNS;
use crate::types::ReviewStatus;

const WIDTHS: [Constraint; 5] = [
    Constraint::Length(25),
    Constraint::Min(20),
    Constraint::Length(16),
    Constraint::Length(5),
    Constraint::Length(18),
];

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(COLUMNS.iter().map(|title| Cell::from(*title))).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows = app.rows.iter().map(|row| {
        let [repo, title, author, age, status] = &row.cells;
        Row::new(vec![
            Cell::from(Span::styled(repo.clone(), Style::default().fg(Color::Cyan))),
            Cell::from(title.clone()),
            Cell::from(Span::styled(author.clone(), Style::default().fg(Color::Gray))),
            Cell::from(Span::styled(age.clone(), Style::default().fg(Color::DarkGray))),
            Cell::from(Span::styled(
                status.clone(),
                Style::default().fg(status_color(row.status)),
            )),
        ])
    });

    let table = Table::new(rows, WIDTHS)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Open Pull Requests ({}) ", app.rows.len()))
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = TableState::default();
    if !app.rows.is_empty() {
        state.select(Some(app.selected));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn status_color(status: ReviewStatus) -> Color {
    match status {
        ReviewStatus::Approved => Color::Green,
        ReviewStatus::ChangesRequested => Color::Red,
        ReviewStatus::ReviewRequested => Color::Yellow,
        ReviewStatus::Commented => Color::Cyan,
        ReviewStatus::Draft => Color::DarkGray,
        ReviewStatus::NoReviews => Color::Gray,
    }
}
