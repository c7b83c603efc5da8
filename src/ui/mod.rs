mod placeholder;
mod table;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, ErrorOrigin, Phase};

const HELP: &str = "↑/↓: Navigate  •  Enter: Open PR  •  y: Copy URL  •  r: Refresh  •  q: Quit";

/// Draw the dashboard. Depends only on `app`.
pub fn render(frame: &mut Frame, app: &App) {
    match (&app.last_error, app.loaded) {
        (Some(error), false) => placeholder::render_error(frame, error),
        (None, false) => placeholder::render_loading(frame),
        _ => render_dashboard(frame, app),
    }
}

fn render_dashboard(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    table::render(frame, app, chunks[1]);
    render_status_line(frame, app, chunks[2]);

    let help = Paragraph::new(Span::styled(HELP, Style::default().fg(Color::Gray)));
    frame.render_widget(help, chunks[3]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![Span::styled(
        "pr-pilot",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )]))
    .style(Style::default().bg(Color::DarkGray));

    frame.render_widget(header, area);
}

fn render_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let (Some(error), Phase::ReadyWithError) = (&app.last_error, app.phase()) {
        let message = match app.error_origin {
            ErrorOrigin::Refresh => format!("Refresh failed: {} (showing last loaded data)", error),
            ErrorOrigin::External => format!("Error: {}", error),
        };
        Line::from(vec![Span::styled(message, Style::default().fg(Color::Red))])
    } else {
        let updated = app
            .last_updated
            .map(|at| at.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        Line::from(vec![Span::styled(
            format!("{} open  •  updated {}", app.prs.len(), updated),
            Style::default().fg(Color::DarkGray),
        )])
    };

    frame.render_widget(Paragraph::new(status), area);
}
