use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::error::PilotError;
use crate::scheduler::REFRESH_INTERVAL;

pub fn render_loading(frame: &mut Frame) {
    let area = centered_rect(40, 3, frame.area());
    let loading = Paragraph::new(Span::styled(
        "Loading pull requests...",
        Style::default().fg(Color::Yellow),
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(loading, area);
}

/// Full-screen error shown while nothing has loaded yet
pub fn render_error(frame: &mut Frame, error: &PilotError) {
    let area = centered_rect(70, 8, frame.area());

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Retrying every {}s  •  q: Quit",
                REFRESH_INTERVAL.as_secs()
            ),
            Style::default().fg(Color::Gray),
        )),
    ];

    let popup = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(Span::styled(
                    " Error ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(popup, area);
}

/// Centre a `width` x `height` box inside `outer`, shrinking it to fit
fn centered_rect(width: u16, height: u16, outer: Rect) -> Rect {
    let popup_width = width.min(outer.width);
    let popup_height = height.min(outer.height);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((outer.height.saturating_sub(popup_height)) / 2),
            Constraint::Length(popup_height),
            Constraint::Min(0),
        ])
        .split(outer);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((outer.width.saturating_sub(popup_width)) / 2),
            Constraint::Length(popup_width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}
