//! Header and error banner

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, BackendHealth};

use super::helpers::{spinner_frame, truncate_string};
use super::theme::{
    COLOR_ACTIVE, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_PENDING,
};

pub const TITLE: &str = "Letter Counter Agent";

/// Title on the left, thread and backend badges on the right.
pub fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_block = Block::default()
        .borders(Borders::BOTTOM)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(header_block, area);

    let thread_label = match app.conversation.thread_id() {
        Some(id) => format!("thread {}", truncate_string(id, 24)),
        None => "new conversation".to_string(),
    };

    let (status_icon, status_color) = match app.backend {
        BackendHealth::Connected => ("●", COLOR_ACTIVE),
        BackendHealth::Unreachable(_) => ("○", COLOR_ERROR),
        BackendHealth::Checking => (spinner_frame(app.tick_count), COLOR_PENDING),
    };

    let badges = vec![
        Span::styled(format!("[{}] ", thread_label), Style::default().fg(COLOR_DIM)),
        Span::styled(status_icon, Style::default().fg(status_color)),
        Span::styled(
            format!(" {} ", app.backend.label()),
            Style::default().fg(status_color),
        ),
    ];

    let badges_width: usize = badges.iter().map(|s| s.width()).sum();
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(badges_width as u16),
        ])
        .split(Rect {
            height: area.height.min(1),
            ..area
        });

    let title = Paragraph::new(Line::from(Span::styled(
        format!(" {}", TITLE),
        Style::default()
            .fg(COLOR_HEADER)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, header_chunks[0]);

    let badges_widget = Paragraph::new(Line::from(badges)).alignment(Alignment::Right);
    frame.render_widget(badges_widget, header_chunks[1]);
}

/// Height the error banner needs, 0 when there is no error.
pub fn error_banner_height(app: &App) -> u16 {
    if app.conversation.last_error().is_some() {
        3
    } else {
        0
    }
}

pub fn render_error_banner(frame: &mut Frame, area: Rect, app: &App) {
    let Some(error) = app.conversation.last_error() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_ERROR))
        .title(Span::styled(" Error ", Style::default().fg(COLOR_ERROR)))
        .title_bottom(
            Line::from(Span::styled(" Esc to dismiss ", Style::default().fg(COLOR_DIM)))
                .right_aligned(),
        );

    let banner = Paragraph::new(Line::from(Span::styled(
        error.to_string(),
        Style::default().fg(COLOR_ERROR),
    )))
    .wrap(Wrap { trim: true })
    .block(block);
    frame.render_widget(banner, area);
}
