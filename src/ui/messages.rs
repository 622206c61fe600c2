//! Message log rendering

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::models::{Message, MessageRole};

use super::helpers::{format_time, spinner_frame, wrapped_height};
use super::theme::{COLOR_AGENT, COLOR_DIM, COLOR_HEADER, COLOR_PENDING, COLOR_USER};

pub const WELCOME_HINT: &str = "Try asking: \"How many 'r's are in 'strawberry'?\"";

fn role_style(role: MessageRole) -> Style {
    let color = match role {
        MessageRole::User => COLOR_USER,
        MessageRole::Agent => COLOR_AGENT,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Label line, content lines, then a blank separator.
pub fn message_lines(message: &Message) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(message.role.label(), role_style(message.role)),
        Span::styled(
            format!("  {}", format_time(message.timestamp)),
            Style::default().fg(COLOR_DIM),
        ),
    ])];

    if message.content.is_empty() {
        lines.push(Line::from(""));
    } else {
        lines.extend(
            message
                .content
                .lines()
                .map(|l| {
                    Line::from(Span::styled(
                        l.to_string(),
                        Style::default().fg(COLOR_HEADER),
                    ))
                }),
        );
    }
    lines.push(Line::from(""));
    lines
}

fn welcome_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            WELCOME_HINT,
            Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC),
        ))
        .centered(),
    ]
}

/// Render the conversation, pinned to the bottom unless the user scrolled up.
///
/// Returns how far up the view can scroll, for clamping the app's offset.
pub fn render_messages_area(frame: &mut Frame, area: Rect, app: &App) -> u16 {
    let snapshot = app.snapshot();

    let mut lines: Vec<Line<'static>> = if snapshot.messages.is_empty() {
        welcome_lines()
    } else {
        snapshot.messages.iter().flat_map(message_lines).collect()
    };

    if snapshot.input_disabled {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", spinner_frame(app.tick_count)),
                Style::default().fg(COLOR_PENDING),
            ),
            Span::styled("Thinking...", Style::default().fg(COLOR_DIM)),
        ]));
    }

    let (visible, top_row, max_scroll) = visible_tail(lines, area, app.scroll_offset);

    let widget = Paragraph::new(visible)
        .wrap(Wrap { trim: false })
        .scroll((top_row, 0));
    frame.render_widget(widget, area);

    max_scroll
}

/// Drop the lines wholly above the window so the Paragraph's `u16` scroll
/// never has to reach past the top of a very long log.
///
/// `scroll_offset` counts rows up from the bottom; the returned row counts
/// down from the top of the kept lines.
fn visible_tail(
    lines: Vec<Line<'static>>,
    area: Rect,
    scroll_offset: u16,
) -> (Vec<Line<'static>>, u16, u16) {
    let width = area.width as usize;
    let heights: Vec<usize> = lines.iter().map(|l| wrapped_height(l, width)).collect();
    let total: usize = heights.iter().sum();

    let max_scroll = total.saturating_sub(area.height as usize);
    let window_top = max_scroll - (scroll_offset as usize).min(max_scroll);

    let mut skipped_rows = 0;
    let mut skipped_lines = 0;
    for height in &heights {
        if skipped_rows + height > window_top {
            break;
        }
        skipped_rows += height;
        skipped_lines += 1;
    }

    let top_row = u16::try_from(window_top - skipped_rows).unwrap_or(u16::MAX);
    let max_scroll = u16::try_from(max_scroll).unwrap_or(u16::MAX);
    let visible = lines.into_iter().skip(skipped_lines).collect();
    (visible, top_row, max_scroll)
}
