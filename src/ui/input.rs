//! Input line and keybind hints

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::App;

use super::theme::{COLOR_BORDER, COLOR_DIM, COLOR_HEADER};

/// Rows the input area takes: border, prompt line, hint line.
pub const INPUT_HEIGHT: u16 = 3;

const PROMPT: &str = "> ";

pub fn keybind_hints(sending: bool) -> Line<'static> {
    let key = Style::default().fg(COLOR_HEADER);
    let dim = Style::default().fg(COLOR_DIM);
    let mut spans = vec![];
    if !sending {
        spans.push(Span::styled("enter", key));
        spans.push(Span::styled(" send  ", dim));
    }
    spans.extend([
        Span::styled("ctrl+l", key),
        Span::styled(" new conversation  ", dim),
        Span::styled("pgup/pgdn", key),
        Span::styled(" scroll  ", dim),
        Span::styled("ctrl+c", key),
        Span::styled(" quit", dim),
    ]);
    Line::from(spans)
}

/// Render the input line; dimmed with the "Thinking..." placeholder while a
/// send is in flight.
pub fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let snapshot = app.snapshot();
    let disabled = snapshot.input_disabled;
    let border_color = if disabled { COLOR_BORDER } else { COLOR_HEADER };

    let outer = Block::default()
        .borders(Borders::TOP)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(border_color));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let text_style = if disabled {
        Style::default().fg(COLOR_DIM)
    } else {
        Style::default().fg(COLOR_HEADER)
    };

    let body = if app.input.is_empty() {
        Span::styled(
            snapshot.placeholder,
            Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::styled(app.input.text().to_string(), text_style)
    };

    // Keep the cursor visible on long lines by scrolling horizontally
    let prompt_width = PROMPT.len() as u16;
    let available = rows[0].width.saturating_sub(prompt_width + 1);
    let cursor_col = app.input.cursor_column() as u16;
    let h_scroll = cursor_col.saturating_sub(available);

    let prompt = Paragraph::new(Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(border_color)),
        body,
    ]))
    .scroll((0, h_scroll));
    frame.render_widget(prompt, rows[0]);

    if !disabled && rows[0].height > 0 {
        frame.set_cursor_position(Position::new(
            rows[0].x + prompt_width + cursor_col - h_scroll,
            rows[0].y,
        ));
    }

    frame.render_widget(Paragraph::new(keybind_hints(disabled)), rows[1]);
}
