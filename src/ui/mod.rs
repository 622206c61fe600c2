//! UI rendering
//!
//! One screen, top to bottom:
//! - Header with the title, current thread and backend health
//! - Message log (or a welcome hint when empty)
//! - Error banner while the last send failed
//! - Input line and keybind hints
//!
//! Rendering only reads the [`App`]. What the app needs back from a frame,
//! such as how far the log can scroll, comes out as [`RenderOutputs`].

mod conversation;
mod helpers;
mod input;
mod messages;
mod theme;

pub use conversation::TITLE;
pub use messages::WELCOME_HINT;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, BorderType, Borders},
    Frame,
};

use crate::app::App;
use conversation::{error_banner_height, render_error_banner, render_header};
use helpers::inner_rect;
use input::{render_input, INPUT_HEIGHT};
use messages::render_messages_area;
use theme::COLOR_BORDER;

/// Values computed while drawing that the app keeps for the next event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOutputs {
    /// Furthest the message log can scroll up from the bottom
    pub max_scroll: u16,
}

/// Render the whole screen
pub fn render(frame: &mut Frame, app: &App) -> RenderOutputs {
    let size = frame.area();

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(outer_block, size);

    let inner = inner_rect(size, 1);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                        // Header
            Constraint::Min(1),                           // Messages
            Constraint::Length(error_banner_height(app)), // Error banner
            Constraint::Length(INPUT_HEIGHT),             // Input + hints
        ])
        .split(inner);

    render_header(frame, chunks[0], app);
    let max_scroll = render_messages_area(frame, chunks[1], app);
    render_error_banner(frame, chunks[2], app);
    render_input(frame, chunks[3], app);

    RenderOutputs { max_scroll }
}
