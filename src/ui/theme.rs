//! Color theme constants
//!
//! Minimal dark palette shared by every widget.

use ratatui::style::Color;

/// Frame and separator lines
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Title and focused elements
pub const COLOR_HEADER: Color = Color::White;

/// Timestamps, hints and disabled input
pub const COLOR_DIM: Color = Color::DarkGray;

/// Label for the user's own turns
pub const COLOR_USER: Color = Color::Cyan;

/// Label for the agent's turns
pub const COLOR_AGENT: Color = Color::Rgb(4, 181, 117); // green #04B575

/// Healthy backend indicator
pub const COLOR_ACTIVE: Color = Color::LightGreen;

/// Error banner and unreachable backend
pub const COLOR_ERROR: Color = Color::Red;

/// Spinner and pending state
pub const COLOR_PENDING: Color = Color::Gray;
