//! Helper functions and constants for UI rendering

use chrono::{DateTime, Local, Utc};
use ratatui::layout::Rect;
use ratatui::text::Line;
use unicode_width::UnicodeWidthStr;

/// Spinner frames for the "Thinking..." indicator
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Ticks per spinner frame at the 16ms loop rate
const TICKS_PER_FRAME: u64 = 5;

/// Get inner rect with margin
pub fn inner_rect(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x + margin,
        y: area.y + margin,
        width: area.width.saturating_sub(margin * 2),
        height: area.height.saturating_sub(margin * 2),
    }
}

pub fn spinner_frame(tick_count: u64) -> &'static str {
    let idx = (tick_count / TICKS_PER_FRAME) as usize % SPINNER_FRAMES.len();
    SPINNER_FRAMES[idx]
}

/// `HH:MM` in the local timezone
pub fn format_time(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}

/// Rows one line takes once wrapped at `viewport_width`.
///
/// Counts display width rather than chars so wide glyphs wrap early.
pub fn wrapped_height(line: &Line, viewport_width: usize) -> usize {
    let width: usize = line.spans.iter().map(|s| s.content.width()).sum();
    if viewport_width == 0 || width == 0 {
        1 // Empty line still takes 1 row
    } else {
        width.div_ceil(viewport_width)
    }
}

/// Truncate to at most `max_width` columns, ending in "..." when cut.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}
