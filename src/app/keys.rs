//! Keyboard handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, Intent};

/// Lines moved per PageUp/PageDown
const PAGE_LINES: u16 = 10;

impl App {
    /// Apply a key press. Quitting is signalled through `should_quit`.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => self.quit(),
            KeyCode::Char('l') if ctrl => {
                let _ = self.dispatch(Intent::Clear);
            }
            KeyCode::Esc => {
                let _ = self.dispatch(Intent::DismissError);
            }
            KeyCode::Enter => {
                // Rejections are logged; the input stays for another try.
                let _ = self.submit_input();
            }
            KeyCode::Char(c) if !ctrl => self.input.insert_char(c),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::PageUp => self.scroll_up(PAGE_LINES),
            KeyCode::PageDown => self.scroll_down(PAGE_LINES),
            _ => {}
        }
    }

    /// Bracketed paste lands in the input line.
    pub fn handle_paste(&mut self, text: &str) {
        self.input.insert_str(text);
        self.mark_dirty();
    }
}
