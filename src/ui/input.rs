//! Single-line query editor.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use tui_textarea::{CursorMove, TextArea};

const PLACEHOLDER: &str = "type a name, email, id or country and press Enter";

/// Wraps a [`TextArea`] constrained to one line of text.
#[derive(Debug, Clone)]
pub struct QueryInput<'a> {
    textarea: TextArea<'a>,
}

impl Default for QueryInput<'_> {
    fn default() -> Self {
        Self::new("")
    }
}

impl<'a> QueryInput<'a> {
    #[must_use]
    pub fn new(initial: &str) -> Self {
        let mut textarea = TextArea::new(vec![single_line(initial)]);
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_text(PLACEHOLDER);
        textarea.set_placeholder_style(Style::default().add_modifier(Modifier::DIM));
        textarea.move_cursor(CursorMove::End);
        Self { textarea }
    }

    /// Current query text.
    #[must_use]
    pub fn text(&self) -> &str {
        self.textarea
            .lines()
            .first()
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Feed a key to the editor. Returns `true` when the text changed.
    ///
    /// Keys that would introduce a second line are ignored.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        let newline = matches!(key.code, KeyCode::Enter)
            || (key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('m') | KeyCode::Char('j')));
        if newline {
            return false;
        }
        self.textarea.input(key)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(&self.textarea, area);
    }
}

fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}
