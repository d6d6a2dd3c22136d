use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use super::state::SearchOutcome;

impl App<'_> {
    /// Apply one key press. Returns the outcome once the user quits.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SearchOutcome> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Some(self.outcome()),
            KeyCode::Char('c') if ctrl => return Some(self.outcome()),
            KeyCode::Enter => self.perform_search(1),
            KeyCode::PageDown => self.next_page(),
            KeyCode::PageUp => self.previous_page(),
            KeyCode::Right if ctrl => self.next_page(),
            KeyCode::Left if ctrl => self.previous_page(),
            KeyCode::Char('d') if ctrl => self.perform_download(),
            KeyCode::Up => self.move_selection_up(),
            KeyCode::Down => self.move_selection_down(),
            _ => {
                self.query_input.input(key);
            }
        }
        None
    }

    fn move_selection_up(&mut self) {
        if let Some(selected) = self.table_state.selected()
            && selected > 0
        {
            self.table_state.select(Some(selected - 1));
        }
    }

    fn move_selection_down(&mut self) {
        if let Some(selected) = self.table_state.selected() {
            let len = self.results.data_rows().len();
            if selected + 1 < len {
                self.table_state.select(Some(selected + 1));
            }
        }
    }
}
