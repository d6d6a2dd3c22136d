use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use throbber_widgets_tui::{Throbber, ThrobberState};
use unicode_width::UnicodeWidthStr;

use crate::ui::input::QueryInput;
use crate::ui::style::Theme;

const BUSY_LABEL: &str = " Searching...";

/// Argument bundle for rendering the prompt row.
pub struct PromptContext<'a, 'input> {
    pub query_input: &'a QueryInput<'input>,
    pub title: &'a str,
    pub searching: bool,
    pub throbber_state: &'a ThrobberState,
    pub area: Rect,
    pub theme: &'a Theme,
}

/// Render `title > query` with the busy indicator right-aligned while a
/// search is in flight.
pub fn render_prompt(frame: &mut Frame, prompt: PromptContext<'_, '_>) {
    let PromptContext {
        query_input,
        title,
        searching,
        throbber_state,
        area,
        theme,
    } = prompt;

    let prompt_text = if title.is_empty() {
        String::new()
    } else {
        format!("{title} > ")
    };
    let busy = searching.then(|| busy_line(throbber_state, theme));
    let busy_width = busy.as_ref().map_or(0, |line| line.width() as u16);

    let [prompt_area, input_area, busy_area] = Layout::horizontal([
        Constraint::Length(prompt_text.width() as u16),
        Constraint::Min(1),
        Constraint::Length(busy_width),
    ])
    .areas(area);

    if !prompt_text.is_empty() {
        frame.render_widget(
            Paragraph::new(prompt_text).style(theme.prompt_style()),
            prompt_area,
        );
    }
    query_input.render(frame, input_area);
    if let Some(line) = busy {
        frame.render_widget(Paragraph::new(line), busy_area);
    }
}

fn busy_line(throbber_state: &ThrobberState, theme: &Theme) -> Line<'static> {
    let muted = theme.empty_style();
    let spinner = Throbber::default().style(muted).throbber_style(muted);
    Line::from(vec![
        spinner.to_symbol_span(throbber_state),
        Span::styled(BUSY_LABEL, muted),
    ])
}
