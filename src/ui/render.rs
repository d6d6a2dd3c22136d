use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect},
    widgets::Paragraph,
};

use super::App;
use super::components::{
    ControlsContext, PromptContext, render_controls, render_prompt, render_results_table,
};

impl App<'_> {
    pub(crate) fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area().inner(Margin {
            vertical: 0,
            horizontal: 1,
        });

        let [prompt_area, _, table_area, status_area, controls_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        render_prompt(
            frame,
            PromptContext {
                query_input: &self.query_input,
                title: &self.config.input_title,
                searching: self.is_searching(),
                throbber_state: &self.throbber_state,
                area: prompt_area,
                theme: &self.theme,
            },
        );
        render_results_table(
            frame,
            table_area,
            &self.results,
            &mut self.table_state,
            &self.theme,
        );
        self.render_status(frame, status_area);
        render_controls(
            frame,
            ControlsContext {
                download: &self.download_control,
                pager: self.pager,
                area: controls_area,
                theme: &self.theme,
            },
        );
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let Some(status) = &self.status else {
            return;
        };
        let paragraph =
            Paragraph::new(status.text.as_str()).style(self.theme.status_style(status.is_error()));
        frame.render_widget(paragraph, area);
    }
}
