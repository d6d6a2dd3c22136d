use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, HighlightSpacing, Paragraph, Row, Table, TableState};

use crate::ui::results::{COLUMN_HEADERS, NO_RESULTS_ROW, ResultsView};
use crate::ui::style::Theme;

const HIGHLIGHT_SYMBOL: &str = "▶ ";
const TABLE_COLUMN_SPACING: u16 = 1;
const HEADER_HEIGHT: u16 = 1;

/// Column layout: id, name, email, country.
fn column_widths() -> [Constraint; 4] {
    [
        Constraint::Length(10),
        Constraint::Fill(2),
        Constraint::Fill(3),
        Constraint::Length(10),
    ]
}

/// Render the header, a divider and the rows of `view`.
///
/// An empty page draws the placeholder row across the full table width.
pub fn render_results_table(
    frame: &mut Frame,
    area: Rect,
    view: &ResultsView,
    table_state: &mut TableState,
    theme: &Theme,
) {
    let header = Row::new(COLUMN_HEADERS.iter().copied().map(Cell::from))
        .style(theme.header_style())
        .height(HEADER_HEIGHT)
        .bottom_margin(1);

    let rows = view
        .data_rows()
        .iter()
        .map(|fields| Row::new(fields.iter().map(|field| Cell::from(field.as_str()))));

    let table = Table::new(rows, column_widths())
        .header(header)
        .column_spacing(TABLE_COLUMN_SPACING)
        .highlight_spacing(HighlightSpacing::WhenSelected)
        .row_highlight_style(theme.row_highlight_style())
        .highlight_symbol(HIGHLIGHT_SYMBOL);
    frame.render_stateful_widget(table, area, table_state);

    render_header_separator(frame, area, theme);

    if view.is_placeholder() {
        render_placeholder(frame, area, theme);
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, theme: &Theme) {
    let body_offset = HEADER_HEIGHT + 1;
    if area.height <= body_offset {
        return;
    }
    let row = Rect {
        y: area.y + body_offset,
        height: 1,
        ..area
    };
    let placeholder = Paragraph::new(NO_RESULTS_ROW)
        .alignment(Alignment::Center)
        .style(theme.empty_style());
    frame.render_widget(placeholder, row);
}

fn render_header_separator(frame: &mut Frame, area: Rect, theme: &Theme) {
    if HEADER_HEIGHT >= area.height {
        return;
    }
    let width = area.width as usize;
    if width == 0 {
        return;
    }

    let sep_rect = Rect {
        y: area.y + HEADER_HEIGHT,
        height: 1,
        ..area
    };
    let style = Style::new().fg(theme.header.fg.unwrap_or_default());
    let line = Line::from(Span::styled("─".repeat(width), style));
    frame.render_widget(Paragraph::new(line), sep_rect);
}
