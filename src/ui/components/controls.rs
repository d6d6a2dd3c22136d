use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ui::download::DownloadControl;
use crate::ui::pagination::PagerControls;
use crate::ui::style::Theme;

const PREVIOUS: &str = " ‹ Prev [PgUp] ";
const NEXT: &str = " [PgDn] Next › ";

/// Argument bundle for the bottom control bar.
pub struct ControlsContext<'a> {
    pub download: &'a DownloadControl,
    pub pager: Option<PagerControls>,
    pub area: Rect,
    pub theme: &'a Theme,
}

/// Render the download control on the left and, when visible, the pager on
/// the right.
pub fn render_controls(frame: &mut Frame, controls: ControlsContext<'_>) {
    let ControlsContext {
        download,
        pager,
        area,
        theme,
    } = controls;

    let download_line = download_line(download, theme);
    let pager_line = pager.map(|pager| pager_line(&pager, theme));
    let pager_width = pager_line.as_ref().map_or(0, |line| line.width() as u16);

    let [download_area, pager_area] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(pager_width)]).areas(area);

    frame.render_widget(Paragraph::new(download_line), download_area);
    if let Some(line) = pager_line {
        frame.render_widget(
            Paragraph::new(line).alignment(Alignment::Right),
            pager_area,
        );
    }
}

fn download_line(download: &DownloadControl, theme: &Theme) -> Line<'static> {
    let hint = if download.is_enabled() { "[^D] " } else { "" };
    let text = format!(" {hint}{} ", download.label());
    Line::from(Span::styled(text, theme.control_style(download.is_enabled())))
}

fn pager_line(pager: &PagerControls, theme: &Theme) -> Line<'static> {
    let label = format!("  {}  ", pager.label());
    Line::from(vec![
        Span::styled(PREVIOUS, theme.control_style(pager.previous_enabled)),
        Span::styled(label, theme.pager_label_style()),
        Span::styled(NEXT, theme.control_style(pager.next_enabled)),
    ])
}
