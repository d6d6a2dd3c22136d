use std::fmt::Write;

use anyhow::Result;
use serde_json::json;
use unicode_width::UnicodeWidthStr;
use usersearch::ui::results::{COLUMN_HEADERS, NO_RESULTS_ROW};
use usersearch::ui::style::ThemeDefinition;
use usersearch::{ResultsView, SavedDownload};

use super::OutputFormat;
use crate::workflow::PrintedPage;

/// Render a fetched page as an aligned text table followed by its status
/// line and, when the results span several pages, the pager label.
pub(crate) fn format_plain(page: &PrintedPage) -> String {
    let view = ResultsView::from_results(&page.results);
    let rows = view.data_rows();

    let mut widths = COLUMN_HEADERS.map(UnicodeWidthStr::width);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &COLUMN_HEADERS, &widths);
    let rule = widths.map(|width| "-".repeat(width));
    push_row(&mut out, &rule.each_ref().map(String::as_str), &widths);

    if view.is_placeholder() {
        let _ = writeln!(out, "{NO_RESULTS_ROW}");
    }
    for row in rows {
        push_row(&mut out, &row.each_ref().map(String::as_str), &widths);
    }

    if let Some(status) = view.status_for_page(page.pagination.current_page()) {
        let _ = writeln!(out, "{status}");
    }
    if let Some(pager) = page.pagination.controls() {
        let _ = writeln!(out, "{}", pager.label());
    }
    out
}

fn push_row(out: &mut String, cells: &[&str; 4], widths: &[usize; 4]) {
    let mut line = String::new();
    for (index, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if index > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        line.extend(std::iter::repeat_n(' ', width.saturating_sub(cell.width())));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Print a plain-text representation of a fetched page.
pub(crate) fn print_plain(page: &PrintedPage) {
    print!("{}", format_plain(page));
}

/// Format a fetched page as a JSON string.
pub(crate) fn format_page_json(page: &PrintedPage) -> Result<String> {
    let pager = page.pagination.controls().map(|pager| {
        json!({
            "label": pager.label(),
            "previous": pager.previous_page(),
            "next": pager.next_page(),
        })
    });

    let payload = json!({
        "query": page.query,
        "page": page.pagination.current_page(),
        "page_size": page.pagination.page_size(),
        "total": page.pagination.total_results(),
        "total_pages": page.pagination.total_pages(),
        "pager": pager,
        "results": page.results,
    });

    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of a fetched page.
pub(crate) fn print_json(page: &PrintedPage) -> Result<()> {
    println!("{}", format_page_json(page)?);
    Ok(())
}

/// Describe a finished download in the chosen format.
pub(crate) fn format_download(saved: &SavedDownload, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Plain => format!("Saved {} bytes to {}.", saved.bytes, saved.path.display()),
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "path": saved.path.display().to_string(),
            "bytes": saved.bytes,
        }))?,
    })
}

pub(crate) fn print_download(saved: &SavedDownload, format: OutputFormat) -> Result<()> {
    println!("{}", format_download(saved, format)?);
    Ok(())
}

/// One line per built-in theme: its name followed by any aliases.
pub(crate) fn format_theme_list(themes: &[ThemeDefinition]) -> String {
    let mut out = String::new();
    for definition in themes {
        if definition.aliases.is_empty() {
            let _ = writeln!(out, "{}", definition.name);
        } else {
            let _ = writeln!(
                out,
                "{} (aliases: {})",
                definition.name,
                definition.aliases.join(", ")
            );
        }
    }
    out
}

pub(crate) fn print_themes() {
    print!("{}", format_theme_list(usersearch::builtin_themes()));
}
