//! The table body derived from a search response.

use usersearch_api::UserRecord;

/// Column titles, in [`UserRecord::fields`] order.
pub const COLUMN_HEADERS: [&str; 4] = ["User ID", "Name", "Email", "Country"];

/// Text of the single placeholder row shown for an empty page.
pub const NO_RESULTS_ROW: &str = "No results found.";

/// Status line shown for an empty page.
pub const NO_RESULTS_STATUS: &str = "No users found for this page.";

/// What the results table currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultsView {
    /// Nothing to show: before the first search and while one is running.
    #[default]
    Cleared,
    /// The backend returned an empty page; one placeholder row is shown.
    Empty,
    /// One display row per record, in backend order.
    Rows(Vec<[String; 4]>),
}

impl ResultsView {
    /// Build the table body for a page of records.
    ///
    /// Field values come from the backend and are treated as untrusted text.
    #[must_use]
    pub fn from_results(results: &[UserRecord]) -> Self {
        if results.is_empty() {
            return ResultsView::Empty;
        }

        ResultsView::Rows(
            results
                .iter()
                .map(|record| record.fields().map(sanitize_cell))
                .collect(),
        )
    }

    /// Number of table rows, counting the placeholder row.
    #[must_use]
    pub fn row_count(&self) -> usize {
        match self {
            ResultsView::Cleared => 0,
            ResultsView::Empty => 1,
            ResultsView::Rows(rows) => rows.len(),
        }
    }

    /// Rows backed by a record; empty for the placeholder.
    #[must_use]
    pub fn data_rows(&self) -> &[[String; 4]] {
        match self {
            ResultsView::Rows(rows) => rows,
            ResultsView::Cleared | ResultsView::Empty => &[],
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ResultsView::Empty)
    }

    /// Status line text to pair with this view after a response for `page`.
    #[must_use]
    pub fn status_for_page(&self, page: u32) -> Option<String> {
        match self {
            ResultsView::Cleared => None,
            ResultsView::Empty => Some(NO_RESULTS_STATUS.to_string()),
            ResultsView::Rows(_) => Some(format!("Showing results for page {page}.")),
        }
    }
}

/// Make a backend value safe to draw in a terminal cell.
///
/// Line breaks and tabs collapse to spaces; every other control character,
/// including the escape that starts terminal control sequences, is replaced
/// with U+FFFD.
#[must_use]
pub fn sanitize_cell(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '\t' | '\n' | '\r' => ' ',
            c if c.is_control() => char::REPLACEMENT_CHARACTER,
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_page_renders_single_placeholder() {
        let view = ResultsView::from_results(&[]);
        assert_eq!(view.row_count(), 1);
        assert!(view.is_placeholder());
        assert!(view.data_rows().is_empty());
        assert_eq!(view.status_for_page(4).as_deref(), Some(NO_RESULTS_STATUS));
    }

    #[test]
    fn rows_follow_backend_order() {
        let records = vec![
            UserRecord::new("9", "Zed", "zed@example.com", "NZ"),
            UserRecord::new("1", "Amy", "amy@example.com", "AU"),
        ];
        let view = ResultsView::from_results(&records);
        assert_eq!(view.row_count(), 2);
        assert_eq!(
            view.data_rows()[0],
            ["9", "Zed", "zed@example.com", "NZ"].map(String::from)
        );
        assert_eq!(view.data_rows()[1][1], "Amy");
        assert_eq!(
            view.status_for_page(2).as_deref(),
            Some("Showing results for page 2.")
        );
    }

    #[test]
    fn cleared_view_has_no_rows_or_status() {
        let view = ResultsView::default();
        assert_eq!(view.row_count(), 0);
        assert_eq!(view.status_for_page(1), None);
    }

    #[test]
    fn control_sequences_are_neutralised() {
        assert_eq!(sanitize_cell("\u{1b}[2Jboom"), "\u{fffd}[2Jboom");
        assert_eq!(sanitize_cell("two\nlines\tand\rreturn"), "two lines and return");
        assert_eq!(sanitize_cell("<b>plain</b>"), "<b>plain</b>");
    }

    #[test]
    fn record_fields_are_sanitised() {
        let records = vec![UserRecord::new("1", "Eve\u{7}", "eve@example.com", "DE")];
        let view = ResultsView::from_results(&records);
        assert_eq!(view.data_rows()[0][1], "Eve\u{fffd}");
    }
}
