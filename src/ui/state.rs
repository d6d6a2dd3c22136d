use std::sync::Arc;

use ratatui::widgets::TableState;
use throbber_widgets_tui::ThrobberState;
use usersearch_api::SearchBackend;

use super::config::UiConfig;
use super::download::DownloadControl;
use super::input::QueryInput;
use super::pagination::{PagerControls, PaginationState};
use super::results::ResultsView;
use super::style::Theme;

mod request_runtime;

pub(crate) use request_runtime::RequestRuntime;

impl Drop for App<'_> {
    fn drop(&mut self) {
        self.searches.shutdown();
        self.downloads.shutdown();
    }
}

/// Whether a status line reports progress or a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Error,
}

/// Text shown in the status line under the results table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: StatusTone,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: StatusTone::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: StatusTone::Error,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.tone == StatusTone::Error
    }
}

/// Where the user left off when the UI closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub query: String,
    pub current_page: u32,
    pub total_results: u64,
}

/// The search controller: query input, results table, pager and downloader.
pub struct App<'a> {
    pub query_input: QueryInput<'a>,
    pub table_state: TableState,
    pub theme: Theme,
    pub(crate) config: UiConfig,
    pub(crate) pagination: PaginationState,
    pub(crate) results: ResultsView,
    pub(crate) status: Option<StatusMessage>,
    pub(crate) pager: Option<PagerControls>,
    pub(crate) download_control: DownloadControl,
    pub(crate) throbber_state: ThrobberState,
    pub(super) searches: RequestRuntime,
    pub(super) downloads: RequestRuntime,
}

impl<'a> App<'a> {
    pub fn new(backend: Arc<dyn SearchBackend>, config: UiConfig) -> Self {
        let searches = RequestRuntime::spawn(Arc::clone(&backend));
        let downloads = RequestRuntime::spawn(backend);

        Self {
            query_input: QueryInput::new(&config.initial_query),
            table_state: TableState::default(),
            theme: config.theme,
            pagination: PaginationState::new(config.page_size),
            results: ResultsView::Cleared,
            status: None,
            pager: None,
            download_control: DownloadControl::default(),
            throbber_state: ThrobberState::default(),
            searches,
            downloads,
            config,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        self.query_input.text()
    }

    #[must_use]
    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    #[must_use]
    pub fn results(&self) -> &ResultsView {
        &self.results
    }

    #[must_use]
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Visible pager, `None` while hidden.
    #[must_use]
    pub fn pager(&self) -> Option<PagerControls> {
        self.pager
    }

    #[must_use]
    pub fn download_control(&self) -> &DownloadControl {
        &self.download_control
    }

    /// Busy indicator: a search has been issued and not yet answered.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.searches.is_in_flight()
    }

    #[must_use]
    pub fn is_downloading(&self) -> bool {
        self.downloads.is_in_flight()
    }

    pub(crate) fn outcome(&self) -> SearchOutcome {
        SearchOutcome {
            query: self.query().to_string(),
            current_page: self.pagination.current_page(),
            total_results: self.pagination.total_results(),
        }
    }

    pub(crate) fn ensure_selection(&mut self) {
        let len = self.results.data_rows().len();
        if len == 0 {
            self.table_state.select(None);
        } else if let Some(selected) = self.table_state.selected() {
            if selected >= len {
                self.table_state.select(Some(len - 1));
            }
        } else {
            self.table_state.select(Some(0));
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::testing::StaticBackend;

    pub(crate) fn app_with(backend: Arc<StaticBackend>, config: UiConfig) -> App<'static> {
        App::new(backend, config)
    }

    /// Pump responses until nothing is in flight or a second has passed.
    pub(crate) fn wait_for_idle(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(1);
        while (app.is_searching() || app.is_downloading()) && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
            app.pump_responses();
        }
        app.pump_responses();
    }

    #[test]
    fn new_app_starts_idle_on_first_page() {
        let app = app_with(Arc::new(StaticBackend::with_users(3)), UiConfig::default());
        assert_eq!(app.pagination().current_page(), 1);
        assert_eq!(app.pagination().total_results(), 0);
        assert_eq!(app.results(), &ResultsView::Cleared);
        assert!(app.status().is_none());
        assert!(app.pager().is_none());
        assert!(!app.is_searching());
        assert!(app.download_control().is_enabled());
    }

    #[test]
    fn initial_query_prefills_input() {
        let config = UiConfig {
            initial_query: "ada".into(),
            ..UiConfig::default()
        };
        let app = app_with(Arc::new(StaticBackend::with_users(0)), config);
        assert_eq!(app.query(), "ada");
    }

    #[test]
    fn selection_follows_row_count() {
        let mut app = app_with(Arc::new(StaticBackend::with_users(0)), UiConfig::default());
        app.results = ResultsView::Rows(vec![Default::default(), Default::default()]);
        app.ensure_selection();
        assert_eq!(app.table_state.selected(), Some(0));

        app.table_state.select(Some(5));
        app.ensure_selection();
        assert_eq!(app.table_state.selected(), Some(1));

        app.results = ResultsView::Empty;
        app.ensure_selection();
        assert_eq!(app.table_state.selected(), None);
    }
}
