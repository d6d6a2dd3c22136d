use std::sync::mpsc::TryRecvError;

use tracing::{debug, info, trace, warn};
use usersearch_api::{ApiError, SearchRequest, SearchResultPage, UserRecord};

use super::App;
use super::results::ResultsView;
use super::state::StatusMessage;
use crate::systems::requests::{RequestCommand, RequestResponse};

const WORKER_GONE: &str = "Request worker stopped unexpectedly.";

impl App<'_> {
    /// Search the backend for the current query and show `page` of the results.
    ///
    /// The table, status line and pager are cleared immediately. The page is
    /// passed through as-is; callers propose `1` or the pager's neighbours.
    pub fn perform_search(&mut self, page: u32) {
        let query = self.query().to_string();
        self.pagination.set_current_page(page);
        self.results = ResultsView::Cleared;
        self.status = None;
        self.pager = None;
        self.ensure_selection();

        let request = SearchRequest::new(query, page);
        let id = self
            .searches
            .issue(|id| RequestCommand::Search { id, request });
        info!(id, page, "search issued");
    }

    /// Move to the next page when the pager allows it.
    pub fn next_page(&mut self) {
        if let Some(page) = self.pager.and_then(|pager| pager.next_page()) {
            self.perform_search(page);
        }
    }

    /// Move to the previous page when the pager allows it.
    pub fn previous_page(&mut self) {
        if let Some(page) = self.pager.and_then(|pager| pager.previous_page()) {
            self.perform_search(page);
        }
    }

    /// Drain finished requests from both workers and apply them.
    pub fn pump_responses(&mut self) {
        loop {
            match self.searches.try_recv() {
                Ok(response) => self.handle_response(response),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.searches.is_in_flight() {
                        self.searches.record_completion();
                        self.status = Some(StatusMessage::error(WORKER_GONE));
                    }
                    break;
                }
            }
        }

        loop {
            match self.downloads.try_recv() {
                Ok(response) => self.handle_response(response),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.downloads.is_in_flight() {
                        self.downloads.record_completion();
                        self.download_control.restore();
                        self.status = Some(StatusMessage::error(WORKER_GONE));
                    }
                    break;
                }
            }
        }
    }

    pub(crate) fn handle_response(&mut self, response: RequestResponse) {
        trace!(id = response.id(), "response received");
        match response {
            RequestResponse::Search { id, page, outcome } => {
                self.handle_search_response(id, page, outcome);
            }
            RequestResponse::Download { id, outcome } => {
                self.handle_download_response(id, outcome);
            }
        }
    }

    /// Apply a search response if it answers the most recent search.
    fn handle_search_response(
        &mut self,
        id: u64,
        page: u32,
        outcome: Result<SearchResultPage, ApiError>,
    ) {
        if !self.searches.matches_latest(id) {
            debug!(id, page, "discarding superseded search response");
            return;
        }
        self.searches.record_completion();

        match outcome {
            Ok(result) => {
                debug!(id, page, total = result.total, rows = result.results.len(), "search applied");
                self.pagination.set_total_results(result.total);
                self.render_results(&result.results);
                self.update_pagination_controls();
            }
            Err(err) => {
                warn!(id, page, error = %err, "search failed");
                self.status = Some(StatusMessage::error(format!("Search failed: {err}")));
            }
        }
    }

    /// Replace the table body with `results` and set the matching status line.
    pub(crate) fn render_results(&mut self, results: &[UserRecord]) {
        self.results = ResultsView::from_results(results);
        self.status = self
            .results
            .status_for_page(self.pagination.current_page())
            .map(StatusMessage::info);
        self.table_state.select(None);
        self.ensure_selection();
    }

    pub(crate) fn update_pagination_controls(&mut self) {
        self.pager = self.pagination.controls();
    }
}
