use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use usersearch::systems::download::fetch_to_file;
use usersearch::{
    DownloadRequest, HttpBackend, PaginationState, SavedDownload, SearchBackend, SearchOutcome,
    SearchRequest, UiConfig, UserRecord,
};

use crate::settings::ResolvedConfig;

/// One page fetched without the interactive UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PrintedPage {
    pub(crate) query: String,
    pub(crate) pagination: PaginationState,
    pub(crate) results: Vec<UserRecord>,
}

/// Coordinates the backend client and the UI configuration for one run.
pub(crate) struct SearchWorkflow {
    backend: Arc<dyn SearchBackend>,
    ui: UiConfig,
}

impl SearchWorkflow {
    pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
        let ResolvedConfig {
            base_url,
            timeout,
            ui,
            ..
        } = config;

        let backend = HttpBackend::with_timeout(&base_url, timeout)
            .with_context(|| format!("failed to create a client for {base_url}"))?;
        info!(
            base_url = %backend.base_url(),
            timeout_secs = timeout.as_secs(),
            "backend configured"
        );
        Ok(Self::with_backend(Arc::new(backend), ui))
    }

    pub(crate) fn with_backend(backend: Arc<dyn SearchBackend>, ui: UiConfig) -> Self {
        Self { backend, ui }
    }

    /// Open the interactive UI.
    pub(crate) fn run(self) -> Result<SearchOutcome> {
        usersearch::run(self.backend, self.ui)
    }

    /// Search once for the configured query and return `page`.
    pub(crate) fn print_page(&self, page: u32) -> Result<PrintedPage> {
        let request = SearchRequest::new(self.ui.initial_query.clone(), page);
        let response = self
            .backend
            .search(&request)
            .with_context(|| format!("search for page {page} failed"))?;
        info!(page, total = response.total, rows = response.results.len(), "page fetched");

        Ok(PrintedPage {
            query: request.query,
            pagination: PaginationState::answered(self.ui.page_size, page, response.total),
            results: response.results,
        })
    }

    /// Download every result for the configured query to the configured file.
    pub(crate) fn download(&self) -> Result<SavedDownload> {
        let request = DownloadRequest::new(self.ui.initial_query.clone());
        let target = self.ui.download_target();
        fetch_to_file(self.backend.as_ref(), &request, &target)
            .with_context(|| format!("download to {} failed", target.display()))
    }
}
