//! Page bookkeeping for the results table.

/// Number of results per page unless configured otherwise. Must match the
/// backend's page size.
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Current position in a paginated result set.
///
/// Created once per [`App`](crate::ui::App) with page 1 and no results. The
/// current page changes when a search is issued and the total when a search
/// response is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    current_page: u32,
    total_results: u64,
    page_size: u32,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationState {
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            total_results: 0,
            page_size: page_size.max(1),
        }
    }

    /// State once page `current_page` of a search has answered with `total_results`.
    #[must_use]
    pub fn answered(page_size: u32, current_page: u32, total_results: u64) -> Self {
        Self {
            current_page,
            total_results,
            ..Self::new(page_size)
        }
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub(crate) fn set_current_page(&mut self, page: u32) {
        self.current_page = page;
    }

    pub(crate) fn set_total_results(&mut self, total: u64) {
        self.total_results = total;
    }

    /// `ceil(total_results / page_size)`.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_results.div_ceil(u64::from(self.page_size))
    }

    /// Pager state, or `None` when everything fits on a single page.
    #[must_use]
    pub fn controls(&self) -> Option<PagerControls> {
        if self.total_results <= u64::from(self.page_size) {
            return None;
        }

        let total_pages = self.total_pages();
        let current = u64::from(self.current_page);
        Some(PagerControls {
            current_page: self.current_page,
            total_pages,
            previous_enabled: self.current_page > 1,
            next_enabled: current < total_pages,
        })
    }
}

/// Visible pager: page label plus previous/next enablement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerControls {
    pub current_page: u32,
    pub total_pages: u64,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl PagerControls {
    #[must_use]
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }

    /// Page the "previous" control leads to, if it is enabled.
    #[must_use]
    pub fn previous_page(&self) -> Option<u32> {
        self.previous_enabled
            .then(|| self.current_page.saturating_sub(1))
    }

    /// Page the "next" control leads to, if it is enabled.
    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        self.next_enabled
            .then(|| self.current_page.saturating_add(1))
    }
}
