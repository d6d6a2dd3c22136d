//! Core crate exports for the `usersearch` terminal client.
//!
//! The root module re-exports the UI entry points and the backend client
//! types so that embedders can drive a search session without digging
//! through the module hierarchy.

pub mod app_dirs;
pub mod logging;
pub mod systems;
pub mod ui;

#[cfg(test)]
mod testing;

pub use systems::download::{DEFAULT_DOWNLOAD_FILE, DownloadError, SavedDownload};
pub use ui::pagination::{DEFAULT_PAGE_SIZE, PagerControls, PaginationState};
pub use ui::results::ResultsView;
pub use ui::style::{Theme, builtin_themes, default_theme};
pub use ui::{App, SearchOutcome, UiConfig, run};

pub use usersearch_api::{
    ApiError, DownloadRequest, HttpBackend, SearchBackend, SearchRequest, SearchResultPage,
    UserRecord,
};
