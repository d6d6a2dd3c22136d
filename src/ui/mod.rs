//! Interactive terminal UI for `usersearch`.
//!
//! [`App`] is the search controller. It owns the query input, the results
//! table, the [`pagination::PaginationState`] and the download control, and
//! hands backend calls to worker threads so the event loop never blocks.

mod actions;
pub mod components;
mod config;
mod download;
pub mod input;
pub mod pagination;
mod render;
pub mod results;
mod runtime;
mod search;
mod state;
pub mod style;

pub use config::{DEFAULT_INPUT_TITLE, UiConfig};
pub use download::{DOWNLOAD_LABEL, DOWNLOADING_LABEL, DownloadControl};
pub use runtime::run;
pub use state::{App, SearchOutcome, StatusMessage, StatusTone};
