use std::path::PathBuf;

use usersearch_api::{ApiError, DownloadRequest, SearchRequest, SearchResultPage};

use crate::systems::download::{DownloadError, SavedDownload};

/// Commands understood by the background request worker.
#[derive(Debug)]
pub(crate) enum RequestCommand {
    /// Fetch one page of results.
    Search {
        /// Generation token that lets the UI drop superseded responses.
        id: u64,
        request: SearchRequest,
    },
    /// Fetch the full filtered result set and write it to `target`.
    Download {
        id: u64,
        request: DownloadRequest,
        target: PathBuf,
    },
    /// Stop the background worker thread.
    Shutdown,
}

/// Completed work sent back to the UI thread.
#[derive(Debug)]
pub(crate) enum RequestResponse {
    Search {
        id: u64,
        page: u32,
        outcome: Result<SearchResultPage, ApiError>,
    },
    Download {
        id: u64,
        outcome: Result<SavedDownload, DownloadError>,
    },
}

impl RequestResponse {
    pub(crate) fn id(&self) -> u64 {
        match self {
            RequestResponse::Search { id, .. } | RequestResponse::Download { id, .. } => *id,
        }
    }
}
