use std::io::Write;

use crate::error::ApiError;
use crate::types::{DownloadRequest, SearchRequest, SearchResultPage};

/// A source of user search results.
///
/// [`HttpBackend`](crate::HttpBackend) is the production implementation;
/// tests substitute in-memory backends. Calls block the current thread, so
/// interactive callers run them on a worker.
pub trait SearchBackend: Send + Sync {
    /// Fetch one page of results for `request.query`.
    fn search(&self, request: &SearchRequest) -> Result<SearchResultPage, ApiError>;

    /// Stream the complete filtered result set into `sink` as it arrives.
    ///
    /// Returns the number of bytes written. Nothing is written when the
    /// backend rejects the request.
    fn download(&self, request: &DownloadRequest, sink: &mut dyn Write) -> Result<u64, ApiError>;
}

impl<T: SearchBackend + ?Sized> SearchBackend for std::sync::Arc<T> {
    fn search(&self, request: &SearchRequest) -> Result<SearchResultPage, ApiError> {
        (**self).search(request)
    }

    fn download(&self, request: &DownloadRequest, sink: &mut dyn Write) -> Result<u64, ApiError> {
        (**self).download(request, sink)
    }
}
