//! Wire types and the HTTP client used to talk to the user search backend.
//!
//! The backend is an external collaborator exposing two endpoints:
//! `POST /search` returns one page of matching users and `POST /download`
//! streams the full filtered result set as a file payload.

pub mod backend;
pub mod error;
pub mod http;
pub mod types;

pub use backend::SearchBackend;
pub use error::{ApiError, Endpoint};
pub use http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HttpBackend, parse_base_url};
pub use types::{DownloadRequest, SearchRequest, SearchResultPage, UserRecord};
