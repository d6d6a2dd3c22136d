use std::io::Write;
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::{Client, Response};
use serde::Serialize;
use tracing::{debug, warn};

use crate::backend::SearchBackend;
use crate::error::{ApiError, Endpoint};
use crate::types::{DownloadRequest, SearchRequest, SearchResultPage};

/// Local development address the backend listens on by default.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8001";

/// Upper bound for a single request, including reading the body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("usersearch/", env!("CARGO_PKG_VERSION"));

/// Blocking JSON-over-HTTP client for the search backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Create a client for `base_url` using [`DEFAULT_TIMEOUT`].
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client for `base_url` whose requests give up after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for `endpoint` under the configured base.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, ApiError> {
        self.base_url
            .join(endpoint.path())
            .map_err(|err| ApiError::Url {
                url: self.base_url.to_string(),
                reason: err.to_string(),
            })
    }

    fn post<B: Serialize>(&self, endpoint: Endpoint, body: &B) -> Result<Response, ApiError> {
        let url = self.endpoint_url(endpoint)?;
        debug!(%url, "posting request");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(%endpoint, status = status.as_u16(), "backend rejected request");
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

impl SearchBackend for HttpBackend {
    fn search(&self, request: &SearchRequest) -> Result<SearchResultPage, ApiError> {
        let endpoint = Endpoint::Search;
        let bytes = self
            .post(endpoint, request)?
            .bytes()
            .map_err(|source| ApiError::Transport { endpoint, source })?;
        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode { endpoint, source })
    }

    fn download(&self, request: &DownloadRequest, sink: &mut dyn Write) -> Result<u64, ApiError> {
        let endpoint = Endpoint::Download;
        let mut response = self.post(endpoint, request)?;
        let written = response
            .copy_to(sink)
            .map_err(|source| ApiError::Transport { endpoint, source })?;
        debug!(written, "download body streamed");
        Ok(written)
    }
}

/// Parse and normalise a backend base URL.
///
/// Only `http` and `https` are accepted. The path always ends with `/` so that
/// endpoint names are appended rather than replacing the last segment.
pub fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let raw = raw.trim();
    let mut url = Url::parse(raw).map_err(|err| ApiError::Url {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::Url {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
