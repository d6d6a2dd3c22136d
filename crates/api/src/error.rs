use std::fmt;

use thiserror::Error;

/// Backend endpoints consumed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Search,
    Download,
}

impl Endpoint {
    /// Path segment appended to the backend base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Endpoint::Search => "search",
            Endpoint::Download => "download",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())
    }
}

/// Errors raised while talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL could not be parsed or joined with an endpoint.
    #[error("invalid backend url '{url}': {reason}")]
    Url { url: String, reason: String },

    /// The underlying HTTP client could not be constructed.
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a response (connection refused, timeout, ...).
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status code.
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: Endpoint,
        status: u16,
        body: String,
    },

    /// The response body was not the JSON shape we expect.
    #[error("could not decode {endpoint} response: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_render_as_paths() {
        assert_eq!(Endpoint::Search.to_string(), "/search");
        assert_eq!(Endpoint::Download.to_string(), "/download");
    }

    #[test]
    fn status_error_mentions_endpoint_and_code() {
        let err = ApiError::Status {
            endpoint: Endpoint::Search,
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(err.to_string(), "/search returned HTTP 502");
    }

    #[test]
    fn decode_error_keeps_serde_source() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = ApiError::Decode {
            endpoint: Endpoint::Search,
            source,
        };
        assert!(err.to_string().starts_with("could not decode /search response"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
