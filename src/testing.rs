//! In-memory backend shared by unit tests.

use std::io::Write;
use std::sync::Mutex;

use usersearch_api::{
    ApiError, DownloadRequest, Endpoint, SearchBackend, SearchRequest, SearchResultPage,
    UserRecord,
};

const COUNTRIES: [&str; 3] = ["DE", "FR", "UK"];

/// Pages through a fixed list of users the way the real backend does.
pub(crate) struct StaticBackend {
    users: Vec<UserRecord>,
    page_size: usize,
    fail: bool,
    panic: bool,
    pub(crate) searches: Mutex<Vec<SearchRequest>>,
    pub(crate) downloads: Mutex<Vec<DownloadRequest>>,
}

impl StaticBackend {
    pub(crate) fn with_users(count: usize) -> Self {
        let users = (1..=count)
            .map(|i| {
                UserRecord::new(
                    format!("u-{i}"),
                    format!("User {i}"),
                    format!("user{i}@example.com"),
                    COUNTRIES[i % COUNTRIES.len()],
                )
            })
            .collect();
        Self {
            users,
            page_size: 15,
            fail: false,
            panic: false,
            searches: Mutex::new(Vec::new()),
            downloads: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_users(0)
        }
    }

    /// A backend whose calls panic, taking the worker thread down with them.
    pub(crate) fn panicking() -> Self {
        Self {
            panic: true,
            ..Self::with_users(0)
        }
    }

    fn matching(&self, query: &str) -> Vec<&UserRecord> {
        let query = query.to_lowercase();
        self.users
            .iter()
            .filter(|user| {
                query.is_empty()
                    || user
                        .fields()
                        .iter()
                        .any(|field| field.to_lowercase().contains(&query))
            })
            .collect()
    }

    fn unavailable(endpoint: Endpoint) -> ApiError {
        ApiError::Status {
            endpoint,
            status: 503,
            body: "search cluster unavailable".into(),
        }
    }
}

impl SearchBackend for StaticBackend {
    fn search(&self, request: &SearchRequest) -> Result<SearchResultPage, ApiError> {
        self.searches.lock().unwrap().push(request.clone());
        if self.panic {
            panic!("backend crashed during search");
        }
        if self.fail {
            return Err(Self::unavailable(Endpoint::Search));
        }

        let matching = self.matching(&request.query);
        let offset = (request.page.max(1) as usize - 1) * self.page_size;
        let results = matching
            .iter()
            .skip(offset)
            .take(self.page_size)
            .map(|user| (*user).clone())
            .collect();
        Ok(SearchResultPage {
            results,
            total: matching.len() as u64,
        })
    }

    fn download(&self, request: &DownloadRequest, sink: &mut dyn Write) -> Result<u64, ApiError> {
        self.downloads.lock().unwrap().push(request.clone());
        if self.panic {
            panic!("backend crashed during download");
        }
        if self.fail {
            return Err(Self::unavailable(Endpoint::Download));
        }

        let mut written = 0;
        for user in self.matching(&request.query) {
            let mut line = serde_json::to_vec(user).unwrap();
            line.push(b'\n');
            sink.write_all(&line).unwrap();
            written += line.len() as u64;
        }
        Ok(written)
    }
}
