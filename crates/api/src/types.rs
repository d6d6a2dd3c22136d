use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One user row as returned by the backend.
///
/// Every field is treated as display text. The backend stores documents
/// loosely, so numbers, booleans and nulls are accepted and normalised to
/// strings on the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default, deserialize_with = "display_string")]
    pub user_id: String,
    #[serde(default, deserialize_with = "display_string")]
    pub name: String,
    #[serde(default, deserialize_with = "display_string")]
    pub email: String,
    #[serde(default, deserialize_with = "display_string")]
    pub country: String,
}

impl UserRecord {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            email: email.into(),
            country: country.into(),
        }
    }

    /// Field values in column order.
    #[must_use]
    pub fn fields(&self) -> [&str; 4] {
        [&self.user_id, &self.name, &self.email, &self.country]
    }
}

fn display_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    })
}

/// One page of search results plus the total match count across all pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultPage {
    #[serde(default)]
    pub results: Vec<UserRecord>,
    pub total: u64,
}

impl SearchResultPage {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Body of `POST /search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub page: u32,
}

impl SearchRequest {
    #[must_use]
    pub fn new(query: impl Into<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            page,
        }
    }
}

/// Body of `POST /download`. The download always covers every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub query: String,
}

impl DownloadRequest {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}
