use serde::{Deserialize, Deserializer, Serialize};

/// One catalog entry as returned by the search endpoint.
///
/// Only `key` is required. Every other field may be missing (or `null`) in the
/// response and falls back to `None` / an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    /// Catalog path of the record, e.g. `/works/OL45883W`.
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author_name: Vec<String>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub publisher: Vec<String>,
    /// Used both for display and as the second-choice cover identifier.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub isbn: Vec<String>,
    #[serde(default)]
    pub edition_count: Option<u32>,
    /// Numeric cover id, the preferred cover identifier.
    #[serde(default)]
    pub cover_i: Option<i64>,
    #[serde(default)]
    pub cover_edition_key: Option<String>,
}

impl SearchResultItem {
    /// A record carrying nothing but its key.
    pub fn bare(key: &str) -> Self {
        Self {
            key: key.to_string(),
            title: None,
            author_name: Vec::new(),
            first_publish_year: None,
            publisher: Vec::new(),
            isbn: Vec::new(),
            edition_count: None,
            cover_i: None,
            cover_edition_key: None,
        }
    }
}

/// Response body of `GET <search-endpoint>`.
#[derive(Debug, Deserialize)]
pub struct SearchEnvelope {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub docs: Vec<SearchResultItem>,
    #[serde(default, rename = "numFound")]
    pub num_found: Option<u64>,
}

/// The records of one page plus the match count for the whole query.
///
/// Replaced wholesale on every successful fetch, never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResultPage {
    pub items: Vec<SearchResultItem>,
    pub total: u64,
}

impl From<SearchEnvelope> for SearchResultPage {
    fn from(envelope: SearchEnvelope) -> Self {
        Self {
            items: envelope.docs,
            total: envelope.num_found.unwrap_or(0),
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
