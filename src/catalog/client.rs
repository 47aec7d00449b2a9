//! Catalog Search Client
//!
//! Issues one `GET` per (query, page) pair and decodes the JSON envelope.
//! The client only reports success or an error; turning errors into the
//! user-facing failure state is the caller's job.

use super::types::{SearchEnvelope, SearchResultPage};

use anyhow::Result;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Boxed future returned by `CatalogClient::fetch_page`.
pub type FetchFuture = Pin<Box<dyn Future<Output = Result<SearchResultPage>> + Send>>;

/// Source of search result pages.
///
/// Object safe so a session can hold an `Arc<dyn CatalogClient>` and tests can
/// swap in a scripted catalog.
pub trait CatalogClient: Send + Sync {
    /// Fetches `page` (1-based) of the results for `query`.
    fn fetch_page(&self, query: String, page: u32) -> FetchFuture;
}

/// `CatalogClient` speaking to a real HTTP search endpoint.
#[derive(Clone)]
pub struct HttpCatalogClient {
    http_client: reqwest::Client,
    search_url: String,
    page_size: u32,
}

impl HttpCatalogClient {
    /// Builds a client for `search_url`, requesting `page_size` records per page.
    /// Every request is bounded by `timeout`.
    pub fn new(search_url: &str, page_size: u32, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            search_url: search_url.trim_end_matches('/').to_string(),
            page_size,
        })
    }

    /// The full request URL for one (query, page) pair.
    pub fn request_url(&self, query: &str, page: u32) -> String {
        format!(
            "{}?title={}&page={}&limit={}",
            self.search_url,
            urlencoding::encode(query),
            page,
            self.page_size
        )
    }

    async fn get_page(
        http_client: reqwest::Client,
        url: String,
    ) -> Result<SearchResultPage> {
        tracing::debug!("Fetching {}", url);

        let response = http_client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("catalog returned HTTP {}", status));
        }

        let envelope = response.json::<SearchEnvelope>().await?;
        Ok(SearchResultPage::from(envelope))
    }
}

impl CatalogClient for HttpCatalogClient {
    fn fetch_page(&self, query: String, page: u32) -> FetchFuture {
        let url = self.request_url(&query, page);
        let http_client = self.http_client.clone();

        Box::pin(Self::get_page(http_client, url))
    }
}
