//! HTTP client for the Open Food Facts text-search endpoint.
//!
//! The typed path ([`OffClient::fetch_search_page`]) surfaces every failure as a
//! [`CatalogError`]. The boundary used by the collect flow
//! ([`OffClient::search_products`]) folds every failure into an empty result
//! after logging it, so callers see "no products" whether the catalog had no
//! matches or could not be reached. [`OffClient::search_outcome`] sits between
//! the two and keeps the distinction for callers that want it.

use std::time::Duration;

use offdb_core::{AppConfig, RawProduct};
use reqwest::{Client, Url};

use crate::error::CatalogError;
use crate::types::SearchResponse;

pub const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";
const SEARCH_PATH: &str = "cgi/search.pl";

/// Settings needed to build an [`OffClient`].
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Identifying client string sent as `User-Agent`; the catalog asks every
    /// integration to name itself.
    pub user_agent: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl CatalogConfig {
    /// Settings for the public production catalog with a 30-second timeout.
    #[must_use]
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: 30,
        }
    }

    /// Extracts catalog settings from the application config.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingUserAgent`] if `OFF_USER_AGENT` was not set.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, CatalogError> {
        let user_agent = config
            .require_user_agent()
            .map_err(|_| CatalogError::MissingUserAgent)?;
        Ok(Self {
            user_agent: user_agent.to_owned(),
            base_url: config.off_base_url.clone(),
            timeout_secs: config.request_timeout_secs,
        })
    }
}

/// Result of one catalog search with failures kept apart from empty results.
#[derive(Debug)]
pub enum SearchOutcome {
    /// At least one product, already capped at the requested limit.
    Found(Vec<RawProduct>),
    /// The catalog answered and had nothing for the query.
    Empty,
    /// The request never got a response (connect, DNS, timeout).
    TransportError(String),
    /// Anything else: bad status, undecodable body, broken stream.
    UnexpectedError(String),
}

impl SearchOutcome {
    /// Collapses the outcome to a product list; failures become empty.
    #[must_use]
    pub fn into_products(self) -> Vec<RawProduct> {
        match self {
            SearchOutcome::Found(products) => products,
            SearchOutcome::Empty
            | SearchOutcome::TransportError(_)
            | SearchOutcome::UnexpectedError(_) => Vec::new(),
        }
    }
}

/// Client for the catalog's public search API.
pub struct OffClient {
    client: Client,
    search_url: Url,
}

impl OffClient {
    /// Creates a client with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::MissingUserAgent`] if `user_agent` is blank.
    /// - [`CatalogError::InvalidBaseUrl`] if `base_url` does not parse.
    /// - [`CatalogError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let user_agent = config.user_agent.trim();
        if user_agent.is_empty() {
            return Err(CatalogError::MissingUserAgent);
        }

        let search_url = Self::build_search_url(&config.base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, search_url })
    }

    /// Shorthand for `OffClient::new(&CatalogConfig::from_app_config(config)?)`.
    ///
    /// # Errors
    ///
    /// See [`CatalogConfig::from_app_config`] and [`OffClient::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, CatalogError> {
        Self::new(&CatalogConfig::from_app_config(config)?)
    }

    /// Runs one text search and returns at most `limit` raw products.
    ///
    /// The limit is sent as `page_size` and enforced again client-side, since
    /// the endpoint does not always honour it.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`] on network failure or a broken response body.
    /// - [`CatalogError::UnexpectedStatus`] on any non-2xx status.
    /// - [`CatalogError::Deserialize`] if the body is not the expected JSON shape.
    pub async fn fetch_search_page(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RawProduct>, CatalogError> {
        let url = self.search_url(query, limit);
        tracing::debug!(%url, "querying catalog");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<SearchResponse>(&body).map_err(|e| {
            CatalogError::Deserialize {
                context: format!("search results for \"{query}\""),
                source: e,
            }
        })?;

        let mut products = parsed.into_products();
        products.truncate(limit);
        Ok(products)
    }

    /// Runs a search and classifies the result without returning an error.
    pub async fn search_outcome(&self, query: &str, limit: usize) -> SearchOutcome {
        match self.fetch_search_page(query, limit).await {
            Ok(products) if products.is_empty() => SearchOutcome::Empty,
            Ok(products) => SearchOutcome::Found(products),
            Err(e) if e.is_transport() => SearchOutcome::TransportError(e.to_string()),
            Err(e) => SearchOutcome::UnexpectedError(e.to_string()),
        }
    }

    /// Searches the catalog, returning an empty list on any failure.
    ///
    /// Failures are logged at `error` level and otherwise swallowed: an empty
    /// result cannot be told apart from a failed request here. Use
    /// [`Self::search_outcome`] when the difference matters.
    pub async fn search_products(&self, query: &str, limit: usize) -> Vec<RawProduct> {
        let outcome = self.search_outcome(query, limit).await;
        match &outcome {
            SearchOutcome::TransportError(reason) => {
                tracing::error!(
                    query,
                    error = %reason,
                    "could not connect to Open Food Facts; check the network connection"
                );
            }
            SearchOutcome::UnexpectedError(reason) => {
                tracing::error!(query, error = %reason, "unexpected error while searching the catalog");
            }
            SearchOutcome::Found(products) => {
                tracing::info!(query, count = products.len(), "catalog search returned products");
            }
            SearchOutcome::Empty => {
                tracing::info!(query, "catalog search returned no products");
            }
        }
        outcome.into_products()
    }

    /// Builds the full search URL with properly encoded query parameters.
    fn search_url(&self, query: &str, limit: usize) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("search_terms", query)
            .append_pair("search_simple", "1")
            .append_pair("action", "process")
            .append_pair("json", "1")
            .append_pair("page", "1")
            .append_pair("page_size", &limit.to_string());
        url
    }

    /// Resolves `{base_url}/cgi/search.pl`, keeping any path prefix on the base.
    fn build_search_url(base_url: &str) -> Result<Url, CatalogError> {
        let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
        let base = Url::parse(&normalised).map_err(|e| CatalogError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(CatalogError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }
        base.join(SEARCH_PATH)
            .map_err(|e| CatalogError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
