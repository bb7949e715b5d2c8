use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("OFF_USER_AGENT is not set; the catalog rejects anonymous clients")]
    MissingUserAgent,

    #[error("invalid catalog base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}

impl CatalogError {
    /// Returns `true` for failures that happened before a response arrived
    /// (connect refused, DNS, timeout, TLS).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        match self {
            CatalogError::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }
}
