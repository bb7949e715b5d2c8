//! Wire shape of the catalog's text-search endpoint.

use offdb_core::RawProduct;
use serde::Deserialize;
use serde_json::Value;

/// Envelope returned by `/cgi/search.pl?json=1`.
///
/// Paging counters arrive as numbers or strings depending on the catalog
/// version, so only `products` is typed. Entries that are not JSON objects
/// become empty records and are dropped later by normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub products: Option<Vec<Value>>,
}

impl SearchResponse {
    #[must_use]
    pub fn into_products(self) -> Vec<RawProduct> {
        self.products
            .unwrap_or_default()
            .into_iter()
            .map(RawProduct::from_value)
            .collect()
    }
}
