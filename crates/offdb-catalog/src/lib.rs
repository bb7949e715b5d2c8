pub mod client;
pub mod error;
pub mod name;
pub mod normalize;
pub mod types;

pub use client::{CatalogConfig, OffClient, SearchOutcome};
pub use error::CatalogError;
pub use name::resolve_name;
pub use normalize::{normalize_product, normalize_products};
pub use types::SearchResponse;
