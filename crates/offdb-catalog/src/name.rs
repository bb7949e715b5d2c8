//! Display-name resolution for catalog products.
//!
//! Catalog entries frequently leave `product_name` empty while carrying a
//! localized or generic name, so the resolver walks a fixed priority list and
//! falls back to the first listed brand.

use offdb_core::RawProduct;

/// Name fields consulted in priority order.
pub const NAME_FIELDS: [&str; 5] = [
    "product_name",
    "product_name_es",
    "product_name_en",
    "abbreviated_product_name",
    "generic_name",
];

pub const BRANDS_FIELD: &str = "brands";

/// Suffix appended when the name had to be derived from the brand list.
pub const BRAND_SUFFIX: &str = " (brand)";

/// Returned when neither a name field nor a brand is available.
pub const NO_NAME: &str = "<no name>";

/// Returns the best display name for `product`. Never fails.
///
/// The first name field that is non-empty after trimming wins and is returned
/// as stored, surrounding whitespace included. Otherwise the first comma-separated entry of `brands` is used with
/// [`BRAND_SUFFIX`], e.g. `"Acme, Foo"` becomes `"Acme (brand)"`. With no brand
/// either, [`NO_NAME`] is returned.
#[must_use]
pub fn resolve_name(product: &RawProduct) -> String {
    if let Some(name) = NAME_FIELDS
        .iter()
        .map(|field| product.text(field))
        .find(|value| !value.trim().is_empty())
    {
        return name.to_owned();
    }

    match first_brand(product.text(BRANDS_FIELD)) {
        Some(brand) => format!("{brand}{BRAND_SUFFIX}"),
        None => NO_NAME.to_owned(),
    }
}

/// Returns the first entry of a comma-separated brand list, trimmed.
fn first_brand(brands: &str) -> Option<&str> {
    let first = brands.split(',').next().unwrap_or("").trim();
    (!first.is_empty()).then_some(first)
}
