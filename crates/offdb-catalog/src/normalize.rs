//! Normalization from raw catalog records to storable products.

use offdb_core::{NormalizedProduct, ProductRecord, RawProduct};

use crate::name::resolve_name;

const INGREDIENTS_FIELD: &str = "ingredients_text";
const NUTRIMENTS_FIELD: &str = "nutriments";
const CALORIES_KEY: &str = "energy-kcal_100g";

/// Maps a raw catalog record onto the fixed product shape.
///
/// Pure and total: missing fields become empty strings or `None`. The result
/// may still lack a code; see [`NormalizedProduct::into_record`].
#[must_use]
pub fn normalize_product(raw: &RawProduct) -> NormalizedProduct {
    NormalizedProduct {
        code: raw.code(),
        name: resolve_name(raw).to_lowercase().trim().to_owned(),
        brands: raw.text("brands").trim().to_owned(),
        ingredients: raw.text(INGREDIENTS_FIELD).trim().to_owned(),
        calories: raw.nested_f64(NUTRIMENTS_FIELD, CALORIES_KEY),
    }
}

/// Normalizes a batch and drops records without a code or name.
///
/// Surviving records keep their input order.
#[must_use]
pub fn normalize_products(raws: &[RawProduct]) -> Vec<ProductRecord> {
    raws.iter()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let record = normalize_product(raw).into_record();
            if record.is_none() {
                tracing::debug!(index = idx, "dropping catalog record without code or name");
            }
            record
        })
        .collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
