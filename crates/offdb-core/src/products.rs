use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A product exactly as the catalog returned it.
///
/// The catalog guarantees no schema, so the record is kept as an open JSON
/// object. Every accessor is total: a missing key or a value of the wrong type
/// yields the accessor's default instead of an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawProduct(Map<String, Value>);

impl RawProduct {
    /// Builds a record from any JSON value; non-objects become an empty record.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }

    /// Returns the string stored under `key`, or `""` when the key is absent
    /// or holds a non-string value.
    #[must_use]
    pub fn text(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or("")
    }

    /// Returns the product code verbatim.
    ///
    /// Numeric codes are rendered as their decimal text; `null` and any other
    /// type count as absent.
    #[must_use]
    pub fn code(&self) -> Option<String> {
        match self.0.get("code")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Returns a number stored one level down, e.g. `nutriments.energy-kcal_100g`.
    ///
    /// JSON numbers are accepted as-is and numeric strings are parsed. A missing
    /// sub-object, missing key, or unparseable value yields `None`.
    #[must_use]
    pub fn nested_f64(&self, outer: &str, key: &str) -> Option<f64> {
        let value = self.0.get(outer)?.as_object()?.get(key)?;
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Iterates over the top-level fields in key order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A catalog product mapped onto the fixed storage shape, before filtering.
///
/// `code` may still be absent and `name` may still be empty; use
/// [`NormalizedProduct::into_record`] to obtain a storable [`ProductRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProduct {
    /// Catalog barcode, verbatim.
    pub code: Option<String>,
    /// Resolved display name, lower-cased and trimmed.
    pub name: String,
    pub brands: String,
    pub ingredients: String,
    /// Energy per 100 g in kcal.
    pub calories: Option<f64>,
}

impl NormalizedProduct {
    /// Converts into a storable record, or `None` when `code` or `name` is
    /// absent or empty.
    #[must_use]
    pub fn into_record(self) -> Option<ProductRecord> {
        let code = self.code.filter(|c| !c.is_empty())?;
        if self.name.is_empty() {
            return None;
        }
        Some(ProductRecord {
            code,
            name: self.name,
            brands: self.brands,
            ingredients: self.ingredients,
            calories: self.calories,
        })
    }
}

/// A validated product ready for upsert. `code` and `name` are never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub code: String,
    pub name: String,
    pub brands: String,
    pub ingredients: String,
    pub calories: Option<f64>,
}
