//! Database operations for the `products` table.

use chrono::{DateTime, Utc};
use offdb_core::ProductRecord;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `products` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub code: String,
    pub name: String,
    /// `NULL` when the catalog listed no brand.
    pub brands: Option<String>,
    /// `NULL` when the catalog had no ingredient text.
    pub ingredients: Option<String>,
    /// kcal per 100 g.
    pub calories: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upserts a product keyed by `code`.
///
/// On conflict every column is replaced with the incoming values, including
/// replacing a stored value with `NULL`; nothing is merged. Empty `brands` and
/// `ingredients` strings are stored as `NULL`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_product(pool: &PgPool, product: &ProductRecord) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO products (code, name, brands, ingredients, calories) \
         VALUES ($1, $2, $3, $4, $5) \
         ON CONFLICT (code) DO UPDATE SET \
             name        = EXCLUDED.name, \
             brands      = EXCLUDED.brands, \
             ingredients = EXCLUDED.ingredients, \
             calories    = EXCLUDED.calories, \
             updated_at  = NOW()",
    )
    .bind(&product.code)
    .bind(&product.name)
    .bind(non_empty(&product.brands))
    .bind(non_empty(&product.ingredients))
    .bind(product.calories)
    .execute(pool)
    .await?;

    tracing::debug!(code = %product.code, "upserted product");
    Ok(())
}

/// Returns the stored product with `code`, if any.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_product(pool: &PgPool, code: &str) -> Result<Option<ProductRow>, DbError> {
    let row = sqlx::query_as::<_, ProductRow>(
        "SELECT code, name, brands, ingredients, calories, created_at, updated_at \
         FROM products \
         WHERE code = $1",
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns up to `limit` products, most recently updated first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_products(pool: &PgPool, limit: i64) -> Result<Vec<ProductRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductRow>(
        "SELECT code, name, brands, ingredients, calories, created_at, updated_at \
         FROM products \
         ORDER BY updated_at DESC, code \
         LIMIT $1",
    )
    .bind(limit.max(0))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the number of stored products.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_products(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}
