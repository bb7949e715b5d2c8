//! The fetch → normalize → upsert flow.
//!
//! Strictly sequential: one catalog request, then one upsert per product in
//! catalog order. Catalog failures arrive here as an empty result (the client
//! logs them); storage failures abort the run.

use offdb_catalog::{normalize_products, OffClient};
use offdb_core::AppConfig;

/// Counts reported at the end of a collect run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CollectSummary {
    /// Raw products returned by the catalog.
    pub fetched: usize,
    /// Products that survived normalization.
    pub kept: usize,
    /// Products written to the database.
    pub stored: usize,
}

/// Fetch products for `query`, normalize them, and upsert each one.
///
/// # Errors
///
/// Returns the first storage error; products already upserted stay written.
pub(crate) async fn collect_products(
    pool: &sqlx::PgPool,
    client: &OffClient,
    query: &str,
    limit: usize,
) -> anyhow::Result<CollectSummary> {
    let raws = client.search_products(query, limit).await;
    let records = normalize_products(&raws);

    let mut summary = CollectSummary {
        fetched: raws.len(),
        kept: records.len(),
        stored: 0,
    };

    for record in &records {
        offdb_db::upsert_product(pool, record).await?;
        summary.stored += 1;
    }

    Ok(summary)
}

/// CLI entry point for `offdb collect`.
///
/// When `dry_run` is `true` the normalized products are printed and the
/// database is never contacted.
///
/// # Errors
///
/// Returns an error if the catalog client or store cannot be built, or if any
/// upsert fails.
pub(crate) async fn run_collect(
    config: &AppConfig,
    query: &str,
    limit: usize,
    dry_run: bool,
) -> anyhow::Result<()> {
    let client = OffClient::from_app_config(config)?;

    if dry_run {
        let raws = client.search_products(query, limit).await;
        let records = normalize_products(&raws);
        print!("{}", crate::report::format_table(&records));
        println!(
            "dry-run: would upsert {} of {} fetched products",
            records.len(),
            raws.len()
        );
        return Ok(());
    }

    let pool = offdb_db::open_store_from_config(config).await?;
    let summary = collect_products(&pool, &client, query, limit).await?;

    tracing::info!(
        query,
        fetched = summary.fetched,
        kept = summary.kept,
        stored = summary.stored,
        "collect run complete"
    );
    println!(
        "collected \"{query}\": fetched {}, kept {}, stored {}",
        summary.fetched, summary.kept, summary.stored
    );

    Ok(())
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
