//! Read-only catalog commands: `search` and `inspect`.

use std::path::Path;

use offdb_catalog::name::{BRANDS_FIELD, NAME_FIELDS};
use offdb_catalog::{normalize_products, resolve_name, OffClient, SearchOutcome};
use offdb_core::{AppConfig, ProductRecord, RawProduct};

/// Longest value shown when listing other populated fields.
const MAX_PREVIEW_LEN: usize = 100;
const MAX_OTHER_FIELDS: usize = 10;

/// Renders normalized products as a fixed-width text table.
pub(crate) fn format_table(records: &[ProductRecord]) -> String {
    let code_w = column_width("code", records.iter().map(|r| r.code.as_str()));
    let name_w = column_width("name", records.iter().map(|r| r.name.as_str()));
    let brands_w = column_width("brands", records.iter().map(|r| r.brands.as_str()));

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(format!(
        "{:<code_w$}  {:<name_w$}  {:<brands_w$}  calories",
        "code", "name", "brands"
    ));
    for r in records {
        let calories = r
            .calories
            .map_or_else(|| "-".to_owned(), |c| format!("{c:.1}"));
        lines.push(format!(
            "{:<code_w$}  {:<name_w$}  {:<brands_w$}  {calories}",
            r.code, r.name, r.brands
        ));
    }
    join_lines(&lines)
}

fn join_lines(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}

/// Describes which name fields a raw product carries and what it resolves to.
pub(crate) fn inspect_product(index: usize, raw: &RawProduct) -> String {
    let code = raw.code().unwrap_or_else(|| "<no code>".to_owned());
    let mut lines = vec![format!("product {index} - code: {code}")];

    for field in NAME_FIELDS.iter().copied().chain(std::iter::once(BRANDS_FIELD)) {
        let value = raw.text(field);
        if value.trim().is_empty() {
            lines.push(format!("  [missing] {field}"));
        } else {
            lines.push(format!("  [present] {field}: '{value}'"));
        }
    }
    lines.push(format!("  resolved name: '{}'", resolve_name(raw)));

    if raw.text("product_name").trim().is_empty() {
        lines.push("  other populated fields:".to_owned());
        for (key, value) in other_fields(raw) {
            lines.push(format!("    {key}: {value}"));
        }
    }
    join_lines(&lines)
}

/// Short, non-empty top-level fields, for records with no primary name.
fn other_fields(raw: &RawProduct) -> Vec<(&str, String)> {
    raw.fields()
        .filter_map(|(key, value)| {
            let rendered = match value {
                serde_json::Value::Null => return None,
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let populated = !rendered.is_empty() && rendered != "[]" && rendered != "{}";
            (populated && rendered.chars().count() < MAX_PREVIEW_LEN).then_some((key, rendered))
        })
        .take(MAX_OTHER_FIELDS)
        .collect()
}

/// CLI entry point for `offdb search`.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the output file cannot
/// be written.
pub(crate) async fn run_search(
    config: &AppConfig,
    query: &str,
    limit: usize,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let client = OffClient::from_app_config(config)?;
    let raws = client.search_products(query, limit).await;
    let records = normalize_products(&raws);
    let table = format_table(&records);

    print!("{table}");
    if let Some(path) = output {
        tokio::fs::write(path, format!("search results for \"{query}\":\n{table}")).await?;
        println!("wrote {} products to {}", records.len(), path.display());
    }
    Ok(())
}

/// CLI entry point for `offdb inspect`.
///
/// Unlike `search`, a failed catalog request is reported as an error rather
/// than as an empty result.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the catalog request fails.
pub(crate) async fn run_inspect(config: &AppConfig, query: &str, limit: usize) -> anyhow::Result<()> {
    let client = OffClient::from_app_config(config)?;
    match client.search_outcome(query, limit).await {
        SearchOutcome::Found(raws) => {
            for (idx, raw) in raws.iter().enumerate() {
                println!("{}", inspect_product(idx + 1, raw));
            }
        }
        SearchOutcome::Empty => println!("no products returned for \"{query}\""),
        SearchOutcome::TransportError(reason) | SearchOutcome::UnexpectedError(reason) => {
            anyhow::bail!("catalog search for \"{query}\" failed: {reason}");
        }
    }
    Ok(())
}
