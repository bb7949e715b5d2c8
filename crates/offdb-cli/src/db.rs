//! Database maintenance and read-back commands.

use clap::Subcommand;
use offdb_core::{AppConfig, ProductRecord};

#[derive(Debug, Subcommand)]
pub(crate) enum DbCommands {
    /// Check that the database answers `SELECT 1`
    Ping,
    /// Apply pending schema migrations
    Migrate,
}

#[derive(Debug, Subcommand)]
pub(crate) enum ProductsCommands {
    /// List stored products, most recently updated first
    List {
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
    /// Show one stored product by code
    Get { code: String },
}

/// Builds a record from hand-entered values.
///
/// Text fields are trimmed but otherwise stored as typed; no lower-casing.
///
/// # Errors
///
/// Returns an error if `code` or `name` is blank.
pub(crate) fn manual_record(
    code: &str,
    name: &str,
    brands: &str,
    ingredients: &str,
    calories: Option<f64>,
) -> anyhow::Result<ProductRecord> {
    let code = code.trim();
    let name = name.trim();
    if code.is_empty() {
        anyhow::bail!("--code must not be empty");
    }
    if name.is_empty() {
        anyhow::bail!("--name must not be empty");
    }
    Ok(ProductRecord {
        code: code.to_owned(),
        name: name.to_owned(),
        brands: brands.trim().to_owned(),
        ingredients: ingredients.trim().to_owned(),
        calories,
    })
}

pub(crate) async fn run_upsert(config: &AppConfig, record: &ProductRecord) -> anyhow::Result<()> {
    let pool = offdb_db::open_store_from_config(config).await?;
    offdb_db::upsert_product(&pool, record).await?;
    println!("upserted product {}", record.code);
    Ok(())
}

pub(crate) async fn run_db(config: &AppConfig, command: DbCommands) -> anyhow::Result<()> {
    let database_url = config.require_database_url()?;
    let pool =
        offdb_db::connect_pool(database_url, offdb_db::PoolConfig::from_app_config(config)).await?;

    match command {
        DbCommands::Ping => {
            offdb_db::health_check(&pool).await?;
            println!("database is reachable");
        }
        DbCommands::Migrate => {
            let applied = offdb_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
    }
    Ok(())
}

pub(crate) async fn run_products(
    config: &AppConfig,
    command: ProductsCommands,
) -> anyhow::Result<()> {
    let pool = offdb_db::open_store_from_config(config).await?;

    match command {
        ProductsCommands::List { limit } => {
            let rows = offdb_db::list_products(&pool, limit).await?;
            let total = offdb_db::count_products(&pool).await?;
            for row in &rows {
                println!(
                    "{}  {}  {}",
                    row.code,
                    row.name,
                    row.calories
                        .map_or_else(|| "-".to_owned(), |c| format!("{c:.1} kcal"))
                );
            }
            println!("showing {} of {total} products", rows.len());
        }
        ProductsCommands::Get { code } => match offdb_db::get_product(&pool, &code).await? {
            Some(row) => {
                println!("code:        {}", row.code);
                println!("name:        {}", row.name);
                println!("brands:      {}", row.brands.as_deref().unwrap_or("-"));
                println!("ingredients: {}", row.ingredients.as_deref().unwrap_or("-"));
                println!(
                    "calories:    {}",
                    row.calories.map_or_else(|| "-".to_owned(), |c| format!("{c:.1}"))
                );
                println!("updated_at:  {}", row.updated_at.to_rfc3339());
            }
            None => anyhow::bail!("product '{code}' not found"),
        },
    }
    Ok(())
}
