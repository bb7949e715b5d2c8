mod collect;
mod db;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::db::{DbCommands, ProductsCommands};

#[derive(Debug, Parser)]
#[command(name = "offdb")]
#[command(about = "Fetch Open Food Facts products and store them in Postgres")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the catalog, normalize the results, and upsert them
    Collect {
        /// Free-text search terms
        query: String,

        /// Maximum number of catalog products to fetch (defaults to OFFDB_PAGE_SIZE)
        #[arg(long)]
        limit: Option<usize>,

        /// Print the normalized products without writing to the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Search the catalog and print the normalized products
    Search {
        query: String,

        #[arg(long)]
        limit: Option<usize>,

        /// Also write the table to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show which name fields each catalog product carries
    Inspect {
        query: String,

        #[arg(long)]
        limit: Option<usize>,
    },
    /// Upsert a single hand-written product
    Upsert {
        #[arg(long)]
        code: String,

        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        brands: String,

        #[arg(long, default_value = "")]
        ingredients: String,

        /// kcal per 100 g
        #[arg(long)]
        calories: Option<f64>,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Read stored products
    Products {
        #[command(subcommand)]
        command: ProductsCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = offdb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Collect {
            query,
            limit,
            dry_run,
        }) => {
            let limit = limit.unwrap_or(config.page_size);
            collect::run_collect(&config, &query, limit, dry_run).await?;
        }
        Some(Commands::Search {
            query,
            limit,
            output,
        }) => {
            let limit = limit.unwrap_or(config.page_size);
            report::run_search(&config, &query, limit, output.as_deref()).await?;
        }
        Some(Commands::Inspect { query, limit }) => {
            let limit = limit.unwrap_or(config.page_size);
            report::run_inspect(&config, &query, limit).await?;
        }
        Some(Commands::Upsert {
            code,
            name,
            brands,
            ingredients,
            calories,
        }) => {
            let record = db::manual_record(&code, &name, &brands, &ingredients, calories)?;
            db::run_upsert(&config, &record).await?;
        }
        Some(Commands::Db { command }) => db::run_db(&config, command).await?,
        Some(Commands::Products { command }) => db::run_products(&config, command).await?,
        None => println!("offdb ready; run `offdb --help` for commands"),
    }

    Ok(())
}
