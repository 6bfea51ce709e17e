//! salarymap CLI - developer-salary report service
//!
//! Drives the explicit startup pipeline the libraries expose:
//! fetch dataset → normalize CSV → replace salary table → serve report.
//! Each step has its own success/failure signal; a failed fetch or a
//! malformed dataset exits non-zero before any request is served.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reqwest::Client;
use salarymap_core::{download_dataset, normalize_file, AppConfig, RAW_CSV_NAME};
use salarymap_server::db;
use salarymap_server::http::{run_server, ServerConfig};
use sqlx::SqlitePool;
use tracing::info;

mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "salarymap",
    version,
    about = "Per-state developer salary report: average, top cities, premiums, recommendation"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch, normalize, and load the dataset, then exit
    Load(LoadArgs),
    /// Load the dataset and serve the report over HTTP
    Serve(ServeArgs),
}

#[derive(Parser, Debug)]
struct LoadArgs {
    /// Skip the network fetch and use the CSV already in the data directory
    #[arg(long)]
    offline: bool,
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Skip the network fetch and use the CSV already in the data directory
    #[arg(long)]
    offline: bool,

    /// Serve whatever the salary table already holds; no fetch, no load
    #[arg(long)]
    skip_load: bool,

    /// Allow requests from any origin
    #[arg(long)]
    cors_permissive: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    tracing_setup::init_tracing(cli.debug)?;

    let config = AppConfig::from_env()?;

    match cli.command {
        Commands::Load(args) => {
            let pool = open_database(&config).await?;
            load_dataset(&config, &pool, args.offline).await
        }
        Commands::Serve(args) => {
            let pool = open_database(&config).await?;
            if args.skip_load {
                info!("--skip-load: serving the existing salary table");
            } else {
                load_dataset(&config, &pool, args.offline).await?;
            }

            let server_config = ServerConfig {
                bind_addr: config.bind_addr,
                cors_permissive: args.cors_permissive,
            };
            run_server(pool, server_config)
                .await
                .context("server failed")
        }
    }
}

/// Open the pool and run the schema migration.
async fn open_database(config: &AppConfig) -> Result<SqlitePool> {
    let pool = db::create_pool(&config.database_url)
        .await
        .with_context(|| format!("opening database {}", config.database_url))?;
    db::migrations::run(&pool)
        .await
        .context("running salary table migration")?;
    Ok(pool)
}

/// Fetch (unless offline), normalize, and replace the salary table.
async fn load_dataset(config: &AppConfig, pool: &SqlitePool, offline: bool) -> Result<()> {
    let csv_path = if offline {
        let path = config.data_dir.join(RAW_CSV_NAME);
        info!(path = %path.display(), "offline: using local CSV");
        path
    } else {
        download_dataset(&Client::new(), config)
            .await
            .context("dataset fetch failed")?
    };

    let records = normalize_file(&csv_path).context("dataset normalization failed")?;
    db::replace_all(pool, &records)
        .await
        .context("loading salary table failed")?;

    info!(rows = records.len(), "salary table loaded");
    Ok(())
}
