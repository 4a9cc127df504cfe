use anyhow::Result;
use clap::{Parser, Subcommand};
use postakod_core::DirectoryConfig;
use postakod_storage::StorageBackend;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "postakod")]
#[command(about = "Turkish postal code directory: search, browse, sitemaps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API and sitemap server
    Serve {
        #[arg(short, long, default_value = "5000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Diacritic-insensitive search by name or postal code prefix
    Search {
        query: String,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Locations served by a postal code
    Lookup { postal_code: String },
    /// Districts of a province
    Districts { province: String },
    /// Directory counts
    Stats,
    /// Sitemap index, or the URLs of one neighborhood shard
    Sitemap {
        #[arg(short, long)]
        shard: Option<usize>,
    },
    /// Recompute slugs from display names and rewrite drifted rows
    RepairSlugs {
        /// Report drift without changing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply the database schema
    Migrate,
}

pub(crate) fn database_url(config: &DirectoryConfig) -> Result<&str> {
    config.database_url.as_deref().ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable must be set"))
}

pub(crate) async fn open_storage(config: &DirectoryConfig) -> Result<StorageBackend> {
    let url = database_url(config)?;
    let storage = StorageBackend::new_postgres(url).await?;
    tracing::debug!(backend = storage.kind(), "storage ready");
    Ok(storage)
}

pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = DirectoryConfig::from_env();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(&config, &host, port).await,
        Commands::Search { query, limit } => commands::query::run_search(&config, &query, limit).await,
        Commands::Lookup { postal_code } => commands::query::run_lookup(&config, &postal_code).await,
        Commands::Districts { province } => commands::query::run_districts(&config, &province).await,
        Commands::Stats => commands::query::run_stats(&config).await,
        Commands::Sitemap { shard } => commands::sitemap::run(&config, shard).await,
        Commands::RepairSlugs { dry_run } => commands::repair::run(&config, dry_run).await,
        Commands::Migrate => commands::migrate::run(&config).await,
    }
}
