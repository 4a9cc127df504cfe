//! Apply the PostgreSQL schema without starting the server.

use anyhow::Result;
use postakod_core::DirectoryConfig;
use postakod_storage::run_pg_migrations;
use sqlx::postgres::PgPoolOptions;

use crate::database_url;

pub(crate) async fn run(config: &DirectoryConfig) -> Result<()> {
    let url = database_url(config)?;
    let pool = PgPoolOptions::new().max_connections(1).connect(url).await?;
    run_pg_migrations(&pool).await?;
    pool.close().await;
    println!("Migrations applied.");
    Ok(())
}
