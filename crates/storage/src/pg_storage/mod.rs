//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by domain concern.

// Counts come back as i64 and are bounded by table sizes
#![allow(
    clippy::arithmetic_side_effects,
    reason = "DB row counts are bounded by PostgreSQL limits"
)]

mod locations;
mod search_logs;
mod slugs;

use postakod_core::constants::{PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS};
use postakod_core::{LocationRecord, PostalCode};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::error::StorageError;

use super::pg_migrations::run_pg_migrations;

/// Columns selected for every record query, in table order.
pub(crate) const RECORD_COLUMNS: &str = "il, ilce, semt, mahalle, pk, il_slug, ilce_slug, mahalle_slug";

/// Turkish letters folded by the search prefilter, and their replacements.
const FOLD_FROM: &str = "İIıŞşĞğÜüÖöÇç";
const FOLD_TO: &str = "iiissgguuoocc";

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect and run migrations.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStore initialized");
        Ok(Self { pool })
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// SQL expression folding a text column the way the search matcher folds
/// characters: Turkish letters to their base letter, then lowercase.
pub(crate) fn folded_column(column: &str) -> String {
    format!("lower(translate({column}, '{FOLD_FROM}', '{FOLD_TO}'))")
}

pub(crate) fn row_to_record(row: &sqlx::postgres::PgRow) -> Result<LocationRecord, StorageError> {
    let pk: String = row.try_get("pk")?;
    let postal_code =
        PostalCode::parse(&pk).map_err(|e| StorageError::corrupt(format!("postal_codes.pk = {pk:?}"), e))?;
    Ok(LocationRecord {
        province: row.try_get("il")?,
        district: row.try_get("ilce")?,
        subarea: row.try_get("semt")?,
        neighborhood: row.try_get("mahalle")?,
        postal_code,
        province_slug: row.try_get("il_slug")?,
        district_slug: row.try_get("ilce_slug")?,
        neighborhood_slug: row.try_get("mahalle_slug")?,
    })
}

pub(crate) fn rows_to_records(rows: &[sqlx::postgres::PgRow]) -> Result<Vec<LocationRecord>, StorageError> {
    rows.iter().map(row_to_record).collect()
}

pub(crate) fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// Convert `usize` to `i64` for SQL LIMIT binds.
/// Saturates to `i64::MAX` on overflow (only possible on 128-bit targets).
pub(crate) fn usize_to_i64(val: usize) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}

pub(crate) fn i64_to_usize(val: i64) -> usize {
    usize::try_from(val).unwrap_or(0)
}
