//! SearchLogStore implementation for PgStore.

use async_trait::async_trait;
use postakod_core::SearchTerm;
use sqlx::Row;

use super::{PgStore, usize_to_i64};
use crate::error::StorageError;
use crate::traits::SearchLogStore;

#[async_trait]
impl SearchLogStore for PgStore {
    async fn log_search(&self, query: &str, result_count: usize) -> Result<(), StorageError> {
        sqlx::query("INSERT INTO search_logs (query, results_count) VALUES ($1, $2)")
            .bind(query)
            .bind(i32::try_from(result_count).unwrap_or(i32::MAX))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn popular_searches(&self, limit: usize) -> Result<Vec<SearchTerm>, StorageError> {
        let rows = sqlx::query(
            r#"SELECT query, COUNT(*) AS count FROM search_logs
                GROUP BY query ORDER BY count DESC, query COLLATE "C" LIMIT $1"#,
        )
        .bind(usize_to_i64(limit))
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| -> Result<SearchTerm, StorageError> {
                let count: i64 = row.try_get("count")?;
                Ok(SearchTerm { query: row.try_get("query")?, count: u64::try_from(count).unwrap_or(0) })
            })
            .collect()
    }
}
