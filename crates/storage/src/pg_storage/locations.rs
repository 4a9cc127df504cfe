//! LocationStore read paths and batch insert for PgStore.

use async_trait::async_trait;
use postakod_core::constants::INSERT_BATCH_SIZE;
use postakod_core::{
    DirectoryStats, DistrictRef, LocationRecord, NeighborhoodPath, PostalCode, ProvinceSummary,
};
use sqlx::{Postgres, QueryBuilder, Row};

use super::{PgStore, RECORD_COLUMNS, escape_like, folded_column, i64_to_usize, rows_to_records};
use crate::error::StorageError;
use crate::traits::LocationStore;
use crate::types::{CandidateFilter, RewriteOutcome, SlugGroup, SlugRewrite};

#[async_trait]
impl LocationStore for PgStore {
    async fn records_in_province(&self, province_slug: &str) -> Result<Vec<LocationRecord>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {RECORD_COLUMNS} FROM postal_codes WHERE il_slug = $1 ORDER BY id"
        ))
        .bind(province_slug)
        .fetch_all(&self.pool)
        .await?;
        rows_to_records(&rows)
    }

    async fn records_in_district(
        &self,
        province_slug: &str,
        district_slug: &str,
    ) -> Result<Vec<LocationRecord>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {RECORD_COLUMNS} FROM postal_codes
              WHERE il_slug = $1 AND ilce_slug = $2 ORDER BY id"
        ))
        .bind(province_slug)
        .bind(district_slug)
        .fetch_all(&self.pool)
        .await?;
        rows_to_records(&rows)
    }

    async fn records_for_neighborhood(
        &self,
        province_slug: &str,
        district_slug: &str,
        neighborhood_slug: &str,
    ) -> Result<Vec<LocationRecord>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {RECORD_COLUMNS} FROM postal_codes
              WHERE il_slug = $1 AND ilce_slug = $2 AND mahalle_slug = $3 ORDER BY id"
        ))
        .bind(province_slug)
        .bind(district_slug)
        .bind(neighborhood_slug)
        .fetch_all(&self.pool)
        .await?;
        rows_to_records(&rows)
    }

    async fn records_for_postal_code(&self, code: &PostalCode) -> Result<Vec<LocationRecord>, StorageError> {
        let rows = sqlx::query(&format!("SELECT {RECORD_COLUMNS} FROM postal_codes WHERE pk = $1 ORDER BY id"))
            .bind(code.as_str())
            .fetch_all(&self.pool)
            .await?;
        rows_to_records(&rows)
    }

    async fn records_named(&self, neighborhood: &str) -> Result<Vec<LocationRecord>, StorageError> {
        let rows = sqlx::query(&format!("SELECT {RECORD_COLUMNS} FROM postal_codes WHERE mahalle = $1 ORDER BY id"))
            .bind(neighborhood)
            .fetch_all(&self.pool)
            .await?;
        rows_to_records(&rows)
    }

    async fn search_candidates(&self, filter: CandidateFilter<'_>) -> Result<Vec<LocationRecord>, StorageError> {
        let rows = match filter {
            CandidateFilter::PostalPrefix(prefix) => {
                sqlx::query(&format!(
                    "SELECT {RECORD_COLUMNS} FROM postal_codes WHERE pk LIKE $1 ESCAPE '\\' ORDER BY id"
                ))
                .bind(format!("{}%", escape_like(prefix)))
                .fetch_all(&self.pool)
                .await?
            },
            CandidateFilter::Text(pattern) => {
                let needle = format!("%{}%", escape_like(&pattern.folded()));
                let predicate = ["il", "ilce", "mahalle", "COALESCE(semt, '')"]
                    .iter()
                    .map(|col| format!("{} LIKE $1 ESCAPE '\\'", folded_column(col)))
                    .chain(std::iter::once("pk LIKE $1 ESCAPE '\\'".to_owned()))
                    .collect::<Vec<_>>()
                    .join(" OR ");
                sqlx::query(&format!("SELECT {RECORD_COLUMNS} FROM postal_codes WHERE {predicate} ORDER BY id"))
                    .bind(needle)
                    .fetch_all(&self.pool)
                    .await?
            },
        };
        rows_to_records(&rows)
    }

    async fn province_summaries(&self) -> Result<Vec<ProvinceSummary>, StorageError> {
        let rows = sqlx::query(
            "SELECT (array_agg(il ORDER BY id))[1] AS il, il_slug,
                    COUNT(DISTINCT ilce_slug) AS district_count, COUNT(*) AS record_count
               FROM postal_codes GROUP BY il_slug",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| -> Result<ProvinceSummary, StorageError> {
                Ok(ProvinceSummary {
                    province: row.try_get("il")?,
                    province_slug: row.try_get("il_slug")?,
                    district_count: i64_to_usize(row.try_get("district_count")?),
                    record_count: i64_to_usize(row.try_get("record_count")?),
                })
            })
            .collect()
    }

    async fn neighborhood_paths(&self) -> Result<Vec<NeighborhoodPath>, StorageError> {
        let rows = sqlx::query(
            r#"SELECT DISTINCT il_slug, ilce_slug, mahalle_slug FROM postal_codes
                ORDER BY il_slug COLLATE "C", ilce_slug COLLATE "C", mahalle_slug COLLATE "C""#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| -> Result<NeighborhoodPath, StorageError> {
                Ok(NeighborhoodPath {
                    province_slug: row.try_get("il_slug")?,
                    district_slug: row.try_get("ilce_slug")?,
                    neighborhood_slug: row.try_get("mahalle_slug")?,
                })
            })
            .collect()
    }

    async fn district_paths(&self) -> Result<Vec<DistrictRef>, StorageError> {
        let rows = sqlx::query(
            r#"SELECT DISTINCT il_slug, ilce_slug FROM postal_codes
                ORDER BY il_slug COLLATE "C", ilce_slug COLLATE "C""#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| -> Result<DistrictRef, StorageError> {
                let province_slug: String = row.try_get("il_slug")?;
                let district_slug: String = row.try_get("ilce_slug")?;
                Ok(DistrictRef::new(province_slug, district_slug))
            })
            .collect()
    }

    async fn distinct_postal_codes(&self) -> Result<Vec<PostalCode>, StorageError> {
        let codes: Vec<String> = sqlx::query_scalar(r#"SELECT DISTINCT pk FROM postal_codes ORDER BY pk COLLATE "C""#)
            .fetch_all(&self.pool)
            .await?;
        codes
            .iter()
            .map(|pk| {
                PostalCode::parse(pk).map_err(|e| StorageError::corrupt(format!("postal_codes.pk = {pk:?}"), e))
            })
            .collect()
    }

    async fn stats(&self) -> Result<DirectoryStats, StorageError> {
        let row = sqlx::query(
            "SELECT COUNT(DISTINCT il_slug) AS provinces,
                    COUNT(DISTINCT il_slug || '/' || ilce_slug) AS districts,
                    COUNT(DISTINCT il_slug || '/' || ilce_slug || '/' || mahalle_slug) AS neighborhoods,
                    COUNT(DISTINCT pk) AS codes,
                    COUNT(*) AS records
               FROM postal_codes",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(DirectoryStats {
            province_count: i64_to_usize(row.try_get("provinces")?),
            district_count: i64_to_usize(row.try_get("districts")?),
            neighborhood_count: i64_to_usize(row.try_get("neighborhoods")?),
            postal_code_count: i64_to_usize(row.try_get("codes")?),
            record_count: i64_to_usize(row.try_get("records")?),
        })
    }

    async fn insert_batch(&self, records: &[LocationRecord]) -> Result<u64, StorageError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;
        for chunk in records.chunks(INSERT_BATCH_SIZE) {
            let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!("INSERT INTO postal_codes ({RECORD_COLUMNS}) "));
            builder.push_values(chunk, |mut b, r| {
                b.push_bind(&r.province)
                    .push_bind(&r.district)
                    .push_bind(&r.subarea)
                    .push_bind(&r.neighborhood)
                    .push_bind(r.postal_code.as_str())
                    .push_bind(&r.province_slug)
                    .push_bind(&r.district_slug)
                    .push_bind(&r.neighborhood_slug);
            });
            builder.push(" ON CONFLICT (il_slug, ilce_slug, mahalle_slug, pk) DO NOTHING");
            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
        }
        tx.commit().await?;
        tracing::debug!(submitted = records.len(), inserted, "inserted postal code batch");
        Ok(inserted)
    }

    async fn slug_groups(&self) -> Result<Vec<SlugGroup>, StorageError> {
        self.load_slug_groups().await
    }

    async fn rewrite_slugs(&self, rewrites: &[SlugRewrite]) -> Result<RewriteOutcome, StorageError> {
        self.apply_slug_rewrites(rewrites).await
    }
}
