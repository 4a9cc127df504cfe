//! Slug drift inspection and transactional rewrite for PgStore.

use postakod_core::{PostalCode, SlugTriple};
use sqlx::Row;

use super::{PgStore, i64_to_usize};
use crate::error::StorageError;
use crate::types::{RewriteOutcome, SlugGroup, SlugRewrite};

impl PgStore {
    pub(super) async fn load_slug_groups(&self) -> Result<Vec<SlugGroup>, StorageError> {
        let rows = sqlx::query(
            r#"SELECT il, ilce, mahalle, il_slug, ilce_slug, mahalle_slug,
                      array_agg(DISTINCT pk ORDER BY pk) AS codes, COUNT(*) AS row_count
                 FROM postal_codes
                GROUP BY il, ilce, mahalle, il_slug, ilce_slug, mahalle_slug
                ORDER BY il COLLATE "C", ilce COLLATE "C", mahalle COLLATE "C""#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<SlugGroup, StorageError> {
                let codes: Vec<String> = row.try_get("codes")?;
                let postal_codes = codes
                    .iter()
                    .map(|pk| {
                        PostalCode::parse(pk)
                            .map_err(|e| StorageError::corrupt(format!("postal_codes.pk = {pk:?}"), e))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(SlugGroup {
                    province: row.try_get("il")?,
                    district: row.try_get("ilce")?,
                    neighborhood: row.try_get("mahalle")?,
                    stored: SlugTriple {
                        province_slug: row.try_get("il_slug")?,
                        district_slug: row.try_get("ilce_slug")?,
                        neighborhood_slug: row.try_get("mahalle_slug")?,
                    },
                    postal_codes,
                    row_count: i64_to_usize(row.try_get("row_count")?),
                })
            })
            .collect()
    }

    /// One transaction for the whole batch: either every group is rewritten
    /// or none is.
    pub(super) async fn apply_slug_rewrites(&self, rewrites: &[SlugRewrite]) -> Result<RewriteOutcome, StorageError> {
        let mut tx = self.pool.begin().await?;
        let mut outcome = RewriteOutcome::default();

        for rewrite in rewrites {
            let SlugTriple { province_slug, district_slug, neighborhood_slug } = &rewrite.slugs;

            // Drifted rows whose corrected key already exists would violate
            // the unique index; drop them first.
            let removed = sqlx::query(
                "DELETE FROM postal_codes d
                  WHERE d.il = $1 AND d.ilce = $2 AND d.mahalle = $3
                    AND (d.il_slug, d.ilce_slug, d.mahalle_slug) IS DISTINCT FROM ($4, $5, $6)
                    AND EXISTS (
                        SELECT 1 FROM postal_codes c
                         WHERE c.il_slug = $4 AND c.ilce_slug = $5 AND c.mahalle_slug = $6
                           AND c.pk = d.pk
                    )",
            )
            .bind(&rewrite.province)
            .bind(&rewrite.district)
            .bind(&rewrite.neighborhood)
            .bind(province_slug)
            .bind(district_slug)
            .bind(neighborhood_slug)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            // Two drifted rows of the same group may share a postal code;
            // keep the oldest.
            let collapsed = sqlx::query(
                "DELETE FROM postal_codes d
                  WHERE d.il = $1 AND d.ilce = $2 AND d.mahalle = $3
                    AND (d.il_slug, d.ilce_slug, d.mahalle_slug) IS DISTINCT FROM ($4, $5, $6)
                    AND EXISTS (
                        SELECT 1 FROM postal_codes o
                         WHERE o.il = d.il AND o.ilce = d.ilce AND o.mahalle = d.mahalle
                           AND o.pk = d.pk AND o.id < d.id
                    )",
            )
            .bind(&rewrite.province)
            .bind(&rewrite.district)
            .bind(&rewrite.neighborhood)
            .bind(province_slug)
            .bind(district_slug)
            .bind(neighborhood_slug)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            let updated = sqlx::query(
                "UPDATE postal_codes
                    SET il_slug = $4, ilce_slug = $5, mahalle_slug = $6, updated_at = NOW()
                  WHERE il = $1 AND ilce = $2 AND mahalle = $3
                    AND (il_slug, ilce_slug, mahalle_slug) IS DISTINCT FROM ($4, $5, $6)",
            )
            .bind(&rewrite.province)
            .bind(&rewrite.district)
            .bind(&rewrite.neighborhood)
            .bind(province_slug)
            .bind(district_slug)
            .bind(neighborhood_slug)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            outcome.duplicates_removed += removed + collapsed;
            outcome.rows_updated += updated;
        }

        tx.commit().await?;
        tracing::info!(
            groups = rewrites.len(),
            rows_updated = outcome.rows_updated,
            duplicates_removed = outcome.duplicates_removed,
            "slug rewrite committed"
        );
        Ok(outcome)
    }
}
