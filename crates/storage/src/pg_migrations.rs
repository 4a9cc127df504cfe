//! PostgreSQL schema migrations for postakod storage.

use anyhow::Result;
use sqlx::PgPool;

/// Run all PostgreSQL migrations. Idempotent.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS postal_codes (
            id BIGSERIAL PRIMARY KEY,
            il TEXT NOT NULL,
            ilce TEXT NOT NULL,
            semt TEXT,
            mahalle TEXT NOT NULL,
            pk TEXT NOT NULL CHECK (pk ~ '^[0-9]{5}$'),
            il_slug TEXT NOT NULL,
            ilce_slug TEXT NOT NULL,
            mahalle_slug TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_postal_codes_unique
            ON postal_codes (il_slug, ilce_slug, mahalle_slug, pk)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_postal_codes_pk ON postal_codes (pk)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_postal_codes_il_ilce ON postal_codes (il_slug, ilce_slug)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_postal_codes_mahalle ON postal_codes (mahalle)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS search_logs (
            id BIGSERIAL PRIMARY KEY,
            query TEXT NOT NULL,
            results_count INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_search_logs_query ON search_logs (query)")
        .execute(pool)
        .await?;

    tracing::debug!("PostgreSQL migrations applied");
    Ok(())
}
