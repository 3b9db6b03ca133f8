//! Versioned DDL for heroes, powers and hero_powers.
//! Applied versions are recorded in `_schema_migrations`.

use crate::error::AppError;
use sqlx::PgPool;

pub struct Migration {
    pub version: i64,
    pub name: &'static str,
    pub statements: &'static [&'static str],
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create heroes, powers and hero_powers",
        statements: &[
            r#"
            CREATE TABLE heroes (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                super_name TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            r#"
            CREATE TABLE powers (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                CONSTRAINT powers_description_min_length CHECK (char_length(description) >= 20)
            )
            "#,
            "CREATE TYPE hero_strength AS ENUM ('Strong', 'Weak', 'Average')",
            r#"
            CREATE TABLE hero_powers (
                id BIGSERIAL PRIMARY KEY,
                strength hero_strength NOT NULL,
                hero_id BIGINT NOT NULL,
                power_id BIGINT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                CONSTRAINT fk_hero_powers_hero_id_heroes FOREIGN KEY (hero_id)
                    REFERENCES heroes (id) ON DELETE CASCADE,
                CONSTRAINT fk_hero_powers_power_id_powers FOREIGN KEY (power_id)
                    REFERENCES powers (id) ON DELETE CASCADE
            )
            "#,
            "CREATE INDEX hero_powers_hero_id_idx ON hero_powers (hero_id)",
            "CREATE INDEX hero_powers_power_id_idx ON hero_powers (power_id)",
        ],
    },
];

/// Advisory lock key serializing concurrent migrators (several servers or test binaries).
const MIGRATION_LOCK_KEY: i64 = 0x5EED_4E80;

/// Apply every migration newer than the recorded maximum. All pending versions run in one
/// transaction holding an advisory lock. Returns the number of migrations applied.
pub async fn apply_migrations(pool: &PgPool) -> Result<usize, AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(MIGRATION_LOCK_KEY)
        .execute(&mut *tx)
        .await?;
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS _schema_migrations (
            version BIGINT PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    let (current,): (i64,) = sqlx::query_as("SELECT COALESCE(MAX(version), 0) FROM _schema_migrations")
        .fetch_one(&mut *tx)
        .await?;

    let mut applied = 0;
    for migration in pending(MIGRATIONS, current) {
        for sql in migration.statements {
            sqlx::query(sql).execute(&mut *tx).await.map_err(|e| {
                AppError::Migration(format!("{} ({}): {}", migration.version, migration.name, e))
            })?;
        }
        sqlx::query("INSERT INTO _schema_migrations (version, name) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(migration.name)
            .execute(&mut *tx)
            .await?;
        tracing::info!(version = migration.version, name = migration.name, "migration applied");
        applied += 1;
    }
    tx.commit().await?;
    Ok(applied)
}

/// Highest version this build knows how to apply.
pub fn latest_version() -> i64 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}

/// Highest version recorded in the database.
pub async fn applied_version(pool: &PgPool) -> Result<i64, AppError> {
    let (version,): (i64,) = sqlx::query_as("SELECT COALESCE(MAX(version), 0) FROM _schema_migrations")
        .fetch_one(pool)
        .await?;
    Ok(version)
}

fn pending(migrations: &[Migration], current: i64) -> impl Iterator<Item = &Migration> {
    migrations.iter().filter(move |m| m.version > current)
}
