//! Hero, power and hero_power persistence against PostgreSQL.

use crate::error::AppError;
use crate::models::{Hero, HeroDetail, HeroPower, HeroPowerDetail, NewHero, NewPower, Power, PowerPatch};
use crate::service::validation::{RequestValidator, ValidHeroPower, ValidationErrors};
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;

const HERO_COLUMNS: &str = "id, name, super_name, created_at, updated_at";
const POWER_COLUMNS: &str = "id, name, description, created_at, updated_at";
const HERO_POWER_COLUMNS: &str = "id, strength, hero_id, power_id, created_at, updated_at";

pub const HERO_NOT_FOUND: &str = "Hero not found";
pub const POWER_NOT_FOUND: &str = "Power not found";

pub struct HeroService;

impl HeroService {
    /// All heroes ordered by id, without their hero_powers.
    pub async fn list_heroes(pool: &PgPool) -> Result<Vec<Hero>, AppError> {
        let sql = format!("SELECT {} FROM heroes ORDER BY id", HERO_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Hero>(&sql).fetch_all(pool).await?)
    }

    pub async fn read_hero(pool: &PgPool, id: i64) -> Result<Option<Hero>, AppError> {
        let mut conn = pool.acquire().await?;
        Self::hero_by_id(&mut conn, id).await
    }

    /// Hero with every hero_power embedded (each carrying its hero and power).
    pub async fn read_hero_detail(pool: &PgPool, id: i64) -> Result<Option<HeroDetail>, AppError> {
        let mut conn = pool.acquire().await?;
        let Some(hero) = Self::hero_by_id(&mut conn, id).await? else {
            return Ok(None);
        };

        let sql = format!(
            "SELECT {} FROM hero_powers WHERE hero_id = $1 ORDER BY id",
            HERO_POWER_COLUMNS
        );
        tracing::debug!(sql = %sql, hero_id = id, "query");
        let hero_powers = sqlx::query_as::<_, HeroPower>(&sql)
            .bind(id)
            .fetch_all(&mut *conn)
            .await?;

        let power_ids: Vec<i64> = hero_powers.iter().map(|hp| hp.power_id).collect();
        let powers = Self::powers_where_id_in(&mut conn, &power_ids).await?;

        let mut details = Vec::with_capacity(hero_powers.len());
        for hero_power in hero_powers {
            let power = powers
                .get(&hero_power.power_id)
                .cloned()
                .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
            details.push(HeroPowerDetail {
                hero_power,
                hero: hero.clone(),
                power,
            });
        }
        Ok(Some(HeroDetail {
            hero,
            hero_powers: details,
        }))
    }

    pub async fn create_hero(pool: &PgPool, new: &NewHero) -> Result<Hero, AppError> {
        let sql = format!(
            "INSERT INTO heroes (name, super_name) VALUES ($1, $2) RETURNING {}",
            HERO_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let hero = sqlx::query_as::<_, Hero>(&sql)
            .bind(&new.name)
            .bind(&new.super_name)
            .fetch_one(pool)
            .await?;
        tracing::info!(hero_id = hero.id, "hero created");
        Ok(hero)
    }

    /// Delete a hero; its hero_powers go with it. Returns false when no such hero.
    pub async fn delete_hero(pool: &PgPool, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM heroes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_heroes(pool: &PgPool) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM heroes")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// All powers ordered by id.
    pub async fn list_powers(pool: &PgPool) -> Result<Vec<Power>, AppError> {
        let sql = format!("SELECT {} FROM powers ORDER BY id", POWER_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Power>(&sql).fetch_all(pool).await?)
    }

    pub async fn read_power(pool: &PgPool, id: i64) -> Result<Option<Power>, AppError> {
        let mut conn = pool.acquire().await?;
        Self::power_by_id(&mut conn, id, false).await
    }

    pub async fn create_power(pool: &PgPool, new: &NewPower) -> Result<Power, AppError> {
        let mut errors = ValidationErrors::default();
        RequestValidator::validate_description(&new.description, &mut errors);
        errors.into_result()?;

        let sql = format!(
            "INSERT INTO powers (name, description) VALUES ($1, $2) RETURNING {}",
            POWER_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let power = sqlx::query_as::<_, Power>(&sql)
            .bind(&new.name)
            .bind(&new.description)
            .fetch_one(pool)
            .await?;
        tracing::info!(power_id = power.id, "power created");
        Ok(power)
    }

    /// Apply a partial update in one transaction. Missing power is reported before invalid fields.
    pub async fn update_power(pool: &PgPool, id: i64, patch: &PowerPatch) -> Result<Power, AppError> {
        let mut tx = pool.begin().await?;
        if Self::power_by_id(&mut tx, id, true).await?.is_none() {
            return Err(AppError::NotFound(POWER_NOT_FOUND.into()));
        }
        RequestValidator::validate_power_patch(patch)?;

        let sql = format!(
            "UPDATE powers SET name = COALESCE($2, name), description = COALESCE($3, description), \
             updated_at = NOW() WHERE id = $1 RETURNING {}",
            POWER_COLUMNS
        );
        tracing::debug!(sql = %sql, power_id = id, "query (tx)");
        let power = sqlx::query_as::<_, Power>(&sql)
            .bind(id)
            .bind(patch.name.as_deref())
            .bind(patch.description.as_deref())
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(power_id = id, "power updated");
        Ok(power)
    }

    /// Delete a power; its hero_powers go with it. Returns false when no such power.
    pub async fn delete_power(pool: &PgPool, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM powers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert a hero_power after checking both references in the same transaction.
    pub async fn create_hero_power(pool: &PgPool, valid: ValidHeroPower) -> Result<HeroPowerDetail, AppError> {
        let mut tx = pool.begin().await?;
        let hero = Self::hero_by_id(&mut tx, valid.hero_id).await?;
        let power = Self::power_by_id(&mut tx, valid.power_id, false).await?;

        let mut errors = ValidationErrors::default();
        if hero.is_none() {
            errors.push(format!("hero_id {} does not reference an existing hero", valid.hero_id));
        }
        if power.is_none() {
            errors.push(format!("power_id {} does not reference an existing power", valid.power_id));
        }
        let (Some(hero), Some(power)) = (hero, power) else {
            return Err(AppError::Validation(errors));
        };

        let sql = format!(
            "INSERT INTO hero_powers (strength, hero_id, power_id) VALUES ($1, $2, $3) RETURNING {}",
            HERO_POWER_COLUMNS
        );
        tracing::debug!(sql = %sql, "query (tx)");
        let hero_power = sqlx::query_as::<_, HeroPower>(&sql)
            .bind(valid.strength)
            .bind(valid.hero_id)
            .bind(valid.power_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(
            hero_power_id = hero_power.id,
            hero_id = hero.id,
            power_id = power.id,
            strength = %hero_power.strength,
            "hero_power created"
        );
        Ok(HeroPowerDetail {
            hero_power,
            hero,
            power,
        })
    }

    pub async fn read_hero_power(pool: &PgPool, id: i64) -> Result<Option<HeroPower>, AppError> {
        let sql = format!("SELECT {} FROM hero_powers WHERE id = $1", HERO_POWER_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, HeroPower>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?)
    }

    async fn hero_by_id(conn: &mut PgConnection, id: i64) -> Result<Option<Hero>, AppError> {
        let sql = format!("SELECT {} FROM heroes WHERE id = $1", HERO_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Hero>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?)
    }

    async fn power_by_id(conn: &mut PgConnection, id: i64, for_update: bool) -> Result<Option<Power>, AppError> {
        let lock = if for_update { " FOR UPDATE" } else { "" };
        let sql = format!("SELECT {} FROM powers WHERE id = $1{}", POWER_COLUMNS, lock);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Power>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?)
    }

    /// Batch-load powers by id, keyed by id.
    async fn powers_where_id_in(conn: &mut PgConnection, ids: &[i64]) -> Result<HashMap<i64, Power>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let sql = format!("SELECT {} FROM powers WHERE id = ANY($1)", POWER_COLUMNS);
        tracing::debug!(sql = %sql, ids = ?ids, "query");
        let rows = sqlx::query_as::<_, Power>(&sql)
            .bind(ids)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows.into_iter().map(|p| (p.id, p)).collect())
    }
}
