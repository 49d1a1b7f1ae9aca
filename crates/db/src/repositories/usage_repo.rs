//! Repository for the `artwork_usages` table.

use fogdex_core::types::DbId;
use sqlx::PgPool;

use crate::models::usage::{ArtworkUsage, EnsureUsage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, artwork_id, character_kind, character_id, slot, display_order, created_at, updated_at";

/// Provides lookup and idempotent insertion for usage rows.
pub struct UsageRepo;

impl UsageRepo {
    /// Find-or-create the usage row for a natural key.
    ///
    /// `INSERT .. ON CONFLICT DO NOTHING RETURNING` yields the new row on
    /// first call and nothing when the row already exists — including when a
    /// concurrent caller inserted it between the caller's probe and this
    /// insert. In that case the existing row is re-read and returned
    /// unchanged: a `display_order` supplied on a later call never
    /// overwrites the stored one.
    pub async fn ensure(pool: &PgPool, input: &EnsureUsage) -> Result<ArtworkUsage, sqlx::Error> {
        let query = format!(
            "INSERT INTO artwork_usages
                 (artwork_id, character_kind, character_id, slot, display_order)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (artwork_id, character_kind, character_id, slot) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, ArtworkUsage>(&query)
            .bind(input.artwork_id)
            .bind(&input.character_kind)
            .bind(&input.character_id)
            .bind(&input.slot)
            .bind(input.display_order)
            .fetch_optional(pool)
            .await?;

        if let Some(usage) = inserted {
            return Ok(usage);
        }

        tracing::debug!(
            artwork_id = input.artwork_id,
            character_id = %input.character_id,
            slot = %input.slot,
            "usage already present, returning existing row"
        );
        let query = format!(
            "SELECT {COLUMNS} FROM artwork_usages
             WHERE artwork_id = $1 AND character_kind = $2
               AND character_id = $3 AND slot = $4"
        );
        sqlx::query_as::<_, ArtworkUsage>(&query)
            .bind(input.artwork_id)
            .bind(&input.character_kind)
            .bind(&input.character_id)
            .bind(&input.slot)
            .fetch_one(pool)
            .await
    }

    /// Find a usage by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ArtworkUsage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artwork_usages WHERE id = $1");
        sqlx::query_as::<_, ArtworkUsage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a usage by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM artwork_usages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a usage by the composite key the admin UI identifies it with.
    ///
    /// A missing row is a no-op: returns `false` rather than an error.
    pub async fn delete_by_natural_key(
        pool: &PgPool,
        artwork_id: DbId,
        character_kind: &str,
        character_id: &str,
        slot: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM artwork_usages
             WHERE artwork_id = $1 AND character_kind = $2
               AND character_id = $3 AND slot = $4",
        )
        .bind(artwork_id)
        .bind(character_kind)
        .bind(character_id)
        .bind(slot)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List all usages of one artwork, in insertion order.
    ///
    /// An artwork with no rows (including one just deleted) yields an empty
    /// list, never an error.
    pub async fn list_by_artwork(
        pool: &PgPool,
        artwork_id: DbId,
    ) -> Result<Vec<ArtworkUsage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM artwork_usages
             WHERE artwork_id = $1
             ORDER BY id"
        );
        sqlx::query_as::<_, ArtworkUsage>(&query)
            .bind(artwork_id)
            .fetch_all(pool)
            .await
    }

    /// List all usages on one character, grouped by slot then display order.
    pub async fn list_by_character(
        pool: &PgPool,
        character_kind: &str,
        character_id: &str,
    ) -> Result<Vec<ArtworkUsage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM artwork_usages
             WHERE character_kind = $1 AND character_id = $2
             ORDER BY slot, display_order NULLS LAST, id"
        );
        sqlx::query_as::<_, ArtworkUsage>(&query)
            .bind(character_kind)
            .bind(character_id)
            .fetch_all(pool)
            .await
    }

    /// The full usage set, for the grouping projection.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ArtworkUsage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artwork_usages ORDER BY id");
        sqlx::query_as::<_, ArtworkUsage>(&query)
            .fetch_all(pool)
            .await
    }
}
