//! Repository for the `artists` table.

use fogdex_core::types::DbId;
use sqlx::PgPool;

use crate::models::artist::{Artist, CreateArtist};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, profile_url, created_at, updated_at";

/// Provides CRUD operations for artists.
pub struct ArtistRepo;

impl ArtistRepo {
    /// Insert a new artist, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateArtist) -> Result<Artist, sqlx::Error> {
        let query = format!(
            "INSERT INTO artists (name, profile_url)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artist>(&query)
            .bind(&input.name)
            .bind(&input.profile_url)
            .fetch_one(pool)
            .await
    }

    /// Find an artist by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Artist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artists WHERE id = $1");
        sqlx::query_as::<_, Artist>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all artists by display name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Artist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artists ORDER BY name, id");
        sqlx::query_as::<_, Artist>(&query).fetch_all(pool).await
    }

    /// Delete an artist by ID. Returns `true` if a row was removed.
    ///
    /// Artworks referencing the artist keep their rows; the foreign key nulls
    /// the reference (`ON DELETE SET NULL`).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM artists WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
