//! Repository for the `artworks` table.

use fogdex_core::types::DbId;
use sqlx::PgPool;

use crate::models::artwork::{Artwork, CreateArtwork, UpdateArtwork};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, url, artist_id, notes, created_at, updated_at";

/// Provides CRUD operations for artworks.
pub struct ArtworkRepo;

impl ArtworkRepo {
    /// Insert a new artwork, returning the created row.
    ///
    /// The `url` column is unique; inserting a URL that already exists
    /// surfaces the driver's unique-violation error to the caller.
    pub async fn create(pool: &PgPool, input: &CreateArtwork) -> Result<Artwork, sqlx::Error> {
        let query = format!(
            "INSERT INTO artworks (url, artist_id, notes)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artwork>(&query)
            .bind(&input.url)
            .bind(input.artist_id)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find an artwork by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Artwork>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artworks WHERE id = $1");
        sqlx::query_as::<_, Artwork>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an artwork by its canonical URL. No side effects.
    pub async fn find_by_url(pool: &PgPool, url: &str) -> Result<Option<Artwork>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artworks WHERE url = $1");
        sqlx::query_as::<_, Artwork>(&query)
            .bind(url)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the artist attribution.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_artist(
        pool: &PgPool,
        id: DbId,
        artist_id: Option<DbId>,
    ) -> Result<Option<Artwork>, sqlx::Error> {
        let query = format!(
            "UPDATE artworks SET artist_id = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artwork>(&query)
            .bind(id)
            .bind(artist_id)
            .fetch_optional(pool)
            .await
    }

    /// Update an artwork. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArtwork,
    ) -> Result<Option<Artwork>, sqlx::Error> {
        let query = format!(
            "UPDATE artworks SET notes = COALESCE($2, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artwork>(&query)
            .bind(id)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete an artwork by ID. Usage rows referencing it are removed by the
    /// `ON DELETE CASCADE` foreign key. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM artworks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List a page of artworks, newest first (id as tiebreak so pages stay
    /// stable while a caller accumulates the full set page by page).
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Artwork>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM artworks
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Artwork>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// All known artwork URLs, for the unmatched-link scan.
    pub async fn list_urls(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT url FROM artworks ORDER BY id")
            .fetch_all(pool)
            .await
    }
}
