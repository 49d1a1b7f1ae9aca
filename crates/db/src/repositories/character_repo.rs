//! Repository for the `characters` table.
//!
//! Characters are owned by the roster admin tooling; the gallery side only
//! reads them. `create` exists for seeding rows in tests and fixtures.

use sqlx::PgPool;

use crate::models::character::{Character, CreateCharacter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, slug, kind, name, artist_urls, header_url, legacy_header_url, \
                       background_url, portrait_url, created_at, updated_at";

/// Read accessor for characters, plus a seeding insert.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new character row.
    ///
    /// If `artist_urls` is `None`, defaults to an empty list.
    pub async fn create(pool: &PgPool, input: &CreateCharacter) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters
                 (slug, kind, name, artist_urls, header_url, legacy_header_url,
                  background_url, portrait_url)
             VALUES ($1, $2, $3, COALESCE($4, ARRAY[]::text[]), $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(&input.slug)
            .bind(&input.kind)
            .bind(&input.name)
            .bind(&input.artist_urls)
            .bind(&input.header_url)
            .bind(&input.legacy_header_url)
            .bind(&input.background_url)
            .bind(&input.portrait_url)
            .fetch_one(pool)
            .await
    }

    /// Find a character by its stable key `(slug, kind)`.
    pub async fn find_by_key(
        pool: &PgPool,
        slug: &str,
        kind: &str,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE slug = $1 AND kind = $2");
        sqlx::query_as::<_, Character>(&query)
            .bind(slug)
            .bind(kind)
            .fetch_optional(pool)
            .await
    }

    /// The full roster, in stable (kind, slug) order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters ORDER BY kind, slug");
        sqlx::query_as::<_, Character>(&query).fetch_all(pool).await
    }
}
