//! Artwork entity models and DTOs.

use fogdex_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `artworks` table.
///
/// `url` is the dedup key: one row per distinct image URL, enforced by a
/// unique constraint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Artwork {
    pub id: DbId,
    pub url: String,
    pub artist_id: Option<DbId>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new artwork.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArtwork {
    pub url: String,
    pub artist_id: Option<DbId>,
    pub notes: Option<String>,
}

/// DTO for updating an existing artwork. Only non-`None` fields are applied.
///
/// Artist attribution changes go through `ArtworkRepo::set_artist`, which can
/// also clear the reference.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateArtwork {
    pub notes: Option<String>,
}
