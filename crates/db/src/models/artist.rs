//! Artist entity models and DTOs.

use fogdex_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `artists` table.
///
/// Referenced weakly from artworks: deleting an artist nulls the reference
/// via `ON DELETE SET NULL`, never removing artwork rows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Artist {
    pub id: DbId,
    pub name: String,
    pub profile_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new artist.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArtist {
    pub name: String,
    pub profile_url: Option<String>,
}
