//! Character entity models.
//!
//! Characters are maintained by the roster admin tooling; the gallery reads
//! them to enumerate embedded image URLs. The create DTO exists for seeding.

use fogdex_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `characters` table.
///
/// `(slug, kind)` is unique and is the key usages reference characters by.
/// The five image-bearing columns correspond one-to-one with
/// `fogdex_core::character::ImageSlot`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub slug: String,
    pub kind: String,
    pub name: String,
    pub artist_urls: Vec<String>,
    pub header_url: Option<String>,
    pub legacy_header_url: Option<String>,
    pub background_url: Option<String>,
    pub portrait_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new character row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacter {
    pub slug: String,
    pub kind: String,
    pub name: String,
    pub artist_urls: Option<Vec<String>>,
    pub header_url: Option<String>,
    pub legacy_header_url: Option<String>,
    pub background_url: Option<String>,
    pub portrait_url: Option<String>,
}
