//! Usage entity models: one row per (artwork, character, slot) placement.

use fogdex_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `artwork_usages` table.
///
/// `character_kind` and `slot` are stored as text, validated against the
/// `fogdex_core::character` enumerations before insert; the table carries
/// matching CHECK constraints. The natural key
/// (artwork_id, character_kind, character_id, slot) is unique.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtworkUsage {
    pub id: DbId,
    pub artwork_id: DbId,
    pub character_kind: String,
    pub character_id: String,
    pub slot: String,
    pub display_order: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for `UsageRepo::ensure`.
#[derive(Debug, Clone, Deserialize)]
pub struct EnsureUsage {
    pub artwork_id: DbId,
    pub character_kind: String,
    pub character_id: String,
    pub slot: String,
    pub display_order: Option<i32>,
}
