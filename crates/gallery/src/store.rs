//! Validated store operations over the artwork and usage repositories,
//! mapping driver errors into the domain taxonomy.

use sqlx::PgPool;

use fogdex_core::character::{validate_character_id, validate_url, CharacterKind, ImageSlot};
use fogdex_core::error::CoreError;
use fogdex_core::types::DbId;
use fogdex_db::models::artwork::{Artwork, CreateArtwork};
use fogdex_db::models::usage::{ArtworkUsage, EnsureUsage};
use fogdex_db::repositories::{ArtworkRepo, UsageRepo};

use crate::error::{is_unique_violation, GalleryResult};

/// Maximum page size for artwork listings.
pub const MAX_LIST_LIMIT: i64 = 200;

// ---------------------------------------------------------------------------
// Artwork store
// ---------------------------------------------------------------------------

/// Register a new artwork.
///
/// Fails with [`CoreError::Conflict`] when the URL is already registered.
/// Callers that want find-or-create semantics use the promotion flow instead.
pub async fn create_artwork(pool: &PgPool, input: &CreateArtwork) -> GalleryResult<Artwork> {
    validate_url(&input.url)?;
    match ArtworkRepo::create(pool, input).await {
        Ok(artwork) => Ok(artwork),
        Err(err) if is_unique_violation(&err) => Err(CoreError::Conflict(format!(
            "Artwork with url '{}' already exists",
            input.url
        ))
        .into()),
        Err(err) => Err(err.into()),
    }
}

/// Change or clear an artwork's artist attribution.
///
/// Fails with [`CoreError::NotFound`] when the artwork id does not exist.
pub async fn update_artist(
    pool: &PgPool,
    artwork_id: DbId,
    artist_id: Option<DbId>,
) -> GalleryResult<Artwork> {
    let updated = ArtworkRepo::set_artist(pool, artwork_id, artist_id).await?;
    updated.ok_or_else(|| {
        CoreError::NotFound {
            entity: "Artwork",
            id: artwork_id,
        }
        .into()
    })
}

/// Delete an artwork; its usage rows go with it via the cascade.
///
/// Fails with [`CoreError::NotFound`] when the artwork id does not exist.
pub async fn delete_artwork(pool: &PgPool, artwork_id: DbId) -> GalleryResult<()> {
    if ArtworkRepo::delete(pool, artwork_id).await? {
        tracing::info!(artwork_id, "deleted artwork and its usages");
        Ok(())
    } else {
        Err(CoreError::NotFound {
            entity: "Artwork",
            id: artwork_id,
        }
        .into())
    }
}

/// List a page of artworks, newest first. Offset is floored at zero and the
/// limit clamped to `1..=MAX_LIST_LIMIT`.
pub async fn list_artworks(
    pool: &PgPool,
    offset: i64,
    limit: i64,
) -> GalleryResult<Vec<Artwork>> {
    let offset = offset.max(0);
    let limit = limit.clamp(1, MAX_LIST_LIMIT);
    Ok(ArtworkRepo::list(pool, offset, limit).await?)
}

// ---------------------------------------------------------------------------
// Usage index
// ---------------------------------------------------------------------------

/// Attach an artwork to a character slot, idempotently.
///
/// A dangling artwork id fails as [`CoreError::NotFound`], not as a raw
/// foreign-key violation. Re-assigning an existing placement returns the
/// existing row unchanged.
pub async fn assign_artwork(
    pool: &PgPool,
    artwork_id: DbId,
    kind: CharacterKind,
    character_id: &str,
    slot: ImageSlot,
    display_order: Option<i32>,
) -> GalleryResult<ArtworkUsage> {
    validate_character_id(character_id)?;

    ArtworkRepo::find_by_id(pool, artwork_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Artwork",
            id: artwork_id,
        })?;

    let usage = UsageRepo::ensure(
        pool,
        &EnsureUsage {
            artwork_id,
            character_kind: kind.as_str().to_string(),
            character_id: character_id.to_string(),
            slot: slot.as_str().to_string(),
            display_order,
        },
    )
    .await?;
    Ok(usage)
}

/// Detach a usage by id.
///
/// Fails with [`CoreError::NotFound`] when the usage id does not exist.
pub async fn unassign_usage(pool: &PgPool, usage_id: DbId) -> GalleryResult<()> {
    if UsageRepo::delete(pool, usage_id).await? {
        Ok(())
    } else {
        Err(CoreError::NotFound {
            entity: "Usage",
            id: usage_id,
        }
        .into())
    }
}

/// Detach a usage by its composite key, as the admin UI identifies usages.
///
/// Returns whether a row was removed; a missing usage is a no-op, not an
/// error.
pub async fn unassign_by_key(
    pool: &PgPool,
    artwork_id: DbId,
    kind: CharacterKind,
    character_id: &str,
    slot: ImageSlot,
) -> GalleryResult<bool> {
    validate_character_id(character_id)?;
    let removed = UsageRepo::delete_by_natural_key(
        pool,
        artwork_id,
        kind.as_str(),
        character_id,
        slot.as_str(),
    )
    .await?;
    Ok(removed)
}
