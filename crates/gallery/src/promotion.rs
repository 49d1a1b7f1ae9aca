//! Promotion: normalizing a character-embedded image URL into an
//! (artwork, usage) pair.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use fogdex_core::character::{validate_character_id, validate_url, CharacterKind, ImageSlot};
use fogdex_core::error::CoreError;
use fogdex_core::report::UnmatchedLink;
use fogdex_core::types::DbId;
use fogdex_db::models::artwork::{Artwork, CreateArtwork};
use fogdex_db::models::usage::EnsureUsage;
use fogdex_db::repositories::{ArtistRepo, ArtworkRepo, UsageRepo};

use crate::error::{is_unique_violation, GalleryError, GalleryResult};

/// One promotion request: the URL plus the placement it was found in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoteRequest {
    pub url: String,
    pub character_kind: CharacterKind,
    pub character_id: String,
    pub slot: ImageSlot,
    pub display_order: Option<i32>,
    /// Default attribution, applied only when the artwork row is first
    /// created; an existing artwork keeps its attribution.
    pub artist_id: Option<DbId>,
}

impl From<UnmatchedLink> for PromoteRequest {
    fn from(link: UnmatchedLink) -> Self {
        PromoteRequest {
            url: link.url,
            character_kind: link.character_kind,
            character_id: link.character_id,
            slot: link.slot,
            display_order: link.display_order,
            artist_id: None,
        }
    }
}

/// Outcome of a batch promotion run.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    pub failures: Vec<BatchFailure>,
}

/// One failed batch entry.
#[derive(Debug, Serialize)]
pub struct BatchFailure {
    pub index: usize,
    pub url: String,
    pub error: String,
}

/// Promote an embedded URL into the normalized artwork/usage model.
///
/// Find-or-create on the artwork, then an idempotent usage ensure; calling
/// again with identical arguments returns the same artwork id and leaves the
/// store unchanged. On failure any completed prefix stays behind — it is
/// idempotent and safe to retry from the top.
pub async fn promote(pool: &PgPool, request: &PromoteRequest) -> GalleryResult<DbId> {
    validate_url(&request.url)?;
    validate_character_id(&request.character_id)?;

    if let Some(artist_id) = request.artist_id {
        let artist = ArtistRepo::find_by_id(pool, artist_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Artist",
                id: artist_id,
            })?;
        tracing::debug!(artist = %artist.name, url = %request.url, "default attribution");
    }

    let artwork = find_or_create_artwork(pool, request).await?;

    UsageRepo::ensure(
        pool,
        &EnsureUsage {
            artwork_id: artwork.id,
            character_kind: request.character_kind.as_str().to_string(),
            character_id: request.character_id.clone(),
            slot: request.slot.as_str().to_string(),
            display_order: request.display_order,
        },
    )
    .await?;

    tracing::info!(
        artwork_id = artwork.id,
        url = %request.url,
        character_id = %request.character_id,
        slot = %request.slot,
        "promoted embedded url"
    );
    Ok(artwork.id)
}

/// Look up the artwork for `request.url`, creating it if absent.
///
/// A unique violation on the insert means a concurrent promote created the
/// row between our lookup and insert; the conflict is resolved by re-reading
/// the winner's row rather than surfacing it.
async fn find_or_create_artwork(
    pool: &PgPool,
    request: &PromoteRequest,
) -> GalleryResult<Artwork> {
    if let Some(existing) = ArtworkRepo::find_by_url(pool, &request.url).await? {
        return Ok(existing);
    }

    let input = CreateArtwork {
        url: request.url.clone(),
        artist_id: request.artist_id,
        notes: None,
    };
    match ArtworkRepo::create(pool, &input).await {
        Ok(artwork) => Ok(artwork),
        Err(err) if is_unique_violation(&err) => ArtworkRepo::find_by_url(pool, &request.url)
            .await?
            .ok_or_else(|| {
                GalleryError::Core(CoreError::Internal(format!(
                    "artwork '{}' missing after unique conflict",
                    request.url
                )))
            }),
        Err(err) => Err(err.into()),
    }
}

/// Promote a batch of entries, collecting per-entry failures.
///
/// Entries are processed independently and in order; one entry's failure is
/// recorded and never aborts the rest. The function itself never fails.
pub async fn promote_batch(pool: &PgPool, requests: &[PromoteRequest]) -> BatchReport {
    let mut report = BatchReport {
        total: requests.len(),
        succeeded: 0,
        failures: Vec::new(),
    };

    for (index, request) in requests.iter().enumerate() {
        match promote(pool, request).await {
            Ok(_) => report.succeeded += 1,
            Err(err) => {
                tracing::warn!(index, url = %request.url, error = %err, "batch entry failed");
                report.failures.push(BatchFailure {
                    index,
                    url: request.url.clone(),
                    error: err.to_string(),
                });
            }
        }
    }

    tracing::info!(
        total = report.total,
        succeeded = report.succeeded,
        "batch promotion finished"
    );
    report
}
