//! Async assembly of the read-side reports: load rows through the
//! repositories, delegate the projection to `fogdex_core::report`.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use sqlx::PgPool;

use fogdex_core::character::{CharacterImages, CharacterKind};
use fogdex_core::error::CoreError;
use fogdex_core::report::{self, UnmatchedLink};
use fogdex_core::types::DbId;
use fogdex_db::models::artwork::Artwork;
use fogdex_db::models::character::Character;
use fogdex_db::repositories::{ArtworkRepo, CharacterRepo, UsageRepo};

use crate::error::GalleryResult;

/// Page size used when accumulating the full artwork set.
const REPORT_PAGE_SIZE: i64 = 200;

/// Artworks used by one character.
#[derive(Debug, Serialize)]
pub struct CharacterArtworks {
    pub character_kind: CharacterKind,
    pub character_id: String,
    pub artworks: Vec<Artwork>,
}

/// Full grouped view: per-character buckets plus the unassigned remainder.
#[derive(Debug, Serialize)]
pub struct GroupedArtworks {
    pub characters: Vec<CharacterArtworks>,
    pub unassigned: Vec<Artwork>,
}

/// Group every artwork by the characters using it.
///
/// An artwork appears once per character even with usages in several slots;
/// artworks with no usages land in `unassigned`.
pub async fn grouped_artworks(pool: &PgPool) -> GalleryResult<GroupedArtworks> {
    let artworks = load_all_artworks(pool).await?;
    let usages = UsageRepo::list_all(pool).await?;

    let artwork_ids: Vec<DbId> = artworks.iter().map(|a| a.id).collect();
    let mut usage_keys = Vec::with_capacity(usages.len());
    for usage in &usages {
        let kind = CharacterKind::parse(&usage.character_kind)?;
        usage_keys.push((usage.artwork_id, kind, usage.character_id.clone()));
    }

    let groups = report::group_by_character(&artwork_ids, &usage_keys);
    let by_id: HashMap<DbId, &Artwork> = artworks.iter().map(|a| (a.id, a)).collect();

    let characters = groups
        .by_character
        .into_iter()
        .map(|(key, ids)| CharacterArtworks {
            character_kind: key.kind,
            character_id: key.id,
            artworks: resolve(&by_id, &ids),
        })
        .collect();
    let unassigned = resolve(&by_id, &groups.unassigned);

    Ok(GroupedArtworks {
        characters,
        unassigned,
    })
}

/// Embedded character URLs with no artwork record yet, in roster order.
///
/// The read-only precursor to promotion: each entry converts directly into a
/// `PromoteRequest`.
pub async fn unmatched_links(pool: &PgPool) -> GalleryResult<Vec<UnmatchedLink>> {
    let rows = CharacterRepo::list_all(pool).await?;
    let mut characters = Vec::with_capacity(rows.len());
    for row in &rows {
        characters.push(character_images(row)?);
    }

    let known_urls: HashSet<String> = ArtworkRepo::list_urls(pool).await?.into_iter().collect();
    Ok(report::find_unmatched_links(&characters, &known_urls))
}

/// Accumulate the full artwork set page by page, newest first.
async fn load_all_artworks(pool: &PgPool) -> Result<Vec<Artwork>, sqlx::Error> {
    let mut all = Vec::new();
    let mut offset = 0;
    loop {
        let page = ArtworkRepo::list(pool, offset, REPORT_PAGE_SIZE).await?;
        let fetched = page.len() as i64;
        all.extend(page);
        if fetched < REPORT_PAGE_SIZE {
            break;
        }
        offset += fetched;
    }
    Ok(all)
}

/// Convert a character row into the core read view, validating its kind.
fn character_images(row: &Character) -> Result<CharacterImages, CoreError> {
    Ok(CharacterImages {
        id: row.slug.clone(),
        kind: CharacterKind::parse(&row.kind)?,
        artist_urls: row.artist_urls.clone(),
        header_url: row.header_url.clone(),
        legacy_header_url: row.legacy_header_url.clone(),
        background_url: row.background_url.clone(),
        portrait_url: row.portrait_url.clone(),
    })
}

fn resolve(by_id: &HashMap<DbId, &Artwork>, ids: &[DbId]) -> Vec<Artwork> {
    ids.iter()
        .filter_map(|id| by_id.get(id).map(|artwork| (*artwork).clone()))
        .collect()
}
