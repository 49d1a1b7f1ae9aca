//! Character kinds, image slots, and the slot-to-field mapping.
//!
//! The slot enumeration is the single source of truth for which character
//! fields carry image URLs. The promotion service and the reporting
//! projections both go through [`CharacterImages::urls_for`], so a new slot
//! added here reaches both sides at once.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Character kind
// ---------------------------------------------------------------------------

/// The two character categories tracked by the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterKind {
    Killer,
    Survivor,
}

impl CharacterKind {
    pub const ALL: &'static [CharacterKind] = &[CharacterKind::Killer, CharacterKind::Survivor];

    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterKind::Killer => "killer",
            CharacterKind::Survivor => "survivor",
        }
    }

    /// Parse a stored kind string. Anything outside the two categories is a
    /// validation error.
    pub fn parse(s: &str) -> Result<CharacterKind, CoreError> {
        match s {
            "killer" => Ok(CharacterKind::Killer),
            "survivor" => Ok(CharacterKind::Survivor),
            other => Err(CoreError::Validation(format!(
                "Invalid character kind '{other}'. Must be one of: killer, survivor"
            ))),
        }
    }
}

impl fmt::Display for CharacterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Image slots
// ---------------------------------------------------------------------------

/// A named placement purpose for an image on a character.
///
/// Each slot maps to exactly one character field; `gallery-list` is the only
/// list-valued slot, the rest hold a single optional URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageSlot {
    GalleryList,
    PrimaryHeader,
    LegacyHeader,
    Background,
    Portrait,
}

impl ImageSlot {
    /// All slots, in the order projections enumerate them.
    pub const ALL: &'static [ImageSlot] = &[
        ImageSlot::GalleryList,
        ImageSlot::PrimaryHeader,
        ImageSlot::LegacyHeader,
        ImageSlot::Background,
        ImageSlot::Portrait,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSlot::GalleryList => "gallery-list",
            ImageSlot::PrimaryHeader => "primary-header",
            ImageSlot::LegacyHeader => "legacy-header",
            ImageSlot::Background => "background",
            ImageSlot::Portrait => "portrait",
        }
    }

    /// The character field this slot reads from.
    pub fn field_name(&self) -> &'static str {
        match self {
            ImageSlot::GalleryList => "artist_urls",
            ImageSlot::PrimaryHeader => "header_url",
            ImageSlot::LegacyHeader => "legacy_header_url",
            ImageSlot::Background => "background_url",
            ImageSlot::Portrait => "portrait_url",
        }
    }

    /// Whether the backing field holds an ordered list rather than a single URL.
    pub fn is_list(&self) -> bool {
        matches!(self, ImageSlot::GalleryList)
    }

    /// Parse a stored slot string. Anything outside the five slots is a
    /// validation error.
    pub fn parse(s: &str) -> Result<ImageSlot, CoreError> {
        for slot in ImageSlot::ALL {
            if slot.as_str() == s {
                return Ok(*slot);
            }
        }
        Err(CoreError::Validation(format!(
            "Invalid image slot '{s}'. Must be one of: {}",
            ImageSlot::ALL
                .iter()
                .map(|slot| slot.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }
}

impl fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Character read view
// ---------------------------------------------------------------------------

/// Read-side view of one character's image-bearing fields.
///
/// Characters are owned by the roster admin tooling; the gallery only reads
/// them, so this carries exactly the fields the slot table needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterImages {
    /// Stable string id, e.g. "trapper".
    pub id: String,
    pub kind: CharacterKind,
    pub artist_urls: Vec<String>,
    pub header_url: Option<String>,
    pub legacy_header_url: Option<String>,
    pub background_url: Option<String>,
    pub portrait_url: Option<String>,
}

impl CharacterImages {
    /// All URLs currently present in the given slot, in display order.
    /// Absent single-valued fields yield an empty list.
    pub fn urls_for(&self, slot: ImageSlot) -> Vec<&str> {
        match slot {
            ImageSlot::GalleryList => self.artist_urls.iter().map(String::as_str).collect(),
            ImageSlot::PrimaryHeader => self.header_url.as_deref().into_iter().collect(),
            ImageSlot::LegacyHeader => self.legacy_header_url.as_deref().into_iter().collect(),
            ImageSlot::Background => self.background_url.as_deref().into_iter().collect(),
            ImageSlot::Portrait => self.portrait_url.as_deref().into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// Maximum accepted image URL length.
pub const MAX_URL_LENGTH: usize = 2048;

/// Validate an image URL before it reaches the store.
///
/// Rules:
/// - Not empty (or whitespace-only)
/// - No embedded whitespace
/// - At most [`MAX_URL_LENGTH`] bytes
pub fn validate_url(url: &str) -> Result<(), CoreError> {
    if url.trim().is_empty() {
        return Err(CoreError::Validation(
            "Image URL must not be empty".to_string(),
        ));
    }
    if url.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(format!(
            "Image URL must not contain whitespace: '{url}'"
        )));
    }
    if url.len() > MAX_URL_LENGTH {
        return Err(CoreError::Validation(format!(
            "Image URL exceeds {MAX_URL_LENGTH} bytes"
        )));
    }
    Ok(())
}

/// Validate a character's stable string id.
pub fn validate_character_id(id: &str) -> Result<(), CoreError> {
    if id.trim().is_empty() {
        return Err(CoreError::Validation(
            "Character id must not be empty".to_string(),
        ));
    }
    Ok(())
}
