//! Read-side projections over the artwork/usage set.
//!
//! Pure functions: the caller loads rows, these group them. Output order is
//! deterministic for a given input, so reports can be diffed between runs.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::character::{CharacterImages, CharacterKind, ImageSlot};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Grouping by character
// ---------------------------------------------------------------------------

/// Grouping key for per-character buckets: (kind, stable string id).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CharacterKey {
    pub kind: CharacterKind,
    pub id: String,
}

/// Result of [`group_by_character`].
#[derive(Debug, Default, Serialize)]
pub struct ArtworkGroups {
    /// Artwork ids per character. An artwork appears at most once per
    /// character even when it has usages in several slots.
    pub by_character: BTreeMap<CharacterKey, Vec<DbId>>,
    /// Artworks with no usages at all, in input order.
    pub unassigned: Vec<DbId>,
}

/// Group artworks by the characters that use them.
///
/// `usages` entries are `(artwork_id, kind, character_id)` triples; usages
/// referencing ids outside `artwork_ids` are ignored. Bucket contents keep
/// the order of `artwork_ids`.
pub fn group_by_character(
    artwork_ids: &[DbId],
    usages: &[(DbId, CharacterKind, String)],
) -> ArtworkGroups {
    let mut groups = ArtworkGroups::default();

    for &artwork_id in artwork_ids {
        let mut placed = false;
        let mut seen: HashSet<CharacterKey> = HashSet::new();

        for (usage_artwork_id, kind, character_id) in usages {
            if *usage_artwork_id != artwork_id {
                continue;
            }
            let key = CharacterKey {
                kind: *kind,
                id: character_id.clone(),
            };
            if !seen.insert(key.clone()) {
                continue;
            }
            groups.by_character.entry(key).or_default().push(artwork_id);
            placed = true;
        }

        if !placed {
            groups.unassigned.push(artwork_id);
        }
    }

    groups
}

// ---------------------------------------------------------------------------
// Unmatched links
// ---------------------------------------------------------------------------

/// A character-embedded URL with no artwork record yet.
///
/// One entry per (character, slot, url); converts directly into a promotion
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedLink {
    pub character_id: String,
    pub character_kind: CharacterKind,
    pub slot: ImageSlot,
    pub url: String,
    /// Position within a list-valued slot; `None` for single-valued slots.
    pub display_order: Option<i32>,
}

/// Scan characters for embedded image URLs not yet in the artwork store.
///
/// Walks characters in input order and slots in declaration order, flattening
/// single- and list-valued fields; empty values and already-known URLs are
/// skipped.
pub fn find_unmatched_links(
    characters: &[CharacterImages],
    known_urls: &HashSet<String>,
) -> Vec<UnmatchedLink> {
    let mut links = Vec::new();

    for character in characters {
        for &slot in ImageSlot::ALL {
            for (index, url) in character.urls_for(slot).into_iter().enumerate() {
                if url.is_empty() || known_urls.contains(url) {
                    continue;
                }
                links.push(UnmatchedLink {
                    character_id: character.id.clone(),
                    character_kind: character.kind,
                    slot,
                    url: url.to_string(),
                    display_order: slot.is_list().then_some(index as i32),
                });
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(kind: CharacterKind, id: &str) -> CharacterKey {
        CharacterKey {
            kind,
            id: id.to_string(),
        }
    }

    // -- group_by_character ---------------------------------------------------

    #[test]
    fn artwork_used_by_two_characters_lands_in_both_buckets() {
        let usages = vec![
            (1, CharacterKind::Killer, "trapper".to_string()),
            (1, CharacterKind::Survivor, "dwight".to_string()),
        ];
        let groups = group_by_character(&[1, 2], &usages);

        assert_eq!(
            groups.by_character[&key(CharacterKind::Killer, "trapper")],
            vec![1]
        );
        assert_eq!(
            groups.by_character[&key(CharacterKind::Survivor, "dwight")],
            vec![1]
        );
        assert_eq!(groups.unassigned, vec![2]);
    }

    #[test]
    fn multiple_slots_on_one_character_count_once() {
        let usages = vec![
            (7, CharacterKind::Killer, "trapper".to_string()),
            (7, CharacterKind::Killer, "trapper".to_string()),
        ];
        let groups = group_by_character(&[7], &usages);

        assert_eq!(
            groups.by_character[&key(CharacterKind::Killer, "trapper")],
            vec![7]
        );
        assert!(groups.unassigned.is_empty());
    }

    #[test]
    fn bucket_contents_keep_artwork_input_order() {
        let usages = vec![
            (2, CharacterKind::Killer, "trapper".to_string()),
            (1, CharacterKind::Killer, "trapper".to_string()),
        ];
        let groups = group_by_character(&[1, 2], &usages);

        assert_eq!(
            groups.by_character[&key(CharacterKind::Killer, "trapper")],
            vec![1, 2]
        );
    }

    #[test]
    fn empty_inputs_produce_empty_groups() {
        let groups = group_by_character(&[], &[]);
        assert!(groups.by_character.is_empty());
        assert!(groups.unassigned.is_empty());
    }

    // -- find_unmatched_links -------------------------------------------------

    fn trapper() -> CharacterImages {
        CharacterImages {
            id: "trapper".to_string(),
            kind: CharacterKind::Killer,
            artist_urls: vec!["https://img/a.png".to_string()],
            header_url: Some("https://img/header.png".to_string()),
            legacy_header_url: None,
            background_url: None,
            portrait_url: None,
        }
    }

    #[test]
    fn reports_every_unknown_embedded_url() {
        let links = find_unmatched_links(&[trapper()], &HashSet::new());

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "https://img/a.png");
        assert_eq!(links[0].slot, ImageSlot::GalleryList);
        assert_eq!(links[0].display_order, Some(0));
        assert_eq!(links[1].url, "https://img/header.png");
        assert_eq!(links[1].slot, ImageSlot::PrimaryHeader);
        assert_eq!(links[1].display_order, None);
    }

    #[test]
    fn known_urls_are_skipped() {
        let known: HashSet<String> = ["https://img/a.png".to_string()].into_iter().collect();
        let links = find_unmatched_links(&[trapper()], &known);

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://img/header.png");
    }

    #[test]
    fn fully_known_character_yields_no_links() {
        let known: HashSet<String> = [
            "https://img/a.png".to_string(),
            "https://img/header.png".to_string(),
        ]
        .into_iter()
        .collect();
        assert!(find_unmatched_links(&[trapper()], &known).is_empty());
    }

    #[test]
    fn list_entries_carry_their_index_as_display_order() {
        let mut character = trapper();
        character.header_url = None;
        character.artist_urls = vec![
            "https://img/a.png".to_string(),
            "https://img/b.png".to_string(),
            "https://img/c.png".to_string(),
        ];

        let links = find_unmatched_links(&[character], &HashSet::new());
        let orders: Vec<_> = links.iter().map(|l| l.display_order).collect();
        assert_eq!(orders, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn empty_strings_in_list_fields_are_skipped() {
        let mut character = trapper();
        character.artist_urls = vec![String::new(), "https://img/b.png".to_string()];
        character.header_url = None;

        let links = find_unmatched_links(&[character], &HashSet::new());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://img/b.png");
        // index counts the skipped entry's position in the stored list
        assert_eq!(links[0].display_order, Some(1));
    }

    #[test]
    fn character_input_order_is_preserved() {
        let mut second = trapper();
        second.id = "dwight".to_string();
        second.kind = CharacterKind::Survivor;
        second.artist_urls = vec!["https://img/d.png".to_string()];
        second.header_url = None;

        let links = find_unmatched_links(&[trapper(), second], &HashSet::new());
        let ids: Vec<_> = links.iter().map(|l| l.character_id.as_str()).collect();
        assert_eq!(ids, vec!["trapper", "trapper", "dwight"]);
    }
}
