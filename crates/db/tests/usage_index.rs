//! Integration tests for the usage index: the `ensure` idempotency contract,
//! natural-key deletion, and the lookup queries.

use sqlx::PgPool;

use fogdex_db::models::artwork::CreateArtwork;
use fogdex_db::models::usage::EnsureUsage;
use fogdex_db::repositories::{ArtworkRepo, UsageRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_artwork(pool: &PgPool, url: &str) -> i64 {
    ArtworkRepo::create(
        pool,
        &CreateArtwork {
            url: url.to_string(),
            artist_id: None,
            notes: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn usage(artwork_id: i64, kind: &str, character_id: &str, slot: &str) -> EnsureUsage {
    EnsureUsage {
        artwork_id,
        character_kind: kind.to_string(),
        character_id: character_id.to_string(),
        slot: slot.to_string(),
        display_order: None,
    }
}

// ---------------------------------------------------------------------------
// ensure: idempotency
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn ensure_creates_then_returns_same_row(pool: PgPool) {
    let artwork_id = seed_artwork(&pool, "https://img/a.png").await;
    let input = usage(artwork_id, "killer", "trapper", "gallery-list");

    let first = UsageRepo::ensure(&pool, &input).await.unwrap();
    let second = UsageRepo::ensure(&pool, &input).await.unwrap();
    let third = UsageRepo::ensure(&pool, &input).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.id, third.id);

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM artwork_usages")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ensure_keeps_stored_display_order(pool: PgPool) {
    let artwork_id = seed_artwork(&pool, "https://img/a.png").await;

    let mut input = usage(artwork_id, "killer", "trapper", "gallery-list");
    input.display_order = Some(0);
    let first = UsageRepo::ensure(&pool, &input).await.unwrap();
    assert_eq!(first.display_order, Some(0));

    input.display_order = Some(7);
    let second = UsageRepo::ensure(&pool, &input).await.unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.display_order, Some(0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ensure_distinguishes_every_natural_key_component(pool: PgPool) {
    let a = seed_artwork(&pool, "https://img/a.png").await;
    let b = seed_artwork(&pool, "https://img/b.png").await;

    UsageRepo::ensure(&pool, &usage(a, "killer", "trapper", "gallery-list"))
        .await
        .unwrap();
    // differs in artwork, kind, character, and slot respectively
    UsageRepo::ensure(&pool, &usage(b, "killer", "trapper", "gallery-list"))
        .await
        .unwrap();
    UsageRepo::ensure(&pool, &usage(a, "survivor", "trapper", "gallery-list"))
        .await
        .unwrap();
    UsageRepo::ensure(&pool, &usage(a, "killer", "wraith", "gallery-list"))
        .await
        .unwrap();
    UsageRepo::ensure(&pool, &usage(a, "killer", "trapper", "portrait"))
        .await
        .unwrap();

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM artwork_usages")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ensure_rejects_missing_artwork(pool: PgPool) {
    let err = UsageRepo::ensure(&pool, &usage(9999, "killer", "trapper", "gallery-list"))
        .await
        .unwrap_err();
    // foreign-key violation, code 23503
    match err {
        sqlx::Error::Database(db_err) => assert_eq!(db_err.code().as_deref(), Some("23503")),
        other => panic!("expected database error, got {other}"),
    }
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_by_id(pool: PgPool) {
    let artwork_id = seed_artwork(&pool, "https://img/a.png").await;
    let created = UsageRepo::ensure(&pool, &usage(artwork_id, "killer", "trapper", "portrait"))
        .await
        .unwrap();

    assert!(UsageRepo::delete(&pool, created.id).await.unwrap());
    assert!(!UsageRepo::delete(&pool, created.id).await.unwrap());
    assert!(UsageRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_by_natural_key_removes_exactly_one_row(pool: PgPool) {
    let artwork_id = seed_artwork(&pool, "https://img/a.png").await;
    UsageRepo::ensure(&pool, &usage(artwork_id, "killer", "trapper", "gallery-list"))
        .await
        .unwrap();
    UsageRepo::ensure(&pool, &usage(artwork_id, "killer", "trapper", "portrait"))
        .await
        .unwrap();

    let removed = UsageRepo::delete_by_natural_key(
        &pool,
        artwork_id,
        "killer",
        "trapper",
        "gallery-list",
    )
    .await
    .unwrap();
    assert!(removed);

    let remaining = UsageRepo::list_by_artwork(&pool, artwork_id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].slot, "portrait");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_by_natural_key_is_a_noop_when_absent(pool: PgPool) {
    let artwork_id = seed_artwork(&pool, "https://img/a.png").await;

    let removed = UsageRepo::delete_by_natural_key(
        &pool,
        artwork_id,
        "killer",
        "trapper",
        "gallery-list",
    )
    .await
    .unwrap();
    assert!(!removed);
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_by_artwork_in_insertion_order(pool: PgPool) {
    let a = seed_artwork(&pool, "https://img/a.png").await;
    let b = seed_artwork(&pool, "https://img/b.png").await;

    UsageRepo::ensure(&pool, &usage(a, "killer", "trapper", "gallery-list"))
        .await
        .unwrap();
    UsageRepo::ensure(&pool, &usage(a, "survivor", "dwight", "portrait"))
        .await
        .unwrap();
    UsageRepo::ensure(&pool, &usage(b, "killer", "wraith", "background"))
        .await
        .unwrap();

    let usages = UsageRepo::list_by_artwork(&pool, a).await.unwrap();
    assert_eq!(usages.len(), 2);
    assert_eq!(usages[0].character_id, "trapper");
    assert_eq!(usages[1].character_id, "dwight");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_by_character_orders_by_slot_then_display_order(pool: PgPool) {
    let a = seed_artwork(&pool, "https://img/a.png").await;
    let b = seed_artwork(&pool, "https://img/b.png").await;

    let mut second = usage(b, "killer", "trapper", "gallery-list");
    second.display_order = Some(1);
    let mut first = usage(a, "killer", "trapper", "gallery-list");
    first.display_order = Some(0);

    UsageRepo::ensure(&pool, &second).await.unwrap();
    UsageRepo::ensure(&pool, &first).await.unwrap();
    UsageRepo::ensure(&pool, &usage(a, "killer", "trapper", "background"))
        .await
        .unwrap();

    let usages = UsageRepo::list_by_character(&pool, "killer", "trapper")
        .await
        .unwrap();
    let slots: Vec<_> = usages.iter().map(|u| u.slot.as_str()).collect();
    assert_eq!(slots, vec!["background", "gallery-list", "gallery-list"]);
    assert_eq!(usages[1].artwork_id, a);
    assert_eq!(usages[2].artwork_id, b);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_all_returns_the_full_set(pool: PgPool) {
    let a = seed_artwork(&pool, "https://img/a.png").await;
    let b = seed_artwork(&pool, "https://img/b.png").await;

    UsageRepo::ensure(&pool, &usage(a, "killer", "trapper", "gallery-list"))
        .await
        .unwrap();
    UsageRepo::ensure(&pool, &usage(b, "survivor", "dwight", "portrait"))
        .await
        .unwrap();

    let all = UsageRepo::list_all(&pool).await.unwrap();
    assert_eq!(all.len(), 2);
}
