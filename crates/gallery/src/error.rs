//! Error type shared by all gallery service operations.

use fogdex_core::error::CoreError;

/// Service-level error: domain failures plus storage pass-through.
///
/// `Storage` wraps the raw driver error unchanged so the embedding layer can
/// apply its own retry policy; nothing in this crate retries automatically.
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Convenience type alias for service return values.
pub type GalleryResult<T> = Result<T, GalleryError>;

/// True when `err` is a PostgreSQL unique-constraint violation (code 23505).
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
