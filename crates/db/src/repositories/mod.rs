//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod artist_repo;
pub mod artwork_repo;
pub mod character_repo;
pub mod usage_repo;

pub use artist_repo::ArtistRepo;
pub use artwork_repo::ArtworkRepo;
pub use character_repo::CharacterRepo;
pub use usage_repo::UsageRepo;
