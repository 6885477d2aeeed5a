//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for single-record lookups of related rows
//! - Loads children for a set of parents in one batched query (no N+1)
//! - Maps foreign-key violations to typed errors (no check-then-write)

pub mod artists;
pub mod playlists;
pub mod songs;

pub use artists::{Artist, ArtistRepo};
pub use playlists::{Playlist, PlaylistRepo, PlaylistWithSongs};
pub use songs::{Song, SongRepo, SongWithArtist};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("{resource} '{id}' is still referenced and cannot be deleted")]
    Protected { resource: &'static str, id: String },
}

/// True when the statement was rejected by a foreign-key constraint.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.is_foreign_key_violation(),
        _ => false,
    }
}
