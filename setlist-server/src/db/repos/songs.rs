//! Song repository

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::{is_foreign_key_violation, Artist, DbError};
use crate::models::SongTitle;

/// Song record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub artist_id: i64,
}

/// Song with its artist already loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongWithArtist {
    pub id: i64,
    pub title: String,
    pub artist: Artist,
}

/// Flat row shape of a songs/artists JOIN
#[derive(Debug, FromRow)]
pub(crate) struct SongArtistRow {
    pub song_id: i64,
    pub title: String,
    pub artist_id: i64,
    pub artist_name: String,
}

impl From<SongArtistRow> for SongWithArtist {
    fn from(r: SongArtistRow) -> Self {
        Self {
            id: r.song_id,
            title: r.title,
            artist: Artist {
                id: r.artist_id,
                name: r.artist_name,
            },
        }
    }
}

/// Song repository
pub struct SongRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SongRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a song by an existing artist.
    ///
    /// The artist reference is checked by the foreign key, not up front.
    pub async fn create(&self, title: SongTitle, artist_id: i64) -> Result<Song, DbError> {
        sqlx::query_as::<_, Song>(
            "INSERT INTO songs (title, artist_id) VALUES (?, ?) RETURNING id, title, artist_id",
        )
        .bind(title.as_str())
        .bind(artist_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DbError::NotFound {
                    resource: "artist",
                    id: artist_id.to_string(),
                }
            } else {
                DbError::Sqlx(e)
            }
        })
    }

    /// Get a song with its artist in a single JOIN.
    pub async fn get_with_artist(&self, id: i64) -> Result<SongWithArtist, DbError> {
        let row = sqlx::query_as::<_, SongArtistRow>(
            r#"
            SELECT
                s.id AS song_id,
                s.title,
                a.id AS artist_id,
                a.name AS artist_name
            FROM songs s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "song",
            id: id.to_string(),
        })?;

        Ok(row.into())
    }
}
