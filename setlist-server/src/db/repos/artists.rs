//! Artist repository
//!
//! Artists are referenced by songs; deleting a referenced artist is
//! refused by the songs foreign key and surfaced as
//! [`DbError::Protected`].

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::{is_foreign_key_violation, DbError};
use crate::models::ArtistName;

/// Artist record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
}

/// Artist repository
pub struct ArtistRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ArtistRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: ArtistName) -> Result<Artist, DbError> {
        let artist = sqlx::query_as::<_, Artist>(
            "INSERT INTO artists (name) VALUES (?) RETURNING id, name",
        )
        .bind(name.as_str())
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(artist_id = artist.id, "artist created");
        Ok(artist)
    }

    pub async fn get(&self, id: i64) -> Result<Artist, DbError> {
        sqlx::query_as::<_, Artist>("SELECT id, name FROM artists WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "artist",
                id: id.to_string(),
            })
    }

    /// Delete an artist.
    ///
    /// Fails with `Protected` while any song still references the artist;
    /// nothing is modified in that case.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM artists WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    DbError::Protected {
                        resource: "artist",
                        id: id.to_string(),
                    }
                } else {
                    DbError::Sqlx(e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "artist",
                id: id.to_string(),
            });
        }

        Ok(())
    }
}
