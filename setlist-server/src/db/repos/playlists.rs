//! Playlist repository
//!
//! Besides plain CRUD this holds the eager-load helper: every playlist's
//! songs, sorted by title with their artists joined in, fetched for the
//! whole playlist set in a single query.

use serde::Serialize;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use super::songs::SongArtistRow;
use super::{is_foreign_key_violation, DbError, SongWithArtist};
use crate::db::prefetch;
use crate::models::PlaylistTitle;

/// Playlist record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Playlist {
    pub id: i64,
    pub title: String,
}

/// Playlist with its songs sorted by title, artists loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistWithSongs {
    #[serde(flatten)]
    pub playlist: Playlist,
    pub sorted_songs: Vec<SongWithArtist>,
}

/// Playlist ids bound per prefetch query, well under SQLite's
/// 32766 host-parameter ceiling
const MAX_IDS_PER_QUERY: usize = 10_000;

/// Split sorted playlist ids into per-query batches.
fn id_batches(ids: &[i64]) -> std::slice::Chunks<'_, i64> {
    ids.chunks(MAX_IDS_PER_QUERY)
}

#[derive(Debug, FromRow)]
struct PlaylistSongRow {
    playlist_id: i64,
    #[sqlx(flatten)]
    song: SongArtistRow,
}

/// Playlist repository
pub struct PlaylistRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PlaylistRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, title: PlaylistTitle) -> Result<Playlist, DbError> {
        let playlist = sqlx::query_as::<_, Playlist>(
            "INSERT INTO playlists (title) VALUES (?) RETURNING id, title",
        )
        .bind(title.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(playlist)
    }

    /// Associate a song with a playlist. Adding an existing pair is a no-op.
    pub async fn add_song(&self, playlist_id: i64, song_id: i64) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO playlist_songs (playlist_id, song_id)
            VALUES (?, ?)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(playlist_id)
        .bind(song_id)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DbError::NotFound {
                    resource: "playlist or song",
                    id: format!("{}/{}", playlist_id, song_id),
                }
            } else {
                DbError::Sqlx(e)
            }
        })?;

        Ok(())
    }

    pub async fn get(&self, id: i64) -> Result<Playlist, DbError> {
        sqlx::query_as::<_, Playlist>("SELECT id, title FROM playlists WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "playlist",
                id: id.to_string(),
            })
    }

    /// All playlists, oldest first.
    pub async fn list_all(&self) -> Result<Vec<Playlist>, DbError> {
        let playlists = sqlx::query_as::<_, Playlist>("SELECT id, title FROM playlists ORDER BY id")
            .fetch_all(self.pool)
            .await?;
        Ok(playlists)
    }

    /// Attach each playlist's songs, sorted by title, with artists loaded.
    ///
    /// Issues one query per 10,000 distinct playlists (none
    /// when `playlists` is empty), never one per playlist. Output keeps the
    /// input order; playlists without songs get an empty list.
    pub async fn eager_load_sorted_songs(
        &self,
        playlists: Vec<Playlist>,
    ) -> Result<Vec<PlaylistWithSongs>, DbError> {
        if playlists.is_empty() {
            return Ok(Vec::new());
        }

        let mut ids: Vec<i64> = playlists.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();

        // Each playlist lands in exactly one batch, so per-playlist title
        // order from each query survives concatenation.
        let mut rows: Vec<PlaylistSongRow> = Vec::new();
        let mut queries = 0usize;
        for batch in id_batches(&ids) {
            let mut query = QueryBuilder::<Sqlite>::new(
                r#"
                SELECT
                    ps.playlist_id,
                    s.id AS song_id,
                    s.title,
                    a.id AS artist_id,
                    a.name AS artist_name
                FROM playlist_songs ps
                JOIN songs s ON s.id = ps.song_id
                JOIN artists a ON a.id = s.artist_id
                WHERE ps.playlist_id IN ("#,
            );
            let mut binds = query.separated(", ");
            for id in batch {
                binds.push_bind(*id);
            }
            binds.push_unseparated(") ORDER BY s.title ASC, s.id ASC");

            rows.extend(query.build_query_as::<PlaylistSongRow>().fetch_all(self.pool).await?);
            queries += 1;
        }

        tracing::debug!(
            playlists = playlists.len(),
            songs = rows.len(),
            queries,
            "prefetched sorted songs"
        );

        let rows = rows
            .into_iter()
            .map(|r| (r.playlist_id, SongWithArtist::from(r.song)))
            .collect();

        Ok(prefetch::attach(playlists, rows, |p| p.id)
            .into_iter()
            .map(|(playlist, sorted_songs)| PlaylistWithSongs {
                playlist,
                sorted_songs,
            })
            .collect())
    }

    /// Every playlist with its sorted songs: two queries regardless of size.
    pub async fn list_with_sorted_songs(&self) -> Result<Vec<PlaylistWithSongs>, DbError> {
        let playlists = self.list_all().await?;
        self.eager_load_sorted_songs(playlists).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::testing;
    use crate::db::{ArtistRepo, SongRepo};
    use crate::models::{ArtistName, SongTitle};

    async fn song(pool: &SqlitePool, title: &str, artist_id: i64) -> i64 {
        SongRepo::new(pool)
            .create(SongTitle::new(title).unwrap(), artist_id)
            .await
            .unwrap()
            .id
    }

    async fn artist(pool: &SqlitePool, name: &str) -> i64 {
        ArtistRepo::new(pool)
            .create(ArtistName::new(name).unwrap())
            .await
            .unwrap()
            .id
    }

    async fn playlist(pool: &SqlitePool, title: &str) -> Playlist {
        PlaylistRepo::new(pool)
            .create(PlaylistTitle::new(title).unwrap())
            .await
            .unwrap()
    }

    fn titles(p: &PlaylistWithSongs) -> Vec<&str> {
        p.sorted_songs.iter().map(|s| s.title.as_str()).collect()
    }

    #[tokio::test]
    async fn road_trip_songs_sorted_by_title() {
        let pool = testing::pool().await;
        let a = artist(&pool, "A").await;
        let b = artist(&pool, "B").await;
        let zebra = song(&pool, "Zebra", a).await;
        let apple = song(&pool, "Apple", b).await;

        let road_trip = playlist(&pool, "Road Trip").await;
        let repo = PlaylistRepo::new(&pool);
        repo.add_song(road_trip.id, zebra).await.unwrap();
        repo.add_song(road_trip.id, apple).await.unwrap();

        let loaded = repo.list_with_sorted_songs().await.unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].playlist.title, "Road Trip");
        assert_eq!(titles(&loaded[0]), vec!["Apple", "Zebra"]);
        assert_eq!(loaded[0].sorted_songs[0].artist.name, "B");
        assert_eq!(loaded[0].sorted_songs[1].artist.name, "A");
    }

    #[tokio::test]
    async fn empty_playlist_gets_empty_songs() {
        let pool = testing::pool().await;
        let empty = playlist(&pool, "Nothing Yet").await;

        let loaded = PlaylistRepo::new(&pool).list_with_sorted_songs().await.unwrap();

        assert_eq!(
            loaded,
            vec![PlaylistWithSongs {
                playlist: empty,
                sorted_songs: vec![],
            }]
        );
    }

    #[tokio::test]
    async fn no_playlists_loads_nothing() {
        let pool = testing::pool().await;
        let repo = PlaylistRepo::new(&pool);

        assert!(repo.list_with_sorted_songs().await.unwrap().is_empty());
        assert!(repo.eager_load_sorted_songs(vec![]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn songs_partitioned_across_playlists() {
        let pool = testing::pool().await;
        let a = artist(&pool, "A").await;
        let shared = song(&pool, "Middle", a).await;
        let first_only = song(&pool, "Alpha", a).await;
        let second_only = song(&pool, "Omega", a).await;

        let first = playlist(&pool, "First").await;
        let second = playlist(&pool, "Second").await;
        let repo = PlaylistRepo::new(&pool);
        repo.add_song(first.id, shared).await.unwrap();
        repo.add_song(first.id, first_only).await.unwrap();
        repo.add_song(second.id, second_only).await.unwrap();
        repo.add_song(second.id, shared).await.unwrap();

        // Input order is kept even when it differs from id order
        let loaded = repo
            .eager_load_sorted_songs(vec![second.clone(), first.clone()])
            .await
            .unwrap();

        assert_eq!(loaded[0].playlist, second);
        assert_eq!(titles(&loaded[0]), vec!["Middle", "Omega"]);
        assert_eq!(loaded[1].playlist, first);
        assert_eq!(titles(&loaded[1]), vec!["Alpha", "Middle"]);
    }

    #[tokio::test]
    async fn sorted_songs_non_decreasing() {
        let pool = testing::pool().await;
        let a = artist(&pool, "A").await;
        let mix = playlist(&pool, "Mix").await;
        let repo = PlaylistRepo::new(&pool);

        for title in ["delta", "Bravo", "alpha", "Charlie", "bravo", "Alpha", "Bravo"] {
            let id = song(&pool, title, a).await;
            repo.add_song(mix.id, id).await.unwrap();
        }

        let loaded = repo.list_with_sorted_songs().await.unwrap();
        let songs = &loaded[0].sorted_songs;

        assert_eq!(songs.len(), 7);
        assert!(songs.windows(2).all(|w| w[0].title <= w[1].title));
    }

    #[tokio::test]
    async fn artists_readable_without_further_queries() {
        let pool = testing::pool().await;
        let a = artist(&pool, "A").await;
        let b = artist(&pool, "B").await;
        let p = playlist(&pool, "Road Trip").await;
        let repo = PlaylistRepo::new(&pool);
        for (title, by) in [("Zebra", a), ("Apple", b), ("Kiwi", a)] {
            let id = song(&pool, title, by).await;
            repo.add_song(p.id, id).await.unwrap();
        }

        let loaded = repo.list_with_sorted_songs().await.unwrap();

        // Any lazy lookup would fail against a closed pool
        pool.close().await;
        let names: Vec<&str> = loaded[0]
            .sorted_songs
            .iter()
            .map(|s| s.artist.name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A", "A"]);
    }

    #[test]
    fn batches_bounded_by_set_size() {
        let ids: Vec<i64> = (1..=40_000).collect();
        let sizes: Vec<usize> = id_batches(&ids).map(|b| b.len()).collect();
        assert_eq!(sizes, vec![10_000, 10_000, 10_000, 10_000]);

        let few: Vec<i64> = (1..=3).collect();
        assert_eq!(id_batches(&few).count(), 1);
    }

    #[tokio::test]
    async fn loads_beyond_bind_parameter_limit() {
        let pool = testing::pool().await;
        sqlx::query(
            r#"
            WITH RECURSIVE n(i) AS (
                SELECT 1 UNION ALL SELECT i + 1 FROM n WHERE i < 40000
            )
            INSERT INTO playlists (title) SELECT 'Playlist ' || i FROM n
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        let a = artist(&pool, "A").await;
        let zebra = song(&pool, "Zebra", a).await;
        let apple = song(&pool, "Apple", a).await;
        let repo = PlaylistRepo::new(&pool);
        // First and last playlists fall into different batches
        for playlist_id in [1, 40_000] {
            repo.add_song(playlist_id, zebra).await.unwrap();
            repo.add_song(playlist_id, apple).await.unwrap();
        }

        let loaded = repo.list_with_sorted_songs().await.unwrap();

        assert_eq!(loaded.len(), 40_000);
        assert_eq!(titles(&loaded[0]), vec!["Apple", "Zebra"]);
        assert_eq!(titles(&loaded[39_999]), vec!["Apple", "Zebra"]);
        let with_songs = loaded.iter().filter(|p| !p.sorted_songs.is_empty()).count();
        assert_eq!(with_songs, 2);
    }

    #[tokio::test]
    async fn get_single_playlist() {
        let pool = testing::pool().await;
        let created = playlist(&pool, "Solo").await;
        let repo = PlaylistRepo::new(&pool);

        assert_eq!(repo.get(created.id).await.unwrap(), created);
        assert!(matches!(
            repo.get(created.id + 1).await.unwrap_err(),
            DbError::NotFound { resource: "playlist", .. }
        ));
    }

    #[tokio::test]
    async fn add_song_is_idempotent() {
        let pool = testing::pool().await;
        let a = artist(&pool, "A").await;
        let s = song(&pool, "Once", a).await;
        let p = playlist(&pool, "Repeat").await;
        let repo = PlaylistRepo::new(&pool);

        repo.add_song(p.id, s).await.unwrap();
        repo.add_song(p.id, s).await.unwrap();

        let loaded = repo.list_with_sorted_songs().await.unwrap();
        assert_eq!(titles(&loaded[0]), vec!["Once"]);
    }

    #[tokio::test]
    async fn add_unknown_song_is_not_found() {
        let pool = testing::pool().await;
        let p = playlist(&pool, "Ghosts").await;

        let err = PlaylistRepo::new(&pool).add_song(p.id, 404).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
