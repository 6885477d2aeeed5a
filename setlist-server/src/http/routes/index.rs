//! Root listing endpoint
//!
//! Walks every playlist's title-sorted songs and their artists, then
//! answers with a fixed `200 success` whatever the catalogue holds.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::any, Router};

use crate::db::repos::PlaylistRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// ANY / - walk all playlists and their sorted songs
async fn index(State(state): State<Arc<AppState>>) -> Result<(StatusCode, &'static str), ApiError> {
    let playlists = PlaylistRepo::new(&state.pool).list_with_sorted_songs().await?;

    for entry in &playlists {
        for song in &entry.sorted_songs {
            tracing::debug!(
                playlist = %entry.playlist.title,
                song = %song.title,
                artist = %song.artist.name,
                "listing song"
            );
        }
    }

    Ok((StatusCode::OK, "success"))
}

/// Root route, any method
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", any(index))
}
