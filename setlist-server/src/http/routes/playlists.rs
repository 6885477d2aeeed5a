//! Playlist endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::db::repos::{PlaylistRepo, PlaylistWithSongs};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET /playlists - every playlist with its title-sorted songs
async fn list_playlists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PlaylistWithSongs>>, ApiError> {
    let playlists = PlaylistRepo::new(&state.pool).list_with_sorted_songs().await?;
    Ok(Json(playlists))
}

/// GET /playlists/{id} - a single playlist with its title-sorted songs
async fn get_playlist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<PlaylistWithSongs>, ApiError> {
    let repo = PlaylistRepo::new(&state.pool);
    let playlist = repo.get(id).await?;
    let loaded = repo
        .eager_load_sorted_songs(vec![playlist])
        .await?
        .pop()
        .ok_or_else(|| ApiError::NotFound {
            resource: "playlist",
            id: id.to_string(),
        })?;

    Ok(Json(loaded))
}

/// Playlist routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/playlists", get(list_playlists))
        .route("/playlists/{id}", get(get_playlist))
}
