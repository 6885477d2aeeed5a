//! Artist endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::delete,
    Router,
};

use crate::db::repos::ArtistRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// DELETE /artists/{id} - refused with 409 while songs reference the artist
async fn delete_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    ArtistRepo::new(&state.pool).delete(id).await?;
    tracing::info!(artist_id = id, "artist deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Artist routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/artists/{id}", delete(delete_artist))
}
