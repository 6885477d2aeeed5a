//! Readiness endpoint: reports whether the catalogue database answers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Readiness report
#[derive(Debug, Serialize)]
pub struct Readiness {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// GET /health - 200 when the pool serves a trivial query, 503 otherwise
async fn readiness(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Readiness>) {
    let probe: Result<(i64,), sqlx::Error> =
        sqlx::query_as("SELECT 1").fetch_one(&state.pool).await;

    let (status, report) = match probe {
        Ok(_) => (StatusCode::OK, ("ok", "ok")),
        Err(e) => {
            tracing::warn!("readiness check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, ("degraded", "unavailable"))
        }
    };

    (
        status,
        Json(Readiness {
            status: report.0,
            database: report.1,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(readiness))
}
