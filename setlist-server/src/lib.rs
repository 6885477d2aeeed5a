//! setlist-server: HTTP server over an artist/song/playlist catalogue
//!
//! Stores three related record types in SQLite and serves listings that
//! batch-load each playlist's songs (sorted by title, artist joined in)
//! instead of querying once per row.

pub mod db;
pub mod http;
pub mod models;

pub use db::create_pool;
pub use http::{build_router, run_server, ServerConfig, ServerError};
