//! Command implementations for the setlist CLI

pub mod migrate;
pub mod serve;

pub use migrate::run_migrate;
pub use serve::run_serve;

/// Default database location when neither flag nor environment set one
pub const DEFAULT_DATABASE_URL: &str = "sqlite://setlist.db";
