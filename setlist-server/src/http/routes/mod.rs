//! Route handlers organized by resource

pub mod artists;
pub mod health;
pub mod index;
pub mod playlists;
