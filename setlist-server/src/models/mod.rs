//! Domain models with validation at construction
//!
//! Names and titles are validated when these types are created.
//! Invalid input returns ValidationError, not panic.

pub mod text;
pub mod validation;

pub use text::{ArtistName, PlaylistTitle, SongTitle};
pub use validation::ValidationError;
