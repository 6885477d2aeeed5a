//! Validated artist names and song/playlist titles

use std::fmt;

use super::ValidationError;

/// Maximum length, in characters, of any name or title column
const MAX_TEXT_LEN: usize = 100;

fn validate(field: &'static str, s: &str) -> Result<String, ValidationError> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_TEXT_LEN,
        });
    }

    Ok(trimmed.to_owned())
}

macro_rules! bounded_text {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            /// Trimmed, non-empty, at most 100 characters.
            pub fn new(s: &str) -> Result<Self, ValidationError> {
                validate($field, s).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

bounded_text!(
    /// Validated artist name
    ///
    /// ```
    /// use setlist_server::models::ArtistName;
    ///
    /// assert!(ArtistName::new("Nina Simone").is_ok());
    /// assert!(ArtistName::new("   ").is_err());
    /// ```
    ArtistName,
    "name"
);

bounded_text!(
    /// Validated song title
    SongTitle,
    "title"
);

bounded_text!(
    /// Validated playlist title
    PlaylistTitle,
    "title"
);
