use crate::chrono::{DateTime, Utc};
use crate::ids::GenreID;
use crate::movie::Movie;

/// A genre row. Listings are ordered by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Genre {
    pub id: GenreID,
    #[cfg_attr(feature = "serde", serde(rename = "genre_name"))]
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A genre together with every movie linked to it.
///
/// `movies` may be empty; a missing genre is reported as an error instead.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoviesByGenre {
    pub movies: Vec<Movie>,
    pub genre: Genre,
}
