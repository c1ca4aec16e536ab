use std::collections::BTreeMap;

use crate::chrono::{DateTime, NaiveDate, Utc};
use crate::ids::{MovieGenreID, MovieID};

/// Genre names attached to a movie, keyed by the association row that links
/// them. A dangling association maps to an empty name.
pub type GenreNames = BTreeMap<MovieGenreID, String>;

/// A movie as stored in the catalog.
///
/// Readers hand out movies with an empty `genres` map; the catalog service
/// fills it in before the value leaves the core.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Movie {
    pub id: MovieID,
    pub title: String,
    pub description: String,
    pub year: i32,
    pub release_date: NaiveDate,
    pub rating: f64,
    /// Runtime in minutes
    pub runtime: i32,
    pub mpaa_rating: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub genres: GenreNames,
}

impl Movie {
    pub fn with_genres(mut self, genres: GenreNames) -> Self {
        self.genres = genres;
        self
    }

    pub fn genre_names(&self) -> impl Iterator<Item = &str> {
        self.genres.values().map(String::as_str)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn genres_serialize_with_association_ids_as_keys() {
        let mut genres = GenreNames::new();
        genres.insert(MovieGenreID(11), "Sci-Fi".to_string());
        genres.insert(MovieGenreID(12), "Thriller".to_string());

        let movie = Movie {
            id: MovieID(5),
            title: "Inception".into(),
            ..Default::default()
        }
        .with_genres(genres);

        let value = serde_json::to_value(&movie).unwrap();
        assert_eq!(value["id"], json!(5));
        assert_eq!(
            value["genres"],
            json!({ "11": "Sci-Fi", "12": "Thriller" })
        );
        assert_eq!(value["release_date"], json!("1970-01-01"));
    }

    #[test]
    fn partial_payload_fills_missing_fields_with_defaults() {
        let movie: Movie = serde_json::from_value(json!({
            "id": 3,
            "title": "Heat",
            "genres": { "4": "Crime" }
        }))
        .unwrap();

        assert_eq!(movie.id, MovieID(3));
        assert_eq!(movie.runtime, 0);
        assert_eq!(movie.genre_names().collect::<Vec<_>>(), vec!["Crime"]);
    }
}
