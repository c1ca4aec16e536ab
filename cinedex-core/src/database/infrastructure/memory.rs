//! In-memory catalog used by unit tests and the server's HTTP tests.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::CatalogUnitOfWork;
use crate::database::ports::{
    genres::GenreReadRepository, movie_genres::MovieGenreRepository,
    movies::MovieReadRepository,
};
use crate::{CatalogError, Result};
use cinedex_model::{
    Genre, GenreID, GenreNames, Movie, MovieGenreID, MovieID,
};

#[derive(Debug, Clone, Copy)]
struct Association {
    movie_id: MovieID,
    genre_id: GenreID,
}

/// Fixed catalog contents that implement every read port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    movies: BTreeMap<MovieID, Movie>,
    genres: BTreeMap<GenreID, Genre>,
    associations: BTreeMap<MovieGenreID, Association>,
    failing_lookups: HashSet<MovieID>,
    lookup_latency: Option<Duration>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genre(mut self, id: i32, name: &str) -> Self {
        let id = GenreID(id);
        self.genres.insert(
            id,
            Genre {
                id,
                name: name.to_string(),
                ..Genre::default()
            },
        );
        self
    }

    /// Stored as given, minus any genres; those come from [`Self::link`].
    pub fn with_movie(mut self, movie: Movie) -> Self {
        let movie = movie.with_genres(GenreNames::new());
        self.movies.insert(movie.id, movie);
        self
    }

    pub fn with_movie_titled(self, id: i32, title: &str) -> Self {
        self.with_movie(Movie {
            id: MovieID(id),
            title: title.to_string(),
            ..Movie::default()
        })
    }

    /// Adds an association row. `genre_id` need not name an existing genre.
    pub fn link(mut self, association: i32, movie: i32, genre: i32) -> Self {
        self.associations.insert(
            MovieGenreID(association),
            Association {
                movie_id: MovieID(movie),
                genre_id: GenreID(genre),
            },
        );
        self
    }

    /// Makes genre resolution for `movie` fail as if the query timed out.
    pub fn failing_genre_lookup_for(mut self, movie: i32) -> Self {
        self.failing_lookups.insert(MovieID(movie));
        self
    }

    /// Every genre resolution sleeps for `latency` before answering.
    pub fn with_lookup_latency(mut self, latency: Duration) -> Self {
        self.lookup_latency = Some(latency);
        self
    }

    pub fn into_unit_of_work(self) -> CatalogUnitOfWork {
        let shared = Arc::new(self);
        CatalogUnitOfWork::new(shared.clone(), shared.clone(), shared)
    }
}

#[async_trait]
impl MovieReadRepository for InMemoryCatalog {
    async fn read_movie_by_id(&self, id: MovieID) -> Result<Movie> {
        self.movies
            .get(&id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(format!("movie {id}")))
    }

    async fn read_all_movies(
        &self,
        genre: Option<GenreID>,
    ) -> Result<Vec<Movie>> {
        let linked: Option<HashSet<MovieID>> = genre.map(|genre_id| {
            self.associations
                .values()
                .filter(|a| a.genre_id == genre_id)
                .map(|a| a.movie_id)
                .collect()
        });

        Ok(self
            .movies
            .values()
            .filter(|m| linked.as_ref().is_none_or(|ids| ids.contains(&m.id)))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl GenreReadRepository for InMemoryCatalog {
    async fn read_genre_by_id(&self, id: GenreID) -> Result<Genre> {
        self.genres
            .get(&id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(format!("genre {id}")))
    }

    async fn read_all_genres(&self) -> Result<Vec<Genre>> {
        let mut genres: Vec<Genre> = self.genres.values().cloned().collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(genres)
    }
}

#[async_trait]
impl MovieGenreRepository for InMemoryCatalog {
    async fn resolve_genres_for_movie(
        &self,
        movie_id: MovieID,
    ) -> Result<GenreNames> {
        if let Some(latency) = self.lookup_latency {
            tokio::time::sleep(latency).await;
        }
        if self.failing_lookups.contains(&movie_id) {
            return Err(CatalogError::Timeout {
                operation: "resolve_genres_for_movie",
                after: Duration::from_secs(3),
            });
        }

        Ok(self
            .associations
            .iter()
            .filter(|(_, a)| a.movie_id == movie_id)
            .map(|(id, a)| {
                let name = self
                    .genres
                    .get(&a.genre_id)
                    .map(|g| g.name.clone())
                    .unwrap_or_default();
                (*id, name)
            })
            .collect())
    }
}
