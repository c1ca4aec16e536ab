use std::sync::Arc;

use tracing::{debug, instrument};

use crate::Result;
use crate::application::CatalogUnitOfWork;
use crate::database::ports::{
    genres::GenreReadRepository, movie_genres::MovieGenreRepository,
    movies::MovieReadRepository,
};
use cinedex_model::{Genre, GenreID, Movie, MovieID, MoviesByGenre};

/// Read-side facade over movies, genres and their associations.
///
/// Holds no state between calls. Every operation either returns a complete
/// result or the first error any of its queries produced.
#[derive(Clone)]
pub struct CatalogService {
    movies: Arc<dyn MovieReadRepository>,
    genres: Arc<dyn GenreReadRepository>,
    movie_genres: Arc<dyn MovieGenreRepository>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("movies_repo", &Arc::strong_count(&self.movies))
            .field("genres_repo", &Arc::strong_count(&self.genres))
            .field("movie_genres_repo", &Arc::strong_count(&self.movie_genres))
            .finish()
    }
}

impl CatalogService {
    pub fn new(unit_of_work: &CatalogUnitOfWork) -> Self {
        Self {
            movies: Arc::clone(&unit_of_work.movies),
            genres: Arc::clone(&unit_of_work.genres),
            movie_genres: Arc::clone(&unit_of_work.movie_genres),
        }
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn get_movie_by_id(&self, id: MovieID) -> Result<Movie> {
        let movie = self.movies.read_movie_by_id(id).await?;
        self.attach_genres(movie).await
    }

    /// Movies in id order, optionally restricted to one genre. Genres are
    /// resolved one movie at a time.
    #[instrument(skip(self), level = "debug")]
    pub async fn get_all_movies(
        &self,
        genre: Option<GenreID>,
    ) -> Result<Vec<Movie>> {
        let movies = self.movies.read_all_movies(genre).await?;

        let mut populated = Vec::with_capacity(movies.len());
        for movie in movies {
            populated.push(self.attach_genres(movie).await?);
        }

        debug!(count = populated.len(), "movies listed");
        Ok(populated)
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn get_genre_by_id(&self, id: GenreID) -> Result<Genre> {
        self.genres.read_genre_by_id(id).await
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn get_all_genres(&self) -> Result<Vec<Genre>> {
        self.genres.read_all_genres().await
    }

    /// The genre plus every movie linked to it. Only a missing genre is
    /// `NotFound`; a genre without movies yields an empty list.
    #[instrument(skip(self), level = "debug")]
    pub async fn movies_by_genre(&self, id: GenreID) -> Result<MoviesByGenre> {
        let genre = self.genres.read_genre_by_id(id).await?;
        let movies = self.get_all_movies(Some(id)).await?;

        Ok(MoviesByGenre { movies, genre })
    }

    async fn attach_genres(&self, movie: Movie) -> Result<Movie> {
        let genres = self.movie_genres.resolve_genres_for_movie(movie.id).await?;
        Ok(movie.with_genres(genres))
    }
}
