use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use crate::database::infrastructure::postgres::{
    PostgresGenreRepository, PostgresMovieGenreRepository,
    PostgresMovieRepository,
};
use crate::database::ports::{
    genres::GenreReadRepository, movie_genres::MovieGenreRepository,
    movies::MovieReadRepository,
};
use crate::database::postgres::PostgresDatabase;

/// The set of storage components the catalog service reads through.
///
/// All three share one database handle when built from Postgres; tests wire
/// in-memory implementations instead.
#[derive(Clone)]
pub struct CatalogUnitOfWork {
    pub movies: Arc<dyn MovieReadRepository>,
    pub genres: Arc<dyn GenreReadRepository>,
    pub movie_genres: Arc<dyn MovieGenreRepository>,
}

impl fmt::Debug for CatalogUnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogUnitOfWork")
            .field("movies", &type_name_of_val(self.movies.as_ref()))
            .field("genres", &type_name_of_val(self.genres.as_ref()))
            .field(
                "movie_genres",
                &type_name_of_val(self.movie_genres.as_ref()),
            )
            .finish()
    }
}

impl CatalogUnitOfWork {
    pub fn new(
        movies: Arc<dyn MovieReadRepository>,
        genres: Arc<dyn GenreReadRepository>,
        movie_genres: Arc<dyn MovieGenreRepository>,
    ) -> Self {
        Self {
            movies,
            genres,
            movie_genres,
        }
    }

    pub fn from_postgres(db: &PostgresDatabase) -> Self {
        Self::new(
            Arc::new(PostgresMovieRepository::new(db)),
            Arc::new(PostgresGenreRepository::new(db)),
            Arc::new(PostgresMovieGenreRepository::new(db)),
        )
    }
}
