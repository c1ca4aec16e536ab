use async_trait::async_trait;

use crate::Result;
use cinedex_model::{GenreID, Movie, MovieID};

#[async_trait]
pub trait MovieReadRepository: Send + Sync {
    /// Fails with `NotFound` when no row has this id. The returned movie
    /// carries an empty genre map.
    async fn read_movie_by_id(&self, id: MovieID) -> Result<Movie>;

    /// All movies, or only those linked to `genre` when a filter is given.
    /// No match is an empty vector, never an error.
    async fn read_all_movies(
        &self,
        genre: Option<GenreID>,
    ) -> Result<Vec<Movie>>;
}
