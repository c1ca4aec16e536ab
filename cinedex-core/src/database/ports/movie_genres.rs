use async_trait::async_trait;

use crate::Result;
use cinedex_model::{GenreNames, MovieID};

#[async_trait]
pub trait MovieGenreRepository: Send + Sync {
    /// Genre names for one movie keyed by association row id.
    ///
    /// Associations whose genre row no longer exists stay in the map with an
    /// empty name. A movie without associations yields an empty map.
    async fn resolve_genres_for_movie(
        &self,
        movie_id: MovieID,
    ) -> Result<GenreNames>;
}
