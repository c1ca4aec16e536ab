use async_trait::async_trait;

use crate::Result;
use cinedex_model::{Genre, GenreID};

#[async_trait]
pub trait GenreReadRepository: Send + Sync {
    async fn read_genre_by_id(&self, id: GenreID) -> Result<Genre>;

    /// Every genre, ascending by name.
    async fn read_all_genres(&self) -> Result<Vec<Genre>>;
}
