use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::database::ports::movie_genres::MovieGenreRepository;
use crate::database::postgres::PostgresDatabase;
use crate::database::timeout::bounded;
use crate::{CatalogError, Result};
use cinedex_model::{GenreID, GenreNames, MovieGenreID, MovieID};

#[derive(Clone, Debug)]
pub struct PostgresMovieGenreRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PostgresMovieGenreRepository {
    pub fn new(db: &PostgresDatabase) -> Self {
        Self {
            pool: db.pool().clone(),
            query_timeout: db.query_timeout(),
        }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MovieGenreRepository for PostgresMovieGenreRepository {
    #[instrument(skip(self), level = "debug")]
    async fn resolve_genres_for_movie(
        &self,
        movie_id: MovieID,
    ) -> Result<GenreNames> {
        // LEFT JOIN keeps associations whose genre row is gone.
        let rows =
            bounded("resolve_genres_for_movie", self.query_timeout, async {
                sqlx::query_as::<_, MovieGenreRow>(
                    r#"
                    SELECT
                        mg.id, mg.movie_id, mg.genre_id,
                        COALESCE(g.genre_name, '') AS genre_name,
                        g.id AS resolved_genre_id
                    FROM movies_genres mg
                    LEFT JOIN genres g ON (mg.genre_id = g.id)
                    WHERE mg.movie_id = $1
                    "#,
                )
                .bind(movie_id)
                .fetch_all(self.pool())
                .await
                .map_err(CatalogError::from)
            })
            .await?;

        let mut genres = GenreNames::new();
        for row in rows {
            if row.resolved_genre_id.is_none() {
                debug!(
                    association_id = %row.id,
                    movie_id = %row.movie_id,
                    genre_id = %row.genre_id,
                    "association references a missing genre"
                );
            }
            genres.insert(row.id, row.genre_name);
        }

        Ok(genres)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MovieGenreRow {
    id: MovieGenreID,
    movie_id: MovieID,
    genre_id: GenreID,
    genre_name: String,
    resolved_genre_id: Option<GenreID>,
}
