use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};

use crate::database::ports::movies::MovieReadRepository;
use crate::database::postgres::PostgresDatabase;
use crate::database::timeout::bounded;
use crate::{CatalogError, Result};
use cinedex_model::{GenreID, GenreNames, Movie, MovieID};

// `rating` is cast so integer and numeric columns decode the same way.
const MOVIE_SELECT: &str = r#"
    SELECT
        id, title, description, year, release_date,
        rating::float8 AS rating, runtime, mpaa_rating,
        created_at, updated_at
    FROM movies
"#;

#[derive(Clone, Debug)]
pub struct PostgresMovieRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PostgresMovieRepository {
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
impl MovieReadRepository for PostgresMovieRepository {
    #[instrument(skip(self), level = "debug")]
    async fn read_movie_by_id(&self, id: MovieID) -> Result<Movie> {
        let query = format!("{MOVIE_SELECT} WHERE id = $1");

        let row = bounded("read_movie_by_id", self.query_timeout, async {
            sqlx::query_as::<_, MovieRow>(&query)
                .bind(id)
                .fetch_optional(self.pool())
                .await
                .map_err(CatalogError::from)
        })
        .await?;

        row.map(Movie::from)
            .ok_or_else(|| CatalogError::not_found(format!("movie {id}")))
    }

    #[instrument(skip(self), level = "debug")]
    async fn read_all_movies(
        &self,
        genre: Option<GenreID>,
    ) -> Result<Vec<Movie>> {
        let mut builder = QueryBuilder::<Postgres>::new(MOVIE_SELECT);
        if let Some(genre_id) = genre {
            builder
                .push(" WHERE id IN (SELECT movie_id FROM movies_genres WHERE genre_id = ")
                .push_bind(genre_id)
                .push(")");
        }
        builder.push(" ORDER BY id");

        let rows = bounded("read_all_movies", self.query_timeout, async {
            builder
                .build_query_as::<MovieRow>()
                .fetch_all(self.pool())
                .await
                .map_err(CatalogError::from)
        })
        .await?;

        debug!(rows = rows.len(), "movies read");
        Ok(rows.into_iter().map(Movie::from).collect())
    }
}

// Database row type for movies
#[derive(Debug, sqlx::FromRow)]
struct MovieRow {
    id: MovieID,
    title: String,
    description: String,
    year: i32,
    release_date: NaiveDate,
    rating: f64,
    runtime: i32,
    mpaa_rating: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            id: row.id,
            title: row.title,
            description: row.description,
            year: row.year,
            release_date: row.release_date,
            rating: row.rating,
            runtime: row.runtime,
            mpaa_rating: row.mpaa_rating,
            created_at: row.created_at,
            updated_at: row.updated_at,
            genres: GenreNames::new(),
        }
    }
}
