use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::database::ports::genres::GenreReadRepository;
use crate::database::postgres::PostgresDatabase;
use crate::database::timeout::bounded;
use crate::{CatalogError, Result};
use cinedex_model::{Genre, GenreID};

#[derive(Clone, Debug)]
pub struct PostgresGenreRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PostgresGenreRepository {
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
impl GenreReadRepository for PostgresGenreRepository {
    #[instrument(skip(self), level = "debug")]
    async fn read_genre_by_id(&self, id: GenreID) -> Result<Genre> {
        let row = bounded("read_genre_by_id", self.query_timeout, async {
            sqlx::query_as::<_, GenreRow>(
                r#"
                SELECT id, genre_name, created_at, updated_at
                FROM genres
                WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(CatalogError::from)
        })
        .await?;

        row.map(Genre::from)
            .ok_or_else(|| CatalogError::not_found(format!("genre {id}")))
    }

    #[instrument(skip(self), level = "debug")]
    async fn read_all_genres(&self) -> Result<Vec<Genre>> {
        let rows = bounded("read_all_genres", self.query_timeout, async {
            sqlx::query_as::<_, GenreRow>(
                r#"
                SELECT id, genre_name, created_at, updated_at
                FROM genres
                ORDER BY genre_name, id
                "#,
            )
            .fetch_all(self.pool())
            .await
            .map_err(CatalogError::from)
        })
        .await?;

        debug!(rows = rows.len(), "genres read");
        Ok(rows.into_iter().map(Genre::from).collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct GenreRow {
    id: GenreID,
    genre_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<GenreRow> for Genre {
    fn from(row: GenreRow) -> Self {
        Genre {
            id: row.id,
            name: row.genre_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
