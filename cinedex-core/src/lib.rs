//! # Cinedex Core
//!
//! Catalog query layer for the Cinedex movie API: reads movies and genres
//! from PostgreSQL, resolves the many-to-many movie/genre association into a
//! per-movie name lookup and supports genre-filtered listing.
//!
//! ## Feature Flags
//!
//! - `test-utils`: exposes the in-memory catalog for downstream tests
//!
//! ## Architecture
//!
//! - [`database`]: the storage handle, read ports and their implementations
//! - [`application`]: wiring of the ports into a unit of work
//! - [`catalog`]: the public query facade
//! - [`error`]: the error taxonomy returned by every operation
//!
//! ```no_run
//! use cinedex_core::{
//!     CatalogService, CatalogUnitOfWork, MovieID, PoolSettings,
//!     PostgresDatabase,
//! };
//!
//! async fn show(url: &str) -> cinedex_core::Result<()> {
//!     let db = PostgresDatabase::connect(url, &PoolSettings::default()).await?;
//!     let catalog = CatalogService::new(&CatalogUnitOfWork::from_postgres(&db));
//!
//!     let movie = catalog.get_movie_by_id(MovieID(5)).await?;
//!     println!("{} {:?}", movie.title, movie.genres);
//!
//!     db.close().await;
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Port wiring shared by the catalog service
pub mod application;

/// Public catalog operations
pub mod catalog;

/// Storage handle, read ports and repository implementations
pub mod database;

/// Error types returned by catalog operations
pub mod error;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use application::CatalogUnitOfWork;
pub use catalog::CatalogService;
pub use database::{PoolSettings, PoolStats, PostgresDatabase};
pub use error::{CatalogError, Result};

pub use cinedex_model::{
    Genre, GenreID, GenreNames, Movie, MovieGenreID, MovieID, MoviesByGenre,
};

#[cfg(any(test, feature = "test-utils"))]
pub use database::infrastructure::memory::InMemoryCatalog;
