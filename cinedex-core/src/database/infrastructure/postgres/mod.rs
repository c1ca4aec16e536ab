pub mod repositories;

pub use repositories::{
    PostgresGenreRepository, PostgresMovieGenreRepository,
    PostgresMovieRepository,
};
