pub mod genres;
pub mod movie_genres;
pub mod movies;

pub use genres::PostgresGenreRepository;
pub use movie_genres::PostgresMovieGenreRepository;
pub use movies::PostgresMovieRepository;
