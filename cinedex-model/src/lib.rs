//! Core data model definitions shared across Cinedex crates.
#![allow(missing_docs)]

pub use ::chrono;

pub mod genre;
pub mod ids;
pub mod movie;

pub use genre::{Genre, MoviesByGenre};
pub use ids::{GenreID, MovieGenreID, MovieID};
pub use movie::{GenreNames, Movie};
