//! Read ports consumed by the catalog service.
//!
//! Each trait maps onto one storage component: the movie and genre entity
//! readers and the association resolver.

pub mod genres;
pub mod movie_genres;
pub mod movies;
