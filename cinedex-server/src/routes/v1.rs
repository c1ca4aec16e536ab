use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState,
    handlers::{genres, movies},
};

pub const MOVIES: &str = "/movies";
pub const MOVIE: &str = "/movies/{id}";
pub const MOVIES_BY_GENRE: &str = "/movies/genres/{id}";
pub const EDIT_MOVIE: &str = "/movies/editmovie";
pub const GENRES: &str = "/genres";
pub const GENRE: &str = "/genres/{id}";

/// Create all v1 API routes
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route(MOVIES, get(movies::list_movies_handler))
        .route(MOVIES_BY_GENRE, get(movies::movies_by_genre_handler))
        .route(EDIT_MOVIE, post(movies::edit_movie_handler))
        .route(MOVIE, get(movies::get_movie_handler))
        .route(GENRES, get(genres::list_genres_handler))
        .route(GENRE, get(genres::get_genre_handler))
}
