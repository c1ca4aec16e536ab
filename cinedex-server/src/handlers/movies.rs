use axum::{
    body::Bytes,
    extract::{Path, State},
};
use cinedex_model::{GenreID, Movie, MovieID, MoviesByGenre};
use tracing::info;

use crate::{
    AppState,
    errors::{AppError, AppResult},
    handlers::parse_id,
    infra::envelope::Envelope,
};

pub async fn list_movies_handler(
    State(state): State<AppState>,
) -> AppResult<Envelope<Vec<Movie>>> {
    let movies = state.catalog.get_all_movies(None).await?;
    Ok(Envelope::ok("movies", movies))
}

pub async fn get_movie_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Envelope<Movie>> {
    let id: MovieID = parse_id(&raw_id)?;
    let movie = state.catalog.get_movie_by_id(id).await?;
    Ok(Envelope::ok("movie", movie))
}

pub async fn movies_by_genre_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Envelope<MoviesByGenre>> {
    let id: GenreID = parse_id(&raw_id)?;
    let result = state.catalog.movies_by_genre(id).await?;
    Ok(Envelope::ok("movies_by_genre", result))
}

/// Decodes a movie and echoes it back. Nothing is persisted.
pub async fn edit_movie_handler(body: Bytes) -> AppResult<Envelope<Movie>> {
    let movie: Movie = serde_json::from_slice(&body)
        .map_err(|err| AppError::bad_request(err.to_string()))?;

    info!(movie_id = %movie.id, title = %movie.title, "edit request received");
    Ok(Envelope::ok("response", movie))
}
