use axum::extract::{Path, State};
use cinedex_model::{Genre, GenreID};

use crate::{
    AppState, errors::AppResult, handlers::parse_id, infra::envelope::Envelope,
};

pub async fn list_genres_handler(
    State(state): State<AppState>,
) -> AppResult<Envelope<Vec<Genre>>> {
    let genres = state.catalog.get_all_genres().await?;
    Ok(Envelope::ok("genres", genres))
}

pub async fn get_genre_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Envelope<Genre>> {
    let id: GenreID = parse_id(&raw_id)?;
    let genre = state.catalog.get_genre_by_id(id).await?;
    Ok(Envelope::ok("genre", genre))
}
