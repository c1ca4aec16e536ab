pub mod v1;

use axum::{Router, routing::get};

use crate::{AppState, handlers::system};

/// Create the main API router with all versions
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/status", get(system::status_handler))
        .nest("/v1", v1::create_v1_router())
}
