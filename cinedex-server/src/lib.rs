//! # Cinedex Server
//!
//! Axum front end for the Cinedex movie catalog. Every response body is a
//! JSON envelope `{"<wrapper>": payload}`; errors use
//! `{"error": {"message", "status"}}`.

pub mod errors;
pub mod handlers;
pub mod infra;
pub mod routes;

use std::time::Duration;

use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, warn};

use crate::errors::AppError;

pub use infra::app_state::AppState;

/// Outer bound on producing a response.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub fn create_app(state: AppState) -> Router {
    let cors_layer = infra::cors::cors_layer(state.config());

    routes::create_api_router()
        .fallback(handlers::system::not_found_handler)
        // Outer to inner: CORS, tracing, request timeout
        .layer(middleware::from_fn(request_timeout))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer)
        .with_state(state)
}

/// Bounds the whole handler, including every catalog read it issues.
/// Expiry is answered with a 504 error envelope.
async fn request_timeout(request: Request, next: Next) -> Response {
    let uri = request.uri().clone();
    match tokio::time::timeout(REQUEST_TIMEOUT, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(
                %uri,
                limit_ms = REQUEST_TIMEOUT.as_millis() as u64,
                "request timed out"
            );
            AppError::gateway_timeout(format!(
                "request did not complete within {}s",
                REQUEST_TIMEOUT.as_secs()
            ))
            .into_response()
        }
    }
}
