use axum::extract::State;
use serde::Serialize;

use crate::{AppState, errors::AppError, infra::envelope::Envelope};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize)]
pub struct ApiStatus {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PoolStatus>,
}

#[derive(Debug, Serialize)]
pub struct PoolStatus {
    pub size: u32,
    pub idle: u32,
    pub max_size: u32,
}

pub async fn status_handler(
    State(state): State<AppState>,
) -> Envelope<ApiStatus> {
    let database = state.postgres.as_ref().map(|db| {
        let stats = db.pool_stats();
        PoolStatus {
            size: stats.size,
            idle: stats.idle,
            max_size: stats.max_size,
        }
    });

    Envelope::ok(
        "api_status",
        ApiStatus {
            status: "Active",
            message: "API is Working",
            version: API_VERSION,
            database,
        },
    )
}

pub async fn not_found_handler() -> AppError {
    AppError::not_found("Not Found, Invalid URL")
}
