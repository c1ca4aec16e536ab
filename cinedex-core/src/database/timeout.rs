use std::future::Future;
use std::time::Duration;

use crate::error::{CatalogError, Result};

/// Runs a single storage call under `limit`.
///
/// Expiry drops the in-flight future and surfaces [`CatalogError::Timeout`]
/// tagged with `operation`; sibling calls are unaffected.
pub async fn bounded<T, F>(
    operation: &'static str,
    limit: Duration,
    fut: F,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(CatalogError::Timeout {
            operation,
            after: limit,
        }),
    }
}
