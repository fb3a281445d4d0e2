pub mod daily;
pub mod health;
pub mod info;
pub mod menu;
pub mod metrics;
pub mod plan;
pub mod schedule;
pub mod status;

use crate::{error::ApiError, AppState};

/// Runs store work on the blocking pool; `FileStore` does synchronous file IO.
pub(crate) async fn with_store<T, F>(state: &AppState, work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(AppState) -> Result<T, ApiError> + Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || work(state))
        .await
        .map_err(|e| ApiError::Internal(e.into()))?
}
