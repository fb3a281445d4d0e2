use axum::{extract::State, Json};

use crate::{
    db::read_state,
    error::ApiError,
    models::status::Status,
    routes::with_store,
    services::{
        local_now,
        metrics::STATUS_REQUESTS_COUNTER,
        schedule::{compute_status, effective_schedule},
    },
    AppState,
};

/// GET /api/status — live open/closed status, today's override included.
pub async fn get_status(State(state): State<AppState>) -> Result<Json<Status>, ApiError> {
    let daily = with_store(&state, |state| Ok(read_state(state.store.as_ref()))).await?;
    let now = local_now();
    let schedule = effective_schedule(&daily, now.date_naive());
    let status = compute_status(&schedule, now.naive_local());

    STATUS_REQUESTS_COUNTER
        .with_label_values(&[if status.is_open { "true" } else { "false" }])
        .inc();
    Ok(Json(status))
}
