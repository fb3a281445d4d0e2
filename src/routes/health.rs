use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{routes::with_store, AppState};

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let loaded = with_store(&state, |state| Ok(state.store.load())).await;
    match loaded {
        Ok(Ok(Some(_))) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "store": "readable" })),
        ),
        Ok(Ok(None)) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "store": "empty" })),
        ),
        Ok(Err(e)) => unavailable(format!("{e:#}")),
        Err(e) => unavailable(e.to_string()),
    }
}

fn unavailable(reason: String) -> (StatusCode, Json<Value>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "status": "error", "store": reason })),
    )
}
