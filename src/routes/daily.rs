use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{
    db::read_state,
    error::ApiError,
    extract::ApiJson,
    models::{
        daily::{
            DailyState, ResetRequest, SetNoticeRequest, SetOverrideRequest, SetSpecialRequest,
        },
        pending::{PendingSelection, SetSelectionRequest},
    },
    routes::with_store,
    services::{auth::authorize, daily::DailyService, local_now, metrics::record},
    AppState,
};

/// GET /api/daily — the whole document, stale override expired on the way.
pub async fn get_daily(State(state): State<AppState>) -> Result<Json<DailyState>, ApiError> {
    let daily = with_store(&state, |state| {
        DailyService::fetch(state.store.as_ref(), local_now())
    })
    .await?;
    Ok(Json(daily))
}

/// POST /api/daily/tagesgericht
pub async fn set_special(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SetSpecialRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = with_store(&state, move |state| {
        authorize(&body.secret, &state.config.bot_secret)?;
        DailyService::set_special(
            state.store.as_ref(),
            &body.dish1,
            body.dish2.as_deref(),
            local_now(),
        )
    })
    .await;
    let special = record("tagesgericht", result)?;
    Ok(Json(json!({ "success": true, "todaysSpecial": special })))
}

/// POST /api/daily/hinweis
pub async fn set_notice(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SetNoticeRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = with_store(&state, move |state| {
        authorize(&body.secret, &state.config.bot_secret)?;
        DailyService::set_notice(
            state.store.as_ref(),
            body.active,
            &body.text,
            body.kind,
            local_now(),
        )
    })
    .await;
    let notice = record("hinweis", result)?;
    Ok(Json(json!({ "success": true, "notice": notice })))
}

/// POST /api/daily/oeffnungszeiten — hours for one date only.
pub async fn set_override(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SetOverrideRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = with_store(&state, move |state| {
        authorize(&body.secret, &state.config.bot_secret)?;
        DailyService::set_override(
            state.store.as_ref(),
            body.date,
            body.from.as_deref(),
            body.to.as_deref(),
            body.closed,
            local_now(),
        )
    })
    .await;
    let ov = record("oeffnungszeiten", result)?;
    Ok(Json(json!({ "success": true, "hoursOverride": ov })))
}

/// POST /api/daily/reset
pub async fn reset(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ResetRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = with_store(&state, move |state| {
        authorize(&body.secret, &state.config.bot_secret)?;
        DailyService::reset(state.store.as_ref(), body.what, local_now())
    })
    .await;
    let daily = record("reset", result)?;
    Ok(Json(json!({
        "success": true,
        "notice": daily.notice,
        "hoursOverride": daily.hours_override,
    })))
}

/// GET /api/daily/selection
pub async fn get_selection(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let daily = with_store(&state, |state| Ok(read_state(state.store.as_ref()))).await?;
    Ok(Json(json!({ "selection": daily.pending_selection })))
}

/// POST /api/daily/selection — store or clear the bot's selection dialog state.
pub async fn set_selection(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SetSelectionRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = with_store(&state, move |state| update_selection(&state, body)).await;
    let selection = record("selection", result)?;
    Ok(Json(json!({ "success": true, "selection": selection })))
}

fn update_selection(
    state: &AppState,
    body: SetSelectionRequest,
) -> Result<Option<PendingSelection>, ApiError> {
    authorize(&body.secret, &state.config.bot_secret)?;
    if body.clear {
        DailyService::clear_selection(state.store.as_ref())?;
        return Ok(None);
    }
    let conversation_id = body
        .conversation_id
        .ok_or_else(|| ApiError::bad_request("conversationId fehlt"))?;
    let selection = DailyService::set_selection(
        state.store.as_ref(),
        conversation_id,
        body.step,
        body.data,
        local_now(),
    )?;
    Ok(Some(selection))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{Method, StatusCode};
    use chrono::NaiveDate;
    use serde_json::json;

    use crate::{
        db::{DailyStore, FileStore, MemoryStore},
        models::daily::{DailyState, HoursOverride},
        routes::testing::{app, app_with, send, SECRET},
    };

    #[tokio::test]
    async fn first_read_creates_document() {
        let store = Arc::new(MemoryStore::new());
        let (status, body) = send(app(store.clone()), Method::GET, "/api/daily", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["notice"]["active"], false);
        assert_eq!(body["weeklySchedule"], serde_json::Value::Null);
        assert!(store.raw().unwrap().is_some());
    }

    #[tokio::test]
    async fn yesterdays_override_is_gone_on_next_read() {
        let mut state = DailyState::default();
        state.hours_override = HoursOverride {
            active: true,
            date: NaiveDate::from_ymd_opt(2000, 1, 1),
            closed: true,
            ..Default::default()
        };
        let store = Arc::new(MemoryStore::with_state(&state).unwrap());

        let (_, body) = send(app(store.clone()), Method::GET, "/api/daily", None).await;
        assert_eq!(body["hoursOverride"]["active"], false);
        assert!(!store.load().unwrap().unwrap().hours_override.active);

        let (_, body) = send(app(store), Method::GET, "/api/daily", None).await;
        assert_eq!(body["hoursOverride"]["active"], false);
    }

    #[tokio::test]
    async fn wrong_secret_changes_nothing() {
        let store = Arc::new(MemoryStore::with_state(&DailyState::default()).unwrap());
        let before = store.raw().unwrap();

        let calls = [
            ("/api/daily/tagesgericht", json!({ "secret": "nope", "dish1": "Soljanka" })),
            ("/api/daily/hinweis", json!({ "secret": "nope", "text": "Zu" })),
            ("/api/daily/oeffnungszeiten", json!({ "secret": "nope", "closed": true })),
            ("/api/daily/zeiten", json!({ "secret": "nope", "day": "friday" })),
            ("/api/daily/zeiten/bereich", json!({ "secret": "nope", "startDay": "friday", "endDay": "monday" })),
            ("/api/daily/zeiten/pending", json!({ "secret": "nope", "conversationId": 1, "kind": "single", "day": "friday" })),
            ("/api/daily/zeiten/apply", json!({ "secret": "nope", "conversationId": 1, "text": "9:00-18:00" })),
            ("/api/daily/reset", json!({ "secret": "nope" })),
            ("/api/daily/wochenplan", json!({ "secret": "nope" })),
            ("/api/daily/wochenplan/tag", json!({ "secret": "nope", "day": "friday", "dish1": "A" })),
            ("/api/daily/wochenplan/deaktivieren", json!({})),
            ("/api/daily/selection", json!({ "secret": "nope", "conversationId": "1", "step": "dish" })),
        ];

        for (uri, body) in calls {
            let (status, response) = send(app(store.clone()), Method::POST, uri, Some(body)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
            assert!(response["error"].is_string());
        }
        assert_eq!(store.raw().unwrap(), before);
    }

    #[tokio::test]
    async fn special_and_notice_are_persisted() {
        let store = Arc::new(MemoryStore::new());
        let (status, body) = send(
            app(store.clone()),
            Method::POST,
            "/api/daily/tagesgericht",
            Some(json!({ "secret": SECRET, "dish1": "Soljanka", "dish2": "Senfeier" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["todaysSpecial"]["dish2"], "Senfeier");

        let (_, body) = send(
            app(store.clone()),
            Method::POST,
            "/api/daily/hinweis",
            Some(json!({ "secret": SECRET, "text": "Sturmwarnung", "kind": "warning" })),
        )
        .await;
        assert_eq!(body["notice"]["active"], true);
        assert_eq!(body["notice"]["kind"], "warning");

        let (_, body) = send(app(store), Method::GET, "/api/daily", None).await;
        assert_eq!(body["todaysSpecial"]["dish1"], "Soljanka");
        assert_eq!(body["notice"]["text"], "Sturmwarnung");
    }

    #[tokio::test]
    async fn file_store_is_written_through_the_router() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("daily.json");
        let store: Arc<dyn DailyStore> = Arc::new(FileStore::new(&path));

        let (status, _) = send(
            app_with(store.clone()),
            Method::POST,
            "/api/daily/hinweis",
            Some(json!({ "secret": SECRET, "text": "Heute Fischbrötchen" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(std::fs::read_to_string(&path).unwrap().contains("Heute Fischbrötchen"));

        let (_, body) = send(app_with(store), Method::GET, "/api/daily", None).await;
        assert_eq!(body["notice"]["text"], "Heute Fischbrötchen");
    }

    #[tokio::test]
    async fn selection_round_trip_and_clear() {
        let store = Arc::new(MemoryStore::new());
        let (status, _) = send(
            app(store.clone()),
            Method::POST,
            "/api/daily/selection",
            Some(json!({ "secret": SECRET, "conversationId": 99, "step": "dish2", "data": { "dish1": "Tote Oma" } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(app(store.clone()), Method::GET, "/api/daily/selection", None).await;
        assert_eq!(body["selection"]["conversationId"], "99");
        assert_eq!(body["selection"]["data"]["dish1"], "Tote Oma");

        send(
            app(store.clone()),
            Method::POST,
            "/api/daily/selection",
            Some(json!({ "secret": SECRET, "clear": true })),
        )
        .await;
        let (_, body) = send(app(store), Method::GET, "/api/daily/selection", None).await;
        assert_eq!(body["selection"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn status_reports_open_state() {
        let store = Arc::new(MemoryStore::new());
        let (status, body) = send(app(store), Method::GET, "/api/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["isOpen"].is_boolean());
        assert!(body["todayHours"].is_string());
        assert_eq!(body["openingHours"]["monday"]["open"], false);
    }
}
