use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{
    db::read_state,
    error::ApiError,
    extract::ApiJson,
    models::{
        pending::{ApplyPendingRequest, PendingTimeInput, SetPendingRequest},
        schedule::{SetDayRequest, SetRangeRequest},
    },
    routes::with_store,
    services::{auth::authorize, daily::DailyService, local_now, metrics::record},
    AppState,
};

/// GET /api/daily/zeiten — recurring hours, falling back to the built-in week.
pub async fn get_schedule(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let daily = with_store(&state, |state| Ok(read_state(state.store.as_ref()))).await?;
    Ok(Json(json!({
        "weeklySchedule": daily.schedule_or_default(),
        "isDefault": daily.weekly_schedule.is_none(),
    })))
}

/// POST /api/daily/zeiten — hours of one weekday.
pub async fn set_day(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SetDayRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = with_store(&state, move |state| {
        authorize(&body.secret, &state.config.bot_secret)?;
        DailyService::set_day(state.store.as_ref(), &body.day, &body.hours, local_now())
    })
    .await;
    let (day, schedule) = record("zeiten", result)?;
    Ok(Json(json!({ "success": true, "day": day, "weeklySchedule": schedule })))
}

/// POST /api/daily/zeiten/bereich — same hours for an inclusive weekday range.
pub async fn set_range(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SetRangeRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = with_store(&state, move |state| {
        authorize(&body.secret, &state.config.bot_secret)?;
        DailyService::set_range(
            state.store.as_ref(),
            &body.start_day,
            &body.end_day,
            &body.hours,
            local_now(),
        )
    })
    .await;
    let (days, schedule) = record("zeiten_bereich", result)?;
    Ok(Json(json!({ "success": true, "days": days, "weeklySchedule": schedule })))
}

/// GET /api/daily/zeiten/pending
pub async fn get_pending(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let daily = with_store(&state, |state| Ok(read_state(state.store.as_ref()))).await?;
    Ok(Json(json!({ "pending": daily.pending_time_input })))
}

/// POST /api/daily/zeiten/pending — remember which day(s) the bot asked hours for.
pub async fn set_pending(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SetPendingRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = with_store(&state, move |state| update_pending(&state, body)).await;
    let pending = record("zeiten_pending", result)?;
    Ok(Json(json!({ "success": true, "pending": pending })))
}

fn update_pending(
    state: &AppState,
    body: SetPendingRequest,
) -> Result<Option<PendingTimeInput>, ApiError> {
    authorize(&body.secret, &state.config.bot_secret)?;
    if body.clear {
        DailyService::clear_pending(state.store.as_ref())?;
        return Ok(None);
    }
    let conversation_id = body
        .conversation_id
        .ok_or_else(|| ApiError::bad_request("conversationId fehlt"))?;
    let kind = body
        .kind
        .ok_or_else(|| ApiError::bad_request("kind fehlt (single oder range)"))?;
    let pending = DailyService::set_pending(
        state.store.as_ref(),
        conversation_id,
        kind,
        body.day,
        body.start_day,
        body.end_day,
        local_now(),
    )?;
    Ok(Some(pending))
}

/// POST /api/daily/zeiten/apply — answer the pending question with "HH:MM-HH:MM".
pub async fn apply_pending(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ApplyPendingRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = with_store(&state, move |state| {
        authorize(&body.secret, &state.config.bot_secret)?;
        DailyService::apply_pending(
            state.store.as_ref(),
            &body.conversation_id,
            &body.text,
            local_now(),
        )
    })
    .await;
    let (days, from, to, schedule) = record("zeiten_apply", result)?;
    Ok(Json(json!({
        "success": true,
        "days": days,
        "from": from,
        "to": to,
        "weeklySchedule": schedule,
    })))
}
