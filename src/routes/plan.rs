use axum::{extract::State, Json};
use chrono::Datelike;
use serde_json::{json, Value};

use crate::{
    db::read_state,
    error::ApiError,
    extract::ApiJson,
    models::{
        daily::SecretOnly,
        plan::{PlanMode, SetPlanDayRequest, SetPlanRequest, TodaysDish, WeeklyPlan},
    },
    routes::with_store,
    services::{
        auth::authorize,
        local_now,
        metrics::record,
        plan::{todays_dish, PlanService},
    },
    AppState,
};

/// GET /api/daily/gerichte — dishes available for the weekly plan.
pub async fn list_dishes(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let daily = with_store(&state, |state| Ok(read_state(state.store.as_ref()))).await?;
    Ok(Json(json!({ "dishes": daily.dishes() })))
}

/// GET /api/daily/wochenplan
pub async fn get_plan(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let daily = with_store(&state, |state| Ok(read_state(state.store.as_ref()))).await?;
    Ok(Json(json!({ "weeklyPlan": daily.weekly_plan })))
}

/// POST /api/daily/wochenplan — random plan from the dish pool, or the given days.
pub async fn set_plan(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SetPlanRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = with_store(&state, move |state| update_plan(&state, body)).await;
    let plan = record("wochenplan", result)?;
    Ok(Json(json!({ "success": true, "weeklyPlan": plan })))
}

fn update_plan(state: &AppState, body: SetPlanRequest) -> Result<WeeklyPlan, ApiError> {
    authorize(&body.secret, &state.config.bot_secret)?;
    match body.mode {
        PlanMode::Random => {
            PlanService::generate_random(state.store.as_ref(), &mut rand::thread_rng(), local_now())
        }
        PlanMode::Manual => {
            let days = body
                .days
                .ok_or_else(|| ApiError::bad_request("days fehlt für manuellen Wochenplan"))?;
            PlanService::set_manual(state.store.as_ref(), days, local_now())
        }
    }
}

/// POST /api/daily/wochenplan/tag
pub async fn set_plan_day(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SetPlanDayRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = with_store(&state, move |state| {
        authorize(&body.secret, &state.config.bot_secret)?;
        PlanService::set_day(
            state.store.as_ref(),
            &body.day,
            &body.dish1,
            body.dish2.as_deref().unwrap_or_default(),
            local_now(),
        )
    })
    .await;
    let plan = record("wochenplan_tag", result)?;
    Ok(Json(json!({ "success": true, "weeklyPlan": plan })))
}

/// POST /api/daily/wochenplan/deaktivieren
pub async fn deactivate_plan(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SecretOnly>,
) -> Result<Json<Value>, ApiError> {
    let result = with_store(&state, move |state| {
        authorize(&body.secret, &state.config.bot_secret)?;
        PlanService::deactivate(state.store.as_ref(), local_now())
    })
    .await;
    let plan = record("wochenplan_deaktivieren", result)?;
    Ok(Json(json!({ "success": true, "weeklyPlan": plan })))
}

/// GET /api/daily/heute — today's dishes from the active plan or the manual special.
pub async fn get_today(State(state): State<AppState>) -> Result<Json<TodaysDish>, ApiError> {
    let daily = with_store(&state, |state| Ok(read_state(state.store.as_ref()))).await?;
    Ok(Json(todays_dish(&daily, local_now().weekday())))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::{
        db::MemoryStore,
        routes::testing::{app, send, SECRET},
    };

    #[tokio::test]
    async fn default_dish_pool_is_listed() {
        let (_, body) = send(app(Arc::new(MemoryStore::new())), Method::GET, "/api/daily/gerichte", None).await;
        assert_eq!(body["dishes"].as_array().unwrap().len(), 6);
        assert_eq!(body["dishes"][0], "Soljanka 'Original'");
    }

    #[tokio::test]
    async fn random_plan_then_deactivate_keeps_days() {
        let store = Arc::new(MemoryStore::new());
        let (status, body) = send(
            app(store.clone()),
            Method::POST,
            "/api/daily/wochenplan",
            Some(json!({ "secret": SECRET })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["weeklyPlan"]["active"], true);
        assert_eq!(body["weeklyPlan"]["days"].as_object().unwrap().len(), 6);

        let (status, body) = send(
            app(store.clone()),
            Method::POST,
            "/api/daily/wochenplan/deaktivieren",
            Some(json!({ "secret": SECRET })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["weeklyPlan"]["active"], false);

        let (_, body) = send(app(store), Method::GET, "/api/daily/wochenplan", None).await;
        assert_eq!(body["weeklyPlan"]["days"].as_object().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn manual_plan_requires_days() {
        let store = Arc::new(MemoryStore::new());
        let (status, _) = send(
            app(store.clone()),
            Method::POST,
            "/api/daily/wochenplan",
            Some(json!({ "secret": SECRET, "mode": "manual" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let days = json!({ "tuesday": { "dish1": "Senfeier", "dish2": "Wurstgulasch" } });
        let (status, body) = send(
            app(store),
            Method::POST,
            "/api/daily/wochenplan",
            Some(json!({ "secret": SECRET, "mode": "manual", "days": days.clone() })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["weeklyPlan"]["days"], days);
    }

    #[tokio::test]
    async fn plan_day_edit_accepts_any_day_name() {
        let store = Arc::new(MemoryStore::new());
        let (status, body) = send(
            app(store),
            Method::POST,
            "/api/daily/wochenplan/tag",
            Some(json!({ "secret": SECRET, "day": "Samstag", "dish1": "Tote Oma" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["weeklyPlan"]["days"]["samstag"], json!({ "dish1": "Tote Oma", "dish2": "" }));
    }

    #[tokio::test]
    async fn today_falls_back_to_manual_special() {
        let store = Arc::new(MemoryStore::new());
        send(
            app(store.clone()),
            Method::POST,
            "/api/daily/tagesgericht",
            Some(json!({ "secret": SECRET, "dish1": "Kesselgulasch" })),
        )
        .await;

        let (status, body) = send(app(store), Method::GET, "/api/daily/heute", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "manual");
        assert_eq!(body["dish1"], "Kesselgulasch");
        assert_eq!(body["restDay"], false);
    }
}
