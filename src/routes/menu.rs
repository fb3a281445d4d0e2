use axum::{extract::Query, Json};
use serde_json::{json, Value};

use crate::models::menu::{season_items, MenuQuery, SUMMER_MENU, WINTER_MENU};

/// GET /api/menu?season=winter|summer
pub async fn get_menu(Query(params): Query<MenuQuery>) -> Json<Value> {
    if let Some(season) = params.season.as_deref() {
        if let Some(items) = season_items(season) {
            return Json(json!({ "season": season, "items": items }));
        }
    }

    Json(json!({ "winter": WINTER_MENU, "summer": SUMMER_MENU }))
}
