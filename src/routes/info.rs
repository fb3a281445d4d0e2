use axum::Json;

use crate::models::info::{RestaurantInfo, RESTAURANT_INFO};

/// GET /api/info
pub async fn get_info() -> Json<RestaurantInfo> {
    Json(RESTAURANT_INFO)
}
