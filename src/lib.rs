pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use config::Config;
use db::DailyStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DailyStore>,
    pub config: Arc<Config>,
}

/// All JSON endpoints. Static files and middleware are layered on by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::metrics::metrics_handler))
        // Public site data
        .route("/api/menu", get(routes::menu::get_menu))
        .route("/api/status", get(routes::status::get_status))
        .route("/api/info", get(routes::info::get_info))
        // Daily state
        .route("/api/daily", get(routes::daily::get_daily))
        .route("/api/daily/tagesgericht", post(routes::daily::set_special))
        .route("/api/daily/hinweis", post(routes::daily::set_notice))
        .route("/api/daily/oeffnungszeiten", post(routes::daily::set_override))
        .route("/api/daily/reset", post(routes::daily::reset))
        .route("/api/daily/selection", get(routes::daily::get_selection).post(routes::daily::set_selection))
        // Recurring opening hours
        .route("/api/daily/zeiten", get(routes::schedule::get_schedule).post(routes::schedule::set_day))
        .route("/api/daily/zeiten/bereich", post(routes::schedule::set_range))
        .route("/api/daily/zeiten/pending", get(routes::schedule::get_pending).post(routes::schedule::set_pending))
        .route("/api/daily/zeiten/apply", post(routes::schedule::apply_pending))
        // Dishes and weekly plan
        .route("/api/daily/gerichte", get(routes::plan::list_dishes))
        .route("/api/daily/wochenplan", get(routes::plan::get_plan).post(routes::plan::set_plan))
        .route("/api/daily/wochenplan/tag", post(routes::plan::set_plan_day))
        .route("/api/daily/wochenplan/deaktivieren", post(routes::plan::deactivate_plan))
        .route("/api/daily/heute", get(routes::plan::get_today))
        .with_state(state)
}
