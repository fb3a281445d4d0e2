use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dishes available for plan generation when the document carries no pool.
pub const DEFAULT_DISH_POOL: &[&str] = &[
    "Soljanka 'Original'",
    "Wurstgulasch",
    "Panierte Jägerschnitzel",
    "Tote Oma",
    "Kesselgulasch",
    "Senfeier",
];

/// The two dishes offered on one day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanDay {
    #[serde(default)]
    pub dish1: String,
    #[serde(default)]
    pub dish2: String,
}

/// Weekly dish rotation, keyed by lower-case weekday name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub days: BTreeMap<String, PlanDay>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanMode {
    #[default]
    Random,
    Manual,
}

/// Body for POST /api/daily/wochenplan.
#[derive(Debug, Deserialize)]
pub struct SetPlanRequest {
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub mode: PlanMode,
    pub days: Option<BTreeMap<String, PlanDay>>,
}

/// Body for POST /api/daily/wochenplan/tag.
#[derive(Debug, Deserialize)]
pub struct SetPlanDayRequest {
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub dish1: String,
    #[serde(default)]
    pub dish2: Option<String>,
}

/// Where the dish of the day came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DishSource {
    Plan,
    Manual,
    RestDay,
}

/// Response of GET /api/daily/heute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaysDish {
    pub source: DishSource,
    pub day: &'static str,
    pub dish1: String,
    pub dish2: String,
    pub rest_day: bool,
}
