use serde::Serialize;

use crate::models::schedule::WeeklySchedule;

/// Label used for `todayHours` on a closed day.
pub const REST_DAY_LABEL: &str = "Ruhetag";

/// Live open/closed status served by GET /api/status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub is_open: bool,
    pub current_day: &'static str,
    /// "HH:MM", zero padded.
    pub current_time: String,
    #[serde(rename = "todayHours")]
    pub today_hours_label: String,
    pub closes_at: Option<String>,
    pub next_open: Option<String>,
    #[serde(rename = "openingHours")]
    pub schedule: WeeklySchedule,
}
