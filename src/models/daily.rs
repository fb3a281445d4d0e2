use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    pending::{PendingSelection, PendingTimeInput},
    plan::{WeeklyPlan, DEFAULT_DISH_POOL},
    schedule::WeeklySchedule,
};

/// The single persisted document. Every field defaults so that documents
/// written by older versions keep loading.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyState {
    #[serde(default)]
    pub todays_special: TodaysSpecial,
    #[serde(default)]
    pub notice: Notice,
    #[serde(default)]
    pub hours_override: HoursOverride,
    #[serde(default)]
    pub weekly_schedule: Option<WeeklySchedule>,
    #[serde(default)]
    pub pending_time_input: Option<PendingTimeInput>,
    #[serde(default)]
    pub pending_selection: Option<PendingSelection>,
    #[serde(default)]
    pub weekly_plan: WeeklyPlan,
    #[serde(default)]
    pub dish_pool: Option<Vec<String>>,
}

impl DailyState {
    /// Stored schedule, or the built-in one when none was ever set.
    pub fn schedule_or_default(&self) -> WeeklySchedule {
        self.weekly_schedule
            .clone()
            .unwrap_or_else(WeeklySchedule::default_hours)
    }

    pub fn dishes(&self) -> Vec<String> {
        match &self.dish_pool {
            Some(pool) => pool.clone(),
            None => DEFAULT_DISH_POOL.iter().map(|d| d.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaysSpecial {
    #[serde(default)]
    pub dish1: String,
    #[serde(default)]
    pub dish2: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    #[default]
    Info,
    Warning,
    Closed,
}

/// Banner shown on the website.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub text: String,
    #[serde(default, alias = "type")]
    pub kind: NoticeKind,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Opening hours for one calendar date. Expires once that date has passed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoursOverride {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body for POST /api/daily/tagesgericht.
#[derive(Debug, Deserialize)]
pub struct SetSpecialRequest {
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub dish1: String,
    #[serde(default)]
    pub dish2: Option<String>,
}

/// Body for POST /api/daily/hinweis.
#[derive(Debug, Deserialize)]
pub struct SetNoticeRequest {
    #[serde(default)]
    pub secret: String,
    pub active: Option<bool>,
    #[serde(default)]
    pub text: String,
    #[serde(default, alias = "type")]
    pub kind: Option<NoticeKind>,
}

/// Body for POST /api/daily/oeffnungszeiten.
#[derive(Debug, Deserialize)]
pub struct SetOverrideRequest {
    #[serde(default)]
    pub secret: String,
    pub date: Option<NaiveDate>,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(default)]
    pub closed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetTarget {
    Notice,
    Override,
    #[default]
    All,
}

/// Body for POST /api/daily/reset.
#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub what: ResetTarget,
}

/// Body for POST /api/daily/wochenplan/deaktivieren and other secret-only calls.
#[derive(Debug, Deserialize)]
pub struct SecretOnly {
    #[serde(default)]
    pub secret: String,
}
