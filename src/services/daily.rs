use chrono::{DateTime, FixedOffset, NaiveDate, Utc, Weekday};
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    db::{read_state, DailyStore},
    error::ApiError,
    models::{
        daily::{
            DailyState, HoursOverride, Notice, NoticeKind, ResetTarget, TodaysSpecial,
        },
        pending::{PendingKind, PendingSelection, PendingTimeInput},
        schedule::{day_key, parse_day, DayHours, HoursInput, WeeklySchedule},
    },
    services::{metrics, schedule::parse_time_range},
};

pub const DEFAULT_FROM: &str = "11:00";
pub const DEFAULT_TO: &str = "17:00";

pub fn save(store: &dyn DailyStore, state: &DailyState) -> Result<(), ApiError> {
    store.save(state)?;
    metrics::STORE_WRITES_COUNTER.inc();
    Ok(())
}

/// Load, change and write back the whole document. Nothing is written when
/// `change` fails.
pub fn mutate<T>(
    store: &dyn DailyStore,
    change: impl FnOnce(&mut DailyState) -> Result<T, ApiError>,
) -> Result<T, ApiError> {
    let mut state = read_state(store);
    let out = change(&mut state)?;
    save(store, &state)?;
    Ok(out)
}

/// Validated weekday, or `BadRequest` naming the offending value.
pub fn weekday(name: &str) -> Result<Weekday, ApiError> {
    parse_day(name).ok_or_else(|| ApiError::bad_request(format!("Ungültiger Wochentag: {name}")))
}

/// Weekdays from `start` to `end`, both inclusive, wrapping past Sunday.
pub fn day_range(start: Weekday, end: Weekday) -> Vec<Weekday> {
    let mut days = vec![start];
    let mut day = start;
    while day != end {
        day = day.succ();
        days.push(day);
    }
    days
}

/// Hours a weekday gets from a schedule request.
pub fn hours_from_input(input: &HoursInput) -> DayHours {
    if input.open.unwrap_or(true) {
        DayHours::open(
            input.from.as_deref().unwrap_or(DEFAULT_FROM),
            input.to.as_deref().unwrap_or(DEFAULT_TO),
        )
    } else {
        DayHours::closed(input.reason.clone().filter(|r| !r.is_empty()))
    }
}

fn apply_hours(state: &mut DailyState, days: &[Weekday], hours: &DayHours, now: DateTime<Utc>) {
    let schedule = state
        .weekly_schedule
        .get_or_insert_with(WeeklySchedule::default_hours);
    for day in days {
        *schedule.slot_mut(*day) = Some(hours.clone());
    }
    schedule.updated_at = Some(now);
}

fn keys(days: &[Weekday]) -> Vec<&'static str> {
    days.iter().map(|d| day_key(*d)).collect()
}

/// Deactivates an active override dated other than `today`. Returns whether it changed.
pub fn expire_override(state: &mut DailyState, today: NaiveDate, now: DateTime<Utc>) -> bool {
    let ov = &mut state.hours_override;
    if !ov.active || ov.date == Some(today) {
        return false;
    }
    info!("Hours override for {:?} expired, deactivating", ov.date);
    ov.active = false;
    ov.updated_at = Some(now);
    metrics::OVERRIDE_EXPIRED_COUNTER.inc();
    true
}

/// Put `target` back to the inactive defaults.
pub fn reset_state(state: &mut DailyState, target: ResetTarget, now: DateTime<Utc>) {
    if matches!(target, ResetTarget::Notice | ResetTarget::All) {
        state.notice = Notice {
            updated_at: Some(now),
            ..Default::default()
        };
    }
    if matches!(target, ResetTarget::Override | ResetTarget::All) {
        state.hours_override = HoursOverride {
            updated_at: Some(now),
            ..Default::default()
        };
    }
}

pub struct DailyService;

impl DailyService {
    /// The whole document as the website sees it. Creates the document on
    /// first use and persists the expiry of a stale override.
    pub fn fetch(
        store: &dyn DailyStore,
        now: DateTime<FixedOffset>,
    ) -> Result<DailyState, ApiError> {
        let (mut state, dirty) = match store.load() {
            Ok(Some(state)) => (state, false),
            Ok(None) => {
                info!("No daily document yet, creating defaults");
                (DailyState::default(), true)
            }
            Err(e) => {
                warn!("Daily store unreadable, serving defaults: {:#}", e);
                return Ok(DailyState::default());
            }
        };

        let expired = expire_override(&mut state, now.date_naive(), now.with_timezone(&Utc));
        if dirty || expired {
            save(store, &state)?;
        }
        Ok(state)
    }

    pub fn set_special(
        store: &dyn DailyStore,
        dish1: &str,
        dish2: Option<&str>,
        now: DateTime<FixedOffset>,
    ) -> Result<TodaysSpecial, ApiError> {
        let special = mutate(store, |state| {
            state.todays_special = TodaysSpecial {
                dish1: dish1.to_string(),
                dish2: dish2.unwrap_or_default().to_string(),
                updated_at: Some(now.with_timezone(&Utc)),
            };
            Ok(state.todays_special.clone())
        })?;
        info!("Today's special set: {} / {}", special.dish1, special.dish2);
        Ok(special)
    }

    pub fn set_notice(
        store: &dyn DailyStore,
        active: Option<bool>,
        text: &str,
        kind: Option<NoticeKind>,
        now: DateTime<FixedOffset>,
    ) -> Result<Notice, ApiError> {
        let notice = mutate(store, |state| {
            state.notice = Notice {
                active: active.unwrap_or(true),
                text: text.to_string(),
                kind: kind.unwrap_or_default(),
                updated_at: Some(now.with_timezone(&Utc)),
            };
            Ok(state.notice.clone())
        })?;
        info!("Notice updated (active: {})", notice.active);
        Ok(notice)
    }

    pub fn set_override(
        store: &dyn DailyStore,
        date: Option<NaiveDate>,
        from: Option<&str>,
        to: Option<&str>,
        closed: bool,
        now: DateTime<FixedOffset>,
    ) -> Result<HoursOverride, ApiError> {
        let (from, to) = if closed {
            (None, None)
        } else {
            (
                Some(from.unwrap_or(DEFAULT_FROM).to_string()),
                Some(to.unwrap_or(DEFAULT_TO).to_string()),
            )
        };
        let ov = mutate(store, |state| {
            state.hours_override = HoursOverride {
                active: true,
                date: Some(date.unwrap_or_else(|| now.date_naive())),
                from,
                to,
                closed,
                updated_at: Some(now.with_timezone(&Utc)),
            };
            Ok(state.hours_override.clone())
        })?;
        info!("Hours override set for {:?} (closed: {})", ov.date, ov.closed);
        Ok(ov)
    }

    pub fn set_day(
        store: &dyn DailyStore,
        day: &str,
        input: &HoursInput,
        now: DateTime<FixedOffset>,
    ) -> Result<(&'static str, WeeklySchedule), ApiError> {
        let day = weekday(day)?;
        let hours = hours_from_input(input);
        let schedule = mutate(store, |state| {
            apply_hours(state, &[day], &hours, now.with_timezone(&Utc));
            Ok(state.schedule_or_default())
        })?;
        info!("Weekly schedule for {} set (open: {})", day_key(day), hours.open);
        Ok((day_key(day), schedule))
    }

    pub fn set_range(
        store: &dyn DailyStore,
        start_day: &str,
        end_day: &str,
        input: &HoursInput,
        now: DateTime<FixedOffset>,
    ) -> Result<(Vec<&'static str>, WeeklySchedule), ApiError> {
        let days = day_range(weekday(start_day)?, weekday(end_day)?);
        let hours = hours_from_input(input);
        let schedule = mutate(store, |state| {
            apply_hours(state, &days, &hours, now.with_timezone(&Utc));
            Ok(state.schedule_or_default())
        })?;
        info!("Weekly schedule for {} day(s) set (open: {})", days.len(), hours.open);
        Ok((keys(&days), schedule))
    }

    pub fn set_pending(
        store: &dyn DailyStore,
        conversation_id: String,
        kind: PendingKind,
        day: Option<String>,
        start_day: Option<String>,
        end_day: Option<String>,
        now: DateTime<FixedOffset>,
    ) -> Result<PendingTimeInput, ApiError> {
        mutate(store, |state| {
            let pending = PendingTimeInput {
                conversation_id,
                kind,
                day,
                start_day,
                end_day,
                created_at: Some(now.with_timezone(&Utc)),
            };
            state.pending_time_input = Some(pending.clone());
            Ok(pending)
        })
    }

    pub fn clear_pending(store: &dyn DailyStore) -> Result<(), ApiError> {
        mutate(store, |state| {
            state.pending_time_input = None;
            Ok(())
        })
    }

    /// Answers the pending time question of `conversation_id` with `text`.
    /// Returns the touched weekdays and the parsed times.
    pub fn apply_pending(
        store: &dyn DailyStore,
        conversation_id: &str,
        text: &str,
        now: DateTime<FixedOffset>,
    ) -> Result<(Vec<&'static str>, String, String, WeeklySchedule), ApiError> {
        let (from, to) = parse_time_range(text)
            .ok_or_else(|| ApiError::bad_request("Ungültiges Format, erwartet HH:MM-HH:MM"))?;

        let hours = DayHours::open(from.clone(), to.clone());
        let (days, schedule) = mutate(store, |state| {
            let pending = state
                .pending_time_input
                .as_ref()
                .filter(|p| p.conversation_id == conversation_id)
                .ok_or_else(|| ApiError::bad_request("Keine offene Zeiteingabe für diese Unterhaltung"))?;

            let days = match pending.kind {
                PendingKind::Single => vec![weekday(pending.day.as_deref().unwrap_or_default())?],
                PendingKind::Range => day_range(
                    weekday(pending.start_day.as_deref().unwrap_or_default())?,
                    weekday(pending.end_day.as_deref().unwrap_or_default())?,
                ),
            };

            apply_hours(state, &days, &hours, now.with_timezone(&Utc));
            state.pending_time_input = None;
            Ok((keys(&days), state.schedule_or_default()))
        })?;
        info!("Pending time input applied: {} - {} for {:?}", from, to, days);
        Ok((days, from, to, schedule))
    }

    pub fn set_selection(
        store: &dyn DailyStore,
        conversation_id: String,
        step: String,
        data: Value,
        now: DateTime<FixedOffset>,
    ) -> Result<PendingSelection, ApiError> {
        mutate(store, |state| {
            let selection = PendingSelection {
                conversation_id,
                step,
                data,
                created_at: Some(now.with_timezone(&Utc)),
            };
            state.pending_selection = Some(selection.clone());
            Ok(selection)
        })
    }

    pub fn clear_selection(store: &dyn DailyStore) -> Result<(), ApiError> {
        mutate(store, |state| {
            state.pending_selection = None;
            Ok(())
        })
    }

    pub fn reset(
        store: &dyn DailyStore,
        target: ResetTarget,
        now: DateTime<FixedOffset>,
    ) -> Result<DailyState, ApiError> {
        let state = mutate(store, |state| {
            reset_state(state, target, now.with_timezone(&Utc));
            Ok(state.clone())
        })?;
        info!("Daily state reset ({:?})", target);
        Ok(state)
    }
}
