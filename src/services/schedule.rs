use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::models::{
    daily::DailyState,
    schedule::{day_key, day_label, DayHours, WeeklySchedule},
    status::{Status, REST_DAY_LABEL},
};

/// Minutes since midnight of an `H:MM` / `HH:MM` string.
pub fn parse_time(value: &str) -> Option<u32> {
    let (h, m) = value.trim().split_once(':')?;
    if !is_digits(h, 1..=2) || !is_digits(m, 2..=2) {
        return None;
    }
    let (h, m): (u32, u32) = (h.parse().ok()?, m.parse().ok()?);
    Some(h * 60 + m)
}

fn is_digits(s: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

/// Splits "9:00-18:00" (hyphen or en dash, optional spaces) into its two times.
/// The times are returned as written.
pub fn parse_time_range(text: &str) -> Option<(String, String)> {
    let (from, to) = text.trim().split_once(['-', '–'])?;
    let (from, to) = (from.trim(), to.trim());
    parse_time(from)?;
    parse_time(to)?;
    Some((from.to_string(), to.to_string()))
}

struct Window<'a> {
    from: u32,
    to: u32,
    from_label: &'a str,
    to_label: &'a str,
}

fn window(hours: &DayHours) -> Option<Window<'_>> {
    if !hours.open {
        return None;
    }
    let (from_label, to_label) = (hours.from.as_deref()?, hours.to.as_deref()?);
    Some(Window {
        from: parse_time(from_label)?,
        to: parse_time(to_label)?,
        from_label,
        to_label,
    })
}

/// Open/closed status of `schedule` at local wall-clock time `now`.
///
/// The opening interval is half open: at the closing minute the business is
/// closed. When closed, the next opening is searched up to a full week ahead;
/// a schedule without any open day yields no `next_open`.
pub fn compute_status(schedule: &WeeklySchedule, now: NaiveDateTime) -> Status {
    let today = now.weekday();
    let minutes = now.hour() * 60 + now.minute();
    let today_window = schedule.get(today).and_then(window);

    let mut is_open = false;
    let mut closes_at = None;
    let mut next_open = None;

    if let Some(w) = &today_window {
        if w.from <= minutes && minutes < w.to {
            is_open = true;
            closes_at = Some(w.to_label.to_string());
        } else if minutes < w.from {
            next_open = Some(w.from_label.to_string());
        }
    }

    if !is_open && next_open.is_none() {
        let mut day = today;
        for _ in 1..=7 {
            day = day.succ();
            if let Some(w) = schedule.get(day).and_then(window) {
                next_open = Some(format!("{} {}", day_label(day), w.from_label));
                break;
            }
        }
    }

    let today_hours_label = match &today_window {
        Some(w) => format!("{} - {}", w.from_label, w.to_label),
        None => REST_DAY_LABEL.to_string(),
    };

    Status {
        is_open,
        current_day: day_key(today),
        current_time: format!("{:02}:{:02}", now.hour(), now.minute()),
        today_hours_label,
        closes_at,
        next_open,
        schedule: schedule.clone(),
    }
}

/// Recurring schedule with an active override for `today` laid over it.
pub fn effective_schedule(state: &DailyState, today: NaiveDate) -> WeeklySchedule {
    let mut schedule = state.schedule_or_default();
    let ov = &state.hours_override;
    if ov.active && ov.date == Some(today) {
        *schedule.slot_mut(today.weekday()) = Some(if ov.closed {
            DayHours::closed(None)
        } else {
            DayHours::open(
                ov.from.as_deref().unwrap_or("11:00"),
                ov.to.as_deref().unwrap_or("17:00"),
            )
        });
    }
    schedule
}
