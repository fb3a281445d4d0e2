use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// The fixed week, Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// JSON key of a weekday ("monday" .. "sunday").
pub fn day_key(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Display name used in `nextOpen`.
pub fn day_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Accepts exactly the seven lower-case keys, ignoring case and surrounding whitespace.
pub fn parse_day(name: &str) -> Option<Weekday> {
    let name = name.trim().to_lowercase();
    WEEKDAYS.into_iter().find(|d| day_key(*d) == name)
}

/// Opening hours of one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    #[serde(default)]
    pub open: bool,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl DayHours {
    pub fn open(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            open: true,
            from: Some(from.into()),
            to: Some(to.into()),
            reason: None,
        }
    }

    pub fn closed(reason: Option<String>) -> Self {
        Self {
            open: false,
            from: None,
            to: None,
            reason,
        }
    }
}

/// Recurring weekly opening hours, one slot per weekday.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySchedule {
    #[serde(default)]
    pub monday: Option<DayHours>,
    #[serde(default)]
    pub tuesday: Option<DayHours>,
    #[serde(default)]
    pub wednesday: Option<DayHours>,
    #[serde(default)]
    pub thursday: Option<DayHours>,
    #[serde(default)]
    pub friday: Option<DayHours>,
    #[serde(default)]
    pub saturday: Option<DayHours>,
    #[serde(default)]
    pub sunday: Option<DayHours>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl WeeklySchedule {
    /// Closed on Monday, 11:00 - 17:00 every other day.
    pub fn default_hours() -> Self {
        let mut schedule = Self::default();
        for day in WEEKDAYS {
            *schedule.slot_mut(day) = Some(match day {
                Weekday::Mon => DayHours::closed(None),
                _ => DayHours::open("11:00", "17:00"),
            });
        }
        schedule
    }

    pub fn get(&self, day: Weekday) -> Option<&DayHours> {
        match day {
            Weekday::Mon => self.monday.as_ref(),
            Weekday::Tue => self.tuesday.as_ref(),
            Weekday::Wed => self.wednesday.as_ref(),
            Weekday::Thu => self.thursday.as_ref(),
            Weekday::Fri => self.friday.as_ref(),
            Weekday::Sat => self.saturday.as_ref(),
            Weekday::Sun => self.sunday.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, day: Weekday) -> &mut Option<DayHours> {
        match day {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }
}

/// Body for POST /api/daily/zeiten.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDayRequest {
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub day: String,
    #[serde(flatten)]
    pub hours: HoursInput,
}

/// Body for POST /api/daily/zeiten/bereich.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRangeRequest {
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub start_day: String,
    #[serde(default)]
    pub end_day: String,
    #[serde(flatten)]
    pub hours: HoursInput,
}

/// Per-day settings shared by the single-day and range endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HoursInput {
    pub open: Option<bool>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_day_accepts_only_the_seven_names() {
        assert_eq!(parse_day("Friday"), Some(Weekday::Fri));
        assert_eq!(parse_day(" sunday "), Some(Weekday::Sun));
        assert_eq!(parse_day("fri"), None);
        assert_eq!(parse_day("freitag"), None);
    }

    #[test]
    fn default_hours_rest_on_monday() {
        let schedule = WeeklySchedule::default_hours();
        assert_eq!(schedule.get(Weekday::Mon), Some(&DayHours::closed(None)));
        for day in &WEEKDAYS[1..] {
            assert_eq!(schedule.get(*day), Some(&DayHours::open("11:00", "17:00")));
        }
    }

    #[test]
    fn older_documents_without_days_still_parse() {
        let schedule: WeeklySchedule =
            serde_json::from_str(r#"{"tuesday": {"open": true, "from": "10:00", "to": "16:00"}}"#)
                .unwrap();
        assert_eq!(schedule.monday, None);
        assert_eq!(schedule.get(Weekday::Tue), Some(&DayHours::open("10:00", "16:00")));
    }
}
