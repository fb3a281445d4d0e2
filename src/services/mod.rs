pub mod auth;
pub mod daily;
pub mod metrics;
pub mod plan;
pub mod schedule;

use chrono::{DateTime, FixedOffset, Local};

/// Current local wall-clock time; the site's opening hours are local.
pub fn local_now() -> DateTime<FixedOffset> {
    let now = Local::now();
    now.with_timezone(now.offset())
}
