//! Relative date labels for the list and absolute labels for the editor.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

const DAY_HOURS: i64 = 24;
const WEEK_HOURS: i64 = 24 * 7;

/// List label: clock time within a day, weekday within a week, else month/day.
///
/// The distance is absolute, so timestamps slightly in the future still read
/// as "today".
pub fn format_list_date<Tz>(date: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let hours = now
        .clone()
        .signed_duration_since(date.clone())
        .num_hours()
        .abs();
    if hours < DAY_HOURS {
        date.format("%H:%M").to_string()
    } else if hours < WEEK_HOURS {
        date.format("%a").to_string()
    } else {
        date.format("%b %-d").to_string()
    }
}

/// Editor label, e.g. `January 5, 2026, 09:30 AM`.
pub fn format_editor_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format("%B %-d, %Y, %I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::{format_editor_date, format_list_date};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn list_labels_by_distance() {
        let now = Utc.with_ymd_and_hms(2026, 1, 12, 15, 0, 0).unwrap();

        let same_day = now - Duration::hours(3);
        assert_eq!(format_list_date(&same_day, &now), "12:00");

        let this_week = now - Duration::days(3);
        assert_eq!(format_list_date(&this_week, &now), "Fri");

        let older = now - Duration::days(30);
        assert_eq!(format_list_date(&older, &now), "Dec 13");
    }

    #[test]
    fn editor_label_is_long_form() {
        let date = Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap();
        assert_eq!(format_editor_date(&date), "January 5, 2026, 09:30 AM");
    }
}
