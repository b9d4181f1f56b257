use chrono::{Days, NaiveDate};

/// Days before the event by which each category should be booked.
const BOOKING_OFFSETS: &[(&str, u64)] = &[
    ("Venue", 365),
    ("Wedding Planner", 365),
    ("Catering", 270),
    ("Photography", 270),
    ("Attire", 240),
    ("Flowers", 180),
    ("Music", 180),
    ("Invitations", 120),
    ("Favors", 90),
];

const DEFAULT_OFFSET_DAYS: u64 = 180;

/// Lead time in days for a category. Unknown categories (custom ones
/// included) fall back to the six-month default.
pub fn booking_offset_days(category: &str) -> u64 {
    BOOKING_OFFSETS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(category))
        .map(|(_, days)| *days)
        .unwrap_or(DEFAULT_OFFSET_DAYS)
}

/// Suggested booking date: the event date minus the category's lead time.
pub fn suggested_booking_date(event_date: NaiveDate, category: &str) -> NaiveDate {
    event_date
        .checked_sub_days(Days::new(booking_offset_days(category)))
        .unwrap_or(event_date)
}
