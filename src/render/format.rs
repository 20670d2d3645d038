//! German date and time strings for the footer.

use chrono::{DateTime, Datelike, TimeZone};

use crate::model::event::Event;

pub const WEEKDAYS: [&str; 7] = [
    "Montag",
    "Dienstag",
    "Mittwoch",
    "Donnerstag",
    "Freitag",
    "Samstag",
    "Sonntag",
];

pub const MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

pub fn weekday_name<Tz: TimeZone>(dt: &DateTime<Tz>) -> &'static str {
    WEEKDAYS[dt.weekday().num_days_from_monday() as usize]
}

pub fn month_name<Tz: TimeZone>(dt: &DateTime<Tz>) -> &'static str {
    MONTHS[dt.month0() as usize]
}

/// `18. Oktober 2026`: day without padding.
pub fn long_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    format!("{}. {} {}", dt.day(), month_name(dt), dt.year())
}

fn clock<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%H:%M").to_string()
}

/// Footer time line.
///
/// `09:00 Uhr` without a usable end (see [`Event::effective_end`]), `09:00 - 10:30 Uhr` for a
/// same-day end, and `22:00 Uhr - 19. Oktober 01:00 Uhr` when the end falls on a later date.
pub fn time_range(event: &Event) -> String {
    let from = clock(&event.start);
    match event.effective_end() {
        Some(end) if end.date_naive() == event.start.date_naive() => {
            format!("{from} - {} Uhr", clock(&end))
        }
        Some(end) => format!(
            "{from} Uhr - {}. {} {} Uhr",
            end.day(),
            month_name(&end),
            clock(&end)
        ),
        None => format!("{from} Uhr"),
    }
}
