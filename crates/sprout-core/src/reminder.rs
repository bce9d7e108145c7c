//! Next-watering message and relative time wording.

use chrono::{DateTime, Utc};

use crate::locale::{DistanceUnit, Locale};
use crate::models::Plant;

const MINUTES_IN_HOUR: i64 = 60;
const MINUTES_IN_DAY: i64 = 1_440;
const MINUTES_IN_MONTH: i64 = 43_200;
const MINUTES_IN_TWO_MONTHS: i64 = 86_400;

/// Human distance between two instants, without a direction suffix.
///
/// Symmetric: `format_distance(a, b)` equals `format_distance(b, a)`.
#[must_use]
pub fn format_distance(target: DateTime<Utc>, now: DateTime<Utc>, locale: Locale) -> String {
    let seconds = (target - now).num_seconds().saturating_abs();
    locale.distance_phrase(distance_unit(seconds))
}

/// Human distance with a direction: "in about 2 hours" or "about 2 hours ago".
#[must_use]
pub fn format_relative(target: DateTime<Utc>, now: DateTime<Utc>, locale: Locale) -> String {
    let distance = format_distance(target, now, locale);
    match (locale, target >= now) {
        (Locale::English, true) => format!("in {distance}"),
        (Locale::English, false) => format!("{distance} ago"),
        (Locale::Portuguese, true) => format!("em {distance}"),
        (Locale::Portuguese, false) => format!("há {distance}"),
    }
}

/// Message for the owned-plants screen.
///
/// `plants` is expected in ascending notification order (the store's
/// contract); the first scheduled plant is the one announced. Never fails,
/// whether the time is ahead of or behind `now`.
#[must_use]
pub fn next_watering_message(plants: &[Plant], locale: Locale, now: DateTime<Utc>) -> String {
    let next = plants
        .iter()
        .find_map(|plant| plant.notification_at.map(|at| (plant, at)));

    let Some((plant, at)) = next else {
        return locale.no_plants_message().to_string();
    };

    let distance = format_distance(at, now, locale);
    if at >= now {
        locale.upcoming_watering(&plant.name, &distance)
    } else {
        locale.overdue_watering(&plant.name, &distance)
    }
}

fn distance_unit(seconds: i64) -> DistanceUnit {
    let minutes = rounded_div(seconds, 60);

    if minutes < 2 {
        return if minutes < 1 {
            DistanceUnit::LessThanMinute
        } else {
            DistanceUnit::Minutes(1)
        };
    }
    if minutes < 45 {
        return DistanceUnit::Minutes(minutes);
    }
    if minutes < 90 {
        return DistanceUnit::AboutHours(1);
    }
    if minutes < MINUTES_IN_DAY {
        return DistanceUnit::AboutHours(rounded_div(minutes, MINUTES_IN_HOUR));
    }
    if minutes < 2_520 {
        return DistanceUnit::Days(1);
    }
    if minutes < MINUTES_IN_MONTH {
        return DistanceUnit::Days(rounded_div(minutes, MINUTES_IN_DAY));
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        return DistanceUnit::AboutMonths(rounded_div(minutes, MINUTES_IN_MONTH));
    }

    let months = minutes / MINUTES_IN_MONTH;
    if months < 12 {
        return DistanceUnit::Months(rounded_div(minutes, MINUTES_IN_MONTH));
    }

    let years = months / 12;
    match months % 12 {
        0..=2 => DistanceUnit::AboutYears(years),
        3..=8 => DistanceUnit::OverYears(years),
        _ => DistanceUnit::AlmostYears(years + 1),
    }
}

const fn rounded_div(value: i64, divisor: i64) -> i64 {
    (value + divisor / 2) / divisor
}
