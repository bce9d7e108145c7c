//! Scheduling a watering reminder for a catalog plant.

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::db::PlantStore;
use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::models::Plant;

/// Parameters for the confirmation screen shown after a save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub title: String,
    pub sub_title: String,
    pub button_title: String,
    pub icon: String,
    pub next_screen: String,
}

impl Confirmation {
    fn saved(locale: Locale) -> Self {
        let (title, sub_title, button_title) = locale.confirmation_texts();
        Self {
            title: title.to_string(),
            sub_title: sub_title.to_string(),
            button_title: button_title.to_string(),
            icon: "hug".to_string(),
            next_screen: "MyPlants".to_string(),
        }
    }
}

/// Reject reminder times earlier than `now`
pub fn validate_reminder_time(
    chosen: DateTime<Utc>,
    now: DateTime<Utc>,
    locale: Locale,
) -> Result<()> {
    if chosen < now {
        return Err(Error::Validation(locale.future_time_required().to_string()));
    }
    Ok(())
}

/// Save `plant` as owned with a watering reminder at `chosen`.
///
/// Nothing is persisted when `chosen` is in the past.
pub fn schedule_watering<S: PlantStore>(
    store: &S,
    plant: &Plant,
    chosen: DateTime<Utc>,
    now: DateTime<Utc>,
    locale: Locale,
) -> Result<Confirmation> {
    validate_reminder_time(chosen, now, locale)?;

    let owned = plant.clone().scheduled_at(chosen);
    store.save(&owned).inspect_err(|error| {
        tracing::warn!(plant = %plant.id, %error, "{}", locale.save_failed());
    })?;

    Ok(Confirmation::saved(locale))
}

/// Today's date at `time` in the time zone of `now`, as UTC.
///
/// Fails when the local time does not exist (daylight saving gap).
pub fn resolve_time_of_day<Tz: TimeZone>(
    time: NaiveTime,
    now: &DateTime<Tz>,
) -> Result<DateTime<Utc>> {
    let naive = now.date_naive().and_time(time);
    now.timezone()
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| Error::InvalidInput(format!("{time} does not exist today")))
}

/// Parse a reminder as `HH:MM` (today, in the zone of `now`) or RFC 3339.
pub fn parse_reminder_time<Tz: TimeZone>(
    input: &str,
    now: &DateTime<Tz>,
) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(time) = NaiveTime::parse_from_str(input, "%H:%M") {
        return resolve_time_of_day(time, now);
    }
    DateTime::parse_from_rfc3339(input)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|_| {
            Error::InvalidInput(format!("expected HH:MM or an RFC 3339 time, got '{input}'"))
        })
}
