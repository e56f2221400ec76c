use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::PlanError;

const MICROS_PER_HOUR: f64 = 3_600_000_000.0;

/// Converts fractional hours into a chrono delta, rounded to the microsecond.
pub fn hours_to_delta(hours: f64) -> TimeDelta {
    TimeDelta::microseconds((hours * MICROS_PER_HOUR).round() as i64)
}

/// Signed length of `[start, end]` in fractional hours.
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    let delta = end.signed_duration_since(start);
    delta.num_seconds() as f64 / 3600.0 + f64::from(delta.subsec_nanos()) / 3.6e12
}

/// First instant of the calendar day after `instant`.
pub fn next_midnight(instant: NaiveDateTime) -> NaiveDateTime {
    instant
        .date()
        .succ_opt()
        .map(|day| day.and_time(NaiveTime::MIN))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Parses a wall-clock start instant.
///
/// Accepts the `datetime-local` shapes (`2024-01-15T08:00`, with optional seconds and fraction)
/// and RFC 3339 with an offset. An offset is dropped, not applied: the wall-clock reading is
/// what the driver's log uses.
pub fn parse_local_instant(raw: &str) -> Result<NaiveDateTime, PlanError> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.naive_local());
    }
    [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    .ok_or_else(|| PlanError::InvalidStartInstant(raw.to_string()))
}
