//! UTC range resolution for local calendar days.
//!
//! Dashboard and report queries filter the document store on UTC instants,
//! but the caller thinks in local calendar dates. This module converts one
//! or more local dates into the inclusive UTC range covering local midnight
//! of the first day through local 23:59:59.999 of the last, DST-correct for
//! zone-based contexts.

use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::context::ClientTimeContext;
use crate::datekey::{local_date_key, DateKey};
use crate::error::Result;
use crate::zone::wall_clock_to_utc;

/// Inclusive UTC bounds of one or more local calendar days.
///
/// Used directly as range-query bounds: `date >= start AND date <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UtcRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Resolve a local date range, given as `YYYY-MM-DD` strings, to UTC bounds.
///
/// # Errors
///
/// Returns [`KhataTimeError::InvalidDateKey`](crate::KhataTimeError::InvalidDateKey)
/// if either key is malformed. Malformed keys are a caller contract
/// violation and propagate, unlike garbage timezone input, which never
/// reaches this layer (the context already degraded it to offset mode).
///
/// # Examples
///
/// ```
/// use khata_time::{utc_range_for_local_dates, ClientTimeContext};
///
/// let ist = ClientTimeContext::with_offset(330);
/// let range = utc_range_for_local_dates("2025-06-15", "2025-06-15", &ist).unwrap();
/// assert_eq!(range.start.to_rfc3339(), "2025-06-14T18:30:00+00:00");
/// assert_eq!(range.end.to_rfc3339(), "2025-06-15T18:29:59.999+00:00");
/// ```
pub fn utc_range_for_local_dates(
    start_key: &str,
    end_key: &str,
    ctx: &ClientTimeContext,
) -> Result<UtcRange> {
    let start: DateKey = start_key.parse()?;
    let end: DateKey = end_key.parse()?;
    Ok(utc_range_for_days(start, end, ctx))
}

/// Typed variant of [`utc_range_for_local_dates`] for already-parsed keys.
///
/// `start <= end` holds whenever `start_day <= end_day`; a single day yields
/// its full local span (24 hours minus one millisecond on plain days, 23 or
/// 25 hours around DST transitions).
pub fn utc_range_for_days(start_day: DateKey, end_day: DateKey, ctx: &ClientTimeContext) -> UtcRange {
    let start_wall = start_day.date().and_time(NaiveTime::MIN);
    // Local 23:59:59.999, built by arithmetic so no fallible constructor is needed.
    let end_wall =
        end_day.date().and_time(NaiveTime::MIN) + Duration::days(1) - Duration::milliseconds(1);
    UtcRange {
        start: wall_to_utc(start_wall, ctx),
        end: wall_to_utc(end_wall, ctx),
    }
}

/// The UTC range of the local calendar day containing `now`.
///
/// This is the "today" window every dashboard and stats route filters on.
pub fn utc_range_for_today(now: DateTime<Utc>, ctx: &ClientTimeContext) -> UtcRange {
    let today = local_date_key(now, ctx);
    utc_range_for_days(today, today, ctx)
}

/// Resolve a local wall-clock time to UTC per the context mode.
///
/// Zone-based contexts go through the two-pass DST correction; a fixed
/// offset has no transitions to resolve, so plain arithmetic suffices.
fn wall_to_utc(wall: NaiveDateTime, ctx: &ClientTimeContext) -> DateTime<Utc> {
    match ctx.time_zone() {
        Some(tz) => wall_clock_to_utc(wall, tz),
        None => Utc.from_utc_datetime(&wall) - Duration::minutes(ctx.offset_minutes() as i64),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
