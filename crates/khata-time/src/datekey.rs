//! Canonical calendar-day keys and their derivation from instants.
//!
//! A [`DateKey`] identifies one calendar day as a zero-padded `YYYY-MM-DD`
//! string, with no embedded time or zone; once produced it is
//! zone-agnostic. Keys double as map keys and as chart axis labels in API
//! responses, and the fixed-width padding makes their string order match
//! chronological order.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Serialize, Serializer};

use crate::context::ClientTimeContext;
use crate::error::KhataTimeError;
use crate::zone::resolve_zone;

// ── DateKey ─────────────────────────────────────────────────────────────────

/// One calendar day, rendered as `YYYY-MM-DD`.
///
/// Parsing is strict: exactly ten characters, digits and dashes in the right
/// positions, and the components must name a real calendar date. Anything
/// else is a caller contract violation ([`KhataTimeError::InvalidDateKey`]),
/// since internal callers always pass machine-generated or pre-validated keys.
///
/// # Examples
///
/// ```
/// use khata_time::DateKey;
///
/// let key: DateKey = "2025-06-15".parse().unwrap();
/// assert_eq!(key.to_string(), "2025-06-15");
/// assert!("2025-6-15".parse::<DateKey>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Build a key from calendar components; `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The underlying calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The previous calendar day; `None` only at the representable minimum.
    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// The next calendar day; `None` only at the representable maximum.
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = KhataTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let shape_ok = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !shape_ok {
            return Err(KhataTimeError::InvalidDateKey(format!(
                "'{s}': expected YYYY-MM-DD"
            )));
        }

        let parse_err = || KhataTimeError::InvalidDateKey(format!("'{s}': expected YYYY-MM-DD"));
        let year: i32 = s[0..4].parse().map_err(|_| parse_err())?;
        let month: u32 = s[5..7].parse().map_err(|_| parse_err())?;
        let day: u32 = s[8..10].parse().map_err(|_| parse_err())?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                KhataTimeError::InvalidDateKey(format!("'{s}': no such calendar date"))
            })
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── Key derivation ──────────────────────────────────────────────────────────

/// The calendar day containing `instant` in a named zone.
///
/// If the zone name does not resolve, falls back to the UTC calendar fields
/// of the original instant rather than failing: a wrong-but-usable key is
/// preferable to breaking all downstream aggregation for a request. Callers
/// that validated the name up front never hit this branch.
pub fn date_key_in_zone(instant: DateTime<Utc>, zone_name: &str) -> DateKey {
    match resolve_zone(zone_name) {
        Some(tz) => DateKey::from(instant.with_timezone(&tz).date_naive()),
        None => DateKey::from(instant.date_naive()),
    }
}

/// The calendar day containing `instant` at a fixed UTC offset.
///
/// Shifts the raw instant by the offset and reads UTC calendar fields of the
/// shifted instant. This is valid because a raw numeric offset is constant for the
/// request, with no DST transitions to account for.
pub fn date_key_with_offset(instant: DateTime<Utc>, offset_minutes: i32) -> DateKey {
    let shifted = instant + Duration::minutes(offset_minutes as i64);
    DateKey::from(shifted.date_naive())
}

/// The calendar day containing `instant` local to the client context.
///
/// Dispatches to the zone-based derivation when the context carries a
/// validated zone, otherwise to the fixed-offset derivation.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use khata_time::{local_date_key, ClientTimeContext};
///
/// let instant = Utc.with_ymd_and_hms(2025, 6, 14, 19, 0, 0).unwrap();
/// let ist = ClientTimeContext::with_offset(330);
/// // 19:00 UTC is already past midnight in IST.
/// assert_eq!(local_date_key(instant, &ist).to_string(), "2025-06-15");
/// ```
pub fn local_date_key(instant: DateTime<Utc>, ctx: &ClientTimeContext) -> DateKey {
    match ctx.time_zone() {
        Some(tz) => DateKey::from(instant.with_timezone(&tz).date_naive()),
        None => date_key_with_offset(instant, ctx.offset_minutes()),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
