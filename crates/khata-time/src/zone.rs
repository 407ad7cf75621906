//! Timezone resolution: validation, per-instant UTC offsets, and wall-clock
//! to UTC conversion.
//!
//! Zone names arrive from client-controlled request headers, so nothing in
//! this module treats a bad name as an error: validation answers yes/no and
//! callers degrade to fixed-offset mode on a no. Resolved [`Tz`] values are
//! memoized in a process-wide cache keyed by the zone string, mirroring how
//! the small set of zones actually seen by a deployment repeats across
//! requests.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use chrono::{DateTime, Duration, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

// ── Zone cache ──────────────────────────────────────────────────────────────

static ZONE_CACHE: OnceLock<RwLock<HashMap<String, Tz>>> = OnceLock::new();

fn zone_cache() -> &'static RwLock<HashMap<String, Tz>> {
    ZONE_CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Resolve a zone name to a [`Tz`], memoizing hits for the process lifetime.
///
/// The cache is append-only and never evicted; IANA rules for a named zone do
/// not change within a process lifetime. Concurrent misses may both parse and
/// insert the same entry, which is harmless. A poisoned lock degrades to an
/// uncached parse.
pub(crate) fn resolve_zone(name: &str) -> Option<Tz> {
    if let Ok(cache) = zone_cache().read() {
        if let Some(tz) = cache.get(name) {
            return Some(*tz);
        }
    }
    let tz = name.parse::<Tz>().ok()?;
    if let Ok(mut cache) = zone_cache().write() {
        cache.insert(name.to_string(), tz);
    }
    Some(tz)
}

/// Whether a zone name resolves in the IANA table.
///
/// Used to decide if a header-supplied zone string is trustworthy before it
/// is used for any real computation. Garbage input returns `false`; it never
/// panics and never errors.
///
/// # Examples
///
/// ```
/// use khata_time::is_valid_time_zone;
///
/// assert!(is_valid_time_zone("Asia/Kolkata"));
/// assert!(!is_valid_time_zone("Not/AZone"));
/// ```
pub fn is_valid_time_zone(name: &str) -> bool {
    resolve_zone(name).is_some()
}

// ── Offset resolution ───────────────────────────────────────────────────────

/// The zone's UTC offset in minutes at a specific instant, DST-aware.
///
/// Positive means ahead of UTC (e.g., `Asia/Kolkata` → 330), negative means
/// behind (e.g., `America/New_York` → -300 in winter, -240 in summer).
pub fn offset_minutes_at(instant: DateTime<Utc>, tz: Tz) -> i32 {
    tz.offset_from_utc_datetime(&instant.naive_utc())
        .fix()
        .local_minus_utc()
        / 60
}

/// Resolve a local wall-clock time in a zone to the corresponding UTC instant.
///
/// Uses a two-pass "guess, then correct" resolution:
///
/// 1. Treat the wall-clock fields as if they were UTC (`guess`).
/// 2. Subtract the zone's offset at `guess` to get a first candidate.
/// 3. Re-query the offset at the candidate; if it differs (a DST boundary
///    sits between the two instants), recompute with the second offset.
///
/// The offset that applies to a wall-clock moment depends on which side of a
/// DST transition that moment falls, so a single pass can be off by the DST
/// delta near transitions. The two-pass form is also total: wall-clock times
/// that do not exist (spring-forward gap) or occur twice (fall-back) still
/// resolve to one deterministic instant.
pub fn wall_clock_to_utc(wall: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    let guess = Utc.from_utc_datetime(&wall);
    let first = offset_minutes_at(guess, tz);
    let candidate = guess - Duration::minutes(first as i64);
    let second = offset_minutes_at(candidate, tz);
    if second == first {
        candidate
    } else {
        guess - Duration::minutes(second as i64)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_valid_zone_names() {
        assert!(is_valid_time_zone("UTC"));
        assert!(is_valid_time_zone("Asia/Kolkata"));
        assert!(is_valid_time_zone("America/New_York"));
    }

    #[test]
    fn test_invalid_zone_names() {
        assert!(!is_valid_time_zone("Not/AZone"));
        assert!(!is_valid_time_zone(""));
        assert!(!is_valid_time_zone("GMT+5:30 garbage"));
    }

    #[test]
    fn test_cache_repeated_lookups_are_consistent() {
        let first = resolve_zone("Asia/Kolkata").unwrap();
        let second = resolve_zone("Asia/Kolkata").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_offset_fixed_zone() {
        let tz: Tz = "Asia/Kolkata".parse().unwrap();
        // India has no DST: +5:30 year-round.
        assert_eq!(offset_minutes_at(utc(2025, 1, 15, 12, 0, 0), tz), 330);
        assert_eq!(offset_minutes_at(utc(2025, 7, 15, 12, 0, 0), tz), 330);
    }

    #[test]
    fn test_offset_dst_zone() {
        let tz: Tz = "America/New_York".parse().unwrap();
        // EST in winter, EDT in summer.
        assert_eq!(offset_minutes_at(utc(2026, 1, 15, 12, 0, 0), tz), -300);
        assert_eq!(offset_minutes_at(utc(2026, 7, 15, 12, 0, 0), tz), -240);
    }

    #[test]
    fn test_wall_clock_plain_day() {
        let tz: Tz = "Asia/Kolkata".parse().unwrap();
        let wall = utc(2025, 6, 15, 0, 0, 0).naive_utc();
        assert_eq!(wall_clock_to_utc(wall, tz), utc(2025, 6, 14, 18, 30, 0));
    }

    #[test]
    fn test_wall_clock_dst_boundary_corrected() {
        // US spring forward: March 8, 2026, 02:00 EST → 03:00 EDT.
        // Midnight that day is still EST; 23:00 that evening is EDT. The
        // naive guess for 23:00 sits on the other side of the transition,
        // which is exactly the case the second pass corrects.
        let tz: Tz = "America/New_York".parse().unwrap();
        let midnight = utc(2026, 3, 8, 0, 0, 0).naive_utc();
        assert_eq!(wall_clock_to_utc(midnight, tz), utc(2026, 3, 8, 5, 0, 0));

        let evening = utc(2026, 3, 8, 23, 0, 0).naive_utc();
        assert_eq!(wall_clock_to_utc(evening, tz), utc(2026, 3, 9, 3, 0, 0));
    }

    #[test]
    fn test_wall_clock_nonexistent_time_resolves() {
        // 02:30 does not exist on the US spring-forward day. The two-pass
        // resolution still yields a deterministic instant near the gap.
        let tz: Tz = "America/New_York".parse().unwrap();
        let gap = utc(2026, 3, 8, 2, 30, 0).naive_utc();
        let resolved = wall_clock_to_utc(gap, tz);
        // The transition happens at 07:00 UTC; the resolved instant must
        // land within an hour of it rather than drifting a full DST delta.
        let transition = utc(2026, 3, 8, 7, 0, 0);
        let delta = (resolved - transition).num_minutes().abs();
        assert!(delta <= 60, "resolved {resolved} too far from transition");
    }

    #[test]
    fn test_wall_clock_ambiguous_time_resolves() {
        // 01:30 occurs twice on the US fall-back day (Nov 1, 2026).
        let tz: Tz = "America/New_York".parse().unwrap();
        let ambiguous = utc(2026, 11, 1, 1, 30, 0).naive_utc();
        let resolved = wall_clock_to_utc(ambiguous, tz);
        // Both readings are valid; the resolution must pick one of them.
        let edt = utc(2026, 11, 1, 5, 30, 0);
        let est = utc(2026, 11, 1, 6, 30, 0);
        assert!(resolved == edt || resolved == est, "got {resolved}");
    }
}
