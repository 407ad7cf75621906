//! Per-request client time context.
//!
//! Every inbound request may carry two headers describing the caller's local
//! time: an IANA zone name and a raw UTC offset in minutes. This module
//! normalizes them into a [`ClientTimeContext`] value object. Extraction
//! never fails: headers are client-controlled, best-effort metadata, so
//! malformed input degrades silently to a fixed offset of 0 rather than
//! surfacing as a user-visible error.

use chrono_tz::Tz;

use crate::zone::resolve_zone;

/// Header carrying the caller's IANA zone name (e.g., `Asia/Kolkata`).
pub const TIMEZONE_HEADER: &str = "x-timezone";

/// Header carrying the caller's UTC offset in minutes (e.g., `330`).
pub const TIMEZONE_OFFSET_HEADER: &str = "x-timezone-offset";

/// The caller's local-time context for one request.
///
/// A zone-based context (named IANA zone, subject to DST) when the zone
/// header validated, otherwise an offset-based context (fixed minutes ahead
/// of UTC, no DST awareness). Immutable once constructed; holding a parsed
/// [`Tz`] makes "the zone has been validated" a structural invariant rather
/// than a convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClientTimeContext {
    time_zone: Option<Tz>,
    offset_minutes: i32,
}

impl ClientTimeContext {
    /// Build a context from the raw values of [`TIMEZONE_HEADER`] and
    /// [`TIMEZONE_OFFSET_HEADER`].
    ///
    /// The offset header is parsed with lenient numeric semantics: any finite
    /// number is accepted and truncated to whole minutes, anything else
    /// defaults to 0. The zone header is kept only when it resolves as an
    /// IANA zone; an invalid name must not leak through, so the context falls
    /// back to offset-only mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use khata_time::ClientTimeContext;
    ///
    /// let ctx = ClientTimeContext::from_headers(Some("Not/AZone"), Some("60"));
    /// assert!(ctx.time_zone().is_none());
    /// assert_eq!(ctx.offset_minutes(), 60);
    /// ```
    pub fn from_headers(zone: Option<&str>, offset: Option<&str>) -> Self {
        let offset_minutes = offset.map(parse_offset_minutes).unwrap_or(0);
        let time_zone = zone.and_then(|name| resolve_zone(name.trim()));
        Self {
            time_zone,
            offset_minutes,
        }
    }

    /// A zone-based context. The offset component is unused in this mode.
    pub fn with_zone(tz: Tz) -> Self {
        Self {
            time_zone: Some(tz),
            offset_minutes: 0,
        }
    }

    /// An offset-based context: a fixed number of minutes ahead of UTC.
    pub fn with_offset(offset_minutes: i32) -> Self {
        Self {
            time_zone: None,
            offset_minutes,
        }
    }

    /// The validated zone, if this is a zone-based context.
    pub fn time_zone(&self) -> Option<Tz> {
        self.time_zone
    }

    /// The fixed UTC offset in minutes (0 unless supplied by the caller).
    pub fn offset_minutes(&self) -> i32 {
        self.offset_minutes
    }
}

/// Parse an offset header value; non-finite or non-numeric input yields 0.
fn parse_offset_minutes(raw: &str) -> i32 {
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n.trunc() as i32,
        _ => 0,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
