//! # khata-time
//!
//! Client timezone reconciliation and calendar-day aggregation for the Kada
//! Ledger khata (credit ledger) services.
//!
//! Request handlers receive a caller's local-time hints as two headers (an
//! IANA zone name and a raw UTC offset in minutes), query transaction
//! documents by UTC instant, and render statistics bucketed by the caller's
//! local calendar day. This crate owns the computation between those points:
//! normalizing the headers into a per-request context, converting local
//! calendar dates into DST-correct UTC query ranges, deriving canonical
//! `YYYY-MM-DD` day keys, and folding transactions into rolling zero-filled
//! daily windows.
//!
//! All functions are synchronous, pure computations with no I/O; the caller
//! provides the "now" anchor where one is needed, keeping everything
//! deterministic and testable. The only shared state is an append-only zone
//! memoization cache, safe under concurrent use.
//!
//! ## Modules
//!
//! - [`context`] — Per-request `{zone?, offset}` extraction from headers
//! - [`zone`] — Zone validation, per-instant offsets, wall-clock → UTC resolution
//! - [`datekey`] — Canonical `YYYY-MM-DD` keys, zone- and offset-based derivation
//! - [`boundary`] — Local calendar dates → inclusive UTC query ranges
//! - [`aggregate`] — Rolling daily credit/payment windows
//! - [`error`] — Error types

pub mod aggregate;
pub mod boundary;
pub mod context;
pub mod datekey;
pub mod error;
pub mod zone;

pub use aggregate::{
    aggregate_daily, window_totals, DailyBucket, Transaction, TransactionType, WindowTotals,
};
pub use boundary::{utc_range_for_days, utc_range_for_local_dates, utc_range_for_today, UtcRange};
pub use context::{ClientTimeContext, TIMEZONE_HEADER, TIMEZONE_OFFSET_HEADER};
pub use datekey::{date_key_in_zone, date_key_with_offset, local_date_key, DateKey};
pub use error::KhataTimeError;
pub use zone::{is_valid_time_zone, offset_minutes_at, wall_clock_to_utc};
