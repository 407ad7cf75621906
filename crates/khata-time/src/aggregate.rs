//! Calendar-day aggregation of ledger transactions.
//!
//! Turns a vendor's raw transaction documents into the fixed-length daily
//! series the dashboard and analytics charts render: one zero-filled bucket
//! per local calendar day, credits and payments summed separately, ordered
//! oldest first. Bucketing is local to the request's [`ClientTimeContext`],
//! so two vendors looking at the same UTC instants can legitimately see the
//! same transaction on different calendar days.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::context::ClientTimeContext;
use crate::datekey::{local_date_key, DateKey};

// ── Transaction documents ───────────────────────────────────────────────────

/// Ledger entry kind, as stored by the document database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Goods given on credit; increases what the customer owes.
    Credit,
    /// Money received against outstanding credit.
    Payment,
    /// Legacy alias for [`TransactionType::Payment`] still present in older
    /// documents; aggregates into the payment sum.
    Debit,
}

/// The transaction document shape this core consumes.
///
/// The surrounding application owns the full schema; only the fields needed
/// for day bucketing are modeled here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Instant the transaction occurred, stored in UTC.
    pub date: DateTime<Utc>,
    /// Amount in the vendor's currency.
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

// ── Daily buckets ───────────────────────────────────────────────────────────

/// Signed sums for one local calendar day, serialized straight into API
/// responses (camelCase, with the date key as the chart's x-axis label).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBucket {
    pub date_key: DateKey,
    pub credit: f64,
    pub payment: f64,
}

/// Window-wide sums across a run of buckets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WindowTotals {
    pub credit: f64,
    pub payment: f64,
}

/// Bucket transactions into a rolling window of local calendar days.
///
/// The window covers exactly `window_days` consecutive days ending at
/// "today" in the client context (today being `local_date_key(now, ctx)`),
/// built by stepping the parsed calendar date backwards so no wall-clock
/// drift can creep in. Every day is present even with zero activity.
/// Transactions bucket by their local date key; `Credit` amounts accumulate
/// into `credit`, `Payment` and `Debit` into `payment`, and transactions
/// falling outside the window are ignored. Output is ascending by date,
/// which the fixed-width keys also make the lexicographic order.
///
/// A `window_days` of 0 yields an empty vector.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use khata_time::{aggregate_daily, ClientTimeContext};
///
/// let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
/// let ctx = ClientTimeContext::with_offset(330);
/// let buckets = aggregate_daily(now, &[], 30, &ctx);
/// assert_eq!(buckets.len(), 30);
/// assert_eq!(buckets.last().unwrap().date_key.to_string(), "2025-06-15");
/// ```
pub fn aggregate_daily(
    now: DateTime<Utc>,
    transactions: &[Transaction],
    window_days: usize,
    ctx: &ClientTimeContext,
) -> Vec<DailyBucket> {
    let today = local_date_key(now, ctx);

    let mut window: BTreeMap<DateKey, (f64, f64)> = BTreeMap::new();
    let mut day = Some(today);
    for _ in 0..window_days {
        let Some(current) = day else { break };
        window.insert(current, (0.0, 0.0));
        day = current.pred();
    }

    for tx in transactions {
        let key = local_date_key(tx.date, ctx);
        if let Some((credit, payment)) = window.get_mut(&key) {
            match tx.kind {
                TransactionType::Credit => *credit += tx.amount,
                TransactionType::Payment | TransactionType::Debit => *payment += tx.amount,
            }
        }
    }

    window
        .into_iter()
        .map(|(date_key, (credit, payment))| DailyBucket {
            date_key,
            credit,
            payment,
        })
        .collect()
}

/// Sum a bucket run into window-wide credit/payment totals.
pub fn window_totals(buckets: &[DailyBucket]) -> WindowTotals {
    buckets.iter().fold(WindowTotals::default(), |mut acc, b| {
        acc.credit += b.credit;
        acc.payment += b.payment;
        acc
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────
