//! Trade normalization: tolerant field coercion, then row filtering.
//!
//! Malformed individual trade rows should not abort the whole analysis.
//! Unparseable timestamps and numerics coerce to `None`; rows missing the
//! derived date or closed PnL are then dropped, and the caller reports the
//! post-filter count so data loss stays visible.

use crate::loader::RawTable;
use chrono::NaiveDateTime;
use csv::StringRecord;
use sentiment_core::{Result, TradeRecord};
use tracing::debug;

/// Timestamp formats seen in trade exports.
const TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%d-%m-%Y %H:%M:%S", "%d-%m-%Y %H:%M"];

/// Output of trade normalization: the surviving rows plus loss accounting.
#[derive(Debug, Clone)]
pub struct CleanedTrades {
    /// Trades surviving the date/PnL filter.
    pub trades: Vec<TradeRecord>,
    /// Rows in the raw table.
    pub raw_count: usize,
    /// Rows dropped for a missing date or closed PnL.
    pub dropped_count: usize,
}

/// Parse a trade timestamp, tolerating failure.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Coerce a numeric field, tolerating failure.
fn parse_f64(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

/// First non-empty value among several candidate column names.
fn field<'a>(table: &RawTable, row: &'a StringRecord, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| table.get(row, name))
}

/// Normalize a raw trade table into cleaned `TradeRecord`s.
///
/// Column lookup is case/spacing-insensitive (headers are canonicalized by
/// the loader) and accepts the source export names alongside the canonical
/// ones: `timestamp_ist`/`time`/`timestamp` and `size_usd`/`trade_size`.
pub fn normalize_trades(table: &RawTable) -> Result<CleanedTrades> {
    let mut trades = Vec::with_capacity(table.len());
    let mut dropped = 0usize;

    for (idx, row) in table.rows().enumerate() {
        let time = field(table, row, &["timestamp_ist", "time", "timestamp"])
            .and_then(parse_timestamp);
        let closed_pnl = field(table, row, &["closed_pnl"]).and_then(parse_f64);

        let (time, closed_pnl) = match (time, closed_pnl) {
            (Some(t), Some(pnl)) => (t, pnl),
            _ => {
                debug!(row = idx, "dropping trade row with missing date or PnL");
                dropped += 1;
                continue;
            }
        };

        let side = field(table, row, &["side"]).unwrap_or("").to_lowercase();

        trades.push(TradeRecord {
            time,
            date: time.date(),
            side,
            closed_pnl,
            trade_size: field(table, row, &["size_usd", "trade_size"]).and_then(parse_f64),
            execution_price: field(table, row, &["execution_price"]).and_then(parse_f64),
            start_position: field(table, row, &["start_position"]).and_then(parse_f64),
        });
    }

    Ok(CleanedTrades {
        trades,
        raw_count: table.len(),
        dropped_count: dropped,
    })
}
