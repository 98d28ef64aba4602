//! Core data types for the sentiment-analysis pipeline.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Title-case a sentiment label for display consistency
/// ("extreme greed" -> "Extreme Greed").
pub fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Daily market-mood classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    /// Calendar date (unique key after dedup).
    pub date: NaiveDate,
    /// Title-cased category label (e.g. "Fear", "Extreme Greed").
    pub sentiment: String,
}

/// Directional classification of a trade from its side field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    /// "buy" (long).
    Buy,
    /// "sell" (short).
    Sell,
    /// Anything else.
    Other,
}

impl TradeSide {
    /// Parse a raw side string, case-insensitively.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "buy" => TradeSide::Buy,
            "sell" => TradeSide::Sell,
            _ => TradeSide::Other,
        }
    }

    /// Is this a long (buy-side) trade?
    #[inline]
    pub fn is_long(self) -> bool {
        self == TradeSide::Buy
    }

    /// Is this a short (sell-side) trade?
    #[inline]
    pub fn is_short(self) -> bool {
        self == TradeSide::Sell
    }
}

/// A single cleaned trade execution.
///
/// Rows with an unparseable timestamp or missing closed PnL never become
/// `TradeRecord`s; the remaining numeric fields stay optional because a bad
/// size or price excludes the value, not the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Execution timestamp.
    pub time: NaiveDateTime,
    /// Calendar date, the timestamp truncated to day.
    pub date: NaiveDate,
    /// Raw side value, lowercased ("buy", "sell", ...).
    pub side: String,
    /// Realized profit or loss in quote currency.
    pub closed_pnl: f64,
    /// USD notional of the trade.
    pub trade_size: Option<f64>,
    /// Execution price.
    pub execution_price: Option<f64>,
    /// Position size before the trade.
    pub start_position: Option<f64>,
}

impl TradeRecord {
    /// Parsed side of this trade.
    pub fn trade_side(&self) -> TradeSide {
        TradeSide::from_raw(&self.side)
    }
}

/// A trade joined with the sentiment of its calendar date, plus derived
/// per-trade features. Every merged trade has a non-null sentiment.
///
/// The boolean features are stored as 0/1 integers, which is how they land
/// in the exported dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedTrade {
    /// Execution timestamp.
    pub time: NaiveDateTime,
    /// Calendar date used for the join.
    pub date: NaiveDate,
    /// Raw side value, lowercased.
    pub side: String,
    /// Realized profit or loss.
    pub closed_pnl: f64,
    /// USD notional.
    pub trade_size: Option<f64>,
    /// Execution price.
    pub execution_price: Option<f64>,
    /// Position size before the trade.
    pub start_position: Option<f64>,
    /// Sentiment label of the trade's date.
    pub sentiment: String,
    /// 1 iff closed_pnl > 0.
    pub is_win: u8,
    /// 1 iff side == "buy".
    pub is_long: u8,
    /// 1 iff side == "sell".
    pub is_short: u8,
}

impl MergedTrade {
    /// Build a merged trade from a cleaned trade and its matched sentiment,
    /// deriving the per-trade features.
    pub fn from_trade(trade: &TradeRecord, sentiment: &str) -> Self {
        let side = trade.trade_side();
        Self {
            time: trade.time,
            date: trade.date,
            side: trade.side.clone(),
            closed_pnl: trade.closed_pnl,
            trade_size: trade.trade_size,
            execution_price: trade.execution_price,
            start_position: trade.start_position,
            sentiment: sentiment.to_string(),
            is_win: u8::from(trade.closed_pnl > 0.0),
            is_long: u8::from(side.is_long()),
            is_short: u8::from(side.is_short()),
        }
    }
}

/// Row counts observed at each pipeline stage.
///
/// Invariant: `merged_trades <= joined_trades <= clean_trades <= raw_trade_rows`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineCounts {
    /// Sentiment rows as loaded.
    pub raw_sentiment_rows: usize,
    /// Sentiment rows after per-date dedup.
    pub unique_sentiment_days: usize,
    /// Trade rows as loaded.
    pub raw_trade_rows: usize,
    /// Trades surviving the normalizer's drop of bad date/PnL rows.
    pub clean_trades: usize,
    /// Trades attempted against the sentiment map.
    pub joined_trades: usize,
    /// Trades with a sentiment match.
    pub merged_trades: usize,
}
