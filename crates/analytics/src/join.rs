//! Date-keyed join of trades to sentiment days.
//!
//! Left-join-then-filter semantics: every trade is attempted against the
//! sentiment map before rejection, and both counts are kept so the loss is
//! auditable. Sentiment is unique per date by construction upstream.

use chrono::NaiveDate;
use sentiment_core::{MergedTrade, SentimentRecord, TradeRecord};
use std::collections::HashMap;
use tracing::debug;

/// Output of the join stage.
#[derive(Debug, Clone)]
pub struct JoinOutcome {
    /// Trades with a sentiment match, feature-augmented.
    pub merged: Vec<MergedTrade>,
    /// Trades attempted against the sentiment map.
    pub joined_count: usize,
    /// Trades dropped for lack of a sentiment on their date.
    pub unmatched_count: usize,
}

/// Join each trade to the sentiment record sharing its calendar date,
/// discarding trades with no match.
pub fn join_trades(trades: &[TradeRecord], sentiment: &[SentimentRecord]) -> JoinOutcome {
    let by_date: HashMap<NaiveDate, &str> = sentiment
        .iter()
        .map(|record| (record.date, record.sentiment.as_str()))
        .collect();

    let mut merged = Vec::with_capacity(trades.len());
    let mut unmatched = 0usize;

    for trade in trades {
        match by_date.get(&trade.date) {
            Some(label) => merged.push(MergedTrade::from_trade(trade, label)),
            None => {
                debug!(date = %trade.date, "dropping trade with no sentiment for its date");
                unmatched += 1;
            }
        }
    }

    JoinOutcome {
        merged,
        joined_count: trades.len(),
        unmatched_count: unmatched,
    }
}
