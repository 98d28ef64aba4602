//! Grouped distribution statistics per sentiment category.

use sentiment_core::MergedTrade;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate statistics for one sentiment category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSummary {
    /// Category label.
    pub sentiment: String,
    /// Number of trades in the category.
    pub trade_count: u64,
    /// Mean closed PnL.
    pub pnl_mean: f64,
    /// Median closed PnL.
    pub pnl_median: f64,
    /// Total closed PnL.
    pub pnl_sum: f64,
    /// Fraction of trades with strictly positive PnL, in [0, 1].
    pub win_rate: f64,
    /// Mean trade size, skipping rows where size is unknown.
    pub avg_trade_size: Option<f64>,
    /// Mean start position, skipping rows where it is unknown.
    pub avg_start_position: Option<f64>,
}

#[derive(Debug, Default)]
struct Accumulator {
    pnl: Vec<f64>,
    wins: u64,
    size_sum: f64,
    size_count: u64,
    position_sum: f64,
    position_count: u64,
}

/// Compute per-category summaries, sorted by category label.
pub fn summarize(merged: &[MergedTrade]) -> Vec<SentimentSummary> {
    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();

    for trade in merged {
        let acc = groups.entry(trade.sentiment.as_str()).or_default();
        acc.pnl.push(trade.closed_pnl);
        acc.wins += u64::from(trade.is_win);
        if let Some(size) = trade.trade_size {
            acc.size_sum += size;
            acc.size_count += 1;
        }
        if let Some(position) = trade.start_position {
            acc.position_sum += position;
            acc.position_count += 1;
        }
    }

    groups
        .into_iter()
        .map(|(label, mut acc)| {
            let count = acc.pnl.len() as u64;
            let sum: f64 = acc.pnl.iter().sum();
            SentimentSummary {
                sentiment: label.to_string(),
                trade_count: count,
                pnl_mean: sum / count as f64,
                pnl_median: median(&mut acc.pnl),
                pnl_sum: sum,
                win_rate: acc.wins as f64 / count as f64,
                avg_trade_size: mean_of(acc.size_sum, acc.size_count),
                avg_start_position: mean_of(acc.position_sum, acc.position_count),
            }
        })
        .collect()
}

/// Category frequency counts in descending-count order (ties broken by
/// label), the ordering used by the distribution chart.
pub fn category_counts(merged: &[MergedTrade]) -> Vec<(String, u64)> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for trade in merged {
        *counts.entry(trade.sentiment.as_str()).or_default() += 1;
    }

    let mut out: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Side proportions within one sentiment category, summing to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct SideBreakdown {
    /// Category label.
    pub sentiment: String,
    /// (side label, proportion) pairs sorted by side label.
    pub proportions: Vec<(String, f64)>,
}

/// Cross-tabulate sentiment against side, normalized within each sentiment
/// row. Categories sorted by label, sides sorted by label within each row.
pub fn side_crosstab(merged: &[MergedTrade]) -> Vec<SideBreakdown> {
    let mut groups: BTreeMap<&str, BTreeMap<&str, u64>> = BTreeMap::new();
    for trade in merged {
        *groups
            .entry(trade.sentiment.as_str())
            .or_default()
            .entry(trade.side.as_str())
            .or_default() += 1;
    }

    groups
        .into_iter()
        .map(|(label, sides)| {
            let total: u64 = sides.values().sum();
            SideBreakdown {
                sentiment: label.to_string(),
                proportions: sides
                    .into_iter()
                    .map(|(side, count)| (side.to_string(), count as f64 / total as f64))
                    .collect(),
            }
        })
        .collect()
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}

fn mean_of(sum: f64, count: u64) -> Option<f64> {
    if count > 0 {
        Some(sum / count as f64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use sentiment_core::{MergedTrade, TradeRecord};

    fn make_merged(sentiment: &str, side: &str, pnl: f64, size: Option<f64>) -> MergedTrade {
        let time = NaiveDate::from_ymd_opt(2023, 3, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let trade = TradeRecord {
            time,
            date: time.date(),
            side: side.to_string(),
            closed_pnl: pnl,
            trade_size: size,
            execution_price: Some(20000.0),
            start_position: Some(0.0),
        };
        MergedTrade::from_trade(&trade, sentiment)
    }

    #[test]
    fn test_summary_statistics() {
        let merged = vec![
            make_merged("Fear", "buy", 10.0, Some(100.0)),
            make_merged("Fear", "sell", -4.0, Some(300.0)),
            make_merged("Fear", "buy", 6.0, None),
            make_merged("Greed", "sell", 0.0, Some(50.0)),
        ];
        let summaries = summarize(&merged);

        assert_eq!(summaries.len(), 2);
        let fear = &summaries[0];
        assert_eq!(fear.sentiment, "Fear");
        assert_eq!(fear.trade_count, 3);
        assert_relative_eq!(fear.pnl_mean, 4.0);
        assert_relative_eq!(fear.pnl_median, 6.0);
        assert_relative_eq!(fear.pnl_sum, 12.0);
        assert_relative_eq!(fear.win_rate, 2.0 / 3.0);
        // None sizes are skipped, not counted as zero.
        assert_relative_eq!(fear.avg_trade_size.unwrap(), 200.0);

        let greed = &summaries[1];
        // Zero PnL is not a win.
        assert_relative_eq!(greed.win_rate, 0.0);
    }

    #[test]
    fn test_win_rate_bounds_and_formula() {
        let merged = vec![
            make_merged("Neutral", "buy", 1.0, None),
            make_merged("Neutral", "buy", -1.0, None),
            make_merged("Neutral", "buy", 2.0, None),
            make_merged("Neutral", "buy", -2.0, None),
        ];
        let summaries = summarize(&merged);
        let wins = merged.iter().filter(|m| m.is_win == 1).count();

        assert!(summaries[0].win_rate >= 0.0 && summaries[0].win_rate <= 1.0);
        assert_relative_eq!(summaries[0].win_rate, wins as f64 / merged.len() as f64);
    }

    #[test]
    fn test_median_even_count() {
        let merged = vec![
            make_merged("Fear", "buy", 1.0, None),
            make_merged("Fear", "buy", 2.0, None),
            make_merged("Fear", "buy", 3.0, None),
            make_merged("Fear", "buy", 4.0, None),
        ];
        assert_relative_eq!(summarize(&merged)[0].pnl_median, 2.5);
    }

    #[test]
    fn test_category_counts_descending() {
        let merged = vec![
            make_merged("Fear", "buy", 1.0, None),
            make_merged("Greed", "buy", 1.0, None),
            make_merged("Greed", "sell", 1.0, None),
        ];
        let counts = category_counts(&merged);
        assert_eq!(counts[0], ("Greed".to_string(), 2));
        assert_eq!(counts[1], ("Fear".to_string(), 1));
    }

    #[test]
    fn test_crosstab_rows_sum_to_one() {
        let merged = vec![
            make_merged("Fear", "buy", 1.0, None),
            make_merged("Fear", "buy", 1.0, None),
            make_merged("Fear", "sell", 1.0, None),
            make_merged("Greed", "sell", 1.0, None),
        ];
        let crosstab = side_crosstab(&merged);

        for row in &crosstab {
            let total: f64 = row.proportions.iter().map(|(_, p)| p).sum();
            assert_relative_eq!(total, 1.0);
        }

        let fear = &crosstab[0];
        assert_eq!(fear.sentiment, "Fear");
        assert_relative_eq!(fear.proportions[0].1, 2.0 / 3.0); // buy
        assert_relative_eq!(fear.proportions[1].1, 1.0 / 3.0); // sell
    }

    #[test]
    fn test_empty_input() {
        assert!(summarize(&[]).is_empty());
        assert!(category_counts(&[]).is_empty());
        assert!(side_crosstab(&[]).is_empty());
    }
}
