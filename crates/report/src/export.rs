//! CSV export of the grouped summary and the merged dataset.

use sentiment_analytics::SentimentSummary;
use sentiment_core::{MergedTrade, Result};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Grouped aggregate table file name.
pub const SUMMARY_FILE: &str = "summary_statistics.csv";
/// Full merged, feature-augmented dataset file name.
pub const MERGED_FILE: &str = "merged_analysis_data.csv";

/// Create the output directory if absent.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// Summary row as exported, with values rounded to two decimals.
#[derive(Debug, Serialize)]
struct SummaryRow {
    sentiment: String,
    trade_count: u64,
    pnl_mean: f64,
    pnl_median: f64,
    pnl_sum: f64,
    win_rate: f64,
    avg_trade_size: Option<f64>,
    avg_start_position: Option<f64>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl From<&SentimentSummary> for SummaryRow {
    fn from(summary: &SentimentSummary) -> Self {
        Self {
            sentiment: summary.sentiment.clone(),
            trade_count: summary.trade_count,
            pnl_mean: round2(summary.pnl_mean),
            pnl_median: round2(summary.pnl_median),
            pnl_sum: round2(summary.pnl_sum),
            win_rate: round2(summary.win_rate),
            avg_trade_size: summary.avg_trade_size.map(round2),
            avg_start_position: summary.avg_start_position.map(round2),
        }
    }
}

/// Write the grouped summary table. Overwrites any previous run's file.
pub fn write_summary(dir: &Path, summaries: &[SentimentSummary]) -> Result<()> {
    let path = dir.join(SUMMARY_FILE);
    let mut writer = csv::Writer::from_path(&path)?;
    if summaries.is_empty() {
        // serialize() would never run, so emit the header row ourselves.
        writer.write_record([
            "sentiment",
            "trade_count",
            "pnl_mean",
            "pnl_median",
            "pnl_sum",
            "win_rate",
            "avg_trade_size",
            "avg_start_position",
        ])?;
    }
    for summary in summaries {
        writer.serialize(SummaryRow::from(summary))?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = summaries.len(), "wrote summary statistics");
    Ok(())
}

/// Write the full merged dataset. Overwrites any previous run's file.
pub fn write_merged(dir: &Path, merged: &[MergedTrade]) -> Result<()> {
    let path = dir.join(MERGED_FILE);
    let mut writer = csv::Writer::from_path(&path)?;
    if merged.is_empty() {
        writer.write_record([
            "time",
            "date",
            "side",
            "closed_pnl",
            "trade_size",
            "execution_price",
            "start_position",
            "sentiment",
            "is_win",
            "is_long",
            "is_short",
        ])?;
    }
    for trade in merged {
        writer.serialize(trade)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = merged.len(), "wrote merged dataset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sentiment_core::TradeRecord;

    fn make_merged(sentiment: &str, pnl: f64) -> MergedTrade {
        let time = NaiveDate::from_ymd_opt(2023, 3, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let trade = TradeRecord {
            time,
            date: time.date(),
            side: "buy".to_string(),
            closed_pnl: pnl,
            trade_size: Some(100.0),
            execution_price: None,
            start_position: Some(0.0),
        };
        MergedTrade::from_trade(&trade, sentiment)
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.006), 1.01);
        assert_eq!(round2(2.3333), 2.33);
        assert_eq!(round2(-0.333333), -0.33);
        // The f64 nearest 1.005 is slightly below it, so this rounds down.
        assert_eq!(round2(1.005), 1.0);
    }

    #[test]
    fn test_write_merged_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let merged = vec![make_merged("Fear", 5.0), make_merged("Greed", -1.0)];

        write_merged(dir.path(), &merged).expect("write");

        let mut reader =
            csv::Reader::from_path(dir.path().join(MERGED_FILE)).expect("read back");
        let rows: Vec<csv::StringRecord> =
            reader.records().collect::<std::result::Result<_, _>>().expect("rows");
        assert_eq!(rows.len(), 2);

        let headers = reader.headers().expect("headers").clone();
        let sentiment_idx = headers.iter().position(|h| h == "sentiment").expect("col");
        let is_win_idx = headers.iter().position(|h| h == "is_win").expect("col");
        assert_eq!(&rows[0][sentiment_idx], "Fear");
        assert_eq!(&rows[0][is_win_idx], "1");
        assert_eq!(&rows[1][is_win_idx], "0");
    }

    #[test]
    fn test_write_summary_headers_only_when_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_summary(dir.path(), &[]).expect("write");

        let mut reader =
            csv::Reader::from_path(dir.path().join(SUMMARY_FILE)).expect("read back");
        assert_eq!(reader.records().count(), 0);
    }

    #[test]
    fn test_ensure_output_dir_nested() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("a").join("b");
        ensure_output_dir(&nested).expect("create");
        assert!(nested.is_dir());
        // Idempotent.
        ensure_output_dir(&nested).expect("create again");
    }
}
