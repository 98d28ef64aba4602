//! Sentiment normalization: day-first dates, title-cased labels, per-date dedup.

use crate::loader::RawTable;
use chrono::NaiveDate;
use sentiment_core::{title_case, Error, Result, SentimentRecord};
use std::collections::HashSet;
use tracing::debug;

/// Date formats accepted for sentiment rows. Ambiguous two-digit-leading
/// dates resolve day-first: "01-03-2023" is 1 March, not 3 January.
const DATE_FORMATS: &[&str] = &["%d-%m-%Y", "%d/%m/%Y", "%Y-%m-%d"];

/// Parse a sentiment date with day-first interpretation.
pub fn parse_day_first(raw: &str) -> Result<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| Error::date_parse(format!("unparseable sentiment date {raw:?}")))
}

/// Normalize a raw sentiment table into one record per distinct date.
///
/// The classification column is accepted under its source name
/// (`classification`) or already renamed (`sentiment`). Labels are
/// title-cased. Rows whose date duplicates an earlier row are dropped,
/// keeping the first occurrence. Unparseable dates are fatal.
pub fn normalize_sentiment(table: &RawTable) -> Result<Vec<SentimentRecord>> {
    let mut seen: HashSet<NaiveDate> = HashSet::new();
    let mut records = Vec::with_capacity(table.len());

    for (idx, row) in table.rows().enumerate() {
        let raw_date = table
            .get(row, "date")
            .ok_or_else(|| Error::input(format!("sentiment row {idx}: missing date")))?;
        let date = parse_day_first(raw_date)?;

        let raw_label = table
            .get(row, "classification")
            .or_else(|| table.get(row, "sentiment"))
            .ok_or_else(|| Error::input(format!("sentiment row {idx}: missing classification")))?;

        if !seen.insert(date) {
            debug!(%date, "dropping duplicate sentiment date");
            continue;
        }

        records.push(SentimentRecord {
            date,
            sentiment: title_case(raw_label),
        });
    }

    Ok(records)
}
