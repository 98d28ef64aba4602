//! Pipeline orchestration for the sentiment-analysis binary.
//!
//! Five stages, executed once per run in order: load, normalize sentiment,
//! normalize trades, join, aggregate/report. Row counts are logged at each
//! stage so data loss is visible to the operator.

use sentiment_analytics::{category_counts, join_trades, side_crosstab, summarize};
use sentiment_core::{Config, PipelineCounts, Result};
use sentiment_ingestion::{normalize_sentiment, normalize_trades, RawTable};
use sentiment_report::{ensure_output_dir, render_all, write_merged, write_summary};
use std::path::Path;
use tracing::info;

/// Run the full analysis described by `config`.
///
/// Returns the row counts observed at each stage; the output directory holds
/// the durable artifacts (five charts plus two CSV tables).
pub fn run(config: &Config) -> Result<PipelineCounts> {
    info!("Bitcoin market sentiment vs trader performance analysis");

    // Stage 1: load.
    let sentiment_table = RawTable::from_path(&config.inputs.sentiment_path)?;
    let trade_table = RawTable::from_path(&config.inputs.trades_path)?;
    info!(
        sentiment_rows = sentiment_table.len(),
        trade_rows = trade_table.len(),
        "loaded input tables"
    );

    // Stage 2: sentiment normalization.
    let sentiment = normalize_sentiment(&sentiment_table)?;
    info!(unique_dates = sentiment.len(), "normalized sentiment data");

    // Stage 3: trade normalization.
    let cleaned = normalize_trades(&trade_table)?;
    info!(
        clean_trades = cleaned.trades.len(),
        dropped = cleaned.dropped_count,
        "normalized trade data"
    );

    // Stage 4: join on calendar date.
    let outcome = join_trades(&cleaned.trades, &sentiment);
    info!(
        merged_trades = outcome.merged.len(),
        unmatched = outcome.unmatched_count,
        "joined trades to sentiment"
    );

    // Stage 5: aggregate, export, render.
    let summaries = summarize(&outcome.merged);
    let counts = category_counts(&outcome.merged);
    let crosstab = side_crosstab(&outcome.merged);

    let output_dir = Path::new(&config.output.dir);
    ensure_output_dir(output_dir)?;
    render_all(
        output_dir,
        &config.charts,
        &outcome.merged,
        &summaries,
        &counts,
        &crosstab,
    )?;
    write_summary(output_dir, &summaries)?;
    write_merged(output_dir, &outcome.merged)?;

    info!(dir = %output_dir.display(), "analysis complete");

    Ok(PipelineCounts {
        raw_sentiment_rows: sentiment_table.len(),
        unique_sentiment_days: sentiment.len(),
        raw_trade_rows: trade_table.len(),
        clean_trades: cleaned.trades.len(),
        joined_trades: outcome.joined_count,
        merged_trades: outcome.merged.len(),
    })
}
