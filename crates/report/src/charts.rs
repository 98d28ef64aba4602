//! Chart rendering: five fixed PNGs per run.
//!
//! Bar charts use segmented integer axes with category labels on the ticks;
//! the PnL chart is a per-category box plot with a dashed zero reference
//! line. With zero merged rows there is nothing to put on an axis, so
//! rendering is skipped with a warning and only the CSV artifacts remain.

use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::full_palette::{ORANGE, PURPLE};
use sentiment_analytics::{SentimentSummary, SideBreakdown};
use sentiment_core::{ChartConfig, Error, MergedTrade, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Category colors, cycled in chart order.
const PALETTE: [RGBColor; 5] = [RED, GREEN, ORANGE, BLUE, PURPLE];

fn draw_err(e: impl std::fmt::Display) -> Error {
    Error::chart(e.to_string())
}

/// Tick label for a segmented category axis.
fn segment_label(value: &SegmentValue<usize>, labels: &[String]) -> String {
    match value {
        SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

/// Render all five charts into `dir`.
pub fn render_all(
    dir: &Path,
    config: &ChartConfig,
    merged: &[MergedTrade],
    summaries: &[SentimentSummary],
    counts: &[(String, u64)],
    crosstab: &[SideBreakdown],
) -> Result<()> {
    if merged.is_empty() {
        warn!("no merged trades, skipping chart rendering");
        return Ok(());
    }

    sentiment_distribution(&dir.join("1_sentiment_distribution.png"), config, counts)?;
    pnl_by_sentiment(&dir.join("2_pnl_by_sentiment.png"), config, merged)?;
    win_rate(&dir.join("3_winrate.png"), config, summaries)?;
    trade_size(&dir.join("4_trade_size.png"), config, summaries)?;
    long_short(&dir.join("5_long_short.png"), config, crosstab)?;

    info!(dir = %dir.display(), "rendered 5 charts");
    Ok(())
}

/// Bar chart of sentiment category counts, most frequent first.
fn sentiment_distribution(
    path: &Path,
    config: &ChartConfig,
    counts: &[(String, u64)],
) -> Result<()> {
    let labels: Vec<String> = counts.iter().map(|(label, _)| label.clone()).collect();
    let y_max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1);

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Market Sentiment Distribution", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0u64..y_max + y_max / 5 + 1)
        .map_err(draw_err)?;

    let formatter = |v: &SegmentValue<usize>| segment_label(v, &labels);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&formatter)
        .y_desc("Trades")
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(counts.iter().enumerate().map(|(i, (_, count))| {
            Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0),
                    (SegmentValue::Exact(i + 1), *count),
                ],
                PALETTE[i % PALETTE.len()].filled(),
            )
        }))
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Box plot of closed PnL per category with a dashed zero reference line.
fn pnl_by_sentiment(path: &Path, config: &ChartConfig, merged: &[MergedTrade]) -> Result<()> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for trade in merged {
        groups
            .entry(trade.sentiment.as_str())
            .or_default()
            .push(trade.closed_pnl);
    }

    let labels: Vec<String> = groups.keys().map(|label| label.to_string()).collect();
    let quartiles: Vec<Quartiles> = groups.values().map(|pnl| Quartiles::new(pnl)).collect();

    // Whiskers can extend past the data range, so size the axis from the
    // quartile fences and keep zero in view for the reference line.
    let mut y_min = 0f32;
    let mut y_max = 0f32;
    for q in &quartiles {
        for v in q.values() {
            y_min = y_min.min(v);
            y_max = y_max.max(v);
        }
    }
    let pad = ((y_max - y_min) * 0.1).max(1.0);

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("PnL Distribution by Sentiment", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (0..labels.len()).into_segmented(),
            (y_min - pad)..(y_max + pad),
        )
        .map_err(draw_err)?;

    let formatter = |v: &SegmentValue<usize>| segment_label(v, &labels);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&formatter)
        .y_desc("Closed PnL")
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(
            quartiles
                .iter()
                .enumerate()
                .map(|(i, q)| Boxplot::new_vertical(SegmentValue::CenterOf(i), q)),
        )
        .map_err(draw_err)?;

    chart
        .draw_series(DashedLineSeries::new(
            vec![
                (SegmentValue::Exact(0), 0f32),
                (SegmentValue::Exact(labels.len()), 0f32),
            ],
            5,
            5,
            BLACK.stroke_width(1),
        ))
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Bar chart of win rate percentage per category.
fn win_rate(path: &Path, config: &ChartConfig, summaries: &[SentimentSummary]) -> Result<()> {
    let labels: Vec<String> = summaries.iter().map(|s| s.sentiment.clone()).collect();

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Win Rate by Sentiment", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0f64..100f64)
        .map_err(draw_err)?;

    let formatter = |v: &SegmentValue<usize>| segment_label(v, &labels);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&formatter)
        .y_desc("Win Rate (%)")
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(summaries.iter().enumerate().map(|(i, summary)| {
            Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), summary.win_rate * 100.0),
                ],
                GREEN.filled(),
            )
        }))
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Bar chart of mean trade size (USD) per category.
fn trade_size(path: &Path, config: &ChartConfig, summaries: &[SentimentSummary]) -> Result<()> {
    let labels: Vec<String> = summaries.iter().map(|s| s.sentiment.clone()).collect();
    let sizes: Vec<f64> = summaries
        .iter()
        .map(|s| s.avg_trade_size.unwrap_or(0.0))
        .collect();
    let y_max = sizes.iter().copied().fold(0f64, f64::max).max(1.0);

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Trade Size (USD) by Sentiment", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0f64..y_max * 1.2)
        .map_err(draw_err)?;

    let formatter = |v: &SegmentValue<usize>| segment_label(v, &labels);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&formatter)
        .y_desc("Mean Trade Size (USD)")
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(sizes.iter().enumerate().map(|(i, size)| {
            Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), *size),
                ],
                BLUE.filled(),
            )
        }))
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

fn side_color(side: &str, index: usize) -> RGBColor {
    match side {
        "buy" => GREEN,
        "sell" => RED,
        _ => PALETTE[(index + 3) % PALETTE.len()],
    }
}

/// Stacked bar of side proportions per category; rows sum to 1.
fn long_short(path: &Path, config: &ChartConfig, crosstab: &[SideBreakdown]) -> Result<()> {
    let labels: Vec<String> = crosstab.iter().map(|row| row.sentiment.clone()).collect();

    let mut sides: Vec<String> = crosstab
        .iter()
        .flat_map(|row| row.proportions.iter().map(|(side, _)| side.clone()))
        .collect();
    sides.sort();
    sides.dedup();

    // Stack segments bottom-up in side order, per category.
    let mut offsets = vec![0f64; crosstab.len()];
    let mut segments: Vec<(String, Vec<(usize, f64, f64)>)> = Vec::new();
    for side in &sides {
        let mut rects = Vec::new();
        for (ci, row) in crosstab.iter().enumerate() {
            if let Some((_, p)) = row.proportions.iter().find(|(s, _)| s == side) {
                rects.push((ci, offsets[ci], offsets[ci] + p));
                offsets[ci] += p;
            }
        }
        segments.push((side.clone(), rects));
    }

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Long vs Short by Sentiment", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0f64..1f64)
        .map_err(draw_err)?;

    let formatter = |v: &SegmentValue<usize>| segment_label(v, &labels);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&formatter)
        .y_desc("Proportion of Trades")
        .draw()
        .map_err(draw_err)?;

    for (si, (side, rects)) in segments.iter().enumerate() {
        let color = side_color(side, si);
        chart
            .draw_series(rects.iter().map(|(ci, y0, y1)| {
                Rectangle::new(
                    [
                        (SegmentValue::Exact(*ci), *y0),
                        (SegmentValue::Exact(ci + 1), *y1),
                    ],
                    color.filled(),
                )
            }))
            .map_err(draw_err)?
            .label(side.clone())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}
