//! Report artifacts for the sentiment-analysis pipeline.
//!
//! This crate handles:
//! - Chart rendering (five fixed PNGs)
//! - CSV export of the grouped summary and the merged dataset
//!
//! All writes go to a single output directory, created if absent, and are
//! overwritten on every run.

pub mod charts;
pub mod export;

pub use charts::render_all;
pub use export::{ensure_output_dir, write_merged, write_summary, MERGED_FILE, SUMMARY_FILE};
