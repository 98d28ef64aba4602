//! Input loading and normalization for the sentiment-analysis pipeline.
//!
//! This crate handles:
//! - Delimited-file loading with header canonicalization
//! - Sentiment normalization (day-first dates, title-cased labels, dedup)
//! - Trade normalization (tolerant numeric/timestamp coercion, row filtering)

pub mod loader;
pub mod sentiment;
pub mod trades;

pub use loader::RawTable;
pub use sentiment::normalize_sentiment;
pub use trades::{normalize_trades, CleanedTrades};
