//! Join and aggregation for the sentiment-analysis pipeline.
//!
//! This crate handles:
//! - Date-keyed join of trades to sentiment days
//! - Grouped distribution statistics per sentiment category
//! - Side cross-tabulation normalized within each category

pub mod join;
pub mod summary;

pub use join::{join_trades, JoinOutcome};
pub use summary::{category_counts, side_crosstab, summarize, SentimentSummary, SideBreakdown};
