//! Core types and configuration for the sentiment-analysis pipeline.
//!
//! This crate provides shared types used across all other crates:
//! - Record types (sentiment days, trades, merged trades)
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{ChartConfig, Config, InputConfig, OutputConfig};
pub use error::{Error, Result};
pub use types::*;
