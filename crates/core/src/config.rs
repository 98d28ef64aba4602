//! Configuration structures for the sentiment-analysis pipeline.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input file configuration.
    pub inputs: InputConfig,
    /// Output configuration.
    pub output: OutputConfig,
    /// Chart rendering configuration.
    pub charts: ChartConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: InputConfig::default(),
            output: OutputConfig::default(),
            charts: ChartConfig::default(),
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        Ok(config)
    }
}

/// Input file paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Sentiment-by-day CSV (columns: date, classification).
    pub sentiment_path: String,
    /// Trade-by-trade CSV.
    pub trades_path: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            sentiment_path: "bitcoin_sentiment.csv".to_string(),
            trades_path: "trader_data.csv".to_string(),
        }
    }
}

/// Output directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for charts and exported tables, created if absent.
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "analysis_output".to_string(),
        }
    }
}

/// Chart rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
        }
    }
}
