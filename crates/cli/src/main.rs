use anyhow::Context;
use clap::Parser;
use sentiment_core::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sentiment-analysis")]
#[command(about = "Correlate Bitcoin market sentiment with trader performance", long_about = None)]
struct Cli {
    /// Config file path (JSON); flags below override its values
    #[arg(short, long)]
    config: Option<String>,
    /// Sentiment CSV path
    #[arg(long)]
    sentiment: Option<String>,
    /// Trade CSV path
    #[arg(long)]
    trades: Option<String>,
    /// Output directory for charts and tables
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => Config::default(),
    };
    if let Some(sentiment) = cli.sentiment {
        config.inputs.sentiment_path = sentiment;
    }
    if let Some(trades) = cli.trades {
        config.inputs.trades_path = trades;
    }
    if let Some(output) = cli.output {
        config.output.dir = output;
    }

    sentiment_cli::run(&config).context("analysis failed")?;
    Ok(())
}
