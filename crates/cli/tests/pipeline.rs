//! End-to-end pipeline tests over real temp files.

use sentiment_core::{ChartConfig, Config, InputConfig, OutputConfig};
use std::fs;
use std::path::Path;

fn write_file(path: &Path, content: &str) {
    fs::write(path, content).expect("write input");
}

fn make_config(dir: &Path) -> Config {
    Config {
        inputs: InputConfig {
            sentiment_path: dir.join("sentiment.csv").to_string_lossy().into_owned(),
            trades_path: dir.join("trades.csv").to_string_lossy().into_owned(),
        },
        output: OutputConfig {
            dir: dir.join("analysis_output").to_string_lossy().into_owned(),
        },
        charts: ChartConfig {
            width: 640,
            height: 480,
        },
    }
}

fn read_rows(path: &Path) -> (csv::StringRecord, Vec<csv::StringRecord>) {
    let mut reader = csv::Reader::from_path(path).expect("open output");
    let headers = reader.headers().expect("headers").clone();
    let rows = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .expect("rows");
    (headers, rows)
}

fn col<'a>(headers: &csv::StringRecord, row: &'a csv::StringRecord, name: &str) -> &'a str {
    let idx = headers.iter().position(|h| h == name).expect("column");
    &row[idx]
}

#[test]
fn full_run_produces_all_artifacts() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_file(
        &dir.path().join("sentiment.csv"),
        "date,classification\n\
         01-03-2023,fear\n\
         01-03-2023,greed\n\
         02-03-2023,extreme greed\n",
    );
    write_file(
        &dir.path().join("trades.csv"),
        "Timestamp IST,Side,Closed PnL,Size USD,Execution Price,Start Position\n\
         2023-03-01 10:00:00,BUY,5.0,100,20000,0\n\
         2023-03-01 14:30:00,SELL,-2.5,250,20100,1.5\n\
         2023-03-02 09:00:00,SELL,0.0,80,20500,0\n\
         garbage-timestamp,BUY,9.0,100,20000,0\n\
         2023-03-05 12:00:00,BUY,3.0,100,21000,0\n",
    );

    let config = make_config(dir.path());
    let counts = sentiment_cli::run(&config).expect("run");

    // Monotone shrinkage across stages.
    assert!(counts.merged_trades <= counts.joined_trades);
    assert!(counts.joined_trades <= counts.clean_trades);
    assert!(counts.clean_trades <= counts.raw_trade_rows);

    assert_eq!(counts.raw_sentiment_rows, 3);
    assert_eq!(counts.unique_sentiment_days, 2); // duplicate 01-03 dropped
    assert_eq!(counts.raw_trade_rows, 5);
    assert_eq!(counts.clean_trades, 4); // garbage timestamp dropped
    assert_eq!(counts.merged_trades, 3); // 05-03 has no sentiment

    let out = Path::new(&config.output.dir);
    for name in [
        "1_sentiment_distribution.png",
        "2_pnl_by_sentiment.png",
        "3_winrate.png",
        "4_trade_size.png",
        "5_long_short.png",
        "summary_statistics.csv",
        "merged_analysis_data.csv",
    ] {
        assert!(out.join(name).is_file(), "missing {name}");
    }
}

#[test]
fn merged_output_matches_expected_features() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_file(
        &dir.path().join("sentiment.csv"),
        "date,classification\n01-03-2023,fear\n",
    );
    write_file(
        &dir.path().join("trades.csv"),
        "Timestamp IST,Side,Closed PnL,Size USD,Execution Price,Start Position\n\
         2023-03-01 10:00:00,BUY,5.0,100,20000,0\n",
    );

    let config = make_config(dir.path());
    sentiment_cli::run(&config).expect("run");

    let (headers, rows) =
        read_rows(&Path::new(&config.output.dir).join("merged_analysis_data.csv"));
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    // The day-first sentiment date 01-03-2023 matches the trade on 1 March.
    assert_eq!(col(&headers, row, "sentiment"), "Fear");
    assert_eq!(col(&headers, row, "date"), "2023-03-01");
    assert_eq!(col(&headers, row, "side"), "buy");
    assert_eq!(col(&headers, row, "is_win"), "1");
    assert_eq!(col(&headers, row, "is_long"), "1");
    assert_eq!(col(&headers, row, "is_short"), "0");
}

#[test]
fn summary_output_is_grouped_and_rounded() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_file(
        &dir.path().join("sentiment.csv"),
        "date,classification\n01-03-2023,fear\n02-03-2023,greed\n",
    );
    write_file(
        &dir.path().join("trades.csv"),
        "Timestamp IST,Side,Closed PnL,Size USD,Execution Price,Start Position\n\
         2023-03-01 10:00:00,BUY,1.0,100,20000,0\n\
         2023-03-01 11:00:00,SELL,-1.0,300,20000,0\n\
         2023-03-02 10:00:00,BUY,2.3333,50,20000,0\n",
    );

    let config = make_config(dir.path());
    sentiment_cli::run(&config).expect("run");

    let (headers, rows) =
        read_rows(&Path::new(&config.output.dir).join("summary_statistics.csv"));
    assert_eq!(rows.len(), 2);

    // Sorted by label: Fear before Greed.
    assert_eq!(col(&headers, &rows[0], "sentiment"), "Fear");
    assert_eq!(col(&headers, &rows[0], "trade_count"), "2");
    assert_eq!(col(&headers, &rows[0], "win_rate"), "0.5");
    assert_eq!(col(&headers, &rows[0], "avg_trade_size"), "200.0");

    assert_eq!(col(&headers, &rows[1], "sentiment"), "Greed");
    assert_eq!(col(&headers, &rows[1], "pnl_mean"), "2.33");
}

#[test]
fn empty_inputs_still_produce_tables() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_file(&dir.path().join("sentiment.csv"), "date,classification\n");
    write_file(
        &dir.path().join("trades.csv"),
        "Timestamp IST,Side,Closed PnL,Size USD,Execution Price,Start Position\n",
    );

    let config = make_config(dir.path());
    let counts = sentiment_cli::run(&config).expect("run");

    assert_eq!(counts.merged_trades, 0);
    let out = Path::new(&config.output.dir);
    assert!(out.join("summary_statistics.csv").is_file());
    assert!(out.join("merged_analysis_data.csv").is_file());
    // No data means no axes to draw.
    assert!(!out.join("1_sentiment_distribution.png").exists());
}

#[test]
fn missing_input_file_aborts_without_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_file(
        &dir.path().join("sentiment.csv"),
        "date,classification\n01-03-2023,fear\n",
    );
    // No trades.csv at all.

    let config = make_config(dir.path());
    assert!(sentiment_cli::run(&config).is_err());
    assert!(!Path::new(&config.output.dir).exists());
}
