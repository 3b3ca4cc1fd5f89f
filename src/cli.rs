//! CLI definition and dispatch.

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_data::CsvDataAdapter;
use crate::adapters::ini_config;
use crate::domain::backtest::run_backtest;
use crate::domain::config::EngineConfig;
use crate::domain::error::ChartmillError;
use crate::domain::indicator_helpers::{compute_indicator_report, IndicatorReport};
use crate::domain::market_data::MarketData;
use crate::domain::ohlcv::{validate_series, Bar};
use crate::domain::pattern::{detect_patterns, PatternKind};
use crate::domain::strategy::{MaCrossover, Strategy};
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug)]
#[command(name = "chartmill", about = "Technical analysis and backtesting over OHLCV bars")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the standard indicator suite for a symbol
    Indicators {
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        data: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Detect candlestick patterns for a symbol
    Patterns {
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        data: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run a moving-average crossover backtest
    Backtest {
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        data: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        capital: Option<f64>,
        #[arg(long)]
        fast: Option<usize>,
        #[arg(long)]
        slow: Option<usize>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(long)]
        data: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Indicators {
            symbol,
            data,
            config,
            start,
            end,
            output,
        } => run_indicators(
            &symbol,
            data.as_deref(),
            config.as_deref(),
            start.as_deref(),
            end.as_deref(),
            output.as_deref(),
        ),
        Command::Patterns {
            symbol,
            data,
            config,
            start,
            end,
            output,
        } => run_patterns(
            &symbol,
            data.as_deref(),
            config.as_deref(),
            start.as_deref(),
            end.as_deref(),
            output.as_deref(),
        ),
        Command::Backtest {
            symbol,
            data,
            config,
            capital,
            fast,
            slow,
            output,
        } => run_backtest_command(
            &symbol,
            data.as_deref(),
            config.as_deref(),
            capital,
            fast,
            slow,
            output.as_deref(),
        ),
        Command::ListSymbols { data, config } => run_list_symbols(data.as_deref(), config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}

fn resolve_config(
    config_path: Option<&Path>,
    data_override: Option<&Path>,
) -> Result<EngineConfig, ChartmillError> {
    let mut config = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            ini_config::load_config(path)?
        }
        None => EngineConfig::default(),
    };
    if let Some(dir) = data_override {
        config.data_dir = dir.to_path_buf();
    }
    Ok(config)
}

fn parse_timestamp_arg(text: &str) -> Result<NaiveDateTime, ChartmillError> {
    if let Ok(ts) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Ok(ts);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default())
        .map_err(|_| ChartmillError::InvalidRange {
            reason: format!(
                "'{}' is not a valid timestamp (expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS)",
                text
            ),
        })
}

fn parse_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(Option<NaiveDateTime>, Option<NaiveDateTime>), ChartmillError> {
    let start = start.map(parse_timestamp_arg).transpose()?;
    let end = end.map(parse_timestamp_arg).transpose()?;
    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            return Err(ChartmillError::InvalidRange {
                reason: format!("start {} is after end {}", s, e),
            });
        }
    }
    Ok((start, end))
}

fn fetch_bars(
    config: &EngineConfig,
    symbol: &str,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> Result<Vec<Bar>, ChartmillError> {
    let adapter = CsvDataAdapter::new(config.data_dir.clone());
    let bars = adapter.fetch_bars(symbol, start, end)?;
    if bars.is_empty() {
        return Err(ChartmillError::DataUnavailable {
            symbol: symbol.to_string(),
        });
    }
    validate_series(&bars)?;
    eprintln!("Loaded {} bars for {}", bars.len(), symbol);
    Ok(bars)
}

fn emit_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<(), ChartmillError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| ChartmillError::Computation {
        stage: "serialize".into(),
        reason: e.to_string(),
    })?;
    match output {
        Some(path) => {
            fs::write(path, json)?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[derive(Serialize)]
struct SymbolReport<T: Serialize> {
    symbol: String,
    bars: usize,
    #[serde(flatten)]
    body: T,
}

#[derive(Serialize)]
struct IndicatorsBody {
    indicators: IndicatorReport,
}

#[derive(Serialize)]
struct PatternsBody {
    #[serde(rename = "CandlestickPatterns")]
    patterns: BTreeMap<PatternKind, Vec<usize>>,
}

fn run_indicators(
    symbol: &str,
    data: Option<&Path>,
    config_path: Option<&Path>,
    start: Option<&str>,
    end: Option<&str>,
    output: Option<&Path>,
) -> Result<(), ChartmillError> {
    let config = resolve_config(config_path, data)?;
    let (start, end) = parse_range(start, end)?;
    let bars = fetch_bars(&config, symbol, start, end)?;

    let report = compute_indicator_report(&bars, &config.indicator_config());
    emit_json(
        &SymbolReport {
            symbol: symbol.to_string(),
            bars: bars.len(),
            body: IndicatorsBody { indicators: report },
        },
        output,
    )
}

fn run_patterns(
    symbol: &str,
    data: Option<&Path>,
    config_path: Option<&Path>,
    start: Option<&str>,
    end: Option<&str>,
    output: Option<&Path>,
) -> Result<(), ChartmillError> {
    let config = resolve_config(config_path, data)?;
    let (start, end) = parse_range(start, end)?;
    let bars = fetch_bars(&config, symbol, start, end)?;

    let patterns = detect_patterns(&bars);
    let matched: usize = patterns.values().map(Vec::len).sum();
    eprintln!("Found {} pattern occurrences", matched);

    emit_json(
        &SymbolReport {
            symbol: symbol.to_string(),
            bars: bars.len(),
            body: PatternsBody { patterns },
        },
        output,
    )
}

fn run_backtest_command(
    symbol: &str,
    data: Option<&Path>,
    config_path: Option<&Path>,
    capital: Option<f64>,
    fast: Option<usize>,
    slow: Option<usize>,
    output: Option<&Path>,
) -> Result<(), ChartmillError> {
    let config = resolve_config(config_path, data)?;
    let bars = fetch_bars(&config, symbol, None, None)?;

    let strategy = MaCrossover::new(
        fast.unwrap_or(config.fast_window),
        slow.unwrap_or(config.slow_window),
    );
    let initial_capital = capital.unwrap_or(config.initial_capital);

    eprintln!("Running {} on {}", strategy.name(), symbol);
    let market_data = MarketData::for_strategy(symbol.to_string(), bars, &strategy);
    let result = run_backtest(&market_data, &strategy, initial_capital)?;

    eprintln!("Trades:       {}", result.trades.len());
    eprintln!("Final value:  {:.2}", result.final_value);
    eprintln!("Total return: {:.2}%", result.total_return_pct);

    emit_json(&result, output)
}

fn run_list_symbols(
    data: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<(), ChartmillError> {
    let config = resolve_config(config_path, data)?;
    let adapter = CsvDataAdapter::new(config.data_dir.clone());
    let symbols = adapter.list_symbols()?;

    if symbols.is_empty() {
        eprintln!("No symbols found in {}", config.data_dir.display());
        return Ok(());
    }
    for symbol in symbols {
        println!("{symbol}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_timestamp_arg_full_format() {
        let ts = parse_timestamp_arg("2024-01-02 09:30:00").unwrap();
        assert_eq!(ts.to_string(), "2024-01-02 09:30:00");
    }

    #[test]
    fn parse_timestamp_arg_date_only() {
        let ts = parse_timestamp_arg("2024-01-02").unwrap();
        assert_eq!(ts.to_string(), "2024-01-02 00:00:00");
    }

    #[test]
    fn parse_timestamp_arg_garbage_fails() {
        assert!(matches!(
            parse_timestamp_arg("yesterday"),
            Err(ChartmillError::InvalidRange { .. })
        ));
    }

    #[test]
    fn parse_range_rejects_inverted_bounds() {
        let err = parse_range(Some("2024-02-01"), Some("2024-01-01")).unwrap_err();
        assert!(matches!(err, ChartmillError::InvalidRange { .. }));
    }

    #[test]
    fn parse_range_open_bounds() {
        let (start, end) = parse_range(None, Some("2024-01-01")).unwrap();
        assert!(start.is_none());
        assert!(end.is_some());
    }

    #[test]
    fn backtest_command_writes_result_json() {
        use std::io::Write;

        let dir = tempfile::TempDir::new().unwrap();
        let csv_path = dir.path().join("ACME.csv");
        let mut file = fs::File::create(&csv_path).unwrap();
        writeln!(file, "timestamp,open,high,low,close,volume").unwrap();
        for (i, close) in [20.0, 18.0, 16.0, 14.0, 12.0, 10.0, 16.0, 22.0, 28.0]
            .iter()
            .enumerate()
        {
            writeln!(
                file,
                "2024-01-0{} 00:00:00,{c},{},{},{c},1000",
                i + 1,
                close + 1.0,
                close - 1.0,
                c = close
            )
            .unwrap();
        }

        let out_path = dir.path().join("result.json");
        run_backtest_command(
            "ACME",
            Some(dir.path()),
            None,
            Some(10_000.0),
            Some(2),
            Some(4),
            Some(out_path.as_path()),
        )
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
        assert_eq!(json["strategy"], "SMA(2/4) crossover");
        assert_eq!(json["initial_capital"], 10_000.0);
        assert_eq!(json["trades"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn cli_parses_backtest_args() {
        use clap::Parser;

        let cli = Cli::parse_from([
            "chartmill",
            "backtest",
            "--symbol",
            "AAPL",
            "--capital",
            "5000",
            "--fast",
            "10",
            "--slow",
            "30",
        ]);
        match cli.command {
            Command::Backtest {
                symbol,
                capital,
                fast,
                slow,
                ..
            } => {
                assert_eq!(symbol, "AAPL");
                assert_eq!(capital, Some(5000.0));
                assert_eq!(fast, Some(10));
                assert_eq!(slow, Some(30));
            }
            _ => panic!("expected backtest command"),
        }
    }
}
