//! CSV file data adapter.
//!
//! One file per symbol, `<SYMBOL>.csv` under a base directory, with header
//! `timestamp,open,high,low,close,volume`. Timestamps are either
//! `YYYY-MM-DD HH:MM:SS` or bare dates (taken as midnight).

use crate::domain::error::ChartmillError;
use crate::domain::ohlcv::Bar;
use crate::ports::data_port::DataPort;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::PathBuf;

pub struct CsvDataAdapter {
    base_path: PathBuf,
}

impl CsvDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

fn parse_timestamp(text: &str) -> Result<NaiveDateTime, ChartmillError> {
    if let Ok(ts) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Ok(ts);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default())
        .map_err(|e| ChartmillError::Computation {
            stage: "csv".into(),
            reason: format!("invalid timestamp '{}': {}", text, e),
        })
}

fn parse_field(record: &csv::StringRecord, idx: usize, name: &str) -> Result<f64, ChartmillError> {
    record
        .get(idx)
        .ok_or_else(|| ChartmillError::Computation {
            stage: "csv".into(),
            reason: format!("missing {} column", name),
        })?
        .parse()
        .map_err(|e| ChartmillError::Computation {
            stage: "csv".into(),
            reason: format!("invalid {} value: {}", name, e),
        })
}

impl DataPort for CsvDataAdapter {
    fn fetch_bars(
        &self,
        symbol: &str,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Vec<Bar>, ChartmillError> {
        let path = self.csv_path(symbol);
        if !path.exists() {
            return Err(ChartmillError::DataUnavailable {
                symbol: symbol.to_string(),
            });
        }
        let content = fs::read_to_string(&path)?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| ChartmillError::Computation {
                stage: "csv".into(),
                reason: format!("CSV parse error: {}", e),
            })?;

            let ts_str = record.get(0).ok_or_else(|| ChartmillError::Computation {
                stage: "csv".into(),
                reason: "missing timestamp column".into(),
            })?;
            let timestamp = parse_timestamp(ts_str)?;

            if start.is_some_and(|s| timestamp < s) || end.is_some_and(|e| timestamp > e) {
                continue;
            }

            bars.push(Bar {
                timestamp,
                open: parse_field(&record, 1, "open")?,
                high: parse_field(&record, 2, "high")?,
                low: parse_field(&record, 3, "low")?,
                close: parse_field(&record, 4, "close")?,
                volume: parse_field(&record, 5, "volume")?,
            });
        }

        bars.sort_by_key(|b| b.timestamp);
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, ChartmillError> {
        let entries = fs::read_dir(&self.base_path)?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(symbol) = name.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
