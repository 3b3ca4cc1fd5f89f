#![allow(dead_code)]

use chartmill::domain::error::ChartmillError;
pub use chartmill::domain::ohlcv::Bar;
use chartmill::ports::data_port::DataPort;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Bar>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(
        &self,
        symbol: &str,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Vec<Bar>, ChartmillError> {
        let bars = self
            .data
            .get(symbol)
            .ok_or_else(|| ChartmillError::DataUnavailable {
                symbol: symbol.to_string(),
            })?;
        Ok(bars
            .iter()
            .filter(|b| {
                start.is_none_or(|s| b.timestamp >= s) && end.is_none_or(|e| b.timestamp <= e)
            })
            .cloned()
            .collect())
    }

    fn list_symbols(&self) -> Result<Vec<String>, ChartmillError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn ts(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn make_bar(i: usize, open: f64, high: f64, low: f64, close: f64) -> Bar {
    Bar {
        timestamp: date(2024, 1, 1) + chrono::Duration::hours(i as i64),
        open,
        high,
        low,
        close,
        volume: 1000.0,
    }
}

/// Bars whose closes follow `prices`, with a small symmetric high/low band.
pub fn bars_from_closes(prices: &[f64]) -> Vec<Bar> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &close)| make_bar(i, close, close + 1.0, close - 1.0, close))
        .collect()
}

/// `n` bars of a V shape: a decline for the first half, then a recovery.
/// Produces exactly one upward moving-average cross for small windows.
pub fn v_shape_bars(n: usize, top: f64) -> Vec<Bar> {
    let half = n / 2;
    let closes: Vec<f64> = (0..n)
        .map(|i| {
            if i < half {
                top - i as f64
            } else {
                top - half as f64 + (i - half) as f64 * 2.0
            }
        })
        .collect();
    bars_from_closes(&closes)
}
