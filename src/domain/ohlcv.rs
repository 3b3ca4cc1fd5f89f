//! OHLCV bar representation and candle geometry.

use crate::domain::error::ChartmillError;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Bar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// |close - open|
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// high - low
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// high - max(open, close)
    pub fn upper_shadow(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    /// min(open, close) - low
    pub fn lower_shadow(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Midpoint of the candle body: (open + close) / 2
    pub fn body_midpoint(&self) -> f64 {
        (self.open + self.close) / 2.0
    }
}

/// Check the series invariant: strictly increasing timestamps, no duplicates.
pub fn validate_series(bars: &[Bar]) -> Result<(), ChartmillError> {
    for pair in bars.windows(2) {
        if pair[1].timestamp <= pair[0].timestamp {
            return Err(ChartmillError::InvalidRange {
                reason: format!(
                    "timestamps not strictly increasing at {} -> {}",
                    pair[0].timestamp, pair[1].timestamp
                ),
            });
        }
    }
    Ok(())
}
