//! Per-symbol market data: bars plus the indicator series computed over them.

use std::collections::HashMap;

use crate::domain::indicator::{
    calculate_bollinger, calculate_ema, calculate_macd, calculate_rsi, calculate_sma,
    calculate_stochastic, IndicatorSeries, IndicatorType,
};
use crate::domain::ohlcv::Bar;
use crate::domain::strategy::Strategy;

#[derive(Debug, Clone)]
pub struct MarketData {
    pub symbol: String,
    pub bars: Vec<Bar>,
    pub indicators: HashMap<IndicatorType, IndicatorSeries>,
}

impl MarketData {
    pub fn new(symbol: String, bars: Vec<Bar>) -> Self {
        MarketData {
            symbol,
            bars,
            indicators: HashMap::new(),
        }
    }

    /// Build market data with every indicator a strategy needs precomputed.
    pub fn for_strategy(symbol: String, bars: Vec<Bar>, strategy: &dyn Strategy) -> Self {
        let mut data = MarketData::new(symbol, bars);
        for indicator_type in strategy.required_indicators() {
            data.compute(indicator_type);
        }
        data
    }

    /// Compute and cache a single indicator series. Recomputing the same type
    /// replaces the cached series.
    pub fn compute(&mut self, indicator_type: IndicatorType) {
        let series = match indicator_type {
            IndicatorType::Sma(window) => calculate_sma(&self.bars, window),
            IndicatorType::Ema(window) => calculate_ema(&self.bars, window),
            IndicatorType::Rsi(window) => calculate_rsi(&self.bars, window),
            IndicatorType::Macd { fast, slow, signal } => {
                calculate_macd(&self.bars, fast, slow, signal)
            }
            IndicatorType::Stochastic { window, smooth } => {
                calculate_stochastic(&self.bars, window, smooth)
            }
            IndicatorType::Bollinger { window, mult_x100 } => {
                calculate_bollinger(&self.bars, window, mult_x100)
            }
        };
        self.indicators.insert(indicator_type, series);
    }

    pub fn indicator(&self, indicator_type: &IndicatorType) -> Option<&IndicatorSeries> {
        self.indicators.get(indicator_type)
    }

    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }
}
