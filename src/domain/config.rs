//! Engine configuration.
//!
//! Typed settings for the data directory, indicator windows, and backtest
//! parameters. Defaults apply per key, so a config file only needs to name
//! what it overrides.

use std::path::PathBuf;

use crate::domain::strategy::{DEFAULT_FAST_WINDOW, DEFAULT_SLOW_WINDOW};

pub const DEFAULT_INITIAL_CAPITAL: f64 = 10_000.0;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub data_dir: PathBuf,
    pub rsi_window: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_window: usize,
    pub bollinger_mult_x100: u32,
    pub stochastic_window: usize,
    pub stochastic_smooth: usize,
    pub fast_window: usize,
    pub slow_window: usize,
    pub initial_capital: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        use crate::domain::indicator::{bollinger, macd, rsi, stochastic};

        EngineConfig {
            data_dir: PathBuf::from("data"),
            rsi_window: rsi::DEFAULT_WINDOW,
            macd_fast: macd::DEFAULT_FAST,
            macd_slow: macd::DEFAULT_SLOW,
            macd_signal: macd::DEFAULT_SIGNAL,
            bollinger_window: bollinger::DEFAULT_WINDOW,
            bollinger_mult_x100: bollinger::DEFAULT_MULT_X100,
            stochastic_window: stochastic::DEFAULT_WINDOW,
            stochastic_smooth: stochastic::DEFAULT_SMOOTH,
            fast_window: DEFAULT_FAST_WINDOW,
            slow_window: DEFAULT_SLOW_WINDOW,
            initial_capital: DEFAULT_INITIAL_CAPITAL,
        }
    }
}

impl EngineConfig {
    pub fn indicator_config(&self) -> crate::domain::indicator_helpers::IndicatorConfig {
        crate::domain::indicator_helpers::IndicatorConfig {
            rsi_window: self.rsi_window,
            macd_fast: self.macd_fast,
            macd_slow: self.macd_slow,
            macd_signal: self.macd_signal,
            bollinger_window: self.bollinger_window,
            bollinger_mult_x100: self.bollinger_mult_x100,
            stochastic_window: self.stochastic_window,
            stochastic_smooth: self.stochastic_smooth,
            ma_short: self.fast_window,
            ma_long: self.slow_window,
        }
    }
}
