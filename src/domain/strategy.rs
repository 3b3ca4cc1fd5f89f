//! Trading strategies as a polymorphic seam.
//!
//! A [`Strategy`] declares the indicators it needs and turns market state at
//! a bar index into a [`Signal`]. The engine owns position state, so
//! strategies stay pure: same data and index, same signal.

use crate::domain::indicator::IndicatorType;
use crate::domain::market_data::MarketData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

pub trait Strategy {
    /// Human-readable strategy name for reports and logs.
    fn name(&self) -> String;

    /// Indicators that must be present in the market data before
    /// [`Strategy::evaluate`] is called.
    fn required_indicators(&self) -> Vec<IndicatorType>;

    /// Signal at bar index `t`. Implementations return `Hold` whenever the
    /// inputs they need are still warming up.
    fn evaluate(&self, data: &MarketData, t: usize) -> Signal;
}

/// Moving-average crossover: buy when the fast SMA crosses above the slow
/// SMA, sell when it crosses below. Crossings are detected against the
/// previous bar, so each crossing fires exactly once.
#[derive(Debug, Clone)]
pub struct MaCrossover {
    pub fast: usize,
    pub slow: usize,
}

pub const DEFAULT_FAST_WINDOW: usize = 20;
pub const DEFAULT_SLOW_WINDOW: usize = 50;

impl MaCrossover {
    pub fn new(fast: usize, slow: usize) -> Self {
        MaCrossover { fast, slow }
    }
}

impl Default for MaCrossover {
    fn default() -> Self {
        MaCrossover::new(DEFAULT_FAST_WINDOW, DEFAULT_SLOW_WINDOW)
    }
}

impl Strategy for MaCrossover {
    fn name(&self) -> String {
        format!("SMA({}/{}) crossover", self.fast, self.slow)
    }

    fn required_indicators(&self) -> Vec<IndicatorType> {
        vec![IndicatorType::Sma(self.fast), IndicatorType::Sma(self.slow)]
    }

    fn evaluate(&self, data: &MarketData, t: usize) -> Signal {
        if t == 0 {
            return Signal::Hold;
        }
        let (Some(fast), Some(slow)) = (
            data.indicator(&IndicatorType::Sma(self.fast)),
            data.indicator(&IndicatorType::Sma(self.slow)),
        ) else {
            return Signal::Hold;
        };

        // All four operands must be past warm-up before any comparison.
        let (Some(fast_now), Some(slow_now), Some(fast_prev), Some(slow_prev)) = (
            fast.simple_at(t),
            slow.simple_at(t),
            fast.simple_at(t - 1),
            slow.simple_at(t - 1),
        ) else {
            return Signal::Hold;
        };

        if fast_now > slow_now && fast_prev <= slow_prev {
            Signal::Buy
        } else if fast_now < slow_now && fast_prev >= slow_prev {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}
