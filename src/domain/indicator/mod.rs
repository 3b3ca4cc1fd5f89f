//! Technical indicator types and implementations.
//!
//! - `IndicatorPoint`: a single point in an indicator time series; `valid`
//!   is false during the warm-up period (values there are placeholders and
//!   must never enter comparisons)
//! - `IndicatorValue`: enum for the different indicator output shapes
//! - `IndicatorType`: indicator identity + parameters (serves as map key)
//! - `IndicatorSeries`: a time series of indicator values

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stochastic;

pub use bollinger::calculate_bollinger;
pub use ema::calculate_ema;
pub use macd::calculate_macd;
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use stochastic::calculate_stochastic;

use chrono::NaiveDateTime;
use std::fmt;

#[derive(Debug, Clone)]
pub struct IndicatorPoint {
    pub timestamp: NaiveDateTime,
    pub valid: bool,
    pub value: IndicatorValue,
}

#[derive(Debug, Clone)]
pub enum IndicatorValue {
    Simple(f64),
    Macd {
        line: f64,
        signal: f64,
        histogram: f64,
    },
    Stochastic {
        k: f64,
        d: f64,
    },
    Bollinger {
        upper: f64,
        middle: f64,
        lower: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Stochastic {
        window: usize,
        smooth: usize,
    },
    Bollinger {
        window: usize,
        // multiplier scaled by 100 so the type stays hashable
        mult_x100: u32,
    },
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Simple value at index `i`, or None during warm-up (or for non-simple
    /// shapes). Crossover detection goes through this so warm-up placeholders
    /// never become comparison operands.
    pub fn simple_at(&self, i: usize) -> Option<f64> {
        let point = self.values.get(i)?;
        if !point.valid {
            return None;
        }
        match point.value {
            IndicatorValue::Simple(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_valid_at(&self, i: usize) -> bool {
        self.values.get(i).is_some_and(|p| p.valid)
    }

    /// Defined (post-warm-up) points, in order.
    pub fn defined(&self) -> impl Iterator<Item = &IndicatorPoint> {
        self.values.iter().filter(|p| p.valid)
    }

    /// Defined simple values, trimmed of the warm-up prefix.
    pub fn defined_simple(&self) -> Vec<f64> {
        self.defined()
            .filter_map(|p| match p.value {
                IndicatorValue::Simple(v) => Some(v),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(window) => write!(f, "SMA({})", window),
            IndicatorType::Ema(window) => write!(f, "EMA({})", window),
            IndicatorType::Rsi(window) => write!(f, "RSI({})", window),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorType::Stochastic { window, smooth } => {
                write!(f, "STOCHASTIC({},{})", window, smooth)
            }
            IndicatorType::Bollinger { window, mult_x100 } => {
                let mult = *mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", window, mult)
            }
        }
    }
}
