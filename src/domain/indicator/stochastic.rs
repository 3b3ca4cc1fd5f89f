//! Stochastic oscillator.
//!
//! %K = 100 * (close - lowest_low) / (highest_high - lowest_low) over the
//! trailing `window` bars; a flat range yields %K = 50 (neutral).
//! %D = SMA(smooth) of %K.
//!
//! Points are valid once both components exist, from index
//! window - 1 + smooth - 1. Between window - 1 and that index the stored %K
//! is already the real value (so serialization can trim %K and %D
//! independently) while %D is still a placeholder.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::Bar;

pub const DEFAULT_WINDOW: usize = 14;
pub const DEFAULT_SMOOTH: usize = 3;

pub fn calculate_stochastic(bars: &[Bar], window: usize, smooth: usize) -> IndicatorSeries {
    let indicator_type = IndicatorType::Stochastic { window, smooth };

    if window == 0 || smooth == 0 {
        let values = bars
            .iter()
            .map(|b| IndicatorPoint {
                timestamp: b.timestamp,
                valid: false,
                value: IndicatorValue::Stochastic { k: 0.0, d: 0.0 },
            })
            .collect();
        return IndicatorSeries {
            indicator_type,
            values,
        };
    }

    let mut k_values = vec![0.0; bars.len()];
    for i in (window - 1)..bars.len() {
        let slice = &bars[i + 1 - window..=i];
        let lowest = slice.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        let highest = slice
            .iter()
            .map(|b| b.high)
            .fold(f64::NEG_INFINITY, f64::max);
        let range = highest - lowest;

        k_values[i] = if range == 0.0 {
            50.0
        } else {
            100.0 * (bars[i].close - lowest) / range
        };
    }

    let warmup = window - 1 + smooth - 1;
    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            if i < warmup {
                let k = if i >= window - 1 { k_values[i] } else { 0.0 };
                return IndicatorPoint {
                    timestamp: bar.timestamp,
                    valid: false,
                    value: IndicatorValue::Stochastic { k, d: 0.0 },
                };
            }
            let d = k_values[i + 1 - smooth..=i].iter().sum::<f64>() / smooth as f64;
            IndicatorPoint {
                timestamp: bar.timestamp,
                valid: true,
                value: IndicatorValue::Stochastic { k: k_values[i], d },
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type,
        values,
    }
}

pub fn calculate_stochastic_default(bars: &[Bar]) -> IndicatorSeries {
    calculate_stochastic(bars, DEFAULT_WINDOW, DEFAULT_SMOOTH)
}
