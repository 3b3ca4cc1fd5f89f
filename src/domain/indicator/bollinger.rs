//! Bollinger Bands indicator.
//!
//! Middle = SMA(window), Upper/Lower = Middle ± mult * population stddev of
//! the trailing window. The multiplier is passed scaled by 100 so it can live
//! inside the hashable [`IndicatorType`] key.
//!
//! Warm-up: first (window-1) bars are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::Bar;

pub const DEFAULT_WINDOW: usize = 20;
pub const DEFAULT_MULT_X100: u32 = 200;

pub fn calculate_bollinger(bars: &[Bar], window: usize, mult_x100: u32) -> IndicatorSeries {
    let indicator_type = IndicatorType::Bollinger { window, mult_x100 };
    let mult = mult_x100 as f64 / 100.0;
    let mut values = Vec::with_capacity(bars.len());

    if window == 0 {
        for bar in bars {
            values.push(IndicatorPoint {
                timestamp: bar.timestamp,
                valid: false,
                value: IndicatorValue::Bollinger {
                    upper: 0.0,
                    middle: 0.0,
                    lower: 0.0,
                },
            });
        }
        return IndicatorSeries {
            indicator_type,
            values,
        };
    }

    for (i, bar) in bars.iter().enumerate() {
        if i < window - 1 {
            values.push(IndicatorPoint {
                timestamp: bar.timestamp,
                valid: false,
                value: IndicatorValue::Bollinger {
                    upper: 0.0,
                    middle: 0.0,
                    lower: 0.0,
                },
            });
            continue;
        }

        let slice = &bars[i + 1 - window..=i];
        let mean = slice.iter().map(|b| b.close).sum::<f64>() / window as f64;
        let variance = slice
            .iter()
            .map(|b| {
                let d = b.close - mean;
                d * d
            })
            .sum::<f64>()
            / window as f64;
        let stddev = variance.sqrt();

        values.push(IndicatorPoint {
            timestamp: bar.timestamp,
            valid: true,
            value: IndicatorValue::Bollinger {
                upper: mean + mult * stddev,
                middle: mean,
                lower: mean - mult * stddev,
            },
        });
    }

    IndicatorSeries {
        indicator_type,
        values,
    }
}

pub fn calculate_bollinger_default(bars: &[Bar]) -> IndicatorSeries {
    calculate_bollinger(bars, DEFAULT_WINDOW, DEFAULT_MULT_X100)
}
