//! Batch indicator computation and report assembly.
//!
//! `compute_indicator_report` runs the standard indicator suite over a bar
//! series and produces a serializable report with the warm-up prefixes
//! trimmed. Trimming is per list: the MACD line and %K start at their own
//! first defined index, ahead of the signal/%D lists that derive from them.

use serde::Serialize;

use crate::domain::indicator::{
    bollinger, calculate_bollinger, calculate_ema, calculate_macd, calculate_rsi, calculate_sma,
    calculate_stochastic, macd, rsi, stochastic, IndicatorSeries, IndicatorValue,
};
use crate::domain::ohlcv::Bar;

/// Windows for the standard indicator suite. Defaults mirror the common
/// charting conventions (RSI 14, MACD 12/26/9, Bollinger 20/2, Stochastic
/// 14/3, moving averages 20 and 50).
#[derive(Debug, Clone)]
pub struct IndicatorConfig {
    pub rsi_window: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_window: usize,
    pub bollinger_mult_x100: u32,
    pub stochastic_window: usize,
    pub stochastic_smooth: usize,
    pub ma_short: usize,
    pub ma_long: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        IndicatorConfig {
            rsi_window: rsi::DEFAULT_WINDOW,
            macd_fast: macd::DEFAULT_FAST,
            macd_slow: macd::DEFAULT_SLOW,
            macd_signal: macd::DEFAULT_SIGNAL,
            bollinger_window: bollinger::DEFAULT_WINDOW,
            bollinger_mult_x100: bollinger::DEFAULT_MULT_X100,
            stochastic_window: stochastic::DEFAULT_WINDOW,
            stochastic_smooth: stochastic::DEFAULT_SMOOTH,
            ma_short: 20,
            ma_long: 50,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MacdReport {
    #[serde(rename = "MACD")]
    pub macd: Vec<f64>,
    #[serde(rename = "Signal")]
    pub signal: Vec<f64>,
    #[serde(rename = "Histogram")]
    pub histogram: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct MovingAveragesReport {
    #[serde(rename = "SMA20")]
    pub sma_short: Vec<f64>,
    #[serde(rename = "SMA50")]
    pub sma_long: Vec<f64>,
    #[serde(rename = "EMA20")]
    pub ema_short: Vec<f64>,
    #[serde(rename = "EMA50")]
    pub ema_long: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct BollingerReport {
    #[serde(rename = "Upper")]
    pub upper: Vec<f64>,
    #[serde(rename = "Middle")]
    pub middle: Vec<f64>,
    #[serde(rename = "Lower")]
    pub lower: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct StochasticReport {
    #[serde(rename = "K")]
    pub k: Vec<f64>,
    #[serde(rename = "D")]
    pub d: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct IndicatorReport {
    #[serde(rename = "RSI")]
    pub rsi: Vec<f64>,
    #[serde(rename = "MACD")]
    pub macd: MacdReport,
    #[serde(rename = "MovingAverages")]
    pub moving_averages: MovingAveragesReport,
    #[serde(rename = "BollingerBands")]
    pub bollinger_bands: BollingerReport,
    #[serde(rename = "Stochastic")]
    pub stochastic: StochasticReport,
}

pub fn compute_indicator_report(bars: &[Bar], config: &IndicatorConfig) -> IndicatorReport {
    let rsi = calculate_rsi(bars, config.rsi_window);
    let macd = calculate_macd(bars, config.macd_fast, config.macd_slow, config.macd_signal);
    let bollinger = calculate_bollinger(bars, config.bollinger_window, config.bollinger_mult_x100);
    let stochastic = calculate_stochastic(bars, config.stochastic_window, config.stochastic_smooth);

    let line_warmup = if config.macd_fast == 0 || config.macd_slow == 0 || config.macd_signal == 0
    {
        usize::MAX
    } else {
        config.macd_fast.max(config.macd_slow) - 1
    };
    let k_warmup = if config.stochastic_window == 0 || config.stochastic_smooth == 0 {
        usize::MAX
    } else {
        config.stochastic_window - 1
    };

    IndicatorReport {
        rsi: rsi.defined_simple(),
        macd: split_macd(&macd, line_warmup),
        moving_averages: MovingAveragesReport {
            sma_short: calculate_sma(bars, config.ma_short).defined_simple(),
            sma_long: calculate_sma(bars, config.ma_long).defined_simple(),
            ema_short: calculate_ema(bars, config.ma_short).defined_simple(),
            ema_long: calculate_ema(bars, config.ma_long).defined_simple(),
        },
        bollinger_bands: split_bollinger(&bollinger),
        stochastic: split_stochastic(&stochastic, k_warmup),
    }
}

fn split_macd(series: &IndicatorSeries, line_warmup: usize) -> MacdReport {
    let mut report = MacdReport {
        macd: Vec::new(),
        signal: Vec::new(),
        histogram: Vec::new(),
    };
    for (i, point) in series.values.iter().enumerate() {
        if let IndicatorValue::Macd {
            line,
            signal,
            histogram,
        } = point.value
        {
            // The line is defined before the signal that smooths it.
            if i >= line_warmup {
                report.macd.push(line);
            }
            if point.valid {
                report.signal.push(signal);
                report.histogram.push(histogram);
            }
        }
    }
    report
}

fn split_bollinger(series: &IndicatorSeries) -> BollingerReport {
    let mut report = BollingerReport {
        upper: Vec::new(),
        middle: Vec::new(),
        lower: Vec::new(),
    };
    for point in series.defined() {
        if let IndicatorValue::Bollinger {
            upper,
            middle,
            lower,
        } = point.value
        {
            report.upper.push(upper);
            report.middle.push(middle);
            report.lower.push(lower);
        }
    }
    report
}

fn split_stochastic(series: &IndicatorSeries, k_warmup: usize) -> StochasticReport {
    let mut report = StochasticReport {
        k: Vec::new(),
        d: Vec::new(),
    };
    for (i, point) in series.values.iter().enumerate() {
        if let IndicatorValue::Stochastic { k, d } = point.value {
            if i >= k_warmup {
                report.k.push(k);
            }
            if point.valid {
                report.d.push(d);
            }
        }
    }
    report
}
