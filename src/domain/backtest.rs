//! Backtest engine: replays a strategy over historical bars.
//!
//! All-in/all-out long-only execution. The engine holds either cash or
//! shares, never both (apart from the zero side). Fills happen at the close
//! of the signal bar, with no commission or slippage.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::error::ChartmillError;
use crate::domain::market_data::MarketData;
use crate::domain::strategy::{Signal, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TradeAction {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
}

#[derive(Debug, Clone, Serialize)]
pub struct Trade {
    pub timestamp: NaiveDateTime,
    pub action: TradeAction,
    pub price: f64,
    pub shares: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EquityPoint {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BacktestResult {
    pub strategy: String,
    pub initial_capital: f64,
    pub final_value: f64,
    pub total_return_pct: f64,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
}

pub fn run_backtest(
    data: &MarketData,
    strategy: &dyn Strategy,
    initial_capital: f64,
) -> Result<BacktestResult, ChartmillError> {
    if initial_capital <= 0.0 {
        return Err(ChartmillError::InvalidRange {
            reason: format!("initial capital must be positive, got {}", initial_capital),
        });
    }
    if data.bars.is_empty() {
        return Err(ChartmillError::DataUnavailable {
            symbol: data.symbol.clone(),
        });
    }

    let mut cash = initial_capital;
    let mut shares = 0.0_f64;
    let mut trades = Vec::new();
    let mut equity_curve = Vec::with_capacity(data.bars.len());

    equity_curve.push(EquityPoint {
        timestamp: data.bars[0].timestamp,
        value: cash,
    });

    for t in 1..data.bars.len() {
        let bar = &data.bars[t];
        let price = bar.close;

        match strategy.evaluate(data, t) {
            Signal::Buy if shares == 0.0 => {
                shares = cash / price;
                trades.push(Trade {
                    timestamp: bar.timestamp,
                    action: TradeAction::Buy,
                    price,
                    shares,
                    value: cash,
                });
                cash = 0.0;
            }
            Signal::Sell if shares > 0.0 => {
                cash = shares * price;
                trades.push(Trade {
                    timestamp: bar.timestamp,
                    action: TradeAction::Sell,
                    price,
                    shares,
                    value: cash,
                });
                shares = 0.0;
            }
            _ => {}
        }

        equity_curve.push(EquityPoint {
            timestamp: bar.timestamp,
            value: cash + shares * price,
        });
    }

    let last_close = data.bars[data.bars.len() - 1].close;
    let final_value = cash + shares * last_close;
    let total_return_pct = (final_value - initial_capital) / initial_capital * 100.0;

    Ok(BacktestResult {
        strategy: strategy.name(),
        initial_capital,
        final_value,
        total_return_pct,
        trades,
        equity_curve,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::strategy::MaCrossover;
    use crate::domain::ohlcv::Bar;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_bars(prices: &[f64]) -> Vec<Bar> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    + chrono::Duration::hours(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1000.0,
            })
            .collect()
    }

    fn run(prices: &[f64], fast: usize, slow: usize, capital: f64) -> BacktestResult {
        let strategy = MaCrossover::new(fast, slow);
        let data = MarketData::for_strategy("TEST".into(), make_bars(prices), &strategy);
        run_backtest(&data, &strategy, capital).unwrap()
    }

    #[test]
    fn rejects_non_positive_capital() {
        let strategy = MaCrossover::new(2, 4);
        let data = MarketData::for_strategy("TEST".into(), make_bars(&[10.0; 8]), &strategy);

        let err = run_backtest(&data, &strategy, 0.0).unwrap_err();
        assert!(matches!(err, ChartmillError::InvalidRange { .. }));
        let err = run_backtest(&data, &strategy, -100.0).unwrap_err();
        assert!(matches!(err, ChartmillError::InvalidRange { .. }));
    }

    #[test]
    fn rejects_empty_series() {
        let strategy = MaCrossover::new(2, 4);
        let data = MarketData::new("EMPTY".into(), Vec::new());

        let err = run_backtest(&data, &strategy, 10_000.0).unwrap_err();
        assert!(matches!(err, ChartmillError::DataUnavailable { .. }));
    }

    #[test]
    fn flat_series_makes_no_trades() {
        let result = run(&[100.0; 20], 2, 4, 10_000.0);
        assert!(result.trades.is_empty());
        assert_relative_eq!(result.final_value, 10_000.0);
        assert_relative_eq!(result.total_return_pct, 0.0);
    }

    #[test]
    fn buy_then_hold_to_end() {
        // Decline then recovery: one upward cross, held through the end.
        let prices = [20.0, 18.0, 16.0, 14.0, 12.0, 10.0, 16.0, 22.0, 28.0];
        let result = run(&prices, 2, 4, 10_000.0);

        assert_eq!(result.trades.len(), 1);
        assert_eq!(result.trades[0].action, TradeAction::Buy);
        // Bought at t=7 close 22, marked to the final close 28.
        assert_relative_eq!(result.trades[0].price, 22.0);
        let shares = 10_000.0 / 22.0;
        assert_relative_eq!(result.final_value, shares * 28.0, max_relative = 1e-12);
        assert!(result.total_return_pct > 0.0);
    }

    #[test]
    fn round_trip_conserves_value() {
        // Up-cross then down-cross: a full buy/sell round trip.
        let prices = [
            20.0, 18.0, 16.0, 14.0, 12.0, 10.0, 16.0, 22.0, 28.0, 22.0, 14.0, 8.0,
        ];
        let result = run(&prices, 2, 4, 10_000.0);

        assert_eq!(result.trades.len(), 2);
        assert_eq!(result.trades[0].action, TradeAction::Buy);
        assert_eq!(result.trades[1].action, TradeAction::Sell);

        let shares = 10_000.0 / result.trades[0].price;
        let expected_final = shares * result.trades[1].price;
        assert_relative_eq!(result.final_value, expected_final, max_relative = 1e-12);
        assert_relative_eq!(
            result.total_return_pct,
            (expected_final - 10_000.0) / 10_000.0 * 100.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn equity_curve_covers_every_bar() {
        let prices = [20.0, 18.0, 16.0, 14.0, 12.0, 10.0, 16.0, 22.0, 28.0];
        let result = run(&prices, 2, 4, 10_000.0);

        assert_eq!(result.equity_curve.len(), prices.len());
        assert_relative_eq!(result.equity_curve[0].value, 10_000.0);
        assert_relative_eq!(
            result.equity_curve.last().unwrap().value,
            result.final_value,
            max_relative = 1e-12
        );
    }

    #[test]
    fn no_sell_when_flat() {
        // Downward cross only: no position, so the sell signal is ignored.
        let prices = [10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 14.0, 8.0, 2.0];
        let result = run(&prices, 2, 4, 10_000.0);

        assert!(result.trades.is_empty());
        assert_relative_eq!(result.final_value, 10_000.0);
    }

    #[test]
    fn trade_values_match_price_times_shares() {
        let prices = [
            20.0, 18.0, 16.0, 14.0, 12.0, 10.0, 16.0, 22.0, 28.0, 22.0, 14.0, 8.0,
        ];
        let result = run(&prices, 2, 4, 10_000.0);

        for trade in &result.trades {
            assert_relative_eq!(trade.value, trade.price * trade.shares, max_relative = 1e-12);
        }
    }

    #[test]
    fn result_names_the_strategy() {
        let result = run(&[100.0; 10], 2, 4, 1_000.0);
        assert_eq!(result.strategy, "SMA(2/4) crossover");
    }
}
