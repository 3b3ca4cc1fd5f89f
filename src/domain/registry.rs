//! Named algorithm registry.
//!
//! Stores algorithm definitions by name. Stored source text is treated as an
//! opaque description and is never executed; running a named backtest only
//! checks that the name exists, then replays the standard crossover strategy.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::backtest::{run_backtest, BacktestResult};
use crate::domain::error::ChartmillError;
use crate::domain::market_data::MarketData;
use crate::domain::ohlcv::Bar;
use crate::domain::strategy::MaCrossover;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Algorithm {
    pub name: String,
    pub code: String,
    pub description: String,
}

pub trait AlgorithmRegistry {
    fn get(&self, name: &str) -> Option<Algorithm>;
    fn put(&mut self, algorithm: Algorithm);
    fn delete(&mut self, name: &str) -> bool;
    fn list(&self) -> Vec<Algorithm>;
}

/// In-memory registry. Names are unique; `put` with an existing name
/// replaces the stored definition.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    algorithms: HashMap<String, Algorithm>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        MemoryRegistry::default()
    }
}

impl AlgorithmRegistry for MemoryRegistry {
    fn get(&self, name: &str) -> Option<Algorithm> {
        self.algorithms.get(name).cloned()
    }

    fn put(&mut self, algorithm: Algorithm) {
        self.algorithms.insert(algorithm.name.clone(), algorithm);
    }

    fn delete(&mut self, name: &str) -> bool {
        self.algorithms.remove(name).is_some()
    }

    fn list(&self) -> Vec<Algorithm> {
        let mut all: Vec<Algorithm> = self.algorithms.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }
}

/// Run a backtest under a registered algorithm name. Unknown names fail
/// before any computation happens.
pub fn run_named_backtest(
    registry: &dyn AlgorithmRegistry,
    name: &str,
    symbol: &str,
    bars: Vec<Bar>,
    initial_capital: f64,
) -> Result<BacktestResult, ChartmillError> {
    if registry.get(name).is_none() {
        return Err(ChartmillError::AlgorithmNotFound {
            name: name.to_string(),
        });
    }

    let strategy = MaCrossover::default();
    let data = MarketData::for_strategy(symbol.to_string(), bars, &strategy);
    run_backtest(&data, &strategy, initial_capital)
}
