//! Core domain logic, free of I/O concerns.

pub mod backtest;
pub mod config;
pub mod error;
pub mod indicator;
pub mod indicator_helpers;
pub mod market_data;
pub mod ohlcv;
pub mod pattern;
pub mod registry;
pub mod strategy;
