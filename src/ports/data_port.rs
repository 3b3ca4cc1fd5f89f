//! Data access port trait.

use crate::domain::error::ChartmillError;
use crate::domain::ohlcv::Bar;
use chrono::NaiveDateTime;

pub trait DataPort {
    /// Bars for a symbol, sorted by timestamp. An open bound means no limit
    /// on that side.
    fn fetch_bars(
        &self,
        symbol: &str,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Vec<Bar>, ChartmillError>;

    fn list_symbols(&self) -> Result<Vec<String>, ChartmillError>;
}
