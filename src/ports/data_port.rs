//! Data access port trait.

use crate::domain::error::FinanalyticaError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::timeframe::Timeframe;

pub trait DataPort {
    /// Bars for `symbol` at `interval` covering the trailing `period`, oldest first.
    fn fetch_bars(
        &self,
        symbol: &str,
        interval: &Timeframe,
        period: &Timeframe,
    ) -> Result<Vec<OhlcvBar>, FinanalyticaError>;

    fn list_symbols(&self, interval: &Timeframe) -> Result<Vec<String>, FinanalyticaError>;
}
