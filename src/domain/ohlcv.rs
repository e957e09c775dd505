//! OHLCV bar representation.

use chrono::NaiveDateTime;

/// One price observation for a fixed interval. Series are ordered oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub symbol: String,
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// The trailing `n` bars of a series, or all of them when the series is shorter.
pub fn tail(bars: &[OhlcvBar], n: usize) -> &[OhlcvBar] {
    &bars[bars.len().saturating_sub(n)..]
}
