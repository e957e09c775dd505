//! Moving-average crossover signal engine.
//!
//! `SignalEngine::analyze` turns a bar series into a BUY/SELL signal with concrete
//! price levels. The computation is pure apart from reading the clock for the
//! result timestamp; `analyze_at` takes the timestamp explicitly.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::domain::error::FinanalyticaError;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::levels::{RecentRange, TradeLevels};
use crate::domain::ohlcv::OhlcvBar;

pub const FAST_PERIOD: usize = 20;
pub const SLOW_PERIOD: usize = 50;

/// Decimal places kept for prices in serialized output.
pub const PRICE_DECIMALS: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendDirection {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    #[serde(serialize_with = "serialize_price")]
    pub ma_fast: f64,
    #[serde(serialize_with = "serialize_price")]
    pub ma_slow: f64,
    pub direction: TrendDirection,
}

/// A computed signal. Prices keep full precision and are rounded on serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalResult {
    pub symbol: String,
    #[serde(serialize_with = "serialize_price")]
    pub current_price: f64,
    pub signal: Signal,
    #[serde(serialize_with = "serialize_price")]
    pub entry: f64,
    #[serde(serialize_with = "serialize_price")]
    pub stop_loss: f64,
    #[serde(serialize_with = "serialize_price")]
    pub take_profit_1: f64,
    #[serde(serialize_with = "serialize_price")]
    pub take_profit_2: f64,
    pub trend: Trend,
    pub analysis_note: String,
    pub timestamp: DateTime<Utc>,
}

impl SignalResult {
    pub fn levels(&self) -> TradeLevels {
        TradeLevels {
            entry: self.entry,
            stop_loss: self.stop_loss,
            take_profit_1: self.take_profit_1,
            take_profit_2: self.take_profit_2,
        }
    }

    /// True when every numeric field is finite and therefore representable in JSON.
    pub fn is_finite(&self) -> bool {
        self.current_price.is_finite()
            && self.trend.ma_fast.is_finite()
            && self.trend.ma_slow.is_finite()
            && self.levels().is_finite()
    }
}

/// Error record returned in place of a signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResult {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl ErrorResult {
    pub fn new(error: impl Into<String>, symbol: Option<String>) -> Self {
        Self {
            error: error.into(),
            symbol,
        }
    }

    /// Error record for `err`; the symbol is attached only for unexpected failures.
    pub fn from_error(err: &FinanalyticaError, symbol: &str) -> Self {
        let symbol = err.carries_symbol().then(|| symbol.to_string());
        Self::new(err.to_string(), symbol)
    }
}

/// Outcome of analysing one instrument: either a signal or an error record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Analysis {
    Signal(SignalResult),
    Error(ErrorResult),
}

impl Analysis {
    pub fn is_signal(&self) -> bool {
        matches!(self, Analysis::Signal(_))
    }
}

pub fn round_price(value: f64) -> f64 {
    let scale = 10f64.powi(PRICE_DECIMALS);
    (value * scale).round() / scale
}

fn serialize_price<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_price(*value))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SignalEngine;

impl SignalEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(
        &self,
        symbol: &str,
        bars: &[OhlcvBar],
    ) -> Result<SignalResult, FinanalyticaError> {
        self.analyze_at(symbol, bars, Utc::now())
    }

    pub fn analyze_at(
        &self,
        symbol: &str,
        bars: &[OhlcvBar],
        now: DateTime<Utc>,
    ) -> Result<SignalResult, FinanalyticaError> {
        let (Some(last), Some(range)) = (bars.last(), RecentRange::from_bars(bars)) else {
            return Err(FinanalyticaError::EmptyInput);
        };

        let ma_fast = calculate_sma(bars, FAST_PERIOD)
            .last_value()
            .ok_or(FinanalyticaError::EmptyInput)?;
        let ma_slow = calculate_sma(bars, SLOW_PERIOD)
            .last_value()
            .ok_or(FinanalyticaError::EmptyInput)?;

        // Strict comparison: equal averages fall through to the bearish branch.
        let is_bullish = ma_fast > ma_slow;

        let (levels, signal, direction, analysis_note) = if is_bullish {
            (
                TradeLevels::long(range),
                Signal::Buy,
                TrendDirection::Bullish,
                format!(
                    "Bullish trend detected. MA Fast: {:.2} > MA Slow: {:.2}",
                    ma_fast, ma_slow
                ),
            )
        } else {
            (
                TradeLevels::short(range),
                Signal::Sell,
                TrendDirection::Bearish,
                format!(
                    "Bearish trend detected. MA Fast: {:.2} < MA Slow: {:.2}",
                    ma_fast, ma_slow
                ),
            )
        };

        tracing::debug!(
            symbol,
            bars = bars.len(),
            ma_fast,
            ma_slow,
            signal = ?signal,
            "computed signal"
        );

        Ok(SignalResult {
            symbol: symbol.to_string(),
            current_price: last.close,
            signal,
            entry: levels.entry,
            stop_loss: levels.stop_loss,
            take_profit_1: levels.take_profit_1,
            take_profit_2: levels.take_profit_2,
            trend: Trend {
                ma_fast,
                ma_slow,
                direction,
            },
            analysis_note,
            timestamp: now,
        })
    }
}
