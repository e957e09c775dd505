//! Entry, stop-loss and take-profit levels from the recent trading range.
//!
//! Entries sit just beyond the recent extreme in the trade direction, the stop
//! just beyond the opposite extreme. The first target is a 2:1 reward-to-risk
//! extension, the second scales the first by 20% (up for longs, down for shorts).

use crate::domain::ohlcv::{tail, OhlcvBar};

/// Number of trailing bars that define the recent range.
pub const RECENT_BARS: usize = 5;

const LONG_ENTRY_BUFFER: f64 = 1.0005;
const LONG_STOP_BUFFER: f64 = 0.999;
const SHORT_ENTRY_BUFFER: f64 = 0.9995;
const SHORT_STOP_BUFFER: f64 = 1.001;
const REWARD_TO_RISK: f64 = 2.0;
const LONG_SECOND_TARGET: f64 = 1.2;
const SHORT_SECOND_TARGET: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecentRange {
    pub high: f64,
    pub low: f64,
}

impl RecentRange {
    /// Highest high and lowest low over the trailing `RECENT_BARS` bars.
    pub fn from_bars(bars: &[OhlcvBar]) -> Option<Self> {
        let recent = tail(bars, RECENT_BARS);
        if recent.is_empty() {
            return None;
        }
        let high = recent.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        let low = recent.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        Some(Self { high, low })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeLevels {
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
}

impl TradeLevels {
    pub fn long(range: RecentRange) -> Self {
        let entry = range.high * LONG_ENTRY_BUFFER;
        let stop_loss = range.low * LONG_STOP_BUFFER;
        let take_profit_1 = entry + (entry - stop_loss) * REWARD_TO_RISK;
        Self {
            entry,
            stop_loss,
            take_profit_1,
            take_profit_2: take_profit_1 * LONG_SECOND_TARGET,
        }
    }

    pub fn short(range: RecentRange) -> Self {
        let entry = range.low * SHORT_ENTRY_BUFFER;
        let stop_loss = range.high * SHORT_STOP_BUFFER;
        let take_profit_1 = entry - (stop_loss - entry) * REWARD_TO_RISK;
        Self {
            entry,
            stop_loss,
            take_profit_1,
            take_profit_2: take_profit_1 * SHORT_SECOND_TARGET,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.entry.is_finite()
            && self.stop_loss.is_finite()
            && self.take_profit_1.is_finite()
            && self.take_profit_2.is_finite()
    }
}
