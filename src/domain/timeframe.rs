//! Bar interval and lookback span strings such as `1h` or `5d`.

use chrono::TimeDelta;
use std::fmt;
use std::str::FromStr;

/// Longest accepted span, roughly a century.
pub const MAX_SPAN_DAYS: i64 = 36_525;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Minute,
    Hour,
    Day,
    Week,
}

impl TimeUnit {
    fn suffix(self) -> char {
        match self {
            TimeUnit::Minute => 'm',
            TimeUnit::Hour => 'h',
            TimeUnit::Day => 'd',
            TimeUnit::Week => 'w',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timeframe {
    pub amount: u32,
    pub unit: TimeUnit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeframeError {
    #[error("empty timeframe")]
    Empty,

    #[error("invalid amount in '{0}'")]
    InvalidAmount(String),

    #[error("span '{0}' is longer than {max} days", max = MAX_SPAN_DAYS)]
    OutOfRange(String),

    #[error("unknown unit in '{0}' (expected m, h, d or w)")]
    UnknownUnit(String),
}

impl Timeframe {
    pub const fn new(amount: u32, unit: TimeUnit) -> Self {
        Self { amount, unit }
    }

    /// `None` when the span does not fit in a `TimeDelta`.
    pub fn duration(&self) -> Option<TimeDelta> {
        let amount = i64::from(self.amount);
        match self.unit {
            TimeUnit::Minute => TimeDelta::try_minutes(amount),
            TimeUnit::Hour => TimeDelta::try_hours(amount),
            TimeUnit::Day => TimeDelta::try_days(amount),
            TimeUnit::Week => TimeDelta::try_weeks(amount),
        }
    }
}

/// Hourly bars.
pub const DEFAULT_INTERVAL: Timeframe = Timeframe::new(1, TimeUnit::Hour);
/// Five days of history, enough hourly bars for the slow average.
pub const DEFAULT_PERIOD: Timeframe = Timeframe::new(5, TimeUnit::Day);

impl FromStr for Timeframe {
    type Err = TimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some(last) = s.chars().last() else {
            return Err(TimeframeError::Empty);
        };
        let unit = match last.to_ascii_lowercase() {
            'm' => TimeUnit::Minute,
            'h' => TimeUnit::Hour,
            'd' => TimeUnit::Day,
            'w' => TimeUnit::Week,
            _ => return Err(TimeframeError::UnknownUnit(s.to_string())),
        };
        let amount: u32 = s[..s.len() - last.len_utf8()]
            .parse()
            .map_err(|_| TimeframeError::InvalidAmount(s.to_string()))?;
        if amount == 0 {
            return Err(TimeframeError::InvalidAmount(s.to_string()));
        }
        let timeframe = Self { amount, unit };
        match timeframe.duration() {
            Some(span) if span.num_days() <= MAX_SPAN_DAYS => Ok(timeframe),
            _ => Err(TimeframeError::OutOfRange(s.to_string())),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}
