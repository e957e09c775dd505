//! Simple Moving Average with an expanding warmup.
//!
//! SMA(n)[i] = mean(close[i-w+1..=i]) where w = min(n, i+1).
//! There is no invalid warmup region: early points average every bar seen so far,
//! then the window caps at n and rolls.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_sma(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    if period == 0 || bars.is_empty() {
        return IndicatorSeries {
            indicator_type: IndicatorType::Sma(period),
            values: Vec::new(),
        };
    }

    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let window = (i + 1).min(period);
            IndicatorPoint {
                timestamp: bar.timestamp,
                value: window_mean(&bars[i + 1 - window..=i]),
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Sma(period),
        values,
    }
}

/// Mean close of a non-empty window.
///
/// A window of identical closes returns that close exactly; any other window
/// uses a Neumaier-compensated sum.
fn window_mean(window: &[OhlcvBar]) -> f64 {
    let first = window[0].close;
    if window.iter().all(|b| b.close == first) {
        return first;
    }

    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    for bar in window {
        let x = bar.close;
        let t = sum + x;
        if sum.abs() >= x.abs() {
            compensation += (sum - t) + x;
        } else {
            compensation += (x - t) + sum;
        }
        sum = t;
    }

    // inf - inf in the compensation would turn an infinite sum into NaN.
    let total = if sum.is_finite() { sum + compensation } else { sum };
    total / window.len() as f64
}
