#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use finanalytica::domain::error::FinanalyticaError;
pub use finanalytica::domain::ohlcv::OhlcvBar;
use finanalytica::domain::settings::AnalysisSettings;
use finanalytica::domain::timeframe::{Timeframe, DEFAULT_INTERVAL, DEFAULT_PERIOD};
use finanalytica::ports::data_port::DataPort;
use std::collections::HashMap;
use std::path::PathBuf;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(
        &self,
        symbol: &str,
        _interval: &Timeframe,
        _period: &Timeframe,
    ) -> Result<Vec<OhlcvBar>, FinanalyticaError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(FinanalyticaError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(symbol).cloned().unwrap_or_default())
    }

    fn list_symbols(&self, _interval: &Timeframe) -> Result<Vec<String>, FinanalyticaError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 3)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

pub fn make_bar(symbol: &str, hour: i64, high: f64, low: f64, close: f64) -> OhlcvBar {
    OhlcvBar {
        symbol: symbol.to_string(),
        timestamp: start_time() + chrono::Duration::hours(hour),
        open: close,
        high,
        low,
        close,
        volume: 1_000,
    }
}

/// Hourly bars with `high = close + 0.5` and `low = close - 0.5`.
pub fn bars_from_closes(symbol: &str, closes: &[f64]) -> Vec<OhlcvBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_bar(symbol, i as i64, close + 0.5, close - 0.5, close))
        .collect()
}

/// `count` hourly closes moving linearly from `start` by `step` per bar.
pub fn linear_closes(start: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| start + step * i as f64).collect()
}

pub fn test_settings() -> AnalysisSettings {
    AnalysisSettings {
        data_dir: PathBuf::from("."),
        interval: DEFAULT_INTERVAL,
        period: DEFAULT_PERIOD,
    }
}

pub fn write_csv(dir: &std::path::Path, symbol: &str, interval: &str, bars: &[OhlcvBar]) {
    let mut content = String::from("timestamp,open,high,low,close,volume\n");
    for bar in bars {
        content.push_str(&format!(
            "{},{},{},{},{},{}\n",
            bar.timestamp.format("%Y-%m-%d %H:%M:%S"),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        ));
    }
    std::fs::write(dir.join(format!("{}_{}.csv", symbol, interval)), content).unwrap();
}
