//! CSV file data adapter.
//!
//! One file per symbol and interval: `<base>/<symbol>_<interval>.csv` with the
//! header `timestamp,open,high,low,close,volume`. The lookback window is anchored
//! on the newest bar in the file.

use crate::domain::error::FinanalyticaError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::timeframe::Timeframe;
use crate::ports::data_port::DataPort;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const OFFSET_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%dT%H:%M:%S%:z"];

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str, interval: &Timeframe) -> PathBuf {
        self.base_path.join(format!("{}_{}.csv", symbol, interval))
    }
}

/// Timestamps with a UTC offset are normalised to UTC.
fn parse_timestamp(value: &str) -> Result<NaiveDateTime, FinanalyticaError> {
    let value = value.trim();
    for format in OFFSET_TIMESTAMP_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(value, format) {
            return Ok(ts.naive_utc());
        }
    }
    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(ts);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| FinanalyticaError::DataSource {
            reason: format!("invalid timestamp: {}", value),
        })
}

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<T, FinanalyticaError>
where
    T::Err: std::fmt::Display,
{
    record
        .get(index)
        .ok_or_else(|| FinanalyticaError::DataSource {
            reason: format!("missing {} column", name),
        })?
        .trim()
        .parse()
        .map_err(|e| FinanalyticaError::DataSource {
            reason: format!("invalid {} value: {}", name, e),
        })
}

impl DataPort for CsvAdapter {
    fn fetch_bars(
        &self,
        symbol: &str,
        interval: &Timeframe,
        period: &Timeframe,
    ) -> Result<Vec<OhlcvBar>, FinanalyticaError> {
        let path = self.csv_path(symbol, interval);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FinanalyticaError::NoData {
                    symbol: symbol.to_string(),
                });
            }
            Err(e) => {
                return Err(FinanalyticaError::DataSource {
                    reason: format!("failed to read {}: {}", path.display(), e),
                });
            }
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| FinanalyticaError::DataSource {
                reason: format!("CSV parse error: {}", e),
            })?;

            let timestamp = parse_timestamp(record.get(0).ok_or_else(|| {
                FinanalyticaError::DataSource {
                    reason: "missing timestamp column".into(),
                }
            })?)?;

            bars.push(OhlcvBar {
                symbol: symbol.to_string(),
                timestamp,
                open: parse_field(&record, 1, "open")?,
                high: parse_field(&record, 2, "high")?,
                low: parse_field(&record, 3, "low")?,
                close: parse_field(&record, 4, "close")?,
                volume: parse_field(&record, 5, "volume")?,
            });
        }

        bars.sort_by_key(|b| b.timestamp);

        if let Some(newest) = bars.last().map(|b| b.timestamp) {
            match period
                .duration()
                .and_then(|span| newest.checked_sub_signed(span))
            {
                Some(cutoff) => bars.retain(|b| b.timestamp > cutoff),
                // The lookback reaches past the calendar, so every bar is inside it.
                None => tracing::debug!(symbol, %period, "lookback exceeds date range"),
            }
        }

        tracing::debug!(
            symbol,
            path = %path.display(),
            bars = bars.len(),
            "loaded bars"
        );
        Ok(bars)
    }

    fn list_symbols(&self, interval: &Timeframe) -> Result<Vec<String>, FinanalyticaError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| FinanalyticaError::DataSource {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let suffix = format!("_{}.csv", interval);
        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| FinanalyticaError::DataSource {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(symbol) = name_str.strip_suffix(&suffix) {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
