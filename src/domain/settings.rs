//! Analysis settings read from the `[analysis]` config section.

use std::path::PathBuf;

use crate::domain::error::FinanalyticaError;
use crate::domain::timeframe::{Timeframe, TimeframeError, DEFAULT_INTERVAL, DEFAULT_PERIOD};
use crate::ports::config_port::ConfigPort;

pub const ANALYSIS_SECTION: &str = "analysis";

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub data_dir: PathBuf,
    pub interval: Timeframe,
    pub period: Timeframe,
}

impl AnalysisSettings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, FinanalyticaError> {
        let data_dir = config
            .get_string(ANALYSIS_SECTION, "data_dir")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| FinanalyticaError::ConfigMissing {
                section: ANALYSIS_SECTION.into(),
                key: "data_dir".into(),
            })?;

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            interval: timeframe_or(config, "interval", DEFAULT_INTERVAL)?,
            period: timeframe_or(config, "period", DEFAULT_PERIOD)?,
        })
    }
}

fn timeframe_or(
    config: &dyn ConfigPort,
    key: &str,
    default: Timeframe,
) -> Result<Timeframe, FinanalyticaError> {
    match config.get_string(ANALYSIS_SECTION, key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: TimeframeError| {
            FinanalyticaError::ConfigInvalid {
                section: ANALYSIS_SECTION.into(),
                key: key.into(),
                reason: e.to_string(),
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;
    use crate::domain::timeframe::TimeUnit;

    #[test]
    fn defaults_to_hourly_over_five_days() {
        let config = FileConfigAdapter::from_string("[analysis]\ndata_dir = ./data\n").unwrap();
        let settings = AnalysisSettings::from_config(&config).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("./data"));
        assert_eq!(settings.interval, DEFAULT_INTERVAL);
        assert_eq!(settings.period, DEFAULT_PERIOD);
    }

    #[test]
    fn reads_explicit_timeframes() {
        let config = FileConfigAdapter::from_string(
            "[analysis]\ndata_dir = /srv/bars\ninterval = 15m\nperiod = 2w\n",
        )
        .unwrap();
        let settings = AnalysisSettings::from_config(&config).unwrap();
        assert_eq!(settings.interval, Timeframe::new(15, TimeUnit::Minute));
        assert_eq!(settings.period, Timeframe::new(2, TimeUnit::Week));
    }

    #[test]
    fn missing_data_dir_is_config_missing() {
        let config = FileConfigAdapter::from_string("[analysis]\ninterval = 1h\n").unwrap();
        let err = AnalysisSettings::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            FinanalyticaError::ConfigMissing { ref section, ref key }
                if section == "analysis" && key == "data_dir"
        ));
    }

    #[test]
    fn bad_period_is_config_invalid() {
        let config =
            FileConfigAdapter::from_string("[analysis]\ndata_dir = ./data\nperiod = 5y\n")
                .unwrap();
        let err = AnalysisSettings::from_config(&config).unwrap_err();
        assert!(matches!(err, FinanalyticaError::ConfigInvalid { ref key, .. } if key == "period"));
    }

    #[test]
    fn oversized_period_is_config_invalid() {
        let config = FileConfigAdapter::from_string(
            "[analysis]\ndata_dir = ./data\nperiod = 4000000000d\n",
        )
        .unwrap();
        let err = AnalysisSettings::from_config(&config).unwrap_err();
        assert!(matches!(err, FinanalyticaError::ConfigInvalid { ref key, .. } if key == "period"));
    }
}
