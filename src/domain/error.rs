//! Domain error types.

/// Top-level error type for finanalytica.
#[derive(Debug, thiserror::Error)]
pub enum FinanalyticaError {
    #[error("No data available")]
    EmptyInput,

    #[error("No data found for {symbol}")]
    NoData { symbol: String },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("computation error for {symbol}: {reason}")]
    Computation { symbol: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FinanalyticaError {
    /// Whether the error-record form of this error should carry the symbol.
    ///
    /// Missing-data errors already name the symbol in their message.
    pub fn carries_symbol(&self) -> bool {
        !matches!(
            self,
            FinanalyticaError::EmptyInput | FinanalyticaError::NoData { .. }
        )
    }
}

impl From<&FinanalyticaError> for std::process::ExitCode {
    fn from(err: &FinanalyticaError) -> Self {
        let code: u8 = match err {
            FinanalyticaError::Io(_) => 1,
            FinanalyticaError::ConfigParse { .. }
            | FinanalyticaError::ConfigMissing { .. }
            | FinanalyticaError::ConfigInvalid { .. } => 2,
            FinanalyticaError::DataSource { .. } => 3,
            // Analysis failures surface as error records; 5 marks a batch containing one.
            FinanalyticaError::EmptyInput
            | FinanalyticaError::NoData { .. }
            | FinanalyticaError::Computation { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_message() {
        assert_eq!(FinanalyticaError::EmptyInput.to_string(), "No data available");
    }

    #[test]
    fn no_data_message_names_symbol() {
        let err = FinanalyticaError::NoData {
            symbol: "XAUUSD".into(),
        };
        assert_eq!(err.to_string(), "No data found for XAUUSD");
    }

    #[test]
    fn config_invalid_message() {
        let err = FinanalyticaError::ConfigInvalid {
            section: "analysis".into(),
            key: "period".into(),
            reason: "unknown unit 'y'".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value [analysis] period: unknown unit 'y'"
        );
    }

    #[test]
    fn carries_symbol_only_for_unexpected_failures() {
        assert!(!FinanalyticaError::EmptyInput.carries_symbol());
        assert!(!FinanalyticaError::NoData { symbol: "X".into() }.carries_symbol());
        assert!(FinanalyticaError::DataSource { reason: "bad".into() }.carries_symbol());
        assert!(FinanalyticaError::Computation {
            symbol: "X".into(),
            reason: "NaN".into()
        }
        .carries_symbol());
    }

    fn code_of(err: &FinanalyticaError) -> String {
        format!("{:?}", std::process::ExitCode::from(err))
    }

    #[test]
    fn analysis_failures_share_the_record_exit_code() {
        let record_code = format!("{:?}", std::process::ExitCode::from(5));
        assert_eq!(code_of(&FinanalyticaError::EmptyInput), record_code);
        assert_eq!(code_of(&FinanalyticaError::NoData { symbol: "X".into() }), record_code);
        assert_eq!(
            code_of(&FinanalyticaError::Computation {
                symbol: "X".into(),
                reason: "NaN".into()
            }),
            record_code
        );
    }

    #[test]
    fn config_and_source_exit_codes() {
        let config_code = format!("{:?}", std::process::ExitCode::from(2));
        let source_code = format!("{:?}", std::process::ExitCode::from(3));
        let err = FinanalyticaError::ConfigMissing {
            section: "analysis".into(),
            key: "data_dir".into(),
        };
        assert_eq!(code_of(&err), config_code);
        assert_eq!(
            code_of(&FinanalyticaError::DataSource { reason: "bad".into() }),
            source_code
        );
    }
}
