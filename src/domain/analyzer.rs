//! Analysis pipeline around the signal engine.
//!
//! Resolves the user-facing symbol, fetches bars through a [`DataPort`], runs
//! [`SignalEngine`] and turns every failure into an [`ErrorResult`] so callers
//! always receive a well-formed record.

use crate::domain::error::FinanalyticaError;
use crate::domain::settings::AnalysisSettings;
use crate::domain::signal::{Analysis, ErrorResult, SignalEngine, SignalResult};
use crate::domain::symbol_map::SymbolMap;
use crate::ports::data_port::DataPort;

pub fn analyze_symbol(
    data_port: &dyn DataPort,
    symbols: &SymbolMap,
    settings: &AnalysisSettings,
    symbol: &str,
) -> Analysis {
    match try_analyze(data_port, symbols, settings, symbol) {
        Ok(result) => Analysis::Signal(result),
        Err(e) => {
            tracing::warn!(symbol, error = %e, "analysis failed");
            Analysis::Error(ErrorResult::from_error(&e, symbol))
        }
    }
}

/// Analyses each symbol independently, preserving input order.
pub fn analyze_symbols(
    data_port: &dyn DataPort,
    symbols: &SymbolMap,
    settings: &AnalysisSettings,
    requested: &[String],
) -> Vec<Analysis> {
    requested
        .iter()
        .map(|symbol| analyze_symbol(data_port, symbols, settings, symbol))
        .collect()
}

fn try_analyze(
    data_port: &dyn DataPort,
    symbols: &SymbolMap,
    settings: &AnalysisSettings,
    symbol: &str,
) -> Result<SignalResult, FinanalyticaError> {
    let resolved = symbols.resolve(symbol);
    tracing::debug!(symbol, resolved, "fetching bars");

    let no_data = || FinanalyticaError::NoData {
        symbol: symbol.to_string(),
    };

    let bars = data_port
        .fetch_bars(resolved, &settings.interval, &settings.period)
        .map_err(|e| match e {
            FinanalyticaError::NoData { .. } => no_data(),
            other => other,
        })?;
    if bars.is_empty() {
        return Err(no_data());
    }

    let result = SignalEngine::new().analyze(symbol, &bars)?;
    if !result.is_finite() {
        return Err(FinanalyticaError::Computation {
            symbol: symbol.to_string(),
            reason: "non-finite value in computed levels".into(),
        });
    }
    Ok(result)
}
