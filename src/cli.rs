//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::analyzer::analyze_symbols;
use crate::domain::error::FinanalyticaError;
use crate::domain::settings::AnalysisSettings;
use crate::domain::signal::Analysis;
use crate::domain::symbol_map::SymbolMap;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

/// Exit code when at least one requested symbol produced an error record.
const EXIT_ERROR_RECORD: u8 = 5;

#[derive(Parser, Debug)]
#[command(name = "finanalytica", about = "Moving-average crossover trade signals")]
pub struct Cli {
    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute a signal for each symbol and print it as JSON
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(required = true)]
        symbols: Vec<String>,
        #[arg(long)]
        pretty: bool,
    },
    /// Show the data-source code for symbols, or the whole table
    Resolve {
        #[arg(short, long)]
        config: PathBuf,
        symbols: Vec<String>,
    },
    /// List symbols with bar data for the configured interval
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    init_logging(&cli.log_level);

    match cli.command {
        Command::Analyze {
            config,
            symbols,
            pretty,
        } => run_analyze(&config, &symbols, pretty),
        Command::Resolve { config, symbols } => run_resolve(&config, &symbols),
        Command::ListSymbols { config } => run_list_symbols(&config),
    }
}

pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

fn init_logging(level: &str) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(level))
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: logging already initialised: {e}");
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = FinanalyticaError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn load_settings(config: &dyn ConfigPort) -> Result<AnalysisSettings, ExitCode> {
    AnalysisSettings::from_config(config).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

/// JSON text for one analysis record.
pub fn render(analysis: &Analysis, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(analysis)
    } else {
        serde_json::to_string(analysis)
    }
}

/// Normalises requested symbols: trims, uppercases and drops empty entries.
pub fn normalize_symbols(symbols: &[String]) -> Vec<String> {
    symbols
        .iter()
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Runs the analysis pipeline and prints one record per symbol to stdout.
pub fn run_analysis_pipeline(
    data_port: &dyn DataPort,
    symbol_map: &SymbolMap,
    settings: &AnalysisSettings,
    symbols: &[String],
    pretty: bool,
) -> ExitCode {
    let results = analyze_symbols(data_port, symbol_map, settings, symbols);

    for analysis in &results {
        match render(analysis, pretty) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize result: {e}");
                return ExitCode::from(1);
            }
        }
    }

    let failed = results.iter().filter(|a| !a.is_signal()).count();
    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        tracing::info!(failed, total = results.len(), "some symbols returned errors");
        ExitCode::from(EXIT_ERROR_RECORD)
    }
}

fn run_analyze(config_path: &PathBuf, symbols: &[String], pretty: bool) -> ExitCode {
    tracing::info!(path = %config_path.display(), "loading config");
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let settings = match load_settings(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let symbols = normalize_symbols(symbols);
    if symbols.is_empty() {
        eprintln!("error: no symbols given");
        return ExitCode::from(2);
    }

    let pretty = pretty || config.get_bool("output", "pretty", false);
    let symbol_map = SymbolMap::from_config(&config);
    let data_port = CsvAdapter::new(settings.data_dir.clone());

    tracing::info!(
        symbols = symbols.len(),
        interval = %settings.interval,
        period = %settings.period,
        "analysing"
    );
    run_analysis_pipeline(&data_port, &symbol_map, &settings, &symbols, pretty)
}

fn run_resolve(config_path: &PathBuf, symbols: &[String]) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let symbol_map = SymbolMap::from_config(&config);

    if symbols.is_empty() {
        for (from, to) in symbol_map.entries() {
            println!("{from} -> {to}");
        }
    } else {
        for symbol in normalize_symbols(symbols) {
            println!("{} -> {}", symbol, symbol_map.resolve(&symbol));
        }
    }
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let settings = match load_settings(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let adapter = CsvAdapter::new(settings.data_dir.clone());
    match adapter.list_symbols(&settings.interval) {
        Ok(symbols) if symbols.is_empty() => {
            eprintln!(
                "No symbols found for interval {} in {}",
                settings.interval,
                settings.data_dir.display()
            );
            ExitCode::SUCCESS
        }
        Ok(symbols) => {
            for symbol in &symbols {
                println!("{}", symbol);
            }
            eprintln!("{} symbols found", symbols.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
