//! Core domain types and logic.

pub mod ohlcv;
pub mod indicator;
pub mod levels;
pub mod signal;
pub mod symbol_map;
pub mod timeframe;
pub mod settings;
pub mod analyzer;
pub mod error;
