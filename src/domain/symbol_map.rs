//! Translation from user-facing instrument codes to data-source codes.

use std::collections::HashMap;

use crate::ports::config_port::ConfigPort;

pub const SYMBOLS_SECTION: &str = "symbols";

const DEFAULT_SYMBOLS: &[(&str, &str)] = &[
    ("XAUUSD", "GC=F"),
    ("EURUSD", "EURUSD=X"),
    ("GBPUSD", "GBPUSD=X"),
    ("USDJPY", "USDJPY=X"),
    ("BTCUSD", "BTC-USD"),
    ("ETHUSD", "ETH-USD"),
];

#[derive(Debug, Clone)]
pub struct SymbolMap {
    entries: HashMap<String, String>,
}

impl Default for SymbolMap {
    fn default() -> Self {
        Self {
            entries: DEFAULT_SYMBOLS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }
}

impl SymbolMap {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Default table extended (or overridden) by the `[symbols]` config section.
    /// Keys are uppercased, matching how the CLI normalises requested symbols.
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let mut map = Self::default();
        for (from, to) in config.section(SYMBOLS_SECTION) {
            let to = to.trim();
            if !to.is_empty() {
                map.insert(&from.trim().to_uppercase(), to);
            }
        }
        map
    }

    pub fn insert(&mut self, from: &str, to: &str) {
        self.entries.insert(from.to_string(), to.to_string());
    }

    /// Data-source code for `symbol`; unmapped symbols pass through unchanged.
    pub fn resolve<'a>(&'a self, symbol: &'a str) -> &'a str {
        self.entries.get(symbol).map(String::as_str).unwrap_or(symbol)
    }

    /// All mappings sorted by user-facing code.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort();
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    #[test]
    fn default_table_maps_gold() {
        let map = SymbolMap::default();
        assert_eq!(map.resolve("XAUUSD"), "GC=F");
        assert_eq!(map.resolve("BTCUSD"), "BTC-USD");
        assert_eq!(map.resolve("USDJPY"), "USDJPY=X");
    }

    #[test]
    fn unknown_symbol_passes_through() {
        let map = SymbolMap::default();
        assert_eq!(map.resolve("AAPL"), "AAPL");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let map = SymbolMap::default();
        assert_eq!(map.resolve("xauusd"), "xauusd");
    }

    #[test]
    fn empty_map_resolves_to_input() {
        assert_eq!(SymbolMap::empty().resolve("XAUUSD"), "XAUUSD");
    }

    #[test]
    fn config_keys_are_uppercased_like_requested_symbols() {
        let config =
            FileConfigAdapter::from_string("[symbols]\nspx = ^GSPC\nXauUsd = XAU-SPOT\n").unwrap();
        let map = SymbolMap::from_config(&config);
        assert_eq!(map.resolve("SPX"), "^GSPC");
        assert_eq!(map.resolve("XAUUSD"), "XAU-SPOT");
        assert_eq!(map.resolve("spx"), "spx");
    }

    #[test]
    fn config_overrides_and_extends_defaults() {
        let config = FileConfigAdapter::from_string(
            "[symbols]\nXAUUSD = XAU-SPOT\nSPX = ^GSPC\nBLANK =\n",
        )
        .unwrap();
        let map = SymbolMap::from_config(&config);
        assert_eq!(map.resolve("XAUUSD"), "XAU-SPOT");
        assert_eq!(map.resolve("SPX"), "^GSPC");
        assert_eq!(map.resolve("BLANK"), "BLANK");
        assert_eq!(map.resolve("EURUSD"), "EURUSD=X");
    }

    #[test]
    fn entries_are_sorted() {
        let map = SymbolMap::default();
        let codes: Vec<&str> = map.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            codes,
            vec!["BTCUSD", "ETHUSD", "EURUSD", "GBPUSD", "USDJPY", "XAUUSD"]
        );
    }
}
