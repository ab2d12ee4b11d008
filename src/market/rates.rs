//! Static exchange-rate table
//!
//! Rates are directed `(token_in, token_out) -> units of token_out per unit
//! of token_in`, before venue fees. The table stores one direction per pair;
//! the reverse resolves as the reciprocal. Lookups never fail: unknown pairs
//! degrade to a conservative constant so a quote always materializes.

use serde::Deserialize;
use std::collections::HashMap;

/// Rate returned when neither direction of a pair is in the table.
///
/// Deliberately poorer than any catalog pair so synthesized routes through
/// unknown symbols are quotable but never look attractive.
pub const FALLBACK_RATE: f64 = 0.01;

/// One directed rate entry, the unit of table configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RateEntry {
    pub token_in: String,
    pub token_out: String,
    pub rate: f64,
}

/// Bidirectional exchange-rate lookup between token symbols.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "Vec<RateEntry>")]
pub struct RateTable {
    entries: HashMap<(String, String), f64>,
}

impl From<Vec<RateEntry>> for RateTable {
    fn from(entries: Vec<RateEntry>) -> Self {
        let mut table = Self::empty();
        for e in entries {
            table.insert(&e.token_in, &e.token_out, e.rate);
        }
        table
    }
}

impl RateTable {
    /// Create an empty table.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert a directed rate entry. Symbols are stored uppercase.
    pub fn insert(&mut self, token_in: &str, token_out: &str, rate: f64) {
        self.entries.insert(
            (token_in.to_ascii_uppercase(), token_out.to_ascii_uppercase()),
            rate,
        );
    }

    /// Resolve the rate from `token_in` to `token_out`.
    ///
    /// Direct entry first, then the reciprocal of the reverse entry, then
    /// [`FALLBACK_RATE`]. Expects symbols already normalized to uppercase.
    pub fn rate(&self, token_in: &str, token_out: &str) -> f64 {
        let key = (token_in.to_string(), token_out.to_string());
        if let Some(&rate) = self.entries.get(&key) {
            return rate;
        }
        let reverse = (key.1, key.0);
        match self.entries.get(&reverse) {
            Some(&rate) if rate > 0.0 => 1.0 / rate,
            _ => FALLBACK_RATE,
        }
    }

    /// Whether either direction of the pair is in the table.
    pub fn knows_pair(&self, a: &str, b: &str) -> bool {
        self.entries
            .contains_key(&(a.to_string(), b.to_string()))
            || self.entries.contains_key(&(b.to_string(), a.to_string()))
    }
}

impl Default for RateTable {
    /// Seed the Polygon catalog used by the app.
    ///
    /// One direction per pair; the rest resolve by reciprocal. POL is the
    /// network's native unit.
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert("USDC", "POL", 5.26);
        table.insert("POL", "DAI", 0.1897);
        table.insert("WETH", "USDC", 2505.0);
        table.insert("WETH", "DAI", 2504.2);
        table.insert("WETH", "POL", 13184.0);
        table.insert("WBTC", "WETH", 25.94);
        table.insert("WBTC", "USDC", 65010.0);
        table.insert("LINK", "USDC", 11.52);
        table.insert("LINK", "DAI", 11.51);
        table.insert("LINK", "WETH", 0.004599);
        table.insert("AAVE", "USDC", 92.35);
        table.insert("AAVE", "LINK", 8.016);
        table.insert("UNI", "USDC", 7.84);
        table.insert("CRV", "USDC", 0.2712);
        table.insert("DAI", "USDC", 0.9997);
        table.insert("USDT", "USDC", 0.9996);
        table
    }
}
