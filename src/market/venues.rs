//! Venue fee model
//!
//! Every venue carries a multiplicative fee factor in `(0, 1]`. Curve gets
//! pooled stable-asset behavior: for pairs where both tokens are in the
//! stable set, the fee is much closer to 1 and the rate is overridden toward
//! 1:1 with a small per-pair skew. Lookups never fail; unknown venue names
//! take the default factor.

use std::collections::{HashMap, HashSet};

/// Fee factor applied when a venue is not in the book.
pub const DEFAULT_FEE: f64 = 0.997;

/// Venue names used by the fallback branch of the path synthesizer, in hop
/// order. Deliberately worse-priced than any named venue so curated routes
/// win whenever one exists.
pub const FALLBACK_VENUES: [&str; 3] = ["GenericDEX_A", "GenericDEX_B", "GenericDEX_C"];

/// Fee factor carried by every fallback venue.
pub const FALLBACK_FEE: f64 = 0.995;

const STABLE_POOL_VENUE: &str = "Curve";
const STABLE_FEE: f64 = 0.9996;
const STABLE_POOL_NONSTABLE_FEE: f64 = 0.996;
const STABLE_DEFAULT_SKEW: f64 = 0.9995;

/// Per-venue fee factors and stable-pool overrides.
#[derive(Debug, Clone)]
pub struct VenueBook {
    base_fees: HashMap<String, f64>,
    stable_set: HashSet<String>,
    /// Rate override toward 1:1 for ordered stable pairs on the stable-pool
    /// venue.
    stable_skew: HashMap<(String, String), f64>,
}

impl VenueBook {
    /// Multiplicative fee factor for one hop on `venue`.
    ///
    /// Expects symbols already normalized to uppercase.
    pub fn fee_factor(&self, venue: &str, token_in: &str, token_out: &str) -> f64 {
        if venue == STABLE_POOL_VENUE {
            return if self.is_stable_pair(token_in, token_out) {
                STABLE_FEE
            } else {
                STABLE_POOL_NONSTABLE_FEE
            };
        }
        if FALLBACK_VENUES.contains(&venue) {
            return FALLBACK_FEE;
        }
        self.base_fees.get(venue).copied().unwrap_or(DEFAULT_FEE)
    }

    /// Rate override for stable pairs on the stable-pool venue.
    ///
    /// `None` means the hop prices off the rate table as usual.
    pub fn rate_override(&self, venue: &str, token_in: &str, token_out: &str) -> Option<f64> {
        if venue != STABLE_POOL_VENUE || !self.is_stable_pair(token_in, token_out) {
            return None;
        }
        let key = (token_in.to_string(), token_out.to_string());
        Some(
            self.stable_skew
                .get(&key)
                .copied()
                .unwrap_or(STABLE_DEFAULT_SKEW),
        )
    }

    fn is_stable_pair(&self, token_in: &str, token_out: &str) -> bool {
        self.stable_set.contains(token_in) && self.stable_set.contains(token_out)
    }
}

impl Default for VenueBook {
    fn default() -> Self {
        let base_fees = HashMap::from([
            ("Quickswap".to_string(), 0.9975),
            ("Uniswap".to_string(), 0.997),
            ("Sushiswap".to_string(), 0.997),
            ("AavePortal".to_string(), 0.9965),
        ]);
        let stable_set = HashSet::from([
            "USDC".to_string(),
            "DAI".to_string(),
            "USDT".to_string(),
        ]);
        let stable_skew = HashMap::from([
            (("USDC".to_string(), "DAI".to_string()), 0.9999),
            (("DAI".to_string(), "USDC".to_string()), 0.9998),
            (("USDC".to_string(), "USDT".to_string()), 1.0001),
            (("USDT".to_string(), "USDC".to_string()), 0.9997),
            (("DAI".to_string(), "USDT".to_string()), 1.0002),
            (("USDT".to_string(), "DAI".to_string()), 0.9996),
        ]);
        Self {
            base_fees,
            stable_set,
            stable_skew,
        }
    }
}
