//! Route planning: curated paths and the fallback synthesizer
//!
//! A [`RoutePath`] is a plan, not yet priced: an ordered list of
//! `(target token, venue)` hops starting from the source token. Synthesis is
//! a single deterministic dispatch over three branches — same-asset round
//! trip, curated pair, fallback — and always yields exactly three hops.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::market::FALLBACK_VENUES;

/// Gas estimate (in POL) for the same-asset round trip.
pub const GAS_SAME_ASSET: f64 = 0.25;

/// Gas estimate (in POL) for a synthesized fallback path.
pub const GAS_FALLBACK: f64 = 0.30;

/// Candidate bridges for the first fallback intermediate, in priority order.
const BRIDGE_PRIMARY: [&str; 4] = ["LINK", "AAVE", "UNI", "DAI"];

/// Candidate bridges for the second fallback intermediate, in priority order.
const BRIDGE_SECONDARY: [&str; 4] = ["WETH", "USDC", "DAI", "CRV"];

/// Last-resort bridges, chosen to avoid every common input symbol.
const BRIDGE_SAFE: [&str; 2] = ["CRV", "UNI"];

/// One planned hop: convert the running amount into `target` on `venue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hop {
    pub target: String,
    pub venue: String,
}

impl Hop {
    fn new(target: &str, venue: &str) -> Self {
        Self {
            target: target.to_string(),
            venue: venue.to_string(),
        }
    }
}

/// Which synthesizer branch produced a path. Decides the gas constant and is
/// useful for callers rendering the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PathKind {
    SameAsset,
    Curated,
    Fallback,
}

/// An unpriced multi-hop plan for a given source token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePath {
    pub hops: Vec<Hop>,
    pub kind: PathKind,
    pub gas_estimate: f64,
}

/// Curated route table plus the fallback synthesizer.
#[derive(Debug, Clone)]
pub struct RouteBook {
    curated: HashMap<(String, String), RoutePath>,
}

impl RouteBook {
    /// Synthesize a three-hop plan from `from` to `to`.
    ///
    /// Expects symbols already normalized to uppercase. Dispatch is purely on
    /// the symbols: same-asset round trip, then the curated table, then the
    /// fallback generator. Never fails.
    pub fn synthesize(&self, from: &str, to: &str) -> RoutePath {
        if from == to {
            return Self::same_asset_path(from);
        }
        if let Some(path) = self.curated.get(&(from.to_string(), to.to_string())) {
            return path.clone();
        }
        Self::fallback_path(from, to)
    }

    /// Whether `(from, to)` has a hand-picked route.
    pub fn is_curated(&self, from: &str, to: &str) -> bool {
        self.curated
            .contains_key(&(from.to_string(), to.to_string()))
    }

    /// Round trip `X -> A -> B -> X` through three distinct venues.
    ///
    /// The bridge pair avoids colliding with `X` so the intermediates stay
    /// distinct from the endpoints.
    fn same_asset_path(token: &str) -> RoutePath {
        let (a, b) = match token {
            "USDC" => ("WETH", "DAI"),
            "DAI" => ("USDC", "WETH"),
            _ => ("USDC", "DAI"),
        };
        RoutePath {
            hops: vec![
                Hop::new(a, "Quickswap"),
                Hop::new(b, "Sushiswap"),
                Hop::new(token, "Curve"),
            ],
            kind: PathKind::SameAsset,
            gas_estimate: GAS_SAME_ASSET,
        }
    }

    /// Deterministic plan for a pair with no curated route.
    ///
    /// Intermediates come from fixed priority lists: the first candidate that
    /// collides with neither endpoint (nor, for the second slot, the first
    /// intermediate) wins. The lists are long enough that a candidate always
    /// remains, but a safe substitute guards the exhausted case anyway.
    fn fallback_path(from: &str, to: &str) -> RoutePath {
        let first = pick_bridge(&BRIDGE_PRIMARY, &[from, to]);
        let second = pick_bridge(&BRIDGE_SECONDARY, &[from, to, first]);
        RoutePath {
            hops: vec![
                Hop::new(first, FALLBACK_VENUES[0]),
                Hop::new(second, FALLBACK_VENUES[1]),
                Hop::new(to, FALLBACK_VENUES[2]),
            ],
            kind: PathKind::Fallback,
            gas_estimate: GAS_FALLBACK,
        }
    }
}

/// First candidate not among `taken`, else the safe substitutes, else the
/// last candidate. Total and deterministic.
fn pick_bridge<'a>(candidates: &'a [&'a str], taken: &[&str]) -> &'a str {
    candidates
        .iter()
        .chain(BRIDGE_SAFE.iter())
        .find(|c| !taken.contains(*c))
        .copied()
        .unwrap_or(candidates[candidates.len() - 1])
}

impl Default for RouteBook {
    /// Seed the hand-picked routes for the known Polygon pairs.
    fn default() -> Self {
        let mut curated = HashMap::new();
        let mut add = |from: &str, to: &str, hops: [(&str, &str); 3], gas: f64| {
            curated.insert(
                (from.to_string(), to.to_string()),
                RoutePath {
                    hops: hops.iter().map(|(t, v)| Hop::new(t, v)).collect(),
                    kind: PathKind::Curated,
                    gas_estimate: gas,
                },
            );
        };

        add("POL", "USDC", [("WETH", "Quickswap"), ("DAI", "Sushiswap"), ("USDC", "Curve")], 0.22);
        add("USDC", "POL", [("DAI", "Curve"), ("WETH", "Sushiswap"), ("POL", "Quickswap")], 0.22);
        add("USDC", "DAI", [("WETH", "Uniswap"), ("POL", "Quickswap"), ("DAI", "Sushiswap")], 0.23);
        add("DAI", "USDC", [("POL", "Sushiswap"), ("WETH", "Quickswap"), ("USDC", "Uniswap")], 0.23);
        add("POL", "DAI", [("USDC", "Quickswap"), ("WETH", "Curve"), ("DAI", "Sushiswap")], 0.24);
        add("DAI", "POL", [("WETH", "Sushiswap"), ("USDC", "Curve"), ("POL", "Quickswap")], 0.24);
        add("WETH", "USDC", [("LINK", "Uniswap"), ("DAI", "Sushiswap"), ("USDC", "Curve")], 0.26);
        add("USDC", "WETH", [("DAI", "Curve"), ("LINK", "Sushiswap"), ("WETH", "Uniswap")], 0.26);
        add("WBTC", "USDC", [("WETH", "Curve"), ("LINK", "Uniswap"), ("USDC", "Sushiswap")], 0.27);
        add("USDC", "WBTC", [("LINK", "Sushiswap"), ("WETH", "Uniswap"), ("WBTC", "Curve")], 0.27);
        add("POL", "AAVE", [("USDC", "Quickswap"), ("LINK", "Sushiswap"), ("AAVE", "AavePortal")], 0.25);

        Self { curated }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intermediates(path: &RoutePath) -> Vec<&str> {
        path.hops[..path.hops.len() - 1]
            .iter()
            .map(|h| h.target.as_str())
            .collect()
    }

    #[test]
    fn test_same_asset_round_trip() {
        let book = RouteBook::default();
        for token in ["POL", "USDC", "DAI", "FOO"] {
            let path = book.synthesize(token, token);
            assert_eq!(path.kind, PathKind::SameAsset);
            assert_eq!(path.hops.len(), 3);
            assert_eq!(path.hops[2].target, token);
            for mid in intermediates(&path) {
                assert_ne!(mid, token, "intermediate collides for {token}");
            }
        }
    }

    #[test]
    fn test_curated_lookup() {
        let book = RouteBook::default();
        let path = book.synthesize("POL", "USDC");
        assert_eq!(path.kind, PathKind::Curated);
        assert_eq!(path.hops.len(), 3);
        assert_eq!(path.hops[2].target, "USDC");
        assert_eq!(path.gas_estimate, 0.22);
        assert!(book.is_curated("POL", "USDC"));
    }

    #[test]
    fn test_curated_paths_respect_invariants() {
        let book = RouteBook::default();
        for ((from, to), path) in &book.curated {
            assert_eq!(path.hops.len(), 3, "{from}->{to}");
            assert_eq!(&path.hops[2].target, to, "{from}->{to}");
            let mids = intermediates(path);
            assert!(!mids.contains(&from.as_str()), "{from}->{to}");
            assert!(!mids.contains(&to.as_str()), "{from}->{to}");
            assert_ne!(mids[0], mids[1], "{from}->{to}");
        }
    }

    #[test]
    fn test_fallback_uses_generic_venues() {
        let book = RouteBook::default();
        let path = book.synthesize("FOO", "BAR");
        assert_eq!(path.kind, PathKind::Fallback);
        assert_eq!(path.hops.len(), 3);
        for (hop, venue) in path.hops.iter().zip(FALLBACK_VENUES) {
            assert_eq!(hop.venue, venue);
        }
        assert_eq!(path.hops[2].target, "BAR");
    }

    #[test]
    fn test_fallback_intermediates_distinct() {
        let book = RouteBook::default();
        // Pairs chosen to collide with every preferred bridge at least once.
        let pairs = [
            ("FOO", "BAR"),
            ("LINK", "WETH"),
            ("WETH", "LINK"),
            ("LINK", "AAVE"),
            ("AAVE", "LINK"),
            ("WETH", "USDC2"),
            ("UNI", "CRV"),
            ("CRV", "UNI"),
            ("DAI", "CRV"),
        ];
        for (from, to) in pairs {
            let path = book.synthesize(from, to);
            if path.kind != PathKind::Fallback {
                continue;
            }
            let mids = intermediates(&path);
            assert_ne!(mids[0], mids[1], "{from}->{to}");
            for mid in mids {
                assert_ne!(mid, from, "{from}->{to}");
                assert_ne!(mid, to, "{from}->{to}");
            }
        }
    }

    #[test]
    fn test_fallback_prefers_primary_bridges() {
        let book = RouteBook::default();
        let path = book.synthesize("FOO", "BAR");
        assert_eq!(path.hops[0].target, "LINK");
        assert_eq!(path.hops[1].target, "WETH");
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let book = RouteBook::default();
        assert_eq!(book.synthesize("FOO", "BAR"), book.synthesize("FOO", "BAR"));
        assert_eq!(book.synthesize("POL", "USDC"), book.synthesize("POL", "USDC"));
    }
}
