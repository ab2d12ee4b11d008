//! Quoting: step pricing, direct-route selection, and path assembly
//!
//! Everything here is pure and total: unresolvable rates and venues degrade
//! to conservative fallbacks instead of erroring, because a quote must always
//! materialize for any symbol pair. The only `None` in the module is "no
//! positive-output direct route".

mod present;

pub use present::PresentPolicy;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::market::{RateTable, VenueBook};
use crate::route::{RouteBook, RoutePath};
use crate::{EngineError, Result};

/// Gas estimate (in POL) for a single direct hop.
pub const GAS_DIRECT: f64 = 0.12;

/// Major venues evaluated for direct swaps, in tie-break order.
pub const DIRECT_VENUES: [&str; 4] = ["Quickswap", "Uniswap", "Sushiswap", "Curve"];

/// Output quantities round to this many decimal places.
const AMOUNT_DECIMALS: i32 = 6;
const GAS_DECIMALS: i32 = 4;

pub(crate) fn round_amount(value: f64) -> f64 {
    let scale = 10f64.powi(AMOUNT_DECIMALS);
    (value * scale).round() / scale
}

fn round_gas(value: f64) -> f64 {
    let scale = 10f64.powi(GAS_DECIMALS);
    (value * scale).round() / scale
}

/// Immutable record of one executed hop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapStep {
    pub venue: String,
    pub token_in: String,
    pub amount_in: f64,
    pub token_out: String,
    pub amount_out: f64,
}

/// A priced route: per-step detail plus totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub steps: Vec<SwapStep>,
    pub estimated_output: f64,
    pub gas_estimate: f64,
}

/// Direct and multi-hop quotes for one request, as returned by the
/// validating facade.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairQuotes {
    pub direct: Option<Quote>,
    pub optimal: Quote,
}

/// Output of one hop: `amount_in x rate x fee`, rounded.
///
/// Pure and total. Non-positive or non-finite inputs, and hops that price to
/// nothing, yield 0.0 — the assembler treats that as "no liquidity" and
/// stops, so multi-hop iteration never has to handle an error case.
pub fn compute_step(
    rates: &RateTable,
    venues: &VenueBook,
    amount_in: f64,
    token_in: &str,
    token_out: &str,
    venue: &str,
) -> f64 {
    if !amount_in.is_finite() || amount_in <= 0.0 {
        return 0.0;
    }
    let rate = venues
        .rate_override(venue, token_in, token_out)
        .unwrap_or_else(|| rates.rate(token_in, token_out));
    let out = amount_in * rate * venues.fee_factor(venue, token_in, token_out);
    if out.is_finite() && out > 0.0 {
        round_amount(out)
    } else {
        0.0
    }
}

/// The quoting engine: static tables plus the presentation policy.
///
/// Read-only after construction; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct RouteEngine {
    rates: RateTable,
    venues: VenueBook,
    routes: RouteBook,
    policy: PresentPolicy,
}

impl RouteEngine {
    /// Engine over the seeded Polygon catalog with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine over caller-supplied tables.
    pub fn with_tables(rates: RateTable, venues: VenueBook, routes: RouteBook) -> Self {
        Self {
            rates,
            venues,
            routes,
            policy: PresentPolicy::default(),
        }
    }

    /// Replace the presentation policy.
    pub fn with_policy(mut self, policy: PresentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Best single-venue hop from `from` to `to`, or `None`.
    ///
    /// Evaluates the fixed venue catalog in order and keeps the strictly
    /// greatest output, so ties resolve to the earliest venue. The identity
    /// pair is not a trade and has no direct route.
    pub fn best_direct(&self, from: &str, to: &str, amount: f64) -> Option<SwapStep> {
        let from = normalize(from);
        let to = normalize(to);
        if from == to {
            return None;
        }
        let mut best: Option<SwapStep> = None;
        for venue in DIRECT_VENUES {
            let out = compute_step(&self.rates, &self.venues, amount, &from, &to, venue);
            debug!(venue, %from, %to, amount_out = out, "direct candidate");
            if out > 0.0 && best.as_ref().map_or(true, |b| out > b.amount_out) {
                best = Some(SwapStep {
                    venue: venue.to_string(),
                    token_in: from.clone(),
                    amount_in: amount,
                    token_out: to.clone(),
                    amount_out: out,
                });
            }
        }
        best
    }

    /// Best direct conversion wrapped as a single-step quote.
    pub fn quote_direct(&self, from: &str, to: &str, amount: f64) -> Option<Quote> {
        let step = self.best_direct(from, to, amount)?;
        let estimated_output = step.amount_out;
        Some(Quote {
            steps: vec![step],
            estimated_output,
            gas_estimate: round_gas(GAS_DIRECT),
        })
    }

    /// Price a planned path hop by hop.
    ///
    /// Each hop's output feeds the next hop's input. A zero output marks the
    /// path broken: assembly stops there and the partial step list is
    /// returned as-is rather than padded with garbage hops.
    pub fn assemble(&self, from: &str, amount: f64, path: &RoutePath) -> Quote {
        let mut steps = Vec::with_capacity(path.hops.len());
        let mut token = normalize(from);
        let mut running = amount;
        for hop in &path.hops {
            let out = compute_step(&self.rates, &self.venues, running, &token, &hop.target, &hop.venue);
            steps.push(SwapStep {
                venue: hop.venue.clone(),
                token_in: token,
                amount_in: running,
                token_out: hop.target.clone(),
                amount_out: out,
            });
            if out <= 0.0 {
                break;
            }
            running = out;
            token = hop.target.clone();
        }
        // Empty path only occurs defensively; quote the input back unchanged.
        let estimated_output = steps.last().map_or(amount, |s| s.amount_out);
        Quote {
            steps,
            estimated_output,
            gas_estimate: round_gas(path.gas_estimate),
        }
    }

    /// Multi-hop quote with true computed values, no presentation applied.
    pub fn quote_optimal_raw(&self, from: &str, to: &str, amount: f64) -> Quote {
        let from = normalize(from);
        let to = normalize(to);
        let path = self.routes.synthesize(&from, &to);
        debug!(%from, %to, kind = ?path.kind, "synthesized path");
        self.assemble(&from, amount, &path)
    }

    /// Multi-hop quote, reconciled against `prior_direct` when one is given.
    ///
    /// Reconciliation is a bounded display policy ([`PresentPolicy`]), not a
    /// pricing fact; use [`Self::quote_optimal_raw`] for true values.
    pub fn quote_optimal(
        &self,
        from: &str,
        to: &str,
        amount: f64,
        prior_direct: Option<&Quote>,
    ) -> Quote {
        let raw = self.quote_optimal_raw(from, to, amount);
        self.policy.present(&raw, prior_direct)
    }

    /// Validating facade: both quotes for one request.
    ///
    /// The quoting core is total; this is the one place caller input is
    /// checked before it reaches the engine.
    pub fn quote_pair(&self, from: &str, to: &str, amount: f64) -> Result<PairQuotes> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(EngineError::InvalidAmount(amount));
        }
        if from.trim().is_empty() {
            return Err(EngineError::EmptySymbol { side: "from" });
        }
        if to.trim().is_empty() {
            return Err(EngineError::EmptySymbol { side: "to" });
        }
        let direct = self.quote_direct(from, to, amount);
        let optimal = self.quote_optimal(from, to, amount, direct.as_ref());
        Ok(PairQuotes { direct, optimal })
    }
}

fn normalize(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usdc_to_pol_direct_scenario() {
        let engine = RouteEngine::new();
        let quote = engine.quote_direct("USDC", "POL", 100.0).unwrap();
        // 100 x 5.26 x 0.9975 on Quickswap, the best-priced venue.
        assert_eq!(quote.steps.len(), 1);
        assert_eq!(quote.steps[0].venue, "Quickswap");
        assert!((quote.estimated_output - 524.685).abs() < 1e-6);
        assert_eq!(quote.estimated_output, quote.steps[0].amount_out);
    }

    #[test]
    fn test_compute_step_linear_in_amount() {
        let engine = RouteEngine::new();
        let one = compute_step(&engine.rates, &engine.venues, 10.0, "USDC", "POL", "Quickswap");
        let two = compute_step(&engine.rates, &engine.venues, 20.0, "USDC", "POL", "Quickswap");
        // Linear up to the 6-decimal rounding of each result.
        assert!((two - 2.0 * one).abs() < 1e-5);
    }

    #[test]
    fn test_compute_step_total_on_bad_input() {
        let engine = RouteEngine::new();
        let cases = [0.0, -5.0, f64::NAN, f64::INFINITY];
        for amount in cases {
            let out = compute_step(&engine.rates, &engine.venues, amount, "USDC", "POL", "Quickswap");
            assert_eq!(out, 0.0);
        }
    }

    #[test]
    fn test_stable_pair_direct_picks_curve() {
        let engine = RouteEngine::new();
        let step = engine.best_direct("USDC", "DAI", 100.0).unwrap();
        // Curve's near-1:1 override beats table rate x base fee elsewhere.
        assert_eq!(step.venue, "Curve");
        assert!((step.amount_out - 100.0 * 0.9999 * 0.9996).abs() < 1e-6);
    }

    #[test]
    fn test_no_direct_route_for_identity() {
        let engine = RouteEngine::new();
        assert!(engine.quote_direct("POL", "POL", 100.0).is_none());
    }

    #[test]
    fn test_assemble_stops_at_zero_output() {
        let engine = RouteEngine::new();
        let path = crate::route::RouteBook::default().synthesize("POL", "USDC");
        // Zero input prices every hop to nothing; only the first broken step
        // is recorded.
        let quote = engine.assemble("POL", 0.0, &path);
        assert_eq!(quote.steps.len(), 1);
        assert_eq!(quote.steps[0].amount_out, 0.0);
        assert_eq!(quote.estimated_output, 0.0);
    }

    #[test]
    fn test_symbols_normalized() {
        let engine = RouteEngine::new();
        let upper = engine.quote_direct("USDC", "POL", 100.0).unwrap();
        let lower = engine.quote_direct("usdc", " pol ", 100.0).unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_quote_pair_rejects_bad_amounts() {
        let engine = RouteEngine::new();
        for amount in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(engine.quote_pair("USDC", "POL", amount).is_err());
        }
        assert!(engine.quote_pair("", "POL", 1.0).is_err());
        assert!(engine.quote_pair("USDC", "  ", 1.0).is_err());
    }
}
