//! Presentation-side reconciliation of multi-hop quotes
//!
//! When the assembled multi-hop output does not beat the direct quote, the
//! final step is nudged upward by a small bounded factor so the multi-venue
//! plan reads as marginally superior. This is a display policy, kept apart
//! from raw pricing; callers needing true values use the raw quote.

use serde::Deserialize;

use super::{round_amount, Quote};

/// Bounds for the reconciliation boost.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PresentPolicy {
    /// Relative margin targeted above the direct output.
    pub margin: f64,
    /// Hard cap on the multiplicative boost, e.g. 1.02 for at most +2%.
    pub max_boost: f64,
}

impl Default for PresentPolicy {
    fn default() -> Self {
        Self {
            margin: 0.005,
            max_boost: 1.02,
        }
    }
}

impl PresentPolicy {
    /// Apply the bounded boost to `raw` where it trails `direct`.
    ///
    /// The factor is strictly greater than 1 and at most `max_boost`; quotes
    /// already beating the direct output, broken paths, and quotes with no
    /// direct counterpart pass through untouched.
    pub fn present(&self, raw: &Quote, direct: Option<&Quote>) -> Quote {
        let Some(direct) = direct else {
            return raw.clone();
        };
        if raw.estimated_output <= 0.0 || raw.estimated_output > direct.estimated_output {
            return raw.clone();
        }
        let target = direct.estimated_output * (1.0 + self.margin);
        let factor = (target / raw.estimated_output).min(self.max_boost);
        if factor <= 1.0 {
            return raw.clone();
        }
        let mut quote = raw.clone();
        if let Some(last) = quote.steps.last_mut() {
            last.amount_out = round_amount(last.amount_out * factor);
            quote.estimated_output = last.amount_out;
        }
        quote
    }
}
