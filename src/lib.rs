//! Polyroute: multi-venue swap quoting and path selection for Polygon tokens
//!
//! This library quotes token conversions against a static rate catalog. For a
//! `(from, to, amount)` triple it produces the best single-venue direct swap
//! and a three-hop multi-venue route, each with per-step amounts and a gas
//! estimate. All quoting is deterministic and side-effect free; no live
//! market data is consulted and no trades are executed.

pub mod market;
pub mod quote;
pub mod route;

use thiserror::Error;

/// Re-export main components
pub use market::{RateTable, VenueBook};
pub use quote::{PairQuotes, PresentPolicy, Quote, RouteEngine, SwapStep};
pub use route::{PathKind, RouteBook, RoutePath};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for quoting operations
///
/// The core quoting functions are total and never return these; errors only
/// surface from the validating facade ([`RouteEngine::quote_pair`]) that sits
/// between untrusted caller input and the engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid amount {0}: must be positive and finite")]
    InvalidAmount(f64),

    #[error("empty asset symbol on the {side} side")]
    EmptySymbol { side: &'static str },
}

/// Result type for quoting operations
pub type Result<T> = std::result::Result<T, EngineError>;
