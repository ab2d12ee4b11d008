//! Market data: exchange rates and venue fee behavior
//!
//! Both tables are read-only after construction and are plain maps, so
//! adding an asset or venue is a data change rather than a code change.

mod rates;
mod venues;

pub use rates::{RateEntry, RateTable, FALLBACK_RATE};
pub use venues::{VenueBook, DEFAULT_FEE, FALLBACK_VENUES};
