//! Price feed port trait.

use crate::domain::error::TraderError;
use crate::domain::tick::PriceTick;

/// Produces one aggregated, validated tick per call. Any upstream
/// source aggregation happens behind this trait; the engine never sees
/// partial or conflicting ticks.
///
/// A failure is `FeedUnavailable`: the caller skips the cycle and the
/// session keeps running.
pub trait FeedPort {
    fn next_tick(&mut self, symbol: &str) -> Result<PriceTick, TraderError>;
}
