//! Trade decisions and execution records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::signal::Signal;

/// Trade direction for sizing and quoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Buy,
    Sell,
}

impl From<Side> for Signal {
    fn from(side: Side) -> Self {
        match side {
            Side::Buy => Signal::Buy,
            Side::Sell => Signal::Sell,
        }
    }
}

/// Execution path a trade went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExecutionMode {
    Simulated,
    Live,
}

/// Whether the attempt filled or was aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TradeStatus {
    Filled,
    Failed,
}

/// A signal with a concrete base-unit quantity attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizedTrade {
    pub side: Side,
    pub quantity: f64,
}

/// Why a cycle produced no trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Hold,
    AlreadyLong,
    NoPosition,
    Halted,
    CapitalExhausted,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Hold => write!(f, "hold signal"),
            SkipReason::AlreadyLong => write!(f, "already holding a position"),
            SkipReason::NoPosition => write!(f, "no position to sell"),
            SkipReason::Halted => write!(f, "drawdown circuit breaker active"),
            SkipReason::CapitalExhausted => write!(f, "no spendable capital above the reserve"),
        }
    }
}

/// Risk manager verdict for one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Execute this sized trade.
    Execute(SizedTrade),
    /// Drawdown breach: flatten the position and halt new entries.
    Liquidate(SizedTrade),
    /// No trade this cycle.
    Skip(SkipReason),
}

/// Append-only record of one execution attempt, immutable once the
/// fill has been applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    pub signal: Signal,
    pub requested_quantity: f64,
    pub filled_quantity: f64,
    pub price: f64,
    pub fee: f64,
    pub mode: ExecutionMode,
    pub status: TradeStatus,
    pub timestamp: DateTime<Utc>,
    /// Portfolio equity after the fill was applied; set by the risk
    /// manager, zero on records it never saw.
    pub resulting_equity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_maps_to_signal() {
        assert_eq!(Signal::from(Side::Buy), Signal::Buy);
        assert_eq!(Signal::from(Side::Sell), Signal::Sell);
    }

    #[test]
    fn skip_reasons_have_readable_text() {
        assert_eq!(SkipReason::Hold.to_string(), "hold signal");
        assert_eq!(
            SkipReason::Halted.to_string(),
            "drawdown circuit breaker active"
        );
    }
}
