//! Threshold signal rules.

use std::fmt;

use serde::Serialize;

use super::indicator::IndicatorSnapshot;

/// Discrete trading signal, produced fresh each cycle and never
/// persisted beyond it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Hold => write!(f, "HOLD"),
        }
    }
}

/// Map the latest indicator snapshot and raw price to a signal.
///
/// Pure function, evaluated in fixed priority order (first match wins):
/// 1. indicators warming up → `Hold`
/// 2. price at/above the upper band with RSI above 70 → `Sell`
/// 3. RSI below 30 with price under the lower band → `Buy`
/// 4. fast EMA above slow EMA with RSI below 70 → `Buy` (trend continuation)
/// 5. otherwise `Hold`
///
/// The explicit reversal/oversold rules (2, 3) outrank the trend rule.
/// Whether a trend `Buy` stands down further (an open position, a risk
/// halt) is the risk manager's call; this function never sees position
/// state.
pub fn decide(snapshot: &IndicatorSnapshot, price: f64) -> Signal {
    let (Some(rsi), Some(bands)) = (snapshot.rsi, snapshot.bands) else {
        return Signal::Hold;
    };
    if price >= bands.upper && rsi > 70.0 {
        return Signal::Sell;
    }
    if rsi < 30.0 && price < bands.lower {
        return Signal::Buy;
    }
    if snapshot.ema_fast > snapshot.ema_slow && rsi < 70.0 {
        return Signal::Buy;
    }
    Signal::Hold
}
