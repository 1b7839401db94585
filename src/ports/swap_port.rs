//! Swap quote port trait.

use crate::domain::error::TraderError;
use crate::domain::trade::Side;

/// An executable quote from the swap collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapQuote {
    pub filled_quantity: f64,
    pub price: f64,
    pub fee: f64,
}

/// Route lookup for live execution. `amount` is in base units; a
/// failure is `QuoteUnavailable` and the engine treats the cycle as a
/// no-op.
pub trait SwapPort {
    fn get_quote(
        &self,
        side: Side,
        amount: f64,
        slippage_bps: u32,
    ) -> Result<SwapQuote, TraderError>;
}
