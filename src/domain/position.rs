//! Open position record.

use chrono::{DateTime, Utc};

/// A long holding in the base asset. A flat book is the absence of a
/// `Position` (the risk manager holds `Option<Position>`), so
/// `quantity` is positive whenever a position exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub quantity: f64,
    pub entry_price: f64,
    pub opened_at: DateTime<Utc>,
}

impl Position {
    pub fn market_value(&self, price: f64) -> f64 {
        self.quantity * price
    }

    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        self.quantity * (price - self.entry_price)
    }
}
