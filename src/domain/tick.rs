//! Price tick representation.

use chrono::{DateTime, Utc};

use super::error::TraderError;

/// One timestamped price observation for a symbol. Immutable once
/// produced by the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTick {
    pub symbol: String,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

impl PriceTick {
    /// Build a tick, rejecting non-finite or non-positive prices.
    pub fn new(symbol: &str, price: f64, timestamp: DateTime<Utc>) -> Result<Self, TraderError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(TraderError::InvalidPrice {
                symbol: symbol.to_string(),
                value: price,
            });
        }
        Ok(PriceTick {
            symbol: symbol.to_string(),
            price,
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn valid_tick() {
        let tick = PriceTick::new("SOL/USDC", 150.25, ts()).unwrap();
        assert_eq!(tick.symbol, "SOL/USDC");
        assert!((tick.price - 150.25).abs() < f64::EPSILON);
        assert_eq!(tick.timestamp, ts());
    }

    #[test]
    fn zero_price_rejected() {
        assert!(PriceTick::new("SOL/USDC", 0.0, ts()).is_err());
    }

    #[test]
    fn negative_price_rejected() {
        assert!(PriceTick::new("SOL/USDC", -1.0, ts()).is_err());
    }

    #[test]
    fn nan_price_rejected() {
        assert!(PriceTick::new("SOL/USDC", f64::NAN, ts()).is_err());
    }

    #[test]
    fn infinite_price_rejected() {
        assert!(PriceTick::new("SOL/USDC", f64::INFINITY, ts()).is_err());
    }
}
