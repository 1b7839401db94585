//! Random-walk mock price feed.
//!
//! Paper-trading stand-in for a live quote source: multiplicative
//! steps around a base price, clamped to [base/2, base·2] so the walk
//! never runs away.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::error::TraderError;
use crate::domain::tick::PriceTick;
use crate::ports::feed_port::FeedPort;

pub struct MockFeedAdapter {
    base_price: f64,
    volatility: f64,
    current: f64,
    rng: StdRng,
}

impl MockFeedAdapter {
    pub fn new(base_price: f64, volatility: f64) -> Self {
        Self::with_rng(base_price, volatility, StdRng::from_entropy())
    }

    /// Seeded variant for reproducible runs.
    pub fn with_seed(base_price: f64, volatility: f64, seed: u64) -> Self {
        Self::with_rng(base_price, volatility, StdRng::seed_from_u64(seed))
    }

    fn with_rng(base_price: f64, volatility: f64, rng: StdRng) -> Self {
        MockFeedAdapter {
            base_price,
            volatility,
            current: base_price,
            rng,
        }
    }

    /// Restart the walk from a new base price.
    pub fn reset(&mut self, base_price: f64) {
        self.base_price = base_price;
        self.current = base_price;
    }
}

impl FeedPort for MockFeedAdapter {
    fn next_tick(&mut self, symbol: &str) -> Result<PriceTick, TraderError> {
        let step: f64 = if self.volatility > 0.0 {
            self.rng.gen_range(-self.volatility..=self.volatility)
        } else {
            0.0
        };
        self.current = (self.current * (1.0 + step))
            .clamp(self.base_price * 0.5, self.base_price * 2.0);
        PriceTick::new(symbol, self.current, Utc::now())
    }
}
