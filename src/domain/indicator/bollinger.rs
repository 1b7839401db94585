//! Streaming Bollinger Bands.
//!
//! Rolling mean ± width·σ over the last `period` prices, with σ the
//! population standard deviation. Undefined until the window is full.

use super::window::RollingWindow;

/// One band envelope: `upper ≥ middle ≥ lower` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    prices: RollingWindow,
    width: f64,
}

impl Bollinger {
    pub fn new(period: usize, width: f64) -> Self {
        Bollinger {
            prices: RollingWindow::new(period),
            width,
        }
    }

    /// Fold one price in and return the bands, or `None` while warming up.
    pub fn update(&mut self, price: f64) -> Option<Bands> {
        self.prices.push(price);
        self.value()
    }

    pub fn value(&self) -> Option<Bands> {
        if !self.prices.is_full() {
            return None;
        }
        let middle = self.prices.mean();
        let deviation = self.width * self.prices.population_stddev();
        Some(Bands {
            upper: middle + deviation,
            middle,
            lower: middle - deviation,
        })
    }
}
