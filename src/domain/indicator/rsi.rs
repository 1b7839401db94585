//! Streaming RSI over a bounded window of price deltas.
//!
//! Average gain and loss are plain means over the last `period` deltas.
//! RSI = 100 − 100/(1 + avg_gain/avg_loss); avg_loss = 0 maps to 100.
//! Undefined until `period` deltas have been observed.

use super::window::RollingWindow;

#[derive(Debug, Clone)]
pub struct Rsi {
    deltas: RollingWindow,
    prev_price: Option<f64>,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Rsi {
            deltas: RollingWindow::new(period),
            prev_price: None,
        }
    }

    /// Fold one price in and return the RSI, or `None` while warming up.
    pub fn update(&mut self, price: f64) -> Option<f64> {
        if let Some(prev) = self.prev_price {
            self.deltas.push(price - prev);
        }
        self.prev_price = Some(price);
        self.value()
    }

    pub fn value(&self) -> Option<f64> {
        if !self.deltas.is_full() {
            return None;
        }
        let period = self.deltas.capacity() as f64;
        let avg_gain = self.deltas.iter().filter(|d| *d > 0.0).sum::<f64>() / period;
        let avg_loss: f64 =
            self.deltas.iter().filter(|d| *d < 0.0).map(f64::abs).sum::<f64>() / period;
        if avg_loss == 0.0 {
            return Some(100.0);
        }
        Some(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
    }
}
