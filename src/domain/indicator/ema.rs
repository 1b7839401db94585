//! Streaming exponential moving average.
//!
//! k = 2/(period+1). The first observation seeds the average directly
//! (no smoothing); every later price folds in as price·k + prev·(1−k).

#[derive(Debug, Clone)]
pub struct Ema {
    k: f64,
    value: Option<f64>,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Ema {
            k: 2.0 / (period as f64 + 1.0),
            value: None,
        }
    }

    /// Fold one price into the average and return the updated value.
    pub fn update(&mut self, price: f64) -> f64 {
        let next = match self.value {
            None => price,
            Some(prev) => price * self.k + prev * (1.0 - self.k),
        };
        self.value = Some(next);
        next
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }
}
