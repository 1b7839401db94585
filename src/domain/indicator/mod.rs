//! Streaming technical indicators.
//!
//! [`IndicatorEngine`] owns the per-symbol accumulators and turns each
//! appended price into an [`IndicatorSnapshot`]. The windowed
//! indicators (RSI, Bollinger) report `None` until their windows are
//! full; the EMAs are seeded by the first observation and always carry
//! a value.

pub mod bollinger;
pub mod ema;
pub mod rsi;
pub mod window;

use bollinger::{Bands, Bollinger};
use ema::Ema;
use rsi::Rsi;

use super::error::TraderError;

/// Indicator periods and band width.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorConfig {
    pub ema_fast_period: usize,
    pub ema_slow_period: usize,
    pub rsi_period: usize,
    pub bollinger_period: usize,
    pub bollinger_width: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        IndicatorConfig {
            ema_fast_period: 12,
            ema_slow_period: 50,
            rsi_period: 14,
            bollinger_period: 20,
            bollinger_width: 2.0,
        }
    }
}

/// Latest indicator values for one symbol, produced fresh each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSnapshot {
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub rsi: Option<f64>,
    pub bands: Option<Bands>,
}

impl IndicatorSnapshot {
    /// True until every windowed indicator has a full window.
    pub fn warming_up(&self) -> bool {
        self.rsi.is_none() || self.bands.is_none()
    }
}

/// Streaming indicator state for a single symbol. Single-writer: one
/// engine per symbol, updated in place on each tick.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    ema_fast: Ema,
    ema_slow: Ema,
    rsi: Rsi,
    bollinger: Bollinger,
}

impl IndicatorEngine {
    pub fn new(config: &IndicatorConfig) -> Self {
        IndicatorEngine {
            ema_fast: Ema::new(config.ema_fast_period),
            ema_slow: Ema::new(config.ema_slow_period),
            rsi: Rsi::new(config.rsi_period),
            bollinger: Bollinger::new(config.bollinger_period, config.bollinger_width),
        }
    }

    /// Fold one price into every tracker and return the fresh snapshot.
    ///
    /// Non-finite or non-positive prices are rejected before any
    /// accumulator mutates, so a malformed tick leaves prior state
    /// intact.
    pub fn update(&mut self, symbol: &str, price: f64) -> Result<IndicatorSnapshot, TraderError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(TraderError::InvalidPrice {
                symbol: symbol.to_string(),
                value: price,
            });
        }
        Ok(IndicatorSnapshot {
            ema_fast: self.ema_fast.update(price),
            ema_slow: self.ema_slow.update(price),
            rsi: self.rsi.update(price),
            bands: self.bollinger.update(price),
        })
    }
}
