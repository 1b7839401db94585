//! CSV price series adapter.
//!
//! Historical input for backtests: one `timestamp,price` row per tick,
//! RFC 3339 timestamps. [`ReplayFeed`] serves a loaded series through
//! the feed port for paper-trading against recorded data.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::domain::error::TraderError;
use crate::domain::tick::PriceTick;
use crate::ports::feed_port::FeedPort;

/// Load an ordered price series for `symbol` from a CSV file.
///
/// Rows are sorted by timestamp; a malformed row fails the whole load
/// (bad history is a startup problem, not a skip-one-tick problem).
pub fn load_price_series(path: &Path, symbol: &str) -> Result<Vec<PriceTick>, TraderError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| TraderError::PriceData {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;

    let mut ticks = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| TraderError::PriceData {
            reason: format!("CSV parse error: {}", e),
        })?;

        let timestamp_str = record.get(0).ok_or_else(|| TraderError::PriceData {
            reason: format!("row {}: missing timestamp column", row + 1),
        })?;
        let timestamp = DateTime::parse_from_rfc3339(timestamp_str)
            .map_err(|e| TraderError::PriceData {
                reason: format!("row {}: invalid timestamp: {}", row + 1, e),
            })?
            .with_timezone(&Utc);

        let price: f64 = record
            .get(1)
            .ok_or_else(|| TraderError::PriceData {
                reason: format!("row {}: missing price column", row + 1),
            })?
            .parse()
            .map_err(|e| TraderError::PriceData {
                reason: format!("row {}: invalid price: {}", row + 1, e),
            })?;

        ticks.push(PriceTick::new(symbol, price, timestamp)?);
    }

    ticks.sort_by_key(|t| t.timestamp);
    Ok(ticks)
}

/// Serves a pre-loaded series one tick per pull, then reports the feed
/// as unavailable.
pub struct ReplayFeed {
    ticks: Vec<PriceTick>,
    next: usize,
}

impl ReplayFeed {
    pub fn new(ticks: Vec<PriceTick>) -> Self {
        ReplayFeed { ticks, next: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.ticks.len() - self.next
    }
}

impl FeedPort for ReplayFeed {
    fn next_tick(&mut self, _symbol: &str) -> Result<PriceTick, TraderError> {
        match self.ticks.get(self.next) {
            Some(tick) => {
                self.next += 1;
                Ok(tick.clone())
            }
            None => Err(TraderError::FeedUnavailable {
                reason: "price series exhausted".into(),
            }),
        }
    }
}
