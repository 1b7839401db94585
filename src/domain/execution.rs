//! Trade execution: simulated fills and live quote dispatch.
//!
//! Both modes return the same [`TradeRecord`] shape, so the trading
//! loop and reporting stay mode-agnostic.

use chrono::{DateTime, Utc};

use crate::ports::swap_port::SwapPort;

use super::error::TraderError;
use super::trade::{ExecutionMode, Side, SizedTrade, TradeRecord, TradeStatus};

/// Fill model parameters shared by both modes.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionConfig {
    pub slippage_bps: u32,
    pub fee_pct: f64,
}

/// A buy fills above the market price, a sell below.
pub fn apply_slippage(price: f64, side: Side, slippage_bps: u32) -> f64 {
    let factor = slippage_bps as f64 / 10_000.0;
    match side {
        Side::Buy => price * (1.0 + factor),
        Side::Sell => price * (1.0 - factor),
    }
}

/// Uniform execution front for both modes.
pub struct Executor {
    mode: ExecutionMode,
    config: ExecutionConfig,
    swap: Option<Box<dyn SwapPort>>,
}

impl Executor {
    pub fn simulated(config: ExecutionConfig) -> Self {
        Executor {
            mode: ExecutionMode::Simulated,
            config,
            swap: None,
        }
    }

    pub fn live(config: ExecutionConfig, swap: Box<dyn SwapPort>) -> Self {
        Executor {
            mode: ExecutionMode::Live,
            config,
            swap: Some(swap),
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Execute a sized trade at the current market price.
    ///
    /// `available` caps the fill: quote units spendable for a buy, base
    /// units held for a sell. An error means nothing filled and the
    /// caller must treat the cycle as a no-op.
    pub fn execute(
        &self,
        trade: &SizedTrade,
        price: f64,
        available: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<TradeRecord, TraderError> {
        match self.mode {
            ExecutionMode::Simulated => Ok(self.fill_simulated(trade, price, available, timestamp)),
            ExecutionMode::Live => self.fill_live(trade, timestamp),
        }
    }

    fn fill_simulated(
        &self,
        trade: &SizedTrade,
        price: f64,
        available: f64,
        timestamp: DateTime<Utc>,
    ) -> TradeRecord {
        let execution_price = apply_slippage(price, trade.side, self.config.slippage_bps);
        let fee_rate = self.config.fee_pct / 100.0;
        let filled_quantity = match trade.side {
            // a buy costs quantity·price·(1 + fee_rate) in quote units
            Side::Buy => trade
                .quantity
                .min(available / (execution_price * (1.0 + fee_rate))),
            Side::Sell => trade.quantity.min(available),
        };
        TradeRecord {
            signal: trade.side.into(),
            requested_quantity: trade.quantity,
            filled_quantity,
            price: execution_price,
            fee: filled_quantity * execution_price * fee_rate,
            mode: ExecutionMode::Simulated,
            status: TradeStatus::Filled,
            timestamp,
            resulting_equity: 0.0,
        }
    }

    fn fill_live(
        &self,
        trade: &SizedTrade,
        timestamp: DateTime<Utc>,
    ) -> Result<TradeRecord, TraderError> {
        let swap = self
            .swap
            .as_deref()
            .ok_or_else(|| TraderError::ExecutionFailed {
                reason: "no swap collaborator wired".into(),
            })?;
        let quote = swap.get_quote(trade.side, trade.quantity, self.config.slippage_bps)?;
        Ok(TradeRecord {
            signal: trade.side.into(),
            requested_quantity: trade.quantity,
            filled_quantity: quote.filled_quantity,
            price: quote.price,
            fee: quote.fee,
            mode: ExecutionMode::Live,
            status: TradeStatus::Filled,
            timestamp,
            resulting_equity: 0.0,
        })
    }
}

/// Record for an attempt that never filled; the portfolio stays as it
/// was.
pub fn failed_record(
    trade: &SizedTrade,
    price: f64,
    mode: ExecutionMode,
    timestamp: DateTime<Utc>,
) -> TradeRecord {
    TradeRecord {
        signal: trade.side.into(),
        requested_quantity: trade.quantity,
        filled_quantity: 0.0,
        price,
        fee: 0.0,
        mode,
        status: TradeStatus::Failed,
        timestamp,
        resulting_equity: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signal::Signal;
    use crate::ports::swap_port::SwapQuote;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn config() -> ExecutionConfig {
        ExecutionConfig {
            slippage_bps: 50,
            fee_pct: 0.25,
        }
    }

    struct FixedQuote(SwapQuote);

    impl SwapPort for FixedQuote {
        fn get_quote(
            &self,
            _side: Side,
            _amount: f64,
            _slippage_bps: u32,
        ) -> Result<SwapQuote, TraderError> {
            Ok(self.0)
        }
    }

    struct NoRoute;

    impl SwapPort for NoRoute {
        fn get_quote(
            &self,
            _side: Side,
            _amount: f64,
            _slippage_bps: u32,
        ) -> Result<SwapQuote, TraderError> {
            Err(TraderError::QuoteUnavailable {
                reason: "no route".into(),
            })
        }
    }

    #[test]
    fn slippage_direction() {
        assert!((apply_slippage(100.0, Side::Buy, 50) - 100.5).abs() < 1e-10);
        assert!((apply_slippage(100.0, Side::Sell, 50) - 99.5).abs() < 1e-10);
        assert!((apply_slippage(100.0, Side::Buy, 0) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn simulated_buy_full_fill() {
        let executor = Executor::simulated(config());
        let trade = SizedTrade {
            side: Side::Buy,
            quantity: 2.0,
        };
        let record = executor.execute(&trade, 100.0, 1000.0, ts()).unwrap();

        assert_eq!(record.signal, Signal::Buy);
        assert_eq!(record.status, TradeStatus::Filled);
        assert_eq!(record.mode, ExecutionMode::Simulated);
        assert!((record.filled_quantity - 2.0).abs() < f64::EPSILON);
        assert!((record.price - 100.5).abs() < 1e-10);
        assert!((record.fee - 2.0 * 100.5 * 0.0025).abs() < 1e-10);
    }

    #[test]
    fn simulated_buy_capped_by_available() {
        let executor = Executor::simulated(config());
        let trade = SizedTrade {
            side: Side::Buy,
            quantity: 10.0,
        };
        let record = executor.execute(&trade, 100.0, 500.0, ts()).unwrap();

        assert!(record.filled_quantity < record.requested_quantity);
        // cost never exceeds what was available
        let cost = record.filled_quantity * record.price + record.fee;
        assert!(cost <= 500.0 + 1e-9);
    }

    #[test]
    fn simulated_sell_capped_by_holding() {
        let executor = Executor::simulated(config());
        let trade = SizedTrade {
            side: Side::Sell,
            quantity: 5.0,
        };
        let record = executor.execute(&trade, 100.0, 3.0, ts()).unwrap();
        assert!((record.filled_quantity - 3.0).abs() < f64::EPSILON);
        assert!((record.price - 99.5).abs() < 1e-10);
    }

    #[test]
    fn live_fill_uses_quote_values() {
        let executor = Executor::live(
            config(),
            Box::new(FixedQuote(SwapQuote {
                filled_quantity: 1.8,
                price: 101.2,
                fee: 0.4,
            })),
        );
        let trade = SizedTrade {
            side: Side::Buy,
            quantity: 2.0,
        };
        let record = executor.execute(&trade, 100.0, 1000.0, ts()).unwrap();

        assert_eq!(record.mode, ExecutionMode::Live);
        assert!((record.filled_quantity - 1.8).abs() < f64::EPSILON);
        assert!((record.price - 101.2).abs() < f64::EPSILON);
        assert!((record.fee - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn live_quote_failure_propagates() {
        let executor = Executor::live(config(), Box::new(NoRoute));
        let trade = SizedTrade {
            side: Side::Buy,
            quantity: 2.0,
        };
        let result = executor.execute(&trade, 100.0, 1000.0, ts());
        assert!(matches!(result, Err(TraderError::QuoteUnavailable { .. })));
    }

    #[test]
    fn failed_record_shape() {
        let trade = SizedTrade {
            side: Side::Sell,
            quantity: 2.0,
        };
        let record = failed_record(&trade, 100.0, ExecutionMode::Live, ts());
        assert_eq!(record.status, TradeStatus::Failed);
        assert!((record.filled_quantity - 0.0).abs() < f64::EPSILON);
        assert!((record.fee - 0.0).abs() < f64::EPSILON);
    }
}
