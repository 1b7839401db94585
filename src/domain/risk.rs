//! Position sizing, drawdown stop-loss, and fill accounting.

use super::portfolio::Portfolio;
use super::position::Position;
use super::signal::Signal;
use super::trade::{Decision, Side, SizedTrade, SkipReason, TradeRecord, TradeStatus};

/// Capital and drawdown policy.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskConfig {
    /// Quote units allocated to this session; never exceeded.
    pub trading_capital: f64,
    /// Cap on a single position as a percentage of the trading capital.
    pub max_position_size_pct: f64,
    /// Quote units that must remain untouched in the quote balance.
    pub reserve_balance: f64,
    /// Drawdown percentage that trips the session circuit breaker.
    pub max_drawdown_pct: f64,
}

/// Owns the session's portfolio and position. Single writer: every
/// mutation flows through `evaluate` and `apply_fill`, once per cycle.
#[derive(Debug)]
pub struct RiskManager {
    config: RiskConfig,
    portfolio: Portfolio,
    position: Option<Position>,
    halted: bool,
}

impl RiskManager {
    pub fn new(config: RiskConfig, starting_quote: f64) -> Self {
        RiskManager {
            config,
            portfolio: Portfolio::new(starting_quote),
            position: None,
            halted: false,
        }
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    /// Whether the drawdown circuit breaker has tripped. The halt is
    /// permanent for the session, even if drawdown later recovers.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Quote units spendable on a buy without touching the reserve.
    pub fn spendable_quote(&self) -> f64 {
        (self.portfolio.quote_balance - self.config.reserve_balance).max(0.0)
    }

    /// Gate and size a signal for this cycle.
    ///
    /// Peak equity is refreshed before the drawdown check. A breach
    /// forces a flattening sell (if long) and permanently blocks new
    /// entries; mismatched signal/position combinations degrade to a
    /// skipped cycle, never an error.
    pub fn evaluate(&mut self, signal: Signal, price: f64) -> Decision {
        self.portfolio.update_peak(price);
        let drawdown = self.portfolio.drawdown_pct(price);
        if drawdown >= self.config.max_drawdown_pct {
            let first_breach = !self.halted;
            self.halted = true;
            // a position here means liquidation is still owed (the
            // first attempt may have failed in live mode)
            if let Some(position) = &self.position {
                return Decision::Liquidate(SizedTrade {
                    side: Side::Sell,
                    quantity: position.quantity,
                });
            }
            if first_breach {
                return Decision::Skip(SkipReason::Halted);
            }
        }

        match signal {
            Signal::Hold => Decision::Skip(SkipReason::Hold),
            Signal::Buy if self.halted => Decision::Skip(SkipReason::Halted),
            Signal::Buy if self.position.is_some() => Decision::Skip(SkipReason::AlreadyLong),
            Signal::Buy => {
                let quantity = self.buy_quantity(price);
                if quantity <= 0.0 {
                    Decision::Skip(SkipReason::CapitalExhausted)
                } else {
                    Decision::Execute(SizedTrade {
                        side: Side::Buy,
                        quantity,
                    })
                }
            }
            Signal::Sell => match &self.position {
                None => Decision::Skip(SkipReason::NoPosition),
                Some(position) => Decision::Execute(SizedTrade {
                    side: Side::Sell,
                    quantity: position.quantity,
                }),
            },
        }
    }

    /// Desired buy quantity in base units: the capital policy notional,
    /// capped by the quote actually spendable after the reserve.
    fn buy_quantity(&self, price: f64) -> f64 {
        let policy_notional = self
            .config
            .trading_capital
            .min(self.config.trading_capital * self.config.max_position_size_pct / 100.0);
        policy_notional.min(self.spendable_quote()) / price
    }

    /// Commit a confirmed fill to position, balances, and realized P/L,
    /// then stamp the record with the resulting equity.
    ///
    /// Accounting uses the filled quantity and price the execution
    /// adapter actually reported, never the requested amount, so
    /// partial fills are honored.
    pub fn apply_fill(&mut self, record: &mut TradeRecord) {
        if record.status == TradeStatus::Filled && record.filled_quantity > 0.0 {
            match record.signal {
                Signal::Buy => {
                    self.portfolio
                        .apply_buy(record.filled_quantity, record.price, record.fee);
                    self.position = Some(Position {
                        quantity: record.filled_quantity,
                        entry_price: record.price,
                        opened_at: record.timestamp,
                    });
                }
                Signal::Sell => {
                    if let Some(position) = self.position.take() {
                        self.portfolio
                            .apply_sell(record.filled_quantity, record.price, record.fee);
                        self.portfolio.realized_pnl += record.filled_quantity
                            * (record.price - position.entry_price)
                            - record.fee;
                        let remainder = position.quantity - record.filled_quantity;
                        if remainder > f64::EPSILON {
                            self.position = Some(Position {
                                quantity: remainder,
                                ..position
                            });
                        }
                    }
                }
                Signal::Hold => {}
            }
        }
        record.resulting_equity = self.portfolio.equity(record.price);
    }
}
