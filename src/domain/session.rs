//! Trading session: the per-cycle pipeline and the live loop.
//!
//! One cycle runs tick → indicators → signal → risk → execution →
//! fill accounting, strictly sequentially. The live loop adds interval
//! pacing on top; the backtest harness drives the same `cycle` over a
//! historical series.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::ports::feed_port::FeedPort;

use super::config::BotConfig;
use super::error::TraderError;
use super::execution::{self, Executor};
use super::indicator::IndicatorEngine;
use super::risk::{RiskConfig, RiskManager};
use super::signal::decide;
use super::tick::PriceTick;
use super::trade::{Decision, Side, TradeRecord, TradeStatus};

/// End-of-session summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub cycles: u64,
    pub trades: usize,
    pub failed_trades: usize,
    pub realized_pnl: f64,
    pub starting_capital: f64,
    pub final_equity: f64,
    pub halted: bool,
}

/// Single-writer pipeline state for one symbol.
pub struct TradingSession {
    symbol: String,
    indicators: IndicatorEngine,
    risk: RiskManager,
    executor: Executor,
    records: Vec<TradeRecord>,
    starting_capital: f64,
    last_price: Option<f64>,
}

impl TradingSession {
    pub fn new(config: &BotConfig, executor: Executor) -> Self {
        let risk = RiskManager::new(
            RiskConfig {
                trading_capital: config.trading_capital,
                max_position_size_pct: config.max_position_size_pct,
                reserve_balance: config.reserve_balance,
                max_drawdown_pct: config.max_drawdown_pct,
            },
            config.starting_quote(),
        );
        TradingSession {
            symbol: config.symbol.clone(),
            indicators: IndicatorEngine::new(&config.indicators),
            risk,
            executor,
            records: Vec::new(),
            starting_capital: config.starting_quote(),
            last_price: None,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn risk(&self) -> &RiskManager {
        &self.risk
    }

    /// Every execution attempt so far, in order.
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    /// Run one tick through the full pipeline.
    ///
    /// Returns the trade record if an execution was attempted (failed
    /// attempts included). A malformed tick errors without touching
    /// indicator or portfolio state; the caller skips the cycle.
    pub fn cycle(&mut self, tick: &PriceTick) -> Result<Option<TradeRecord>, TraderError> {
        let snapshot = self.indicators.update(&tick.symbol, tick.price)?;
        self.last_price = Some(tick.price);

        let signal = decide(&snapshot, tick.price);
        let trade = match self.risk.evaluate(signal, tick.price) {
            Decision::Execute(trade) => trade,
            Decision::Liquidate(trade) => {
                warn!(
                    price = tick.price,
                    "max drawdown breached; liquidating and halting new entries"
                );
                trade
            }
            Decision::Skip(reason) => {
                debug!(signal = %signal, %reason, price = tick.price, "no trade");
                return Ok(None);
            }
        };

        let available = match trade.side {
            Side::Buy => self.risk.spendable_quote(),
            Side::Sell => self.risk.portfolio().base_balance,
        };
        let mut record = match self
            .executor
            .execute(&trade, tick.price, available, tick.timestamp)
        {
            Ok(record) => record,
            Err(err) => {
                error!(error = %err, side = ?trade.side, "trade aborted; portfolio unchanged");
                let mut failed =
                    execution::failed_record(&trade, tick.price, self.executor.mode(), tick.timestamp);
                failed.resulting_equity = self.risk.portfolio().equity(tick.price);
                self.records.push(failed.clone());
                return Ok(Some(failed));
            }
        };

        self.risk.apply_fill(&mut record);
        info!(
            signal = %record.signal,
            requested = record.requested_quantity,
            filled = record.filled_quantity,
            price = record.price,
            equity = record.resulting_equity,
            "executed trade"
        );
        self.records.push(record.clone());
        Ok(Some(record))
    }

    /// Pull ticks from the feed at a fixed interval until the stop flag
    /// is raised or `max_cycles` is reached.
    ///
    /// Stops only between cycles, never mid-pipeline, so portfolio
    /// state is always consistent at exit. Feed failures and malformed
    /// ticks skip the cycle without ending the session.
    pub fn run_live(
        &mut self,
        feed: &mut dyn FeedPort,
        interval: Duration,
        max_cycles: Option<u64>,
        stop: &AtomicBool,
    ) -> SessionReport {
        let mut cycles = 0u64;
        loop {
            if stop.load(Ordering::SeqCst) {
                info!("stop requested; ending session");
                break;
            }
            if max_cycles.is_some_and(|max| cycles >= max) {
                break;
            }

            match feed.next_tick(&self.symbol) {
                Ok(tick) => {
                    if let Err(err) = self.cycle(&tick) {
                        warn!(error = %err, "skipping malformed tick");
                    }
                }
                Err(err) => warn!(error = %err, "feed unavailable; skipping cycle"),
            }
            cycles += 1;

            thread::sleep(interval);
        }

        let report = self.report(cycles);
        info!(
            cycles = report.cycles,
            trades = report.trades,
            failed_trades = report.failed_trades,
            realized_pnl = report.realized_pnl,
            final_equity = report.final_equity,
            halted = report.halted,
            "session complete"
        );
        report
    }

    /// Summarize the session as it stands.
    pub fn report(&self, cycles: u64) -> SessionReport {
        let final_equity = match self.last_price {
            Some(price) => self.risk.portfolio().equity(price),
            None => self.risk.portfolio().quote_balance,
        };
        SessionReport {
            cycles,
            trades: self
                .records
                .iter()
                .filter(|r| r.status == TradeStatus::Filled && r.filled_quantity > 0.0)
                .count(),
            failed_trades: self
                .records
                .iter()
                .filter(|r| r.status == TradeStatus::Failed)
                .count(),
            realized_pnl: self.risk.portfolio().realized_pnl,
            starting_capital: self.starting_capital,
            final_equity,
            halted: self.risk.is_halted(),
        }
    }
}
