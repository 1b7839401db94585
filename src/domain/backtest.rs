//! Deterministic backtest over a historical price series.

use tracing::warn;

use super::config::BotConfig;
use super::execution::{ExecutionConfig, Executor};
use super::metrics;
use super::session::TradingSession;
use super::tick::PriceTick;
use super::trade::{TradeRecord, TradeStatus};

/// Outcome of one backtest run, read-only once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub total_return_pct: f64,
    pub num_trades: usize,
    pub max_drawdown_pct: f64,
    pub trade_log: Vec<TradeRecord>,
}

/// Replay `ticks` through the full pipeline with simulated execution
/// forced.
///
/// Malformed ticks are skipped with prior indicator state kept, the
/// same policy as the live loop. Identical series and configuration
/// always produce an identical result.
pub fn run_backtest(ticks: &[PriceTick], config: &BotConfig) -> BacktestResult {
    let executor = Executor::simulated(ExecutionConfig {
        slippage_bps: config.slippage_bps,
        fee_pct: config.fee_pct,
    });
    let mut session = TradingSession::new(config, executor);

    let starting_equity = config.starting_quote();
    let mut equity_trace = Vec::with_capacity(ticks.len());
    let mut last_price = None;

    for tick in ticks {
        if let Err(err) = session.cycle(tick) {
            warn!(error = %err, "skipping tick");
            continue;
        }
        last_price = Some(tick.price);
        equity_trace.push(session.risk().portfolio().equity(tick.price));
    }

    let final_equity = match last_price {
        Some(price) => session.risk().portfolio().equity(price),
        None => starting_equity,
    };

    BacktestResult {
        total_return_pct: metrics::total_return_pct(starting_equity, final_equity),
        num_trades: session
            .records()
            .iter()
            .filter(|r| r.status == TradeStatus::Filled && r.filled_quantity > 0.0)
            .count(),
        max_drawdown_pct: metrics::max_drawdown_pct(&equity_trace),
        trade_log: session.records().to_vec(),
    }
}
