//! CLI definition and dispatch.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::adapters::csv_feed_adapter::load_price_series;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::mock_feed_adapter::MockFeedAdapter;
use crate::domain::backtest::run_backtest;
use crate::domain::config::BotConfig;
use crate::domain::error::TraderError;
use crate::domain::execution::{ExecutionConfig, Executor};
use crate::domain::session::TradingSession;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "soltrader", about = "Rule-based single-pair trading bot")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the trading loop against the configured feed
    Trade {
        #[arg(short, long)]
        config: PathBuf,
        /// Stop after this many cycles (default: run until stopped)
        #[arg(long)]
        cycles: Option<u64>,
    },
    /// Replay a historical price CSV through the pipeline
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// CSV file with timestamp,price rows
        #[arg(long)]
        csv: PathBuf,
        /// Write the trade log to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse and validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Trade { config, cycles } => run_trade(&config, cycles),
        Command::Backtest {
            config,
            csv,
            output,
        } => run_backtest_cmd(&config, &csv, output.as_deref()),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_bot_config(path: &Path) -> Result<BotConfig, TraderError> {
    let adapter = FileConfigAdapter::from_file(path).map_err(|e| TraderError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    BotConfig::from_config(&adapter)
}

fn load_or_exit(path: &Path) -> Result<BotConfig, ExitCode> {
    load_bot_config(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn run_trade(config_path: &Path, cycles: Option<u64>) -> ExitCode {
    let config = match load_or_exit(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    // Signing/submission is out of scope, so no swap collaborator ships
    // with the binary; a live session has nothing to execute against.
    if !config.simulation {
        let err = TraderError::ConfigInvalid {
            section: "simulation".into(),
            key: "enabled".into(),
            reason: "live execution requires a wired swap collaborator; enable simulation".into(),
        };
        eprintln!("error: {err}");
        return ExitCode::from(&err);
    }

    let mut feed = match config.feed.seed {
        Some(seed) => {
            MockFeedAdapter::with_seed(config.feed.base_price, config.feed.volatility, seed)
        }
        None => MockFeedAdapter::new(config.feed.base_price, config.feed.volatility),
    };
    let executor = Executor::simulated(ExecutionConfig {
        slippage_bps: config.slippage_bps,
        fee_pct: config.fee_pct,
    });
    let mut session = TradingSession::new(&config, executor);

    info!(
        symbol = %config.symbol,
        interval_secs = config.interval_secs,
        "starting paper-trading session"
    );
    let stop = AtomicBool::new(false);
    let report = session.run_live(
        &mut feed,
        Duration::from_secs(config.interval_secs),
        cycles,
        &stop,
    );

    println!(
        "cycles={} trades={} failed={} realized_pnl={:.6} final_equity={:.6}{}",
        report.cycles,
        report.trades,
        report.failed_trades,
        report.realized_pnl,
        report.final_equity,
        if report.halted { " (drawdown halt)" } else { "" },
    );
    ExitCode::SUCCESS
}

fn run_backtest_cmd(config_path: &Path, csv_path: &Path, output: Option<&Path>) -> ExitCode {
    let config = match load_or_exit(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let ticks = match load_price_series(csv_path, &config.symbol) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };
    info!(ticks = ticks.len(), csv = %csv_path.display(), "loaded price series");

    let result = run_backtest(&ticks, &config);
    println!(
        "total_return_pct={:.4} trades={} max_drawdown_pct={:.4}",
        result.total_return_pct, result.num_trades, result.max_drawdown_pct,
    );

    if let Some(output_path) = output {
        let path = output_path.display().to_string();
        if let Err(e) = CsvReportAdapter.write(&result, &path) {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
        info!(output = %path, "trade log written");
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &Path) -> ExitCode {
    match load_or_exit(config_path) {
        Ok(config) => {
            println!(
                "config OK: symbol={} simulation={} trading_capital={}",
                config.symbol, config.simulation, config.trading_capital,
            );
            ExitCode::SUCCESS
        }
        Err(code) => code,
    }
}
