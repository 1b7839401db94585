//! Bot configuration assembled from a config port.

use crate::ports::config_port::ConfigPort;

use super::error::TraderError;
use super::indicator::IndicatorConfig;

/// Mock feed shape for paper-trading sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    pub base_price: f64,
    pub volatility: f64,
    /// Seed for reproducible runs; entropy-seeded when absent.
    pub seed: Option<u64>,
}

/// Runtime configuration for one trading session.
#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    pub symbol: String,
    pub interval_secs: u64,
    pub slippage_bps: u32,
    pub fee_pct: f64,
    pub trading_capital: f64,
    pub max_position_size_pct: f64,
    pub reserve_balance: f64,
    pub max_drawdown_pct: f64,
    pub simulation: bool,
    pub simulation_initial_balance: f64,
    pub indicators: IndicatorConfig,
    pub feed: FeedConfig,
}

impl BotConfig {
    /// Quote balance the session's portfolio starts with.
    pub fn starting_quote(&self) -> f64 {
        if self.simulation {
            self.simulation_initial_balance
        } else {
            self.trading_capital
        }
    }

    /// Build and validate a configuration.
    ///
    /// `[risk] trading_capital` is required; everything else falls back
    /// to the defaults below. Invalid values are fatal at startup, not
    /// mid-run.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TraderError> {
        if config.get_string("risk", "trading_capital").is_none() {
            return Err(TraderError::ConfigMissing {
                section: "risk".into(),
                key: "trading_capital".into(),
            });
        }
        let trading_capital = config.get_double("risk", "trading_capital", 0.0);
        validate_positive("risk", "trading_capital", trading_capital)?;

        let max_position_size_pct = config.get_double("risk", "max_position_size_pct", 80.0);
        validate_pct("risk", "max_position_size_pct", max_position_size_pct)?;

        let reserve_balance = config.get_double("risk", "reserve_balance", 0.02);
        if !reserve_balance.is_finite() || reserve_balance < 0.0 {
            return Err(TraderError::ConfigInvalid {
                section: "risk".into(),
                key: "reserve_balance".into(),
                reason: "must be zero or positive".into(),
            });
        }

        let max_drawdown_pct = config.get_double("risk", "max_drawdown_pct", 20.0);
        validate_pct("risk", "max_drawdown_pct", max_drawdown_pct)?;

        let interval_secs = config.get_int("trading", "interval_secs", 60);
        if interval_secs < 1 {
            return Err(TraderError::ConfigInvalid {
                section: "trading".into(),
                key: "interval_secs".into(),
                reason: "must be at least 1".into(),
            });
        }

        let slippage_bps = config.get_int("trading", "slippage_bps", 50);
        if !(0..=10_000).contains(&slippage_bps) {
            return Err(TraderError::ConfigInvalid {
                section: "trading".into(),
                key: "slippage_bps".into(),
                reason: "must be between 0 and 10000".into(),
            });
        }

        let fee_pct = config.get_double("trading", "fee_pct", 0.25);
        if !fee_pct.is_finite() || !(0.0..100.0).contains(&fee_pct) {
            return Err(TraderError::ConfigInvalid {
                section: "trading".into(),
                key: "fee_pct".into(),
                reason: "must be in [0, 100)".into(),
            });
        }

        let simulation = config.get_bool("simulation", "enabled", true);
        let simulation_initial_balance =
            config.get_double("simulation", "initial_balance", 1.0);
        if simulation {
            validate_positive("simulation", "initial_balance", simulation_initial_balance)?;
        }

        let indicators = build_indicator_config(config)?;
        let feed = build_feed_config(config)?;

        Ok(BotConfig {
            symbol: config
                .get_string("trading", "symbol")
                .unwrap_or_else(|| "SOL/USDC".to_string()),
            interval_secs: interval_secs as u64,
            slippage_bps: slippage_bps as u32,
            fee_pct,
            trading_capital,
            max_position_size_pct,
            reserve_balance,
            max_drawdown_pct,
            simulation,
            simulation_initial_balance,
            indicators,
            feed,
        })
    }
}

fn build_indicator_config(config: &dyn ConfigPort) -> Result<IndicatorConfig, TraderError> {
    let defaults = IndicatorConfig::default();
    let ema_fast_period = get_period(config, "ema_fast_period", defaults.ema_fast_period)?;
    let ema_slow_period = get_period(config, "ema_slow_period", defaults.ema_slow_period)?;
    if ema_fast_period >= ema_slow_period {
        return Err(TraderError::ConfigInvalid {
            section: "indicators".into(),
            key: "ema_fast_period".into(),
            reason: "fast period must be shorter than the slow period".into(),
        });
    }
    let rsi_period = get_period(config, "rsi_period", defaults.rsi_period)?;
    let bollinger_period = get_period(config, "bollinger_period", defaults.bollinger_period)?;

    let bollinger_width = config.get_double("indicators", "bollinger_width", defaults.bollinger_width);
    if !bollinger_width.is_finite() || bollinger_width <= 0.0 {
        return Err(TraderError::ConfigInvalid {
            section: "indicators".into(),
            key: "bollinger_width".into(),
            reason: "must be positive".into(),
        });
    }

    Ok(IndicatorConfig {
        ema_fast_period,
        ema_slow_period,
        rsi_period,
        bollinger_period,
        bollinger_width,
    })
}

fn build_feed_config(config: &dyn ConfigPort) -> Result<FeedConfig, TraderError> {
    let base_price = config.get_double("feed", "base_price", 200.0);
    validate_positive("feed", "base_price", base_price)?;

    let volatility = config.get_double("feed", "volatility", 0.02);
    if !volatility.is_finite() || !(0.0..1.0).contains(&volatility) {
        return Err(TraderError::ConfigInvalid {
            section: "feed".into(),
            key: "volatility".into(),
            reason: "must be in [0, 1)".into(),
        });
    }

    let seed = match config.get_string("feed", "seed") {
        None => None,
        Some(raw) => Some(raw.parse::<u64>().map_err(|_| TraderError::ConfigInvalid {
            section: "feed".into(),
            key: "seed".into(),
            reason: "must be an unsigned integer".into(),
        })?),
    };

    Ok(FeedConfig {
        base_price,
        volatility,
        seed,
    })
}

fn get_period(config: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, TraderError> {
    let value = config.get_int("indicators", key, default as i64);
    if value < 1 {
        return Err(TraderError::ConfigInvalid {
            section: "indicators".into(),
            key: key.into(),
            reason: "must be at least 1".into(),
        });
    }
    Ok(value as usize)
}

fn validate_positive(section: &str, key: &str, value: f64) -> Result<(), TraderError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(TraderError::ConfigInvalid {
            section: section.into(),
            key: key.into(),
            reason: "must be a positive number".into(),
        });
    }
    Ok(())
}

fn validate_pct(section: &str, key: &str, value: f64) -> Result<(), TraderError> {
    if !value.is_finite() || value <= 0.0 || value > 100.0 {
        return Err(TraderError::ConfigInvalid {
            section: section.into(),
            key: key.into(),
            reason: "must be in (0, 100]".into(),
        });
    }
    Ok(())
}
