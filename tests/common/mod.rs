#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use soltrader::domain::config::{BotConfig, FeedConfig};
use soltrader::domain::error::TraderError;
use soltrader::domain::indicator::IndicatorConfig;
use soltrader::domain::tick::PriceTick;
use soltrader::domain::trade::Side;
use soltrader::ports::feed_port::FeedPort;
use soltrader::ports::swap_port::{SwapPort, SwapQuote};

pub fn session_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

/// One tick per minute from the session start.
pub fn make_ticks(prices: &[f64]) -> Vec<PriceTick> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            PriceTick::new(
                "SOL/USDC",
                price,
                session_start() + Duration::minutes(i as i64),
            )
            .unwrap()
        })
        .collect()
}

/// Rising zigzag (+2, −1, +2, −1, …): trends up while keeping RSI off
/// the 100 pin at the dips.
pub fn zigzag_up(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| 100.0 + (i / 2) as f64 + if i % 2 == 1 { 2.0 } else { 0.0 })
        .collect()
}

/// Short indicator windows so scenarios warm up quickly.
pub fn quick_indicators() -> IndicatorConfig {
    IndicatorConfig {
        ema_fast_period: 2,
        ema_slow_period: 4,
        rsi_period: 3,
        bollinger_period: 3,
        bollinger_width: 2.0,
    }
}

pub fn test_config() -> BotConfig {
    BotConfig {
        symbol: "SOL/USDC".into(),
        interval_secs: 60,
        slippage_bps: 0,
        fee_pct: 0.0,
        trading_capital: 1000.0,
        max_position_size_pct: 100.0,
        reserve_balance: 0.0,
        max_drawdown_pct: 20.0,
        simulation: true,
        simulation_initial_balance: 1000.0,
        indicators: quick_indicators(),
        feed: FeedConfig {
            base_price: 100.0,
            volatility: 0.02,
            seed: Some(1),
        },
    }
}

/// Scripted feed: `Some(price)` serves a tick, `None` reports the feed
/// unavailable for that pull.
pub struct ScriptedFeed {
    steps: Vec<Option<f64>>,
    next: usize,
}

impl ScriptedFeed {
    pub fn new(steps: Vec<Option<f64>>) -> Self {
        ScriptedFeed { steps, next: 0 }
    }

    pub fn from_prices(prices: &[f64]) -> Self {
        Self::new(prices.iter().map(|&p| Some(p)).collect())
    }
}

impl FeedPort for ScriptedFeed {
    fn next_tick(&mut self, symbol: &str) -> Result<PriceTick, TraderError> {
        let step = self.steps.get(self.next).copied().flatten();
        let minute = self.next as i64;
        self.next += 1;
        match step {
            Some(price) => PriceTick::new(symbol, price, session_start() + Duration::minutes(minute)),
            None => Err(TraderError::FeedUnavailable {
                reason: "scripted outage".into(),
            }),
        }
    }
}

/// Swap collaborator double: quotes at a fixed price with a
/// configurable fill ratio, or fails every call.
pub struct MockSwapPort {
    pub fail: bool,
    pub quote_price: f64,
    pub fill_ratio: f64,
    pub fee: f64,
}

impl MockSwapPort {
    pub fn quoting(quote_price: f64) -> Self {
        MockSwapPort {
            fail: false,
            quote_price,
            fill_ratio: 1.0,
            fee: 0.0,
        }
    }

    pub fn failing() -> Self {
        MockSwapPort {
            fail: true,
            ..Self::quoting(0.0)
        }
    }

    pub fn with_fill_ratio(mut self, fill_ratio: f64) -> Self {
        self.fill_ratio = fill_ratio;
        self
    }

    pub fn with_fee(mut self, fee: f64) -> Self {
        self.fee = fee;
        self
    }
}

impl SwapPort for MockSwapPort {
    fn get_quote(
        &self,
        _side: Side,
        amount: f64,
        _slippage_bps: u32,
    ) -> Result<SwapQuote, TraderError> {
        if self.fail {
            return Err(TraderError::QuoteUnavailable {
                reason: "no route".into(),
            });
        }
        Ok(SwapQuote {
            filled_quantity: amount * self.fill_ratio,
            price: self.quote_price,
            fee: self.fee,
        })
    }
}
