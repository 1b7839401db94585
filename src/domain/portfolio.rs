//! Portfolio balances and equity tracking.

/// Session-scoped balances in base and quote units. One instance per
/// trading session, seeded from the configured starting capital.
///
/// `peak_equity` is refreshed every cycle before the drawdown check.
/// Balances never go negative: sizing and fill capping keep every buy
/// within the spendable quote and every sell within the base held.
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub base_balance: f64,
    pub quote_balance: f64,
    pub peak_equity: f64,
    pub realized_pnl: f64,
}

impl Portfolio {
    pub fn new(starting_quote: f64) -> Self {
        Portfolio {
            base_balance: 0.0,
            quote_balance: starting_quote,
            peak_equity: starting_quote,
            realized_pnl: 0.0,
        }
    }

    /// Quote balance plus the base holding valued at `price`.
    pub fn equity(&self, price: f64) -> f64 {
        self.quote_balance + self.base_balance * price
    }

    /// Refresh the peak and return current equity.
    pub fn update_peak(&mut self, price: f64) -> f64 {
        let equity = self.equity(price);
        if equity > self.peak_equity {
            self.peak_equity = equity;
        }
        equity
    }

    /// Percentage decline of current equity from the session peak.
    pub fn drawdown_pct(&self, price: f64) -> f64 {
        if self.peak_equity <= 0.0 {
            return 0.0;
        }
        ((self.peak_equity - self.equity(price)) / self.peak_equity * 100.0).max(0.0)
    }

    pub fn apply_buy(&mut self, quantity: f64, price: f64, fee: f64) {
        self.base_balance += quantity;
        self.quote_balance -= quantity * price + fee;
    }

    pub fn apply_sell(&mut self, quantity: f64, price: f64, fee: f64) {
        self.base_balance -= quantity;
        self.quote_balance += quantity * price - fee;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_portfolio() {
        let portfolio = Portfolio::new(1000.0);
        assert!((portfolio.base_balance - 0.0).abs() < f64::EPSILON);
        assert!((portfolio.quote_balance - 1000.0).abs() < f64::EPSILON);
        assert!((portfolio.peak_equity - 1000.0).abs() < f64::EPSILON);
        assert!((portfolio.realized_pnl - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn equity_includes_base_holding() {
        let mut portfolio = Portfolio::new(1000.0);
        portfolio.apply_buy(2.0, 100.0, 0.0);
        assert!((portfolio.equity(110.0) - 1020.0).abs() < f64::EPSILON);
    }

    #[test]
    fn peak_ratchets_up_only() {
        let mut portfolio = Portfolio::new(1000.0);
        portfolio.apply_buy(2.0, 100.0, 0.0);

        portfolio.update_peak(150.0);
        assert!((portfolio.peak_equity - 1100.0).abs() < f64::EPSILON);

        portfolio.update_peak(100.0);
        assert!((portfolio.peak_equity - 1100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn drawdown_from_peak() {
        let mut portfolio = Portfolio::new(1000.0);
        portfolio.apply_buy(10.0, 100.0, 0.0);

        portfolio.update_peak(100.0);
        // price falls to 80: equity 800 against peak 1000
        assert!((portfolio.drawdown_pct(80.0) - 20.0).abs() < 1e-10);
    }

    #[test]
    fn drawdown_never_negative() {
        let mut portfolio = Portfolio::new(1000.0);
        portfolio.apply_buy(10.0, 100.0, 0.0);
        portfolio.update_peak(100.0);
        assert!((portfolio.drawdown_pct(120.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn buy_moves_quote_to_base() {
        let mut portfolio = Portfolio::new(1000.0);
        portfolio.apply_buy(2.0, 100.0, 1.0);
        assert!((portfolio.base_balance - 2.0).abs() < f64::EPSILON);
        assert!((portfolio.quote_balance - 799.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sell_moves_base_to_quote() {
        let mut portfolio = Portfolio::new(1000.0);
        portfolio.apply_buy(2.0, 100.0, 0.0);
        portfolio.apply_sell(2.0, 110.0, 1.0);
        assert!((portfolio.base_balance - 0.0).abs() < f64::EPSILON);
        assert!((portfolio.quote_balance - 1019.0).abs() < f64::EPSILON);
    }
}
