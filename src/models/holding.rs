//! # models::holding
//!
//! A [`Transaction`] joined with its live quote — the row the portfolio page
//! actually renders.  Keeping the arithmetic here (instead of in the
//! template) makes it unit-testable.

use serde::Serialize;

use crate::models::Transaction;

/// One table row on the portfolio page.
#[derive(Debug, Clone, Serialize)]
pub struct Holding {
    pub id:             i64,
    pub symbol:         String,
    pub amount:         f64,
    pub purchase_price: f64,
    /// Live quote for `symbol`; `0.0` when the lookup failed.
    pub live_price:     f64,
}

impl Holding {
    pub fn priced(tx: &Transaction, live_price: f64) -> Self {
        Self {
            id:             tx.id,
            symbol:         tx.symbol.clone(),
            amount:         tx.amount,
            purchase_price: tx.price,
            live_price,
        }
    }

    /// Current worth of this holding at the live quote.
    pub fn market_value(&self) -> f64 {
        self.amount * self.live_price
    }

    /// What was paid for this holding.
    pub fn cost_basis(&self) -> f64 {
        self.amount * self.purchase_price
    }

    /// `amount × (live − purchase)` — negative when under water, and always
    /// `-cost_basis` when the quote lookup fell back to `0.0`.
    pub fn profit_loss(&self) -> f64 {
        self.amount * (self.live_price - self.purchase_price)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(symbol: &str, amount: f64, price: f64) -> Transaction {
        Transaction { id: 1, symbol: symbol.to_string(), amount, price }
    }

    #[test]
    fn market_value_and_cost_basis() {
        let h = Holding::priced(&tx("BTC", 0.5, 60000.0), 64000.0);
        assert_eq!(h.market_value(), 32000.0);
        assert_eq!(h.cost_basis(), 30000.0);
    }

    #[test]
    fn profit_when_price_rose() {
        let h = Holding::priced(&tx("ETH", 2.0, 3000.0), 3500.0);
        assert_eq!(h.profit_loss(), 1000.0);
    }

    #[test]
    fn loss_when_price_fell() {
        let h = Holding::priced(&tx("ETH", 2.0, 3000.0), 2500.0);
        assert_eq!(h.profit_loss(), -1000.0);
    }

    #[test]
    fn zero_live_price_writes_off_the_position() {
        // Failed quote lookup → live price 0.0 → PnL is the full cost basis.
        let h = Holding::priced(&tx("BTC", 0.5, 60000.0), 0.0);
        assert_eq!(h.market_value(), 0.0);
        assert_eq!(h.profit_loss(), -30000.0);
    }

    #[test]
    fn negative_amount_flows_through_unvalidated() {
        let h = Holding::priced(&tx("DOGE", -10.0, 0.1), 0.2);
        assert_eq!(h.market_value(), -2.0);
        assert!((h.profit_loss() - -1.0).abs() < 1e-12);
    }
}
