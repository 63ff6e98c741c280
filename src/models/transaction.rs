//! # models::transaction
//!
//! The single persisted entity.  A row is created on form submission, read on
//! every view, deleted by id, and never updated in place.

use serde::{Deserialize, Serialize};

// ─── Transaction ──────────────────────────────────────────────────────────────

/// One recorded buy: the user held `amount` of `symbol` bought at unit
/// `price`.
///
/// `amount` and `price` are intentionally unvalidated — zero or negative
/// values are stored as-is and flow into the value/PnL arithmetic unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Transaction {
    /// Surrogate key assigned by SQLite.
    pub id: i64,

    /// Short ticker string, e.g. `"BTC"`.  Uppercased on insert.
    pub symbol: String,

    /// Quantity held.
    pub amount: f64,

    /// Purchase unit price.
    pub price: f64,
}

// ─── TransactionForm ──────────────────────────────────────────────────────────

/// The urlencoded body of `POST /add_transaction`.
///
/// Numeric parsing happens in the extractor — malformed input is rejected
/// before the handler runs.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    pub symbol: String,
    pub amount: f64,
    pub price:  f64,
}

impl TransactionForm {
    /// Canonical ticker form: trimmed and uppercased, the way the quote API
    /// expects it.
    pub fn normalized_symbol(&self) -> String {
        self.symbol.trim().to_uppercase()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
