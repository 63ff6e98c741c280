//! # state
//!
//! Shared application state injected into every Axum handler.
//!
//! There is deliberately little here: the only persistent state in the whole
//! system is the `transactions` table behind the sqlx pool.  The quote client
//! wraps a single `reqwest::Client` built once at startup (thread-safe,
//! connection pooling) so handlers never construct their own.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::Transaction;
use crate::quotes::QuoteClient;

// ─── AppState ─────────────────────────────────────────────────────────────────

/// Top-level shared state injected into every Axum handler.
///
/// Clone this via `Arc::clone` — the `Arc` wrapper makes that O(1).
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool — the single source of truth.
    pub db: SqlitePool,

    /// Shared quote API client.
    pub quotes: QuoteClient,

    /// Server start time, reported by the health endpoint.
    pub started_at: DateTime<Utc>,

    /// Counter of upstream quote lookups performed this session.
    /// Useful for spotting pages that fan out into many network calls.
    pub quote_count: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(db: SqlitePool, quotes: QuoteClient) -> Self {
        Self {
            db,
            quotes,
            started_at:  Utc::now(),
            quote_count: Arc::new(AtomicU64::new(0)),
        }
    }

    // ── Helper Methods ────────────────────────────────────────────────────────

    /// Fetch live prices for a transaction list, one lookup per transaction,
    /// sequentially.  Duplicate symbols are fetched again and the last result
    /// wins.  Failed lookups have already been mapped to `0.0` by the client.
    pub async fn live_prices(&self, transactions: &[Transaction]) -> HashMap<String, f64> {
        let mut prices = HashMap::new();
        for tx in transactions {
            let price = self.quotes.live_price(&tx.symbol).await;
            self.quote_count.fetch_add(1, Ordering::Relaxed);
            prices.insert(tx.symbol.clone(), price);
        }
        prices
    }
}

/// Convenience type alias so callers can write `SharedState` instead of the
/// full generic form.
pub type SharedState = Arc<AppState>;

/// Construct the shared application state and wrap it in an `Arc` ready for
/// injection into the Axum router.
pub fn build_state(db: SqlitePool, quotes: QuoteClient) -> SharedState {
    Arc::new(AppState::new(db, quotes))
}
