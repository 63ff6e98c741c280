//! # routes::portfolio
//!
//! Handlers for the **portfolio page** — list, add, delete, health.
//!
//! ## Endpoints
//!
//! | Method | Path                       | Description                              |
//! |--------|----------------------------|------------------------------------------|
//! | GET    | `/`                        | Holdings table with live prices (HTML)   |
//! | POST   | `/add_transaction`         | Record a buy (urlencoded form)           |
//! | POST   | `/delete_transaction/{id}` | Remove a transaction, 404 if absent      |
//! | GET    | `/health`                  | Liveness + row/lookup counters (JSON)    |

use std::sync::atomic::Ordering;

use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
    Form, Json,
};
use serde_json::json;
use tracing::info;

use crate::{
    db,
    error::AppError,
    models::{Holding, TransactionForm},
    state::SharedState,
};

// ─── GET / ────────────────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    holdings:    Vec<Holding>,
    total_value: f64,
    total_cost:  f64,
    total_pnl:   f64,
}

/// The portfolio page.
///
/// Loads every transaction, then performs **one quote lookup per
/// transaction, sequentially** — page latency grows with the row count, and
/// a dead quote API simply renders every live price as 0.00.
pub async fn index(
    State(state): State<SharedState>,
) -> Result<IndexTemplate, AppError> {
    let transactions = db::list_transactions(&state.db).await?;
    let live_prices = state.live_prices(&transactions).await;

    let holdings: Vec<Holding> = transactions
        .iter()
        .map(|tx| Holding::priced(tx, live_prices.get(&tx.symbol).copied().unwrap_or(0.0)))
        .collect();

    let total_value = holdings.iter().map(Holding::market_value).sum();
    let total_cost  = holdings.iter().map(Holding::cost_basis).sum();
    let total_pnl   = holdings.iter().map(Holding::profit_loss).sum();

    Ok(IndexTemplate { holdings, total_value, total_cost, total_pnl })
}

// ─── POST /add_transaction ────────────────────────────────────────────────────

/// Record a new buy and bounce back to the portfolio page.
///
/// Malformed numeric input never reaches this handler — the `Form` extractor
/// rejects it with a generic 4xx.
pub async fn add_transaction(
    State(state): State<SharedState>,
    Form(form): Form<TransactionForm>,
) -> Result<Redirect, AppError> {
    let symbol = form.normalized_symbol();
    let id = db::insert_transaction(&state.db, &symbol, form.amount, form.price).await?;

    info!(id, symbol, amount = form.amount, price = form.price, "📒 Transaction recorded");

    Ok(Redirect::to("/"))
}

// ─── POST /delete_transaction/{id} ────────────────────────────────────────────

/// Remove a transaction by id.  Unknown ids get the standard 404 body.
pub async fn delete_transaction(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    if !db::delete_transaction(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Transaction {id} does not exist")));
    }

    info!(id, "🗑️ Transaction deleted");

    Ok(Redirect::to("/"))
}

// ─── GET /health ──────────────────────────────────────────────────────────────

/// Liveness check: row count, quote-lookup counter and uptime.
pub async fn health_check(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let transactions = db::count_transactions(&state.db).await?;
    let quote_lookups = state.quote_count.load(Ordering::Relaxed);
    let uptime_secs = (chrono::Utc::now() - state.started_at).num_seconds();

    Ok(Json(json!({
        "ok":            true,
        "transactions":  transactions,
        "quote_lookups": quote_lookups,
        "uptime_secs":   uptime_secs,
    })))
}
