//! # Coinfolio — Single-User Crypto Portfolio Tracker
//!
//! ## Architecture Overview
//!
//! ```text
//!  ┌──────────────┐   GET  /                      ┌──────────────────────┐
//!  │   Browser    │ ─────────────────────────────▶│  load transactions   │
//!  │              │   POST /add_transaction       │        │             │
//!  │              │   POST /delete_transaction/:id│  one quote lookup    │──▶ Binance REST
//!  └──────────────┘                               │  per transaction     │    (0.0 on failure)
//!         │                                       │        │             │
//!         │         GET /chart (PNG)              │  HTML table + totals │
//!         └────────▶ GET /profit_chart (PNG)      └──────────┬───────────┘
//!                                                            │
//!                                                   SQLite (sqlx pool)
//!                                                   transactions table
//! ```
//!
//! The whole system is CRUD over a single table plus two presentation
//! renderers.  Each page view blocks on sequential quote lookups proportional
//! to the transaction count — there is deliberately no caching or batching.

pub mod charts;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod quotes;
pub mod routes;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use routes::{
    charts::{allocation_chart, profit_chart},
    portfolio::{add_transaction, delete_transaction, health_check, index},
};
use state::SharedState;

/// Assemble the full application router.
///
/// Kept out of `main` so integration tests can drive the exact same router
/// with an in-memory database via `tower::ServiceExt::oneshot`.
pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ── Portfolio ────────────────────────────────────────────────────────
        .route("/",                        get(index))
        .route("/add_transaction",         post(add_transaction))
        .route("/delete_transaction/:id",  post(delete_transaction))
        // ── Charts ───────────────────────────────────────────────────────────
        .route("/chart",                   get(allocation_chart))
        .route("/profit_chart",            get(profit_chart))
        // ── Health ───────────────────────────────────────────────────────────
        .route("/health",                  get(health_check))
        // ── Middleware ───────────────────────────────────────────────────────
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
