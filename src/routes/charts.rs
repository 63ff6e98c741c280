//! # routes::charts
//!
//! Handlers for the two generated chart images.
//!
//! ## Endpoints
//!
//! | Method | Path            | Description                             |
//! |--------|-----------------|-----------------------------------------|
//! | GET    | `/chart`        | Allocation pie, one slice per row (PNG) |
//! | GET    | `/profit_chart` | Profit/loss bars, one per row (PNG)     |

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};

use crate::{charts, db, error::AppError, state::SharedState};

// ─── GET /chart ───────────────────────────────────────────────────────────────

/// Portfolio distribution pie.  Amounts go in untouched — duplicate symbols
/// produce duplicate slices.
pub async fn allocation_chart(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let transactions = db::list_transactions(&state.db).await?;

    let slices: Vec<(String, f64)> = transactions
        .iter()
        .map(|tx| (tx.symbol.clone(), tx.amount))
        .collect();

    let png = charts::allocation_pie(&slices)?;
    Ok(png_response(png))
}

// ─── GET /profit_chart ────────────────────────────────────────────────────────

/// Profit/loss per transaction at the current live price.
///
/// Runs the same one-lookup-per-transaction loop as the portfolio page; a
/// failed lookup prices the bar against 0.0 like everywhere else.
pub async fn profit_chart(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let transactions = db::list_transactions(&state.db).await?;
    let live_prices = state.live_prices(&transactions).await;

    let entries: Vec<(String, f64)> = transactions
        .iter()
        .map(|tx| {
            let live = live_prices.get(&tx.symbol).copied().unwrap_or(0.0);
            (tx.symbol.clone(), tx.amount * (live - tx.price))
        })
        .collect();

    let png = charts::profit_loss_bars(&entries)?;
    Ok(png_response(png))
}

// ─── Shared ───────────────────────────────────────────────────────────────────

fn png_response(bytes: Vec<u8>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/png")], bytes)
}
