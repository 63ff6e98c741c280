//! # Coinfolio server binary
//!
//! ## Environment Variables
//!
//! | Variable             | Default                   | Description                       |
//! |----------------------|---------------------------|-----------------------------------|
//! | `BIND_ADDR`          | `0.0.0.0:3000`            | Address Axum listens on           |
//! | `DATABASE_URL`       | `sqlite://portfolio.db`   | SQLite database location          |
//! | `QUOTE_BASE_URL`     | `https://api.binance.com` | Quote API base URL                |
//! | `QUOTE_TIMEOUT_SECS` | `5`                       | Per-request quote client timeout  |
//! | `RUST_LOG`           | `coinfolio=debug`         | Tracing filter                    |

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use coinfolio::{
    build_router,
    config::Config,
    db,
    quotes::QuoteClient,
    state::build_state,
};

// ─── Entry Point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env (optional — CI/prod can use real env vars) ──────────────
    dotenvy::dotenv().ok();

    // ── 2. Initialise structured logging ─────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env()
            .add_directive("coinfolio=debug".parse()?)
            .add_directive("tower_http=info".parse()?))
        .init();

    info!(
        r#"

  ╔═══════════════════════════════════════════════╗
  ║         COINFOLIO — Portfolio Tracker         ║
  ║       Rust + Axum  ·  SQLite  ·  Charts       ║
  ╚═══════════════════════════════════════════════╝"#
    );

    // ── 3. Load configuration ────────────────────────────────────────────────
    let config = Config::from_env()?;

    // ── 4. Connect to SQLite & run migrations ────────────────────────────────
    let pool = db::init_pool(&config.database_url).await?;

    // ── 5. Build the shared quote client & application state ─────────────────
    let quotes = QuoteClient::new(&config.quote_base_url, config.quote_timeout)?;
    let state = build_state(pool, quotes);

    // ── 6. Build the Axum router ─────────────────────────────────────────────
    let app = build_router(state);

    // ── 7. Bind & serve ──────────────────────────────────────────────────────
    let addr: SocketAddr = config.bind_addr.parse()?;

    info!(?addr, "🚀 Coinfolio server starting");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
