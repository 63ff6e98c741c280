//! # db — SQLite persistence layer
//!
//! One table, `transactions`, accessed through an async `sqlx` pool.
//! The schema migration is embedded at compile time and applied on startup,
//! so a fresh deployment only needs a writable directory.

use std::str::FromStr;

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tracing::info;

use crate::models::Transaction;

// ─── Pool Init ────────────────────────────────────────────────────────────────

/// Open (creating if missing) the SQLite database and apply migrations.
pub async fn init_pool(database_url: &str) -> anyhow::Result<SqlitePool> {
    info!(database_url, "Opening SQLite database...");

    let options = SqliteConnectOptions::from_str(database_url)
        .context("DATABASE_URL is not a valid SQLite URL")?
        .create_if_missing(true);

    // Each `:memory:` connection is its own database; more than one
    // connection would shard the store across invisible copies.
    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_with(options)
        .await
        .context("Failed to open SQLite database")?;

    run_migrations(&pool).await?;

    info!("✅ SQLite ready, migrations applied");
    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    // Embedded migration SQL
    sqlx::query(include_str!("../migrations/001_init.sql"))
        .execute(pool)
        .await
        .context("Failed to run migration 001_init.sql")?;

    Ok(())
}

// ─── Transactions ─────────────────────────────────────────────────────────────

/// All recorded transactions, oldest first.
pub async fn list_transactions(pool: &SqlitePool) -> anyhow::Result<Vec<Transaction>> {
    sqlx::query_as::<_, Transaction>(
        "SELECT id, symbol, amount, price FROM transactions ORDER BY id",
    )
    .fetch_all(pool)
    .await
    .context("list_transactions failed")
}

/// Insert a new transaction and return its surrogate id.
pub async fn insert_transaction(
    pool:   &SqlitePool,
    symbol: &str,
    amount: f64,
    price:  f64,
) -> anyhow::Result<i64> {
    let result = sqlx::query(
        "INSERT INTO transactions (symbol, amount, price) VALUES (?, ?, ?)",
    )
    .bind(symbol)
    .bind(amount)
    .bind(price)
    .execute(pool)
    .await
    .context("insert_transaction failed")?;

    Ok(result.last_insert_rowid())
}

/// Delete a transaction by id.  Returns `false` when no such row existed.
pub async fn delete_transaction(pool: &SqlitePool, id: i64) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM transactions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("delete_transaction failed")?;

    Ok(result.rows_affected() > 0)
}

/// Number of recorded transactions (health endpoint).
pub async fn count_transactions(pool: &SqlitePool) -> anyhow::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM transactions")
        .fetch_one(pool)
        .await
        .context("count_transactions failed")
}

// ─── Tests ────────────────────────────────────────────────────────────────────
