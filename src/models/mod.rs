//! Domain models shared across the Coinfolio system.

pub mod holding;
pub mod transaction;

pub use holding::Holding;
pub use transaction::{Transaction, TransactionForm};
