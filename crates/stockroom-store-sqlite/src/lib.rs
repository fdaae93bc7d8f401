//! SQLite backend for the stockroom asset tracker.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Because every closure
//! handed to the connection runs to completion before the next one
//! starts, the guarded issue/return commit is atomic with respect to
//! all other operations.

mod encode;
mod schema;
mod store;

pub use store::SqliteStore;

#[cfg(test)]
mod tests;
