//! JSON REST API for the stockroom asset tracker.
//!
//! Exposes an axum [`Router`] backed by any
//! [`stockroom_core::store::AssetStore`]. This layer holds no business
//! rules: it deserialises requests, delegates to the core services,
//! and maps the core error taxonomy to HTTP status codes. Auth, TLS,
//! and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", stockroom_api::api_router(store.clone()))
//! ```

pub mod assets;
pub mod employees;
pub mod error;
pub mod transactions;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use stockroom_core::store::AssetStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: AssetStore + 'static,
{
  Router::new()
    // Employees
    .route(
      "/employees",
      get(employees::get_one::<S>).post(employees::create::<S>),
    )
    .route("/employees/all", get(employees::list::<S>))
    .route("/employees/status", put(employees::update_status::<S>))
    // Assets
    .route("/assets", get(assets::get_one::<S>).post(assets::create::<S>))
    .route("/assets/all", get(assets::list::<S>))
    .route("/assets/issue", post(assets::issue::<S>))
    .route("/assets/return", post(assets::return_asset::<S>))
    // Ledger
    .route("/transactions", get(transactions::list::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
