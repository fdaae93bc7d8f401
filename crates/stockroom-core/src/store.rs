//! The `AssetStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g.
//! `stockroom-store-sqlite`). The service layer in this crate depends
//! on this abstraction, not on any concrete backend. All methods fail
//! with the shared [`Error`](crate::Error) taxonomy: backends surface
//! uniqueness violations as `Conflict` and everything else that goes
//! wrong below the trait as `Transient`.

use std::future::Future;

use crate::{
  Result,
  asset::{Asset, AssetRecord, StockStatus, WorkingStatus},
  employee::{Employee, EmployeeStatus},
  ledger::{NewTransaction, Transaction},
};

// ─── Query / write types ─────────────────────────────────────────────────────

/// Exact-match filters for [`AssetStore::list_assets`]; combinable.
#[derive(Debug, Clone, Default)]
pub struct AssetFilter {
  pub stock_status: Option<StockStatus>,
  pub location:     Option<String>,
}

/// Optimistic precondition for [`AssetStore::commit_transition`],
/// re-verified inside the storage transaction. If the asset no longer
/// satisfies the guard (a concurrent transition won), the commit rolls
/// back in full and fails `Transient`.
#[derive(Debug, Clone)]
pub enum TransitionGuard {
  /// Asset must still be In-Stock and Working (issue path).
  InStockAndWorking,
  /// Asset must still be Issued to exactly this email (return path).
  IssuedTo(String),
}

/// The asset fields written alongside a ledger append.
#[derive(Debug, Clone)]
pub struct AssetTransition {
  pub stock_status:    StockStatus,
  pub working_status:  WorkingStatus,
  pub location:        String,
  pub issued_to_email: Option<String>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a stockroom storage backend.
///
/// The ledger is append-only; the only write that touches it is
/// [`commit_transition`](AssetStore::commit_transition), which appends
/// one entry and updates the asset's derived state atomically.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait AssetStore: Send + Sync {
  // ── Employees ─────────────────────────────────────────────────────────

  /// Insert a new employee with `Active` status. The email must
  /// already be normalized; a duplicate fails `Conflict`.
  fn insert_employee(
    &self,
    name: String,
    email: String,
  ) -> impl Future<Output = Result<Employee>> + Send + '_;

  /// Fetch an employee by normalized email. `None` if absent.
  fn get_employee<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<Employee>>> + Send + 'a;

  /// Set an employee's status. `None` if the employee is absent.
  fn set_employee_status<'a>(
    &'a self,
    email: &'a str,
    status: EmployeeStatus,
  ) -> impl Future<Output = Result<Option<Employee>>> + Send + 'a;

  /// All employees in creation order, optionally filtered by status.
  fn list_employees(
    &self,
    status: Option<EmployeeStatus>,
  ) -> impl Future<Output = Result<Vec<Employee>>> + Send + '_;

  // ── Assets ────────────────────────────────────────────────────────────

  /// Insert a validated registration record. The asset starts
  /// In-Stock/Working with no holder; a duplicate asset id fails
  /// `Conflict`.
  fn insert_asset(
    &self,
    record: AssetRecord,
  ) -> impl Future<Output = Result<Asset>> + Send + '_;

  /// Fetch an asset by normalized asset id. `None` if absent.
  fn get_asset<'a>(
    &'a self,
    asset_id: &'a str,
  ) -> impl Future<Output = Result<Option<Asset>>> + Send + 'a;

  /// All assets in creation order, narrowed by `filter`.
  fn list_assets<'a>(
    &'a self,
    filter: &'a AssetFilter,
  ) -> impl Future<Output = Result<Vec<Asset>>> + Send + 'a;

  // ── Ledger ────────────────────────────────────────────────────────────

  /// The most recent ledger entry for an asset (timestamp descending,
  /// id as tie-break). `None` if the asset has no history.
  fn last_transaction<'a>(
    &'a self,
    asset_id: &'a str,
  ) -> impl Future<Output = Result<Option<Transaction>>> + Send + 'a;

  /// All ledger entries for an asset, oldest first.
  fn list_transactions<'a>(
    &'a self,
    asset_id: &'a str,
  ) -> impl Future<Output = Result<Vec<Transaction>>> + Send + 'a;

  /// Atomically append `entry` to the ledger and apply `update` to the
  /// asset row, provided `guard` still holds. Either both writes
  /// commit or neither does. Returns the updated asset and the stored
  /// entry.
  fn commit_transition(
    &self,
    guard: TransitionGuard,
    entry: NewTransaction,
    update: AssetTransition,
  ) -> impl Future<Output = Result<(Asset, Transaction)>> + Send + '_;
}
