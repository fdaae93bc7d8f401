//! Holder resolver — derives "who currently holds this asset" from the
//! ledger tail. The holder is never stored as independent truth; the
//! asset row's `issued_to_email` is a materialised cache updated only
//! alongside the ledger append.

use serde::Serialize;

use crate::{
  Result,
  employee::EmployeeStatus,
  ledger::TransactionKind,
  store::AssetStore,
};

/// The employee currently holding an asset.
#[derive(Debug, Clone, Serialize)]
pub struct Holder {
  pub name:   String,
  pub email:  String,
  pub status: EmployeeStatus,
}

/// Resolve the current holder of `asset_id` (already normalized).
///
/// `None` if the asset has no ledger history or its latest entry is a
/// RETURN. Employees are never deleted in this design, but a missing
/// record still resolves to `None` rather than failing the containing
/// read.
pub async fn resolve<S: AssetStore>(
  store: &S,
  asset_id: &str,
) -> Result<Option<Holder>> {
  let Some(last) = store.last_transaction(asset_id).await? else {
    return Ok(None);
  };
  if last.kind != TransactionKind::Issue {
    return Ok(None);
  }

  Ok(store.get_employee(&last.employee_email).await?.map(|emp| Holder {
    name:   emp.name,
    email:  emp.email,
    status: emp.status,
  }))
}
