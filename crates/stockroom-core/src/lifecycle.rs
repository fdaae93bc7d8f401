//! Lifecycle engine — the issue/return state machine.
//!
//! Each asset is either InStock (no holder) or Issued(holder), derived
//! jointly from its row and the ledger tail. The engine validates
//! preconditions against the directory and the registry, then hands
//! the ledger append and the asset update to the store as one atomic
//! commit guarded by the expected state. Two concurrent issues of the
//! same asset therefore cannot both succeed: the loser's guard fails
//! inside the storage transaction and the operation fails `Transient`
//! with nothing written.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  asset::{StockStatus, WITH_EMPLOYEE, WorkingStatus},
  employee::EmployeeStatus,
  holder,
  ledger::{
    NewTransaction, REASON_NEW_EMPLOYEE, REASON_NOT_WORKING, REASON_RETURN,
    Transaction, TransactionKind,
  },
  normalize::{normalize_asset_id, normalize_email},
  registry::AssetWithHolder,
  store::{AssetStore, AssetTransition, TransitionGuard},
};

// ─── Requests ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRequest {
  #[serde(default)]
  pub asset_id:       String,
  #[serde(default)]
  pub employee_email: String,
  #[serde(default)]
  pub reason_type:    Option<String>,
  #[serde(default)]
  pub comments:       Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
  #[serde(default)]
  pub asset_id:        String,
  #[serde(default)]
  pub employee_email:  String,
  #[serde(default)]
  pub reason_type:     Option<String>,
  #[serde(default)]
  pub comments:        Option<String>,
  #[serde(default)]
  pub return_location: Option<String>,
}

/// The result of a successful transition: the updated asset with its
/// re-resolved holder, and the ledger entry that recorded the event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleOutcome {
  pub asset:       AssetWithHolder,
  pub transaction: Transaction,
}

fn non_empty(v: Option<String>) -> Option<String> {
  v.filter(|s| !s.trim().is_empty())
}

// ─── Issue ───────────────────────────────────────────────────────────────────

/// Issue an In-Stock, Working asset to an Active employee.
pub async fn issue<S: AssetStore>(
  store: &S,
  req: IssueRequest,
) -> Result<LifecycleOutcome> {
  let asset_id = normalize_asset_id(&req.asset_id)?;
  let email = normalize_email(&req.employee_email)?;

  let asset = store
    .get_asset(&asset_id)
    .await?
    .ok_or_else(|| Error::NotFound("Asset not found.".to_string()))?;

  let employee = store
    .get_employee(&email)
    .await?
    .ok_or_else(|| Error::NotFound("Employee not found.".to_string()))?;

  if employee.status != EmployeeStatus::Active {
    return Err(Error::InvalidState("Employee is not Active.".to_string()));
  }
  if asset.stock_status != StockStatus::InStock {
    return Err(Error::InvalidState("Asset is not In-Stock.".to_string()));
  }
  if asset.working_status != WorkingStatus::Working {
    return Err(Error::InvalidState(
      "Asset is not in Working status.".to_string(),
    ));
  }

  // from_location captured before mutation.
  let entry = NewTransaction {
    kind:           TransactionKind::Issue,
    asset_id:       asset_id.clone(),
    employee_email: email.clone(),
    reason_type:    non_empty(req.reason_type)
      .unwrap_or_else(|| REASON_NEW_EMPLOYEE.to_string()),
    comments:       req.comments.unwrap_or_default(),
    from_location:  asset.location.clone(),
    to_location:    WITH_EMPLOYEE.to_string(),
  };
  let update = AssetTransition {
    stock_status:    StockStatus::Issued,
    working_status:  asset.working_status,
    location:        WITH_EMPLOYEE.to_string(),
    issued_to_email: Some(email),
  };

  let (asset, transaction) = store
    .commit_transition(TransitionGuard::InStockAndWorking, entry, update)
    .await?;

  let current_holder = holder::resolve(store, &asset_id).await?;

  Ok(LifecycleOutcome {
    asset: AssetWithHolder { asset, current_holder },
    transaction,
  })
}

// ─── Return ──────────────────────────────────────────────────────────────────

/// Return an issued asset from the employee it was issued to. The
/// employee need not still be Active to return.
pub async fn return_asset<S: AssetStore>(
  store: &S,
  req: ReturnRequest,
) -> Result<LifecycleOutcome> {
  let asset_id = normalize_asset_id(&req.asset_id)?;
  let email = normalize_email(&req.employee_email)?;

  let asset = store
    .get_asset(&asset_id)
    .await?
    .ok_or_else(|| Error::NotFound("Asset not found.".to_string()))?;

  store
    .get_employee(&email)
    .await?
    .ok_or_else(|| Error::NotFound("Employee not found.".to_string()))?;

  let last = store.last_transaction(&asset_id).await?;
  let issued_to = match last {
    Some(tx) if tx.kind == TransactionKind::Issue => tx.employee_email,
    _ => {
      return Err(Error::InvalidState(
        "This asset is not currently issued.".to_string(),
      ));
    }
  };
  if issued_to != email {
    return Err(Error::InvalidState(
      "Asset is not currently issued to this employee. Please check the email."
        .to_string(),
    ));
  }

  let working_status = if req.reason_type.as_deref() == Some(REASON_NOT_WORKING)
  {
    WorkingStatus::NotWorking
  } else {
    WorkingStatus::Working
  };
  let to_location = non_empty(req.return_location)
    .unwrap_or_else(|| crate::asset::DEFAULT_LOCATION.to_string());

  let entry = NewTransaction {
    kind:           TransactionKind::Return,
    asset_id:       asset_id.clone(),
    employee_email: email.clone(),
    reason_type:    non_empty(req.reason_type)
      .unwrap_or_else(|| REASON_RETURN.to_string()),
    comments:       req.comments.unwrap_or_default(),
    from_location:  asset.location.clone(),
    to_location:    to_location.clone(),
  };
  let update = AssetTransition {
    stock_status:    StockStatus::InStock,
    working_status,
    location:        to_location,
    issued_to_email: None,
  };

  let (asset, transaction) = store
    .commit_transition(TransitionGuard::IssuedTo(email), entry, update)
    .await?;

  let current_holder = holder::resolve(store, &asset_id).await?;

  Ok(LifecycleOutcome {
    asset: AssetWithHolder { asset, current_holder },
    transaction,
  })
}
