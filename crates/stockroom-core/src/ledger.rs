//! The transaction ledger — an append-only log of ISSUE/RETURN events
//! per asset, and the source of truth for "who holds what."
//!
//! Entries are created exclusively by the lifecycle engine; no
//! transaction is ever updated or deleted. For a given asset the entry
//! kinds strictly alternate ISSUE, RETURN, ISSUE, … starting with
//! ISSUE — the engine's preconditions plus the store's atomic commit
//! enforce this.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, normalize::normalize_asset_id, store::AssetStore};

pub const REASON_NEW_EMPLOYEE: &str = "New Employee";
pub const REASON_RETURN: &str = "Return";
/// Return reason that flips the asset to Not-Working.
pub const REASON_NOT_WORKING: &str = "Not Working";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
  Issue,
  Return,
}

impl TransactionKind {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Issue => "ISSUE",
      Self::Return => "RETURN",
    }
  }
}

impl FromStr for TransactionKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "ISSUE" => Ok(Self::Issue),
      "RETURN" => Ok(Self::Return),
      _ => Err(Error::InvalidInput("Invalid transaction type.".to_string())),
    }
  }
}

/// A ledger entry. `id` is strictly increasing and breaks ties when
/// timestamps collide; `timestamp` is assigned by the store at insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
  pub id:             i64,
  #[serde(rename = "type")]
  pub kind:           TransactionKind,
  pub asset_id:       String,
  pub employee_email: String,
  pub reason_type:    String,
  pub comments:       String,
  pub from_location:  String,
  pub to_location:    String,
  pub timestamp:      DateTime<Utc>,
}

/// A ledger entry before the store assigns its id and timestamp.
#[derive(Debug, Clone)]
pub struct NewTransaction {
  pub kind:           TransactionKind,
  pub asset_id:       String,
  pub employee_email: String,
  pub reason_type:    String,
  pub comments:       String,
  pub from_location:  String,
  pub to_location:    String,
}

/// All transactions for an asset, oldest first (timestamp ascending,
/// insertion order as tie-break). An unknown asset id yields an empty
/// list, not an error.
pub async fn list_for_asset<S: AssetStore>(
  store: &S,
  asset_id: &str,
) -> Result<Vec<Transaction>> {
  let asset_id = normalize_asset_id(asset_id)?;
  store.list_transactions(&asset_id).await
}
