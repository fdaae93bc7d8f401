//! Asset records. Identity fields are fixed at registration; the stock
//! state (`stock_status`, `working_status`, `location`,
//! `issued_to_email`) is mutated only by the lifecycle engine, in the
//! same storage transaction as the ledger append.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Location sentinel meaning "currently issued"; reserved, never a
/// real site name.
pub const WITH_EMPLOYEE: &str = "With Employee";

pub const DEFAULT_TYPE: &str = "Laptop";
pub const DEFAULT_OS: &str = "Windows";
pub const DEFAULT_LOCATION: &str = "Bangalore";

// ─── Status enums ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
  #[serde(rename = "In-Stock")]
  InStock,
  Issued,
}

impl StockStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::InStock => "In-Stock",
      Self::Issued => "Issued",
    }
  }
}

impl FromStr for StockStatus {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "In-Stock" => Ok(Self::InStock),
      "Issued" => Ok(Self::Issued),
      _ => Err(Error::InvalidInput("Invalid stock status value.".to_string())),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkingStatus {
  Working,
  #[serde(rename = "Not-Working")]
  NotWorking,
}

impl WorkingStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Working => "Working",
      Self::NotWorking => "Not-Working",
    }
  }
}

impl FromStr for WorkingStatus {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "Working" => Ok(Self::Working),
      "Not-Working" => Ok(Self::NotWorking),
      _ => {
        Err(Error::InvalidInput("Invalid working status value.".to_string()))
      }
    }
  }
}

// ─── Asset ───────────────────────────────────────────────────────────────────

/// An asset row. `asset_id` is the normalized unique key; `id` is the
/// surrogate used for creation ordering.
///
/// Invariant: `issued_to_email` is `Some` iff `stock_status` is
/// `Issued` iff the latest ledger entry for this asset is an unmatched
/// ISSUE. The store commits all three together.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
  pub id:               i64,
  pub asset_id:         String,
  pub serial_no:        String,
  #[serde(rename = "type")]
  pub kind:             String,
  pub model:            String,
  pub os:               String,
  pub date_of_purchase: NaiveDate,
  pub stock_status:     StockStatus,
  pub working_status:   WorkingStatus,
  pub location:         String,
  pub issued_to_email:  Option<String>,
}

/// Registration input as supplied by the caller; everything optional
/// defaults, required fields are validated by
/// [`registry::create`](crate::registry::create).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
  #[serde(default)]
  pub asset_id:         String,
  #[serde(default)]
  pub serial_no:        String,
  #[serde(rename = "type", default)]
  pub kind:             Option<String>,
  #[serde(default)]
  pub model:            String,
  #[serde(default)]
  pub os:               Option<String>,
  #[serde(default)]
  pub date_of_purchase: String,
  #[serde(default)]
  pub location:         Option<String>,
}

/// A validated registration record, ready for insertion. The store
/// assigns the surrogate id and always inserts assets as
/// In-Stock/Working with no holder — an asset cannot be born issued.
#[derive(Debug, Clone)]
pub struct AssetRecord {
  pub asset_id:         String,
  pub serial_no:        String,
  pub kind:             String,
  pub model:            String,
  pub os:               String,
  pub date_of_purchase: NaiveDate,
  pub location:         String,
}

// ─── Purchase date ───────────────────────────────────────────────────────────

/// Parse a purchase date: `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn parse_purchase_date(raw: &str) -> Result<NaiveDate> {
  let raw = raw.trim();
  if raw.is_empty() {
    return Err(Error::InvalidInput("Date of Purchase is required.".to_string()));
  }
  if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
    return Ok(date);
  }
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Ok(dt.date_naive());
  }
  Err(Error::InvalidInput(
    "Invalid Date of Purchase. Please use a valid date.".to_string(),
  ))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_calendar_date() {
    assert_eq!(
      parse_purchase_date("2024-01-01").unwrap(),
      NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    );
  }

  #[test]
  fn parses_full_timestamp() {
    assert_eq!(
      parse_purchase_date("2024-01-01T09:30:00+05:30").unwrap(),
      NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    );
  }

  #[test]
  fn rejects_garbage_and_empty() {
    assert!(matches!(
      parse_purchase_date("yesterday"),
      Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
      parse_purchase_date("2024-13-40"),
      Err(Error::InvalidInput(_))
    ));
    assert!(matches!(parse_purchase_date("  "), Err(Error::InvalidInput(_))));
  }

  #[test]
  fn stock_status_round_trips_through_str() {
    for s in [StockStatus::InStock, StockStatus::Issued] {
      assert_eq!(s.as_str().parse::<StockStatus>().unwrap(), s);
    }
    assert!("in-stock".parse::<StockStatus>().is_err());
  }
}
