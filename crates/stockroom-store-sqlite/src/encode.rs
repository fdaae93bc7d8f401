//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, purchase dates as
//! `YYYY-MM-DD`, enums as their canonical wire strings. A row that
//! fails to decode surfaces as `Transient` — it means the database
//! holds something this code never wrote.

use chrono::{DateTime, NaiveDate, Utc};
use stockroom_core::{
  Error, Result,
  asset::{Asset, StockStatus, WorkingStatus},
  employee::{Employee, EmployeeStatus},
  ledger::{Transaction, TransactionKind},
};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| corrupt("timestamp", s, &e.to_string()))
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| corrupt("date", s, &e.to_string()))
}

fn corrupt(what: &str, value: &str, detail: &str) -> Error {
  Error::Transient(format!("corrupt {what} column {value:?}: {detail}"))
}

fn decode_enum<T: std::str::FromStr>(what: &str, s: &str) -> Result<T> {
  s.parse().map_err(|_| corrupt(what, s, "unknown value"))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `employees` row.
pub struct RawEmployee {
  pub id:     i64,
  pub email:  String,
  pub name:   String,
  pub status: String,
}

impl RawEmployee {
  pub const COLUMNS: &'static str = "id, email, name, status";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:     row.get(0)?,
      email:  row.get(1)?,
      name:   row.get(2)?,
      status: row.get(3)?,
    })
  }

  pub fn into_employee(self) -> Result<Employee> {
    Ok(Employee {
      id:     self.id,
      name:   self.name,
      email:  self.email,
      status: decode_enum::<EmployeeStatus>("employee status", &self.status)?,
    })
  }
}

/// Raw strings read directly from an `assets` row.
pub struct RawAsset {
  pub id:               i64,
  pub asset_id:         String,
  pub serial_no:        String,
  pub kind:             String,
  pub model:            String,
  pub os:               String,
  pub date_of_purchase: String,
  pub stock_status:     String,
  pub working_status:   String,
  pub location:         String,
  pub issued_to_email:  Option<String>,
}

impl RawAsset {
  pub const COLUMNS: &'static str = "id, asset_id, serial_no, type, model, \
     os, date_of_purchase, stock_status, working_status, location, \
     issued_to_email";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:               row.get(0)?,
      asset_id:         row.get(1)?,
      serial_no:        row.get(2)?,
      kind:             row.get(3)?,
      model:            row.get(4)?,
      os:               row.get(5)?,
      date_of_purchase: row.get(6)?,
      stock_status:     row.get(7)?,
      working_status:   row.get(8)?,
      location:         row.get(9)?,
      issued_to_email:  row.get(10)?,
    })
  }

  pub fn into_asset(self) -> Result<Asset> {
    Ok(Asset {
      id:               self.id,
      asset_id:         self.asset_id,
      serial_no:        self.serial_no,
      kind:             self.kind,
      model:            self.model,
      os:               self.os,
      date_of_purchase: decode_date(&self.date_of_purchase)?,
      stock_status:     decode_enum::<StockStatus>(
        "stock status",
        &self.stock_status,
      )?,
      working_status:   decode_enum::<WorkingStatus>(
        "working status",
        &self.working_status,
      )?,
      location:         self.location,
      issued_to_email:  self.issued_to_email,
    })
  }
}

/// Raw strings read directly from a `transactions` row.
pub struct RawTransaction {
  pub id:             i64,
  pub kind:           String,
  pub asset_id:       String,
  pub employee_email: String,
  pub reason_type:    String,
  pub comments:       String,
  pub from_location:  String,
  pub to_location:    String,
  pub timestamp:      String,
}

impl RawTransaction {
  pub const COLUMNS: &'static str = "id, type, asset_id, employee_email, \
     reason_type, comments, from_location, to_location, timestamp";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      kind:           row.get(1)?,
      asset_id:       row.get(2)?,
      employee_email: row.get(3)?,
      reason_type:    row.get(4)?,
      comments:       row.get(5)?,
      from_location:  row.get(6)?,
      to_location:    row.get(7)?,
      timestamp:      row.get(8)?,
    })
  }

  pub fn into_transaction(self) -> Result<Transaction> {
    Ok(Transaction {
      id:             self.id,
      kind:           decode_enum::<TransactionKind>(
        "transaction type",
        &self.kind,
      )?,
      asset_id:       self.asset_id,
      employee_email: self.employee_email,
      reason_type:    self.reason_type,
      comments:       self.comments,
      from_location:  self.from_location,
      to_location:    self.to_location,
      timestamp:      decode_dt(&self.timestamp)?,
    })
  }
}
