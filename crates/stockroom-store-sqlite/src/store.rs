//! [`SqliteStore`] — the SQLite implementation of [`AssetStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use stockroom_core::{
  Error, Result,
  asset::{Asset, AssetRecord},
  employee::{Employee, EmployeeStatus},
  ledger::{NewTransaction, Transaction},
  store::{AssetFilter, AssetStore, AssetTransition, TransitionGuard},
};

use crate::{
  encode::{RawAsset, RawEmployee, RawTransaction, encode_date, encode_dt},
  schema::SCHEMA,
};

/// Map a database-level failure onto the shared error taxonomy:
/// uniqueness violations are `Conflict`, everything else `Transient`.
fn db_err(e: tokio_rusqlite::Error) -> Error {
  match &e {
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _))
      if f.code == rusqlite::ErrorCode::ConstraintViolation =>
    {
      Error::Conflict("Record already exists.".to_string())
    }
    _ => Error::Transient(format!("database error: {e}")),
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A stockroom store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All
/// closures run serially on the connection's thread, so the guarded
/// transition commit observes no interleaved writes.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(db_err)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(db_err)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(db_err)
  }
}

// ─── AssetStore impl ─────────────────────────────────────────────────────────

impl AssetStore for SqliteStore {
  // ── Employees ─────────────────────────────────────────────────────────────

  async fn insert_employee(
    &self,
    name: String,
    email: String,
  ) -> Result<Employee> {
    let (name_ins, email_ins) = (name.clone(), email.clone());

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO employees (email, name, status) VALUES (?1, ?2, 'Active')",
          rusqlite::params![email_ins, name_ins],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(db_err)?;

    Ok(Employee { id, name, email, status: EmployeeStatus::Active })
  }

  async fn get_employee(&self, email: &str) -> Result<Option<Employee>> {
    let email = email.to_string();

    let raw: Option<RawEmployee> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {} FROM employees WHERE email = ?1",
                RawEmployee::COLUMNS
              ),
              rusqlite::params![email],
              RawEmployee::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(db_err)?;

    raw.map(RawEmployee::into_employee).transpose()
  }

  async fn set_employee_status(
    &self,
    email: &str,
    status: EmployeeStatus,
  ) -> Result<Option<Employee>> {
    let email = email.to_string();
    let status_str = status.as_str();

    let raw: Option<RawEmployee> = self
      .conn
      .call(move |conn| {
        let affected = conn.execute(
          "UPDATE employees SET status = ?1 WHERE email = ?2",
          rusqlite::params![status_str, email],
        )?;
        if affected == 0 {
          return Ok(None);
        }
        Ok(Some(conn.query_row(
          &format!(
            "SELECT {} FROM employees WHERE email = ?1",
            RawEmployee::COLUMNS
          ),
          rusqlite::params![email],
          RawEmployee::from_row,
        )?))
      })
      .await
      .map_err(db_err)?;

    raw.map(RawEmployee::into_employee).transpose()
  }

  async fn list_employees(
    &self,
    status: Option<EmployeeStatus>,
  ) -> Result<Vec<Employee>> {
    let status_str = status.map(|s| s.as_str().to_string());

    let raws: Vec<RawEmployee> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM employees
           WHERE (?1 IS NULL OR status = ?1)
           ORDER BY id ASC",
          RawEmployee::COLUMNS
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![status_str], RawEmployee::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)?;

    raws.into_iter().map(RawEmployee::into_employee).collect()
  }

  // ── Assets ────────────────────────────────────────────────────────────────

  async fn insert_asset(&self, record: AssetRecord) -> Result<Asset> {
    let r = record.clone();
    let date_str = encode_date(record.date_of_purchase);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO assets (
             asset_id, serial_no, type, model, os, date_of_purchase,
             stock_status, working_status, location, issued_to_email
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'In-Stock', 'Working', ?7, NULL)",
          rusqlite::params![
            r.asset_id,
            r.serial_no,
            r.kind,
            r.model,
            r.os,
            date_str,
            r.location,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(db_err)?;

    Ok(Asset {
      id,
      asset_id:         record.asset_id,
      serial_no:        record.serial_no,
      kind:             record.kind,
      model:            record.model,
      os:               record.os,
      date_of_purchase: record.date_of_purchase,
      stock_status:     stockroom_core::asset::StockStatus::InStock,
      working_status:   stockroom_core::asset::WorkingStatus::Working,
      location:         record.location,
      issued_to_email:  None,
    })
  }

  async fn get_asset(&self, asset_id: &str) -> Result<Option<Asset>> {
    let asset_id = asset_id.to_string();

    let raw: Option<RawAsset> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {} FROM assets WHERE asset_id = ?1",
                RawAsset::COLUMNS
              ),
              rusqlite::params![asset_id],
              RawAsset::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(db_err)?;

    raw.map(RawAsset::into_asset).transpose()
  }

  async fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<Asset>> {
    let stock_str = filter.stock_status.map(|s| s.as_str().to_string());
    let location = filter.location.clone();

    let raws: Vec<RawAsset> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM assets
           WHERE (?1 IS NULL OR stock_status = ?1)
             AND (?2 IS NULL OR location = ?2)
           ORDER BY id ASC",
          RawAsset::COLUMNS
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![stock_str, location], RawAsset::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)?;

    raws.into_iter().map(RawAsset::into_asset).collect()
  }

  // ── Ledger ────────────────────────────────────────────────────────────────

  async fn last_transaction(&self, asset_id: &str) -> Result<Option<Transaction>> {
    let asset_id = asset_id.to_string();

    let raw: Option<RawTransaction> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {} FROM transactions
                 WHERE asset_id = ?1
                 ORDER BY timestamp DESC, id DESC
                 LIMIT 1",
                RawTransaction::COLUMNS
              ),
              rusqlite::params![asset_id],
              RawTransaction::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(db_err)?;

    raw.map(RawTransaction::into_transaction).transpose()
  }

  async fn list_transactions(&self, asset_id: &str) -> Result<Vec<Transaction>> {
    let asset_id = asset_id.to_string();

    let raws: Vec<RawTransaction> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM transactions
           WHERE asset_id = ?1
           ORDER BY timestamp ASC, id ASC",
          RawTransaction::COLUMNS
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![asset_id], RawTransaction::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)?;

    raws
      .into_iter()
      .map(RawTransaction::into_transaction)
      .collect()
  }

  async fn commit_transition(
    &self,
    guard: TransitionGuard,
    entry: NewTransaction,
    update: AssetTransition,
  ) -> Result<(Asset, Transaction)> {
    let committed: Option<(RawAsset, RawTransaction)> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // Optimistic guard: the expected state travels in the WHERE
        // clause. Zero rows affected means a concurrent transition
        // won; dropping `tx` without commit rolls everything back.
        let affected = match &guard {
          TransitionGuard::InStockAndWorking => tx.execute(
            "UPDATE assets
             SET stock_status = ?1, working_status = ?2, location = ?3,
                 issued_to_email = ?4
             WHERE asset_id = ?5
               AND stock_status = 'In-Stock'
               AND working_status = 'Working'",
            rusqlite::params![
              update.stock_status.as_str(),
              update.working_status.as_str(),
              update.location,
              update.issued_to_email,
              entry.asset_id,
            ],
          )?,
          TransitionGuard::IssuedTo(email) => tx.execute(
            "UPDATE assets
             SET stock_status = ?1, working_status = ?2, location = ?3,
                 issued_to_email = ?4
             WHERE asset_id = ?5
               AND stock_status = 'Issued'
               AND issued_to_email = ?6",
            rusqlite::params![
              update.stock_status.as_str(),
              update.working_status.as_str(),
              update.location,
              update.issued_to_email,
              entry.asset_id,
              email,
            ],
          )?,
        };
        if affected == 0 {
          return Ok(None);
        }

        // Timestamp taken here, on the serialised connection thread,
        // so ledger timestamps are non-decreasing in insert order.
        let ts_str = encode_dt(chrono::Utc::now());
        tx.execute(
          "INSERT INTO transactions (
             type, asset_id, employee_email, reason_type, comments,
             from_location, to_location, timestamp
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            entry.kind.as_str(),
            entry.asset_id,
            entry.employee_email,
            entry.reason_type,
            entry.comments,
            entry.from_location,
            entry.to_location,
            ts_str,
          ],
        )?;
        let entry_id = tx.last_insert_rowid();

        let raw_asset = tx.query_row(
          &format!("SELECT {} FROM assets WHERE asset_id = ?1", RawAsset::COLUMNS),
          rusqlite::params![entry.asset_id],
          RawAsset::from_row,
        )?;
        let raw_tx = tx.query_row(
          &format!(
            "SELECT {} FROM transactions WHERE id = ?1",
            RawTransaction::COLUMNS
          ),
          rusqlite::params![entry_id],
          RawTransaction::from_row,
        )?;

        tx.commit()?;
        Ok(Some((raw_asset, raw_tx)))
      })
      .await
      .map_err(db_err)?;

    let Some((raw_asset, raw_tx)) = committed else {
      return Err(Error::Transient(
        "Asset state changed during the transition; retry the operation."
          .to_string(),
      ));
    };

    Ok((raw_asset.into_asset()?, raw_tx.into_transaction()?))
  }
}
