//! SQL schema for the stockroom SQLite store.
//!
//! Executed once at connection startup. Future migrations will be
//! gated on `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS employees (
    id     INTEGER PRIMARY KEY AUTOINCREMENT,
    email  TEXT NOT NULL UNIQUE,   -- normalized (trim + lowercase)
    name   TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'Active'   -- 'Active' | 'Inactive'
);

CREATE TABLE IF NOT EXISTS assets (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    asset_id         TEXT NOT NULL UNIQUE,   -- normalized (trim + uppercase)
    serial_no        TEXT NOT NULL,
    type             TEXT NOT NULL,
    model            TEXT NOT NULL,
    os               TEXT NOT NULL,
    date_of_purchase TEXT NOT NULL,   -- ISO 8601 calendar date
    stock_status     TEXT NOT NULL DEFAULT 'In-Stock',  -- 'In-Stock' | 'Issued'
    working_status   TEXT NOT NULL DEFAULT 'Working',   -- 'Working' | 'Not-Working'
    location         TEXT NOT NULL,
    issued_to_email  TEXT   -- non-null iff stock_status = 'Issued'
);

-- The ledger is strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS transactions (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    type           TEXT NOT NULL,   -- 'ISSUE' | 'RETURN'
    asset_id       TEXT NOT NULL,
    employee_email TEXT NOT NULL,
    reason_type    TEXT NOT NULL,
    comments       TEXT NOT NULL DEFAULT '',
    from_location  TEXT NOT NULL,
    to_location    TEXT NOT NULL,
    timestamp      TEXT NOT NULL    -- RFC 3339 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS transactions_asset_idx
    ON transactions(asset_id, timestamp, id);

PRAGMA user_version = 1;
";
