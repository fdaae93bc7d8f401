//! Error taxonomy shared by every component.
//!
//! One tagged enumeration for the whole system — directory, registry,
//! ledger, lifecycle engine, and the storage backend all fail with the
//! same five kinds. The HTTP layer maps kinds to status codes; the core
//! never sees transport.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
  /// Caller-supplied data failed required-field or format validation.
  /// Never retried; the caller must correct the input.
  #[error("{0}")]
  InvalidInput(String),

  /// A referenced asset or employee does not exist. Never retried.
  #[error("{0}")]
  NotFound(String),

  /// Uniqueness violation on create. Never retried with the same input.
  #[error("{0}")]
  Conflict(String),

  /// The entity exists but does not permit the requested transition.
  /// Never retried without an external state change.
  #[error("{0}")]
  InvalidState(String),

  /// Storage unavailable, or a concurrent transition won the race
  /// during an issue/return commit. No partial write is visible; the
  /// whole operation is safe to retry.
  #[error("{0}")]
  Transient(String),
}

impl Error {
  /// Stable machine-readable tag, used for logging.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::InvalidInput(_) => "invalid_input",
      Self::NotFound(_) => "not_found",
      Self::Conflict(_) => "conflict",
      Self::InvalidState(_) => "invalid_state",
      Self::Transient(_) => "transient",
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
