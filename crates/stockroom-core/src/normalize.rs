//! Identity normalizer — one canonical key space for every lookup and
//! write. Asset ids are trimmed and uppercased, emails trimmed and
//! lowercased, so callers may be sloppy about case and whitespace.

use crate::{Error, Result};

/// Canonical form of an asset identifier.
pub fn normalize_asset_id(raw: &str) -> Result<String> {
  let id = raw.trim().to_uppercase();
  if id.is_empty() {
    return Err(Error::InvalidInput("Asset ID is required.".to_string()));
  }
  Ok(id)
}

/// Canonical form of an employee email.
pub fn normalize_email(raw: &str) -> Result<String> {
  let email = raw.trim().to_lowercase();
  if email.is_empty() {
    return Err(Error::InvalidInput("Email is required.".to_string()));
  }
  Ok(email)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn asset_id_is_trimmed_and_uppercased() {
    assert_eq!(normalize_asset_id("  abc-1 ").unwrap(), "ABC-1");
    assert_eq!(normalize_asset_id("ABC-1").unwrap(), "ABC-1");
  }

  #[test]
  fn email_is_trimmed_and_lowercased() {
    assert_eq!(normalize_email(" Jane@X.COM ").unwrap(), "jane@x.com");
  }

  #[test]
  fn empty_inputs_are_rejected() {
    assert!(matches!(
      normalize_asset_id("   "),
      Err(Error::InvalidInput(_))
    ));
    assert!(matches!(normalize_email(""), Err(Error::InvalidInput(_))));
  }
}
