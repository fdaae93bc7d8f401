//! Employee records. Employees are onboarded once and toggled between
//! Active and Inactive; they are never physically deleted.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeStatus {
  Active,
  Inactive,
}

impl EmployeeStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Active => "Active",
      Self::Inactive => "Inactive",
    }
  }
}

impl FromStr for EmployeeStatus {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "Active" => Ok(Self::Active),
      "Inactive" => Ok(Self::Inactive),
      _ => Err(Error::InvalidInput("Invalid status value.".to_string())),
    }
  }
}

/// An employee row. `email` is the normalized unique key; `id` is the
/// surrogate used for creation ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
  pub id:     i64,
  pub name:   String,
  pub email:  String,
  pub status: EmployeeStatus,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_parses_exact_values_only() {
    assert_eq!("Active".parse::<EmployeeStatus>().unwrap(), EmployeeStatus::Active);
    assert_eq!("Inactive".parse::<EmployeeStatus>().unwrap(), EmployeeStatus::Inactive);
    assert!("active".parse::<EmployeeStatus>().is_err());
    assert!("Fired".parse::<EmployeeStatus>().is_err());
  }
}
