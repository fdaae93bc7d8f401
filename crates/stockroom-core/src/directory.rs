//! Employee directory — onboarding, status toggling, and reads.

use crate::{
  Error, Result,
  employee::{Employee, EmployeeStatus},
  normalize::normalize_email,
  store::AssetStore,
};

/// Onboard a new employee. The record defaults to `Active`.
pub async fn create<S: AssetStore>(
  store: &S,
  name: &str,
  email: &str,
) -> Result<Employee> {
  let name = name.trim();
  if name.is_empty() || email.trim().is_empty() {
    return Err(Error::InvalidInput("Name and email are required.".to_string()));
  }
  let email = normalize_email(email)?;

  if store.get_employee(&email).await?.is_some() {
    return Err(Error::Conflict("Employee already exists.".to_string()));
  }

  store.insert_employee(name.to_string(), email).await
}

pub async fn get_by_email<S: AssetStore>(
  store: &S,
  email: &str,
) -> Result<Employee> {
  let email = normalize_email(email)?;
  store
    .get_employee(&email)
    .await?
    .ok_or_else(|| Error::NotFound("Employee not found.".to_string()))
}

/// Toggle an employee between Active and Inactive.
pub async fn update_status<S: AssetStore>(
  store: &S,
  email: &str,
  status: EmployeeStatus,
) -> Result<Employee> {
  let email = normalize_email(email)?;
  store
    .set_employee_status(&email, status)
    .await?
    .ok_or_else(|| Error::NotFound("Employee not found.".to_string()))
}

/// All employees in creation order; `status` narrows to an exact
/// match. No match is an empty list, never an error.
pub async fn list<S: AssetStore>(
  store: &S,
  status: Option<EmployeeStatus>,
) -> Result<Vec<Employee>> {
  store.list_employees(status).await
}
