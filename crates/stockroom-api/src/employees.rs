//! Handlers for `/employees` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/employees` | Body: `{"name":"...","email":"..."}` |
//! | `GET`  | `/employees?email=` | 404 if not found |
//! | `PUT`  | `/employees/status` | Body: `{"email":"...","status":"Active\|Inactive"}` |
//! | `GET`  | `/employees/all?status=` | Optional exact-match filter |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use stockroom_core::{
  Error, directory,
  employee::{Employee, EmployeeStatus},
  store::AssetStore,
};

use crate::error::ApiError;

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  #[serde(default)]
  pub name:  String,
  #[serde(default)]
  pub email: String,
}

/// `POST /employees`
pub async fn create<S: AssetStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError> {
  let employee = directory::create(store.as_ref(), &body.name, &body.email).await?;
  Ok((StatusCode::CREATED, Json(employee)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GetParams {
  #[serde(default)]
  pub email: String,
}

/// `GET /employees?email=<email>`
pub async fn get_one<S: AssetStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<GetParams>,
) -> Result<Json<Employee>, ApiError> {
  let employee = directory::get_by_email(store.as_ref(), &params.email).await?;
  Ok(Json(employee))
}

// ─── Update status ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  #[serde(default)]
  pub email:  String,
  #[serde(default)]
  pub status: String,
}

/// `PUT /employees/status`
pub async fn update_status<S: AssetStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<StatusBody>,
) -> Result<Json<Employee>, ApiError> {
  if body.email.trim().is_empty() || body.status.trim().is_empty() {
    return Err(
      Error::InvalidInput("Email and status are required.".to_string()).into(),
    );
  }
  let status: EmployeeStatus = body.status.parse()?;
  let employee =
    directory::update_status(store.as_ref(), &body.email, status).await?;
  Ok(Json(employee))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  #[serde(default)]
  pub status: String,
}

/// `GET /employees/all[?status=<status>]` — empty filter means all.
pub async fn list<S: AssetStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Employee>>, ApiError> {
  let status = match params.status.trim() {
    "" => None,
    s => Some(s.parse::<EmployeeStatus>()?),
  };
  let employees = directory::list(store.as_ref(), status).await?;
  Ok(Json(employees))
}
