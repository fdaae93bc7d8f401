//! Handlers for `/assets` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/assets` | Body: registration fields; 201 on success |
//! | `GET`  | `/assets?assetId=` | One asset with its current holder |
//! | `GET`  | `/assets/all?stockStatus=&location=` | Exact-match filters |
//! | `POST` | `/assets/issue` | Issue to an employee |
//! | `POST` | `/assets/return` | Return from an employee |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use stockroom_core::{
  asset::{Asset, NewAsset, StockStatus},
  lifecycle::{self, IssueRequest, LifecycleOutcome, ReturnRequest},
  registry::{self, AssetWithHolder},
  store::{AssetFilter, AssetStore},
};

use crate::error::ApiError;

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /assets`
pub async fn create<S: AssetStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewAsset>,
) -> Result<impl IntoResponse, ApiError> {
  let asset = registry::create(store.as_ref(), body).await?;
  Ok((StatusCode::CREATED, Json(asset)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetParams {
  #[serde(default)]
  pub asset_id: String,
}

/// `GET /assets?assetId=<id>`
pub async fn get_one<S: AssetStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<GetParams>,
) -> Result<Json<AssetWithHolder>, ApiError> {
  let asset = registry::get_by_id(store.as_ref(), &params.asset_id).await?;
  Ok(Json(asset))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  #[serde(default)]
  pub stock_status: String,
  #[serde(default)]
  pub location:     String,
}

/// `GET /assets/all[?stockStatus=...][&location=...]`
pub async fn list<S: AssetStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Asset>>, ApiError> {
  let stock_status = match params.stock_status.trim() {
    "" => None,
    s => Some(s.parse::<StockStatus>()?),
  };
  let location = match params.location.trim() {
    "" => None,
    s => Some(s.to_string()),
  };
  let assets =
    registry::list(store.as_ref(), &AssetFilter { stock_status, location })
      .await?;
  Ok(Json(assets))
}

// ─── Issue / Return ───────────────────────────────────────────────────────────

/// `POST /assets/issue`
pub async fn issue<S: AssetStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<IssueRequest>,
) -> Result<Json<LifecycleOutcome>, ApiError> {
  let outcome = lifecycle::issue(store.as_ref(), body).await?;
  Ok(Json(outcome))
}

/// `POST /assets/return`
pub async fn return_asset<S: AssetStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<ReturnRequest>,
) -> Result<Json<LifecycleOutcome>, ApiError> {
  let outcome = lifecycle::return_asset(store.as_ref(), body).await?;
  Ok(Json(outcome))
}
