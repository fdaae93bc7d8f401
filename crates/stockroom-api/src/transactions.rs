//! Handler for `/transactions` — the ledger read path.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use stockroom_core::{
  ledger::{self, Transaction},
  store::AssetStore,
};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  #[serde(default)]
  pub asset_id: String,
}

/// `GET /transactions?assetId=<id>` — full history, oldest first.
pub async fn list<S: AssetStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
  let entries = ledger::list_for_asset(store.as_ref(), &params.asset_id).await?;
  Ok(Json(entries))
}
