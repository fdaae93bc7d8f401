//! Asset registry — registration and reads. The stock state of an
//! asset is mutated only by the lifecycle engine; the registry itself
//! never updates `stock_status`, `location`, `working_status`, or
//! `issued_to_email`.

use serde::Serialize;

use crate::{
  Error, Result,
  asset::{
    Asset, AssetRecord, DEFAULT_LOCATION, DEFAULT_OS, DEFAULT_TYPE, NewAsset,
    parse_purchase_date,
  },
  holder::{self, Holder},
  normalize::normalize_asset_id,
  store::{AssetFilter, AssetStore},
};

/// An asset read model: the row plus the holder resolved from the
/// ledger tail.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetWithHolder {
  #[serde(flatten)]
  pub asset:          Asset,
  pub current_holder: Option<Holder>,
}

/// Register a new asset. Identity fields are immutable thereafter.
pub async fn create<S: AssetStore>(store: &S, input: NewAsset) -> Result<Asset> {
  if input.asset_id.trim().is_empty()
    || input.serial_no.trim().is_empty()
    || input.model.trim().is_empty()
    || input.date_of_purchase.trim().is_empty()
  {
    return Err(Error::InvalidInput(
      "Asset ID, Serial No, Model and Date of Purchase are required."
        .to_string(),
    ));
  }

  let asset_id = normalize_asset_id(&input.asset_id)?;

  if store.get_asset(&asset_id).await?.is_some() {
    return Err(Error::Conflict("Asset with this ID already exists.".to_string()));
  }

  let date_of_purchase = parse_purchase_date(&input.date_of_purchase)?;

  let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

  store
    .insert_asset(AssetRecord {
      asset_id,
      serial_no: input.serial_no.trim().to_string(),
      kind: non_empty(input.kind).unwrap_or_else(|| DEFAULT_TYPE.to_string()),
      model: input.model.trim().to_string(),
      os: non_empty(input.os).unwrap_or_else(|| DEFAULT_OS.to_string()),
      date_of_purchase,
      location: non_empty(input.location)
        .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
    })
    .await
}

/// Fetch one asset with its current holder attached.
pub async fn get_by_id<S: AssetStore>(
  store: &S,
  asset_id: &str,
) -> Result<AssetWithHolder> {
  let asset_id = normalize_asset_id(asset_id)?;

  let asset = store
    .get_asset(&asset_id)
    .await?
    .ok_or_else(|| Error::NotFound("Asset not found.".to_string()))?;

  let current_holder = holder::resolve(store, &asset_id).await?;

  Ok(AssetWithHolder { asset, current_holder })
}

/// All assets in creation order, narrowed by `filter`. No match is an
/// empty list, never an error.
pub async fn list<S: AssetStore>(
  store: &S,
  filter: &AssetFilter,
) -> Result<Vec<Asset>> {
  store.list_assets(filter).await
}
