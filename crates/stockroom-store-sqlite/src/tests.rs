//! Integration tests for the core services running against an
//! in-memory [`SqliteStore`].

use stockroom_core::{
  Error, directory,
  asset::{NewAsset, StockStatus, WorkingStatus, WITH_EMPLOYEE},
  employee::EmployeeStatus,
  holder,
  ledger::{self, TransactionKind},
  lifecycle::{self, IssueRequest, ReturnRequest},
  registry,
  store::AssetFilter,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

fn new_asset(asset_id: &str) -> NewAsset {
  NewAsset {
    asset_id: asset_id.to_string(),
    serial_no: "SN1".to_string(),
    model: "X1".to_string(),
    date_of_purchase: "2024-01-01".to_string(),
    ..Default::default()
  }
}

fn issue_req(asset_id: &str, email: &str) -> IssueRequest {
  IssueRequest {
    asset_id: asset_id.to_string(),
    employee_email: email.to_string(),
    ..Default::default()
  }
}

fn return_req(asset_id: &str, email: &str) -> ReturnRequest {
  ReturnRequest {
    asset_id: asset_id.to_string(),
    employee_email: email.to_string(),
    ..Default::default()
  }
}

// ─── Employee directory ──────────────────────────────────────────────────────

#[tokio::test]
async fn create_employee_normalizes_email_and_defaults_active() {
  let s = store().await;

  let emp = directory::create(&s, " Jane Doe ", "JANE@X.COM").await.unwrap();
  assert_eq!(emp.email, "jane@x.com");
  assert_eq!(emp.name, "Jane Doe");
  assert_eq!(emp.status, EmployeeStatus::Active);

  // Lookup is case/whitespace insensitive.
  let fetched = directory::get_by_email(&s, "  Jane@x.com ").await.unwrap();
  assert_eq!(fetched.id, emp.id);
}

#[tokio::test]
async fn duplicate_employee_conflicts() {
  let s = store().await;
  directory::create(&s, "Jane", "jane@x.com").await.unwrap();

  let err = directory::create(&s, "Jane Again", " JANE@X.COM ")
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Conflict(_)), "{err:?}");
}

#[tokio::test]
async fn create_employee_requires_name_and_email() {
  let s = store().await;
  let err = directory::create(&s, "  ", "jane@x.com").await.unwrap_err();
  assert!(matches!(err, Error::InvalidInput(_)));
  let err = directory::create(&s, "Jane", "   ").await.unwrap_err();
  assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn get_unknown_employee_is_not_found() {
  let s = store().await;
  let err = directory::get_by_email(&s, "ghost@x.com").await.unwrap_err();
  assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn update_status_toggles_and_list_filters() {
  let s = store().await;
  directory::create(&s, "Jane", "jane@x.com").await.unwrap();
  directory::create(&s, "Raj", "raj@x.com").await.unwrap();

  let updated =
    directory::update_status(&s, "JANE@X.COM", EmployeeStatus::Inactive)
      .await
      .unwrap();
  assert_eq!(updated.status, EmployeeStatus::Inactive);

  let all = directory::list(&s, None).await.unwrap();
  assert_eq!(all.len(), 2);
  // Creation order.
  assert_eq!(all[0].email, "jane@x.com");
  assert_eq!(all[1].email, "raj@x.com");

  let active = directory::list(&s, Some(EmployeeStatus::Active)).await.unwrap();
  assert_eq!(active.len(), 1);
  assert_eq!(active[0].email, "raj@x.com");

  let err = directory::update_status(&s, "ghost@x.com", EmployeeStatus::Active)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound(_)));
}

// ─── Asset registry ──────────────────────────────────────────────────────────

#[tokio::test]
async fn create_asset_applies_defaults() {
  let s = store().await;

  let asset = registry::create(&s, new_asset(" abc-1 ")).await.unwrap();
  assert_eq!(asset.asset_id, "ABC-1");
  assert_eq!(asset.kind, "Laptop");
  assert_eq!(asset.os, "Windows");
  assert_eq!(asset.location, "Bangalore");
  assert_eq!(asset.stock_status, StockStatus::InStock);
  assert_eq!(asset.working_status, WorkingStatus::Working);
  assert!(asset.issued_to_email.is_none());
}

#[tokio::test]
async fn create_asset_missing_fields_is_invalid() {
  let s = store().await;
  let mut input = new_asset("ABC-1");
  input.model = "  ".to_string();
  let err = registry::create(&s, input).await.unwrap_err();
  assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn create_asset_rejects_bad_date() {
  let s = store().await;
  let mut input = new_asset("ABC-1");
  input.date_of_purchase = "not-a-date".to_string();
  let err = registry::create(&s, input).await.unwrap_err();
  assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn create_asset_accepts_full_timestamp() {
  let s = store().await;
  let mut input = new_asset("ABC-1");
  input.date_of_purchase = "2024-01-01T10:00:00Z".to_string();
  let asset = registry::create(&s, input).await.unwrap();
  assert_eq!(asset.date_of_purchase.to_string(), "2024-01-01");
}

#[tokio::test]
async fn duplicate_asset_id_conflicts_across_case() {
  let s = store().await;
  registry::create(&s, new_asset("ABC-1")).await.unwrap();
  let err = registry::create(&s, new_asset(" abc-1")).await.unwrap_err();
  assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn get_unknown_asset_is_not_found() {
  let s = store().await;
  let err = registry::get_by_id(&s, "GHOST-1").await.unwrap_err();
  assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn list_assets_filters_combine() {
  let s = store().await;
  registry::create(&s, new_asset("A-1")).await.unwrap();
  let mut chennai = new_asset("A-2");
  chennai.location = Some("Chennai".to_string());
  registry::create(&s, chennai).await.unwrap();
  registry::create(&s, new_asset("A-3")).await.unwrap();
  directory::create(&s, "Jane", "jane@x.com").await.unwrap();
  lifecycle::issue(&s, issue_req("A-3", "jane@x.com")).await.unwrap();

  let all = registry::list(&s, &AssetFilter::default()).await.unwrap();
  assert_eq!(all.len(), 3);
  // Creation order.
  assert_eq!(all[0].asset_id, "A-1");

  let in_stock = registry::list(
    &s,
    &AssetFilter { stock_status: Some(StockStatus::InStock), ..Default::default() },
  )
  .await
  .unwrap();
  assert_eq!(in_stock.len(), 2);

  let filtered = registry::list(
    &s,
    &AssetFilter {
      stock_status: Some(StockStatus::InStock),
      location:     Some("Chennai".to_string()),
    },
  )
  .await
  .unwrap();
  assert_eq!(filtered.len(), 1);
  assert_eq!(filtered[0].asset_id, "A-2");

  let none = registry::list(
    &s,
    &AssetFilter { location: Some("Pune".to_string()), ..Default::default() },
  )
  .await
  .unwrap();
  assert!(none.is_empty());
}

// ─── Issue ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn issue_moves_asset_to_employee() {
  let s = store().await;
  registry::create(&s, new_asset("ABC-1")).await.unwrap();
  directory::create(&s, "Jane", "JANE@X.COM").await.unwrap();

  // Sloppy identifiers on purpose: normalization applies everywhere.
  let out = lifecycle::issue(&s, issue_req("abc-1", "Jane@x.com"))
    .await
    .unwrap();

  assert_eq!(out.asset.asset.stock_status, StockStatus::Issued);
  assert_eq!(out.asset.asset.location, WITH_EMPLOYEE);
  assert_eq!(out.asset.asset.issued_to_email.as_deref(), Some("jane@x.com"));

  let h = out.asset.current_holder.as_ref().expect("holder");
  assert_eq!(h.email, "jane@x.com");
  assert_eq!(h.name, "Jane");

  assert_eq!(out.transaction.kind, TransactionKind::Issue);
  assert_eq!(out.transaction.reason_type, "New Employee");
  assert_eq!(out.transaction.comments, "");
  assert_eq!(out.transaction.from_location, "Bangalore");
  assert_eq!(out.transaction.to_location, WITH_EMPLOYEE);

  let entries = ledger::list_for_asset(&s, "abc-1").await.unwrap();
  assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn issue_unknown_asset_or_employee_is_not_found() {
  let s = store().await;
  registry::create(&s, new_asset("ABC-1")).await.unwrap();

  let err = lifecycle::issue(&s, issue_req("GHOST-1", "jane@x.com"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound(_)));

  let err = lifecycle::issue(&s, issue_req("ABC-1", "ghost@x.com"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn issue_to_inactive_employee_is_rejected() {
  let s = store().await;
  registry::create(&s, new_asset("ABC-1")).await.unwrap();
  directory::create(&s, "Jane", "jane@x.com").await.unwrap();
  directory::update_status(&s, "jane@x.com", EmployeeStatus::Inactive)
    .await
    .unwrap();

  let err = lifecycle::issue(&s, issue_req("ABC-1", "jane@x.com"))
    .await
    .unwrap_err();
  assert!(
    matches!(&err, Error::InvalidState(m) if m == "Employee is not Active.")
  );
}

#[tokio::test]
async fn issue_already_issued_asset_is_rejected_without_ledger_growth() {
  let s = store().await;
  registry::create(&s, new_asset("ABC-1")).await.unwrap();
  directory::create(&s, "Jane", "jane@x.com").await.unwrap();
  directory::create(&s, "Raj", "raj@x.com").await.unwrap();
  lifecycle::issue(&s, issue_req("ABC-1", "jane@x.com")).await.unwrap();

  let err = lifecycle::issue(&s, issue_req("ABC-1", "raj@x.com"))
    .await
    .unwrap_err();
  assert!(
    matches!(&err, Error::InvalidState(m) if m == "Asset is not In-Stock.")
  );

  let entries = ledger::list_for_asset(&s, "ABC-1").await.unwrap();
  assert_eq!(entries.len(), 1, "failed issue must not append");
}

#[tokio::test]
async fn issue_not_working_asset_is_rejected() {
  let s = store().await;
  registry::create(&s, new_asset("ABC-1")).await.unwrap();
  directory::create(&s, "Jane", "jane@x.com").await.unwrap();

  // Cycle the asset through a faulty return to flip working status.
  lifecycle::issue(&s, issue_req("ABC-1", "jane@x.com")).await.unwrap();
  let mut ret = return_req("ABC-1", "jane@x.com");
  ret.reason_type = Some("Not Working".to_string());
  let out = lifecycle::return_asset(&s, ret).await.unwrap();
  assert_eq!(out.asset.asset.working_status, WorkingStatus::NotWorking);

  let err = lifecycle::issue(&s, issue_req("ABC-1", "jane@x.com"))
    .await
    .unwrap_err();
  assert!(
    matches!(&err, Error::InvalidState(m) if m == "Asset is not in Working status.")
  );
}

// ─── Return ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn issue_then_return_restores_stock() {
  let s = store().await;
  registry::create(&s, new_asset("ABC-1")).await.unwrap();
  directory::create(&s, "Jane", "jane@x.com").await.unwrap();

  lifecycle::issue(&s, issue_req("ABC-1", "jane@x.com")).await.unwrap();
  let out = lifecycle::return_asset(&s, return_req("abc-1", "JANE@X.COM"))
    .await
    .unwrap();

  assert_eq!(out.asset.asset.stock_status, StockStatus::InStock);
  assert_eq!(out.asset.asset.location, "Bangalore");
  assert!(out.asset.asset.issued_to_email.is_none());
  assert!(out.asset.current_holder.is_none());
  assert_eq!(out.transaction.kind, TransactionKind::Return);
  assert_eq!(out.transaction.reason_type, "Return");
  assert_eq!(out.transaction.from_location, WITH_EMPLOYEE);

  let entries = ledger::list_for_asset(&s, "ABC-1").await.unwrap();
  assert_eq!(entries.len(), 2);
  assert_eq!(entries[0].kind, TransactionKind::Issue);
  assert_eq!(entries[1].kind, TransactionKind::Return);
  assert_eq!(entries[0].asset_id, entries[1].asset_id);
}

#[tokio::test]
async fn return_honours_supplied_location() {
  let s = store().await;
  registry::create(&s, new_asset("ABC-1")).await.unwrap();
  directory::create(&s, "Jane", "jane@x.com").await.unwrap();
  lifecycle::issue(&s, issue_req("ABC-1", "jane@x.com")).await.unwrap();

  let mut ret = return_req("ABC-1", "jane@x.com");
  ret.return_location = Some("Chennai".to_string());
  let out = lifecycle::return_asset(&s, ret).await.unwrap();
  assert_eq!(out.asset.asset.location, "Chennai");
  assert_eq!(out.transaction.to_location, "Chennai");
}

#[tokio::test]
async fn return_by_wrong_employee_is_rejected_unchanged() {
  let s = store().await;
  registry::create(&s, new_asset("ABC-1")).await.unwrap();
  directory::create(&s, "Jane", "jane@x.com").await.unwrap();
  directory::create(&s, "Raj", "other@x.com").await.unwrap();
  lifecycle::issue(&s, issue_req("ABC-1", "jane@x.com")).await.unwrap();

  let err = lifecycle::return_asset(&s, return_req("abc-1", "other@x.com"))
    .await
    .unwrap_err();
  assert!(matches!(&err, Error::InvalidState(m) if m.contains("not currently issued to this employee")));

  let asset = registry::get_by_id(&s, "ABC-1").await.unwrap();
  assert_eq!(asset.asset.stock_status, StockStatus::Issued);
  assert_eq!(asset.asset.issued_to_email.as_deref(), Some("jane@x.com"));
  assert_eq!(ledger::list_for_asset(&s, "ABC-1").await.unwrap().len(), 1);
}

#[tokio::test]
async fn return_of_unissued_asset_is_rejected() {
  let s = store().await;
  registry::create(&s, new_asset("ABC-1")).await.unwrap();
  directory::create(&s, "Jane", "jane@x.com").await.unwrap();

  let err = lifecycle::return_asset(&s, return_req("ABC-1", "jane@x.com"))
    .await
    .unwrap_err();
  assert!(
    matches!(&err, Error::InvalidState(m) if m == "This asset is not currently issued.")
  );
}

#[tokio::test]
async fn inactive_employee_can_still_return() {
  let s = store().await;
  registry::create(&s, new_asset("ABC-1")).await.unwrap();
  directory::create(&s, "Jane", "jane@x.com").await.unwrap();
  lifecycle::issue(&s, issue_req("ABC-1", "jane@x.com")).await.unwrap();
  directory::update_status(&s, "jane@x.com", EmployeeStatus::Inactive)
    .await
    .unwrap();

  let out = lifecycle::return_asset(&s, return_req("ABC-1", "jane@x.com"))
    .await
    .unwrap();
  assert_eq!(out.asset.asset.stock_status, StockStatus::InStock);
}

// ─── Ledger and holder invariants ────────────────────────────────────────────

#[tokio::test]
async fn ledger_alternates_and_orders_ascending() {
  let s = store().await;
  registry::create(&s, new_asset("ABC-1")).await.unwrap();
  directory::create(&s, "Jane", "jane@x.com").await.unwrap();

  for _ in 0..3 {
    lifecycle::issue(&s, issue_req("ABC-1", "jane@x.com")).await.unwrap();
    lifecycle::return_asset(&s, return_req("ABC-1", "jane@x.com"))
      .await
      .unwrap();
  }
  lifecycle::issue(&s, issue_req("ABC-1", "jane@x.com")).await.unwrap();

  let entries = ledger::list_for_asset(&s, "ABC-1").await.unwrap();
  assert_eq!(entries.len(), 7);
  assert_eq!(entries[0].kind, TransactionKind::Issue);
  for pair in entries.windows(2) {
    assert_ne!(pair[0].kind, pair[1].kind, "ledger must alternate");
    assert!(pair[0].timestamp <= pair[1].timestamp);
    assert!(pair[0].id < pair[1].id);
  }
}

#[tokio::test]
async fn holder_always_agrees_with_issued_to_email() {
  let s = store().await;
  registry::create(&s, new_asset("ABC-1")).await.unwrap();
  directory::create(&s, "Jane", "jane@x.com").await.unwrap();

  let check = |s: SqliteStore| async move {
    let a = registry::get_by_id(&s, "ABC-1").await.unwrap();
    let resolved = holder::resolve(&s, "ABC-1").await.unwrap();
    assert_eq!(
      a.asset.stock_status == StockStatus::Issued,
      a.asset.issued_to_email.is_some()
    );
    assert_eq!(
      a.asset.issued_to_email,
      resolved.map(|h| h.email)
    );
  };

  check(s.clone()).await;
  lifecycle::issue(&s, issue_req("ABC-1", "jane@x.com")).await.unwrap();
  check(s.clone()).await;
  lifecycle::return_asset(&s, return_req("ABC-1", "jane@x.com"))
    .await
    .unwrap();
  check(s.clone()).await;
}

#[tokio::test]
async fn reads_are_idempotent() {
  let s = store().await;
  registry::create(&s, new_asset("ABC-1")).await.unwrap();
  directory::create(&s, "Jane", "jane@x.com").await.unwrap();
  lifecycle::issue(&s, issue_req("ABC-1", "jane@x.com")).await.unwrap();

  let a1 = registry::get_by_id(&s, "ABC-1").await.unwrap();
  let a2 = registry::get_by_id(&s, "ABC-1").await.unwrap();
  assert_eq!(a1.asset.id, a2.asset.id);
  assert_eq!(a1.asset.stock_status, a2.asset.stock_status);
  assert_eq!(a1.asset.issued_to_email, a2.asset.issued_to_email);

  let t1 = ledger::list_for_asset(&s, "ABC-1").await.unwrap();
  let t2 = ledger::list_for_asset(&s, "ABC-1").await.unwrap();
  assert_eq!(t1.len(), t2.len());
  assert_eq!(t1[0].id, t2[0].id);
  assert_eq!(t1[0].timestamp, t2[0].timestamp);
}

#[tokio::test]
async fn transactions_for_unknown_asset_are_empty() {
  let s = store().await;
  let entries = ledger::list_for_asset(&s, "ghost-1").await.unwrap();
  assert!(entries.is_empty());

  let err = ledger::list_for_asset(&s, "  ").await.unwrap_err();
  assert!(matches!(err, Error::InvalidInput(_)));
}

// ─── Concurrency ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn concurrent_issues_have_exactly_one_winner() {
  let s = store().await;
  registry::create(&s, new_asset("RACE-1")).await.unwrap();
  directory::create(&s, "Jane", "jane@x.com").await.unwrap();
  directory::create(&s, "Raj", "raj@x.com").await.unwrap();

  let (a, b) = tokio::join!(
    lifecycle::issue(&s, issue_req("RACE-1", "jane@x.com")),
    lifecycle::issue(&s, issue_req("RACE-1", "raj@x.com")),
  );

  let winners = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
  assert_eq!(winners, 1, "exactly one concurrent issue must win");
  for result in [&a, &b] {
    if let Err(e) = result {
      assert!(
        matches!(e, Error::Transient(_) | Error::InvalidState(_)),
        "loser failed with unexpected kind: {e:?}"
      );
    }
  }

  let entries = ledger::list_for_asset(&s, "RACE-1").await.unwrap();
  assert_eq!(entries.len(), 1);
  assert_eq!(entries[0].kind, TransactionKind::Issue);

  let asset = registry::get_by_id(&s, "RACE-1").await.unwrap();
  assert_eq!(
    asset.asset.issued_to_email.as_deref(),
    Some(entries[0].employee_email.as_str())
  );
}
