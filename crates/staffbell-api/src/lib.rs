//! JSON REST API for Staffbell.
//!
//! Exposes an axum [`Router`] backed by any [`StaffStore`]. Auth, TLS, and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", staffbell_api::api_router(scanner.clone(), chrono_tz::UTC))
//! ```

pub mod employees;
pub mod error;
pub mod notifications;
pub mod scan;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use chrono_tz::Tz;
use staffbell_core::{scan::Scanner, store::StaffStore};

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:    Arc<S>,
  pub scanner:  Arc<Scanner<S>>,
  /// Zone used to derive "today" for manual passes.
  pub timezone: Tz,
}

// Manual impl: `S` itself need not be `Clone`.
impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:    self.store.clone(),
      scanner:  self.scanner.clone(),
      timezone: self.timezone,
    }
  }
}

/// Build the API router around `scanner` and its store.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(scanner: Arc<Scanner<S>>, timezone: Tz) -> Router<()>
where
  S: StaffStore + 'static,
{
  let state = ApiState { store: scanner.store().clone(), scanner, timezone };

  Router::new()
    // Employees
    .route("/employees", get(employees::list::<S>).post(employees::create::<S>))
    .route("/employees/{id}", get(employees::get_one::<S>))
    // Notifications
    .route("/notifications", get(notifications::list::<S>))
    .route("/notifications/{id}/read", post(notifications::mark_read::<S>))
    // Scan
    .route("/scan", post(scan::trigger::<S>))
    .with_state(state)
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use chrono::NaiveDate;
  use serde_json::{Value, json};
  use staffbell_core::{
    employee::{NewEmployee, Role},
    notification::{InsertOutcome, NewNotification, NotificationType},
  };
  use staffbell_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;
  use uuid::Uuid;

  async fn make_scanner() -> Arc<Scanner<SqliteStore>> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    Arc::new(Scanner::new(Arc::new(store)))
  }

  async fn send(
    scanner: &Arc<Scanner<SqliteStore>>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    api_router(scanner.clone(), chrono_tz::UTC)
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap()
  }

  async fn json_body(res: Response) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  async fn add_admin(scanner: &Arc<Scanner<SqliteStore>>) -> Uuid {
    scanner
      .store()
      .add_employee(NewEmployee::new("Root", "Admin", "root@example.com").with_role(Role::Admin))
      .await
      .unwrap()
      .employee_id
  }

  // ── Employees ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_then_get_employee() {
    let scanner = make_scanner().await;
    let res = send(
      &scanner,
      "POST",
      "/employees",
      Some(json!({
        "first_name": "Ken",
        "last_name": "Thompson",
        "email": "ken@example.com",
        "birth_date": "1943-02-04",
        "hire_date": "2024-03-01"
      })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = json_body(res).await;
    assert_eq!(created["role"], "employee");
    assert_eq!(created["salary"], 400.0);

    let id = created["employee_id"].as_str().unwrap();
    let res = send(&scanner, "GET", &format!("/employees/{id}"), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await["email"], "ken@example.com");
  }

  #[tokio::test]
  async fn create_with_negative_salary_is_bad_request() {
    let scanner = make_scanner().await;
    let res = send(
      &scanner,
      "POST",
      "/employees",
      Some(json!({ "first_name": "A", "last_name": "B", "email": "x@y.z", "salary": -1 })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn create_above_salary_cap_is_bad_request() {
    let scanner = make_scanner().await;
    let res = send(
      &scanner,
      "POST",
      "/employees",
      Some(json!({ "first_name": "A", "last_name": "B", "email": "x@y.z", "salary": 2000 })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(scanner.store().list_employees(None).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn missing_employee_is_not_found() {
    let scanner = make_scanner().await;
    let res = send(&scanner, "GET", &format!("/employees/{}", Uuid::new_v4()), None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(json_body(res).await["error"].is_string());
  }

  #[tokio::test]
  async fn list_employees_by_role() {
    let scanner = make_scanner().await;
    add_admin(&scanner).await;
    scanner
      .store()
      .add_employee(NewEmployee::new("E", "One", "e1@example.com"))
      .await
      .unwrap();

    let res = send(&scanner, "GET", "/employees?role=admin", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["role"], "admin");
  }

  // ── Notifications ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn employees_have_no_inbox() {
    let scanner = make_scanner().await;
    let e = scanner
      .store()
      .add_employee(NewEmployee::new("E", "Two", "e2@example.com"))
      .await
      .unwrap();
    let res = send(
      &scanner,
      "GET",
      &format!("/notifications?recipient_id={}", e.employee_id),
      None,
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
  }

  #[tokio::test]
  async fn mark_read_round_trip() {
    let scanner = make_scanner().await;
    let admin = add_admin(&scanner).await;
    let outcome = scanner
      .store()
      .insert_notification(NewNotification {
        recipient_id:    admin,
        related_user_id: admin,
        kind:            NotificationType::Welcome,
        message:         "welcome".into(),
        event_date:      NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
      })
      .await
      .unwrap();
    let InsertOutcome::Inserted(n) = outcome else { panic!("expected insert") };

    let uri = format!("/notifications/{}/read?recipient_id={admin}", n.notification_id);
    let res = send(&scanner, "POST", &uri, None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = send(&scanner, "GET", &format!("/notifications?recipient_id={admin}"), None).await;
    let inbox = json_body(res).await;
    assert_eq!(inbox[0]["is_read"], true);
    assert_eq!(inbox[0]["type"], "welcome");

    let uri = format!("/notifications/{}/read?recipient_id={admin}", Uuid::new_v4());
    let res = send(&scanner, "POST", &uri, None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
  }

  // ── Scan ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn manual_scan_uses_given_date() {
    let scanner = make_scanner().await;
    let admin = add_admin(&scanner).await;
    let mut due = NewEmployee::new("Due", "Raise", "due@example.com");
    due.hire_date = NaiveDate::from_ymd_opt(2024, 1, 1);
    scanner.store().add_employee(due).await.unwrap();

    let res = send(&scanner, "POST", "/scan?today=2025-09-10", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let report = json_body(res).await;
    assert_eq!(report["today"], "2025-09-10");
    assert_eq!(report["raises_applied"], 1);
    assert_eq!(report["notifications_created"], 1);

    let inbox = scanner.store().list_notifications(admin).await.unwrap();
    assert_eq!(inbox[0].kind, NotificationType::SalaryIncreased);
  }
}
