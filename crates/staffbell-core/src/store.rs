//! The `StaffStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `staffbell-store-sqlite`).
//! The scan pass, the API and the server depend on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  employee::{Employee, NewEmployee, Role},
  notification::{InsertOutcome, NewNotification, Notification, NotificationType},
};

/// Abstraction over a Staffbell storage backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait StaffStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Employees ─────────────────────────────────────────────────────────

  /// Persist a new employee or administrator record.
  fn add_employee(
    &self,
    input: NewEmployee,
  ) -> impl Future<Output = Result<Employee, Self::Error>> + Send + '_;

  /// Retrieve a record by UUID. Returns `None` if not found.
  fn get_employee(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + '_;

  /// List all records, optionally restricted to one role.
  fn list_employees(
    &self,
    role: Option<Role>,
  ) -> impl Future<Output = Result<Vec<Employee>, Self::Error>> + Send + '_;

  /// Set `salary` and `last_salary_increase_date` in a single row update.
  ///
  /// Returns an error if the employee does not exist.
  fn apply_raise(
    &self,
    employee_id: Uuid,
    new_salary: f64,
    effective_on: NaiveDate,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Notifications ─────────────────────────────────────────────────────

  /// Whether a notification with this dedup key already exists.
  fn notification_exists(
    &self,
    recipient_id: Uuid,
    kind: NotificationType,
    event_date: NaiveDate,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Insert a notification unless its `(recipient_id, kind, event_date)` key
  /// is taken, in which case [`InsertOutcome::AlreadyExists`] is returned and
  /// nothing is written.
  fn insert_notification(
    &self,
    input: NewNotification,
  ) -> impl Future<Output = Result<InsertOutcome, Self::Error>> + Send + '_;

  /// All notifications addressed to `recipient_id`, newest first.
  fn list_notifications(
    &self,
    recipient_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Notification>, Self::Error>> + Send + '_;

  /// Mark one of `recipient_id`'s notifications read. Returns `false` if no
  /// such notification is addressed to that recipient.
  fn mark_notification_read(
    &self,
    recipient_id: Uuid,
    notification_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
