//! The scan pass: evaluate every employee against a single "today".
//!
//! Order within one employee is fixed: birthday intents, the salary reminder,
//! then the raise. A raise is persisted before its notices are delivered, so
//! a lost notice never causes a second raise on the next pass.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
  Error, Result,
  delivery::{DeliveryReport, deliver},
  employee::{Employee, Role},
  rules::{birthday, salary},
  store::StaffStore,
};

// ─── Report ──────────────────────────────────────────────────────────────────

/// Summary of one pass, logged by the scheduler and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassReport {
  pub today:                      NaiveDate,
  pub admins:                     usize,
  pub employees_scanned:          usize,
  pub raises_applied:             usize,
  pub notifications_created:      usize,
  pub notifications_deduplicated: usize,
  pub notifications_failed:       usize,
  /// Employees whose evaluation hit a storage error.
  pub failures:                   usize,
}

impl PassReport {
  fn new(today: NaiveDate) -> Self {
    Self {
      today,
      admins: 0,
      employees_scanned: 0,
      raises_applied: 0,
      notifications_created: 0,
      notifications_deduplicated: 0,
      notifications_failed: 0,
      failures: 0,
    }
  }

  fn absorb(&mut self, delivery: DeliveryReport) {
    self.notifications_created += delivery.created;
    self.notifications_deduplicated += delivery.deduplicated;
    self.notifications_failed += delivery.failed;
  }
}

// ─── Pass ────────────────────────────────────────────────────────────────────

/// Run one full pass against `store` for `today`.
///
/// Only the initial snapshot load can fail the pass as a whole; errors while
/// evaluating an individual employee are logged and counted in
/// [`PassReport::failures`].
pub async fn run_pass<S: StaffStore>(store: &S, today: NaiveDate) -> Result<PassReport> {
  let admins = store
    .list_employees(Some(Role::Admin))
    .await
    .map_err(Error::store)?;
  let employees = store
    .list_employees(Some(Role::Employee))
    .await
    .map_err(Error::store)?;

  if admins.is_empty() {
    tracing::warn!(%today, "no administrators on record; notices will not be delivered");
  }

  let mut report = PassReport::new(today);
  report.admins = admins.len();

  for employee in &employees {
    evaluate_employee(store, &admins, employee, today, &mut report).await;
    report.employees_scanned += 1;
  }

  tracing::info!(
    %today,
    employees = report.employees_scanned,
    raises = report.raises_applied,
    created = report.notifications_created,
    deduplicated = report.notifications_deduplicated,
    failed = report.notifications_failed,
    failures = report.failures,
    "scan pass finished"
  );

  Ok(report)
}

async fn evaluate_employee<S: StaffStore>(
  store: &S,
  admins: &[Employee],
  employee: &Employee,
  today: NaiveDate,
  report: &mut PassReport,
) {
  if let Some(intent) = birthday::evaluate(employee, today) {
    report.absorb(deliver(store, admins, &intent).await);
  }

  let decision = salary::evaluate(employee, today);

  if let Some(reminder) = &decision.reminder {
    report.absorb(deliver(store, admins, reminder).await);
  }

  let Some(raise) = decision.raise else { return };

  if let Err(e) = store
    .apply_raise(employee.employee_id, raise.new_salary, raise.effective_on)
    .await
  {
    tracing::error!(
      employee = %employee.employee_id,
      new_salary = raise.new_salary,
      error = %e,
      "failed to apply salary raise"
    );
    report.failures += 1;
    return;
  }

  tracing::info!(
    employee = %employee.employee_id,
    old_salary = employee.salary,
    new_salary = raise.new_salary,
    "salary raised"
  );
  report.raises_applied += 1;

  for intent in &raise.intents {
    report.absorb(deliver(store, admins, intent).await);
  }
}

// ─── Scanner ─────────────────────────────────────────────────────────────────

/// Serialises passes over a shared store. The scheduler and the manual API
/// trigger both go through [`Scanner::run`], so two passes never overlap.
pub struct Scanner<S> {
  store: Arc<S>,
  lock:  Mutex<()>,
}

impl<S: StaffStore> Scanner<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store, lock: Mutex::new(()) } }

  pub fn store(&self) -> &Arc<S> { &self.store }

  /// Whether a pass currently holds the lock.
  pub fn is_running(&self) -> bool { self.lock.try_lock().is_err() }

  /// Run a pass for `today`, waiting for any pass already in progress.
  pub async fn run(&self, today: NaiveDate) -> Result<PassReport> {
    let _guard = self.lock.lock().await;
    run_pass(self.store.as_ref(), today).await
  }
}
