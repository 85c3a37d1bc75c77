//! Error type for `staffbell-store-sqlite`.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] staffbell_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("employee not found: {0}")]
  EmployeeNotFound(uuid::Uuid),

  #[error("an employee with email {0:?} already exists")]
  DuplicateEmail(String),

  /// A raise dated before the employee's current `last_salary_increase_date`.
  #[error("raise for {employee_id} on {effective_on} predates the last recorded raise")]
  StaleRaise {
    employee_id:  uuid::Uuid,
    effective_on: NaiveDate,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
