//! [`SqliteStore`], the SQLite implementation of [`StaffStore`].

use std::path::Path;

use chrono::{NaiveDate, Utc};
use rusqlite::{ErrorCode, OptionalExtension as _};
use uuid::Uuid;

use staffbell_core::{
  employee::{Employee, NewEmployee, Role},
  notification::{InsertOutcome, NewNotification, Notification, NotificationType},
  store::StaffStore,
};

use crate::{
  Error, Result,
  encode::{
    EMPLOYEE_COLUMNS, NOTIFICATION_COLUMNS, RawEmployee, RawNotification, encode_date,
    encode_dt, encode_kind, encode_role, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Staffbell store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn employee_exists(&self, employee_id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(employee_id);
    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM employees WHERE employee_id = ?1",
              rusqlite::params![id_str],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }
}

/// Whether `err` is a UNIQUE/CHECK constraint violation reported by SQLite.
fn is_constraint_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.code == ErrorCode::ConstraintViolation
  )
}

// ─── StaffStore impl ─────────────────────────────────────────────────────────

impl StaffStore for SqliteStore {
  type Error = Error;

  // ── Employees ─────────────────────────────────────────────────────────────

  async fn add_employee(&self, input: NewEmployee) -> Result<Employee> {
    input.validate()?;

    let employee = Employee {
      employee_id:               Uuid::new_v4(),
      first_name:                input.first_name,
      last_name:                 input.last_name,
      email:                     input.email,
      role:                      input.role,
      birth_date:                input.birth_date,
      hire_date:                 input.hire_date,
      salary:                    input.salary,
      last_salary_increase_date: input.last_salary_increase_date,
      created_at:                Utc::now(),
    };

    let id_str         = encode_uuid(employee.employee_id);
    let first_name     = employee.first_name.clone();
    let last_name      = employee.last_name.clone();
    let email          = employee.email.clone();
    let role_str       = encode_role(employee.role).to_owned();
    let birth_str      = employee.birth_date.map(encode_date);
    let hire_str       = employee.hire_date.map(encode_date);
    let salary         = employee.salary;
    let last_raise_str = employee.last_salary_increase_date.map(encode_date);
    let at_str         = encode_dt(employee.created_at);

    let inserted = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO employees (
             employee_id, first_name, last_name, email, role,
             birth_date, hire_date, salary, last_salary_increase_date, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            id_str,
            first_name,
            last_name,
            email,
            role_str,
            birth_str,
            hire_str,
            salary,
            last_raise_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await;

    match inserted {
      Ok(()) => Ok(employee),
      Err(e) if is_constraint_violation(&e) => Err(Error::DuplicateEmail(employee.email)),
      Err(e) => Err(e.into()),
    }
  }

  async fn get_employee(&self, id: Uuid) -> Result<Option<Employee>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawEmployee> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE employee_id = ?1"),
              rusqlite::params![id_str],
              RawEmployee::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawEmployee::into_employee).transpose()
  }

  async fn list_employees(&self, role: Option<Role>) -> Result<Vec<Employee>> {
    let role_str = role.map(encode_role).map(str::to_owned);

    let raws: Vec<RawEmployee> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(r) = role_str {
          let mut stmt = conn.prepare(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE role = ?1 ORDER BY created_at"
          ))?;
          stmt
            .query_map(rusqlite::params![r], RawEmployee::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY created_at"
          ))?;
          stmt
            .query_map([], RawEmployee::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEmployee::into_employee).collect()
  }

  async fn apply_raise(
    &self,
    employee_id:  Uuid,
    new_salary:   f64,
    effective_on: NaiveDate,
  ) -> Result<()> {
    let id_str   = encode_uuid(employee_id);
    let date_str = encode_date(effective_on);

    // The date guard keeps `last_salary_increase_date` monotonic.
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE employees
             SET salary = ?2, last_salary_increase_date = ?3
           WHERE employee_id = ?1
             AND (last_salary_increase_date IS NULL OR last_salary_increase_date <= ?3)",
          rusqlite::params![id_str, new_salary, date_str],
        )?)
      })
      .await?;

    if changed > 0 {
      return Ok(());
    }
    if self.employee_exists(employee_id).await? {
      Err(Error::StaleRaise { employee_id, effective_on })
    } else {
      Err(Error::EmployeeNotFound(employee_id))
    }
  }

  // ── Notifications ─────────────────────────────────────────────────────────

  async fn notification_exists(
    &self,
    recipient_id: Uuid,
    kind:         NotificationType,
    event_date:   NaiveDate,
  ) -> Result<bool> {
    let recipient_str = encode_uuid(recipient_id);
    let kind_str      = encode_kind(kind).to_owned();
    let date_str      = encode_date(event_date);

    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM notifications
               WHERE recipient_id = ?1 AND kind = ?2 AND event_date = ?3",
              rusqlite::params![recipient_str, kind_str, date_str],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;

    Ok(exists)
  }

  async fn insert_notification(&self, input: NewNotification) -> Result<InsertOutcome> {
    let notification = Notification {
      notification_id: Uuid::new_v4(),
      recipient_id:    input.recipient_id,
      related_user_id: input.related_user_id,
      kind:            input.kind,
      message:         input.message,
      event_date:      input.event_date,
      is_read:         false,
      created_at:      Utc::now(),
    };

    let id_str        = encode_uuid(notification.notification_id);
    let recipient_str = encode_uuid(notification.recipient_id);
    let related_str   = encode_uuid(notification.related_user_id);
    let kind_str      = encode_kind(notification.kind).to_owned();
    let message       = notification.message.clone();
    let date_str      = encode_date(notification.event_date);
    let at_str        = encode_dt(notification.created_at);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT INTO notifications (
             notification_id, recipient_id, related_user_id,
             kind, message, event_date, is_read, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7)
           ON CONFLICT (recipient_id, kind, event_date) DO NOTHING",
          rusqlite::params![
            id_str,
            recipient_str,
            related_str,
            kind_str,
            message,
            date_str,
            at_str,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      Ok(InsertOutcome::AlreadyExists)
    } else {
      Ok(InsertOutcome::Inserted(notification))
    }
  }

  async fn list_notifications(&self, recipient_id: Uuid) -> Result<Vec<Notification>> {
    let recipient_str = encode_uuid(recipient_id);

    let raws: Vec<RawNotification> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {NOTIFICATION_COLUMNS} FROM notifications
           WHERE recipient_id = ?1
           ORDER BY created_at DESC, rowid DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![recipient_str], RawNotification::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNotification::into_notification).collect()
  }

  async fn mark_notification_read(
    &self,
    recipient_id:    Uuid,
    notification_id: Uuid,
  ) -> Result<bool> {
    let recipient_str = encode_uuid(recipient_id);
    let id_str        = encode_uuid(notification_id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE notifications SET is_read = 1
           WHERE notification_id = ?1 AND recipient_id = ?2",
          rusqlite::params![id_str, recipient_str],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }
}
