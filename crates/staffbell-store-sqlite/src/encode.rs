//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 with fixed microsecond precision so they sort
//! lexically. Calendar dates are `YYYY-MM-DD`. UUIDs are hyphenated
//! lowercase strings.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use staffbell_core::{
  employee::{Employee, Role},
  notification::{Notification, NotificationType},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ────────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

fn decode_opt_date(s: Option<String>) -> Result<Option<NaiveDate>> {
  s.as_deref().map(decode_date).transpose()
}

// ─── Enums ────────────────────────────────────────────────────────────────────

pub fn encode_role(r: Role) -> &'static str { r.into() }

pub fn decode_role(s: &str) -> Result<Role> {
  s.parse()
    .map_err(|_| staffbell_core::Error::UnknownRole(s.to_owned()).into())
}

pub fn encode_kind(k: NotificationType) -> &'static str { k.into() }

pub fn decode_kind(s: &str) -> Result<NotificationType> {
  s.parse()
    .map_err(|_| staffbell_core::Error::UnknownNotificationType(s.to_owned()).into())
}

// ─── Raw row types ────────────────────────────────────────────────────────────

/// Column list matching [`RawEmployee::from_row`].
pub const EMPLOYEE_COLUMNS: &str = "employee_id, first_name, last_name, email, role, \
   birth_date, hire_date, salary, last_salary_increase_date, created_at";

/// Raw strings from an `employees` row, before domain decoding.
pub struct RawEmployee {
  pub employee_id:               String,
  pub first_name:                String,
  pub last_name:                 String,
  pub email:                     String,
  pub role:                      String,
  pub birth_date:                Option<String>,
  pub hire_date:                 Option<String>,
  pub salary:                    f64,
  pub last_salary_increase_date: Option<String>,
  pub created_at:                String,
}

impl RawEmployee {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      employee_id:               row.get(0)?,
      first_name:                row.get(1)?,
      last_name:                 row.get(2)?,
      email:                     row.get(3)?,
      role:                      row.get(4)?,
      birth_date:                row.get(5)?,
      hire_date:                 row.get(6)?,
      salary:                    row.get(7)?,
      last_salary_increase_date: row.get(8)?,
      created_at:                row.get(9)?,
    })
  }

  pub fn into_employee(self) -> Result<Employee> {
    Ok(Employee {
      employee_id:               decode_uuid(&self.employee_id)?,
      first_name:                self.first_name,
      last_name:                 self.last_name,
      email:                     self.email,
      role:                      decode_role(&self.role)?,
      birth_date:                decode_opt_date(self.birth_date)?,
      hire_date:                 decode_opt_date(self.hire_date)?,
      salary:                    self.salary,
      last_salary_increase_date: decode_opt_date(self.last_salary_increase_date)?,
      created_at:                decode_dt(&self.created_at)?,
    })
  }
}

/// Column list matching [`RawNotification::from_row`].
pub const NOTIFICATION_COLUMNS: &str = "notification_id, recipient_id, related_user_id, \
   kind, message, event_date, is_read, created_at";

pub struct RawNotification {
  pub notification_id: String,
  pub recipient_id:    String,
  pub related_user_id: String,
  pub kind:            String,
  pub message:         String,
  pub event_date:      String,
  pub is_read:         bool,
  pub created_at:      String,
}

impl RawNotification {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      notification_id: row.get(0)?,
      recipient_id:    row.get(1)?,
      related_user_id: row.get(2)?,
      kind:            row.get(3)?,
      message:         row.get(4)?,
      event_date:      row.get(5)?,
      is_read:         row.get(6)?,
      created_at:      row.get(7)?,
    })
  }

  pub fn into_notification(self) -> Result<Notification> {
    Ok(Notification {
      notification_id: decode_uuid(&self.notification_id)?,
      recipient_id:    decode_uuid(&self.recipient_id)?,
      related_user_id: decode_uuid(&self.related_user_id)?,
      kind:            decode_kind(&self.kind)?,
      message:         self.message,
      event_date:      decode_date(&self.event_date)?,
      is_read:         self.is_read,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}
