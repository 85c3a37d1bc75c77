//! Employee records: the subset of a staff profile the notifier reads.
//!
//! Records are created by HR-facing surfaces. The scan pass only ever writes
//! `salary` and `last_salary_increase_date`, and only through
//! [`crate::store::StaffStore::apply_raise`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Salary constants ────────────────────────────────────────────────────────

/// The progression rule never sets a salary above this value.
pub const SALARY_CAP: f64 = 1500.0;

/// Amount added by one automatic raise.
pub const SALARY_STEP: f64 = 200.0;

/// A raise landing at or above this value also fires a threshold notice.
pub const SALARY_THRESHOLD: f64 = 1400.0;

/// Starting salary for records registered without one.
pub const DEFAULT_SALARY: f64 = 400.0;

// ─── Role ────────────────────────────────────────────────────────────────────

/// Only `Employee` records take part in salary progression; only `Admin`
/// records receive notifications.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
  #[default]
  Employee,
  Admin,
}

// ─── Employee ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
  pub employee_id:               Uuid,
  pub first_name:                String,
  pub last_name:                 String,
  pub email:                     String,
  pub role:                      Role,
  /// Only month and day matter to the birthday rule.
  pub birth_date:                Option<NaiveDate>,
  pub hire_date:                 Option<NaiveDate>,
  pub salary:                    f64,
  /// `None` until the first raise; progression then counts from `hire_date`.
  pub last_salary_increase_date: Option<NaiveDate>,
  pub created_at:                DateTime<Utc>,
}

impl Employee {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }

  pub fn is_admin(&self) -> bool { self.role == Role::Admin }

  /// The date six-month progression is counted from.
  pub fn progression_basis(&self) -> Option<NaiveDate> {
    self.last_salary_increase_date.or(self.hire_date)
  }
}

// ─── NewEmployee ─────────────────────────────────────────────────────────────

/// Input to [`crate::store::StaffStore::add_employee`].
/// `employee_id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
  pub first_name:                String,
  pub last_name:                 String,
  pub email:                     String,
  #[serde(default)]
  pub role:                      Role,
  #[serde(default)]
  pub birth_date:                Option<NaiveDate>,
  #[serde(default)]
  pub hire_date:                 Option<NaiveDate>,
  #[serde(default = "default_salary")]
  pub salary:                    f64,
  #[serde(default)]
  pub last_salary_increase_date: Option<NaiveDate>,
}

fn default_salary() -> f64 { DEFAULT_SALARY }

impl NewEmployee {
  /// Convenience constructor with every optional field at its default.
  pub fn new(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    email: impl Into<String>,
  ) -> Self {
    Self {
      first_name: first_name.into(),
      last_name: last_name.into(),
      email: email.into(),
      role: Role::default(),
      birth_date: None,
      hire_date: None,
      salary: DEFAULT_SALARY,
      last_salary_increase_date: None,
    }
  }

  pub fn with_role(mut self, role: Role) -> Self {
    self.role = role;
    self
  }

  /// Reject salaries outside `0..=SALARY_CAP`.
  pub fn validate(&self) -> Result<()> {
    if !(0.0..=SALARY_CAP).contains(&self.salary) {
      return Err(Error::InvalidSalary(self.salary));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> Employee {
    Employee {
      employee_id:               Uuid::new_v4(),
      first_name:                "Ada".into(),
      last_name:                 "Lovelace".into(),
      email:                     "ada@example.com".into(),
      role:                      Role::Employee,
      birth_date:                None,
      hire_date:                 NaiveDate::from_ymd_opt(2024, 1, 15),
      salary:                    DEFAULT_SALARY,
      last_salary_increase_date: None,
      created_at:                Utc::now(),
    }
  }

  #[test]
  fn progression_basis_falls_back_to_hire_date() {
    let mut e = sample();
    assert_eq!(e.progression_basis(), NaiveDate::from_ymd_opt(2024, 1, 15));

    e.last_salary_increase_date = NaiveDate::from_ymd_opt(2024, 7, 15);
    assert_eq!(e.progression_basis(), NaiveDate::from_ymd_opt(2024, 7, 15));
  }

  #[test]
  fn role_text_form_is_lowercase() {
    assert_eq!(Role::Admin.to_string(), "admin");
    assert_eq!("employee".parse::<Role>().unwrap(), Role::Employee);
    assert!("manager".parse::<Role>().is_err());
  }

  #[test]
  fn validate_rejects_negative_salary() {
    let mut input = NewEmployee::new("A", "B", "a@b.c");
    assert!(input.validate().is_ok());
    input.salary = -1.0;
    assert!(matches!(input.validate(), Err(Error::InvalidSalary(_))));
    input.salary = f64::NAN;
    assert!(matches!(input.validate(), Err(Error::InvalidSalary(_))));
  }

  #[test]
  fn validate_enforces_the_cap() {
    let mut input = NewEmployee::new("A", "B", "a@b.c");
    input.salary = SALARY_CAP;
    assert!(input.validate().is_ok());
    input.salary = 2000.0;
    assert!(matches!(input.validate(), Err(Error::InvalidSalary(s)) if s == 2000.0));
    input.salary = f64::INFINITY;
    assert!(matches!(input.validate(), Err(Error::InvalidSalary(_))));
  }

  #[test]
  fn new_employee_defaults_from_json() {
    let input: NewEmployee = serde_json::from_str(
      r#"{"first_name":"A","last_name":"B","email":"a@b.c"}"#,
    )
    .unwrap();
    assert_eq!(input.role, Role::Employee);
    assert_eq!(input.salary, DEFAULT_SALARY);
  }
}
