//! Salary progression: one automatic raise every six months, up to the cap.
//!
//! The rule decides; the scan pass persists. A raise is a single step per
//! evaluation even when several periods have elapsed.

use chrono::{Datelike, Days, Months, NaiveDate};

use super::REMINDER_LEAD_DAYS;
use crate::{
  employee::{Employee, SALARY_CAP, SALARY_STEP, SALARY_THRESHOLD},
  notification::{NotificationIntent, NotificationType},
};

/// Months between automatic raises.
pub const PROGRESSION_PERIOD: Months = Months::new(6);

/// A raise the pass must persist before delivering `intents`.
#[derive(Debug, Clone, PartialEq)]
pub struct Raise {
  pub new_salary:   f64,
  /// Becomes the employee's `last_salary_increase_date`.
  pub effective_on: NaiveDate,
  /// `salary_increased`, plus `salary_threshold_reached` when the new salary
  /// is at or above [`SALARY_THRESHOLD`].
  pub intents:      Vec<NotificationIntent>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalaryDecision {
  /// Advisory notice thirty days before the next raise.
  pub reminder: Option<NotificationIntent>,
  pub raise:    Option<Raise>,
}

impl SalaryDecision {
  pub fn is_empty(&self) -> bool { self.reminder.is_none() && self.raise.is_none() }
}

/// `basis` plus six calendar months. A day past the end of the target month
/// rolls over into the following month, so Aug 31 lands on Mar 3 (or Mar 2 in
/// a leap year).
pub fn next_increase_date(basis: NaiveDate) -> Option<NaiveDate> {
  basis
    .with_day(1)?
    .checked_add_months(PROGRESSION_PERIOD)?
    .checked_add_days(Days::new(u64::from(basis.day() - 1)))
}

/// The salary after one raise step from `salary`.
pub fn raised_salary(salary: f64) -> f64 { (salary + SALARY_STEP).min(SALARY_CAP) }

pub fn evaluate(employee: &Employee, today: NaiveDate) -> SalaryDecision {
  let mut decision = SalaryDecision::default();

  let Some(next) = employee.progression_basis().and_then(next_increase_date) else {
    return decision;
  };
  let days_until = (next - today).num_days();
  let name = employee.full_name();

  if days_until == REMINDER_LEAD_DAYS {
    decision.reminder = Some(NotificationIntent {
      kind:            NotificationType::SalaryIncreaseReminder,
      event_date:      next,
      related_user_id: employee.employee_id,
      message:         format!("A salary increase for {name} is scheduled in one month"),
    });
  }

  if days_until <= 0 && employee.salary < SALARY_CAP {
    let new_salary = raised_salary(employee.salary);
    let mut intents = vec![NotificationIntent {
      kind:            NotificationType::SalaryIncreased,
      event_date:      today,
      related_user_id: employee.employee_id,
      message:         format!("{name}'s salary was automatically increased to {new_salary}"),
    }];
    if new_salary >= SALARY_THRESHOLD {
      intents.push(NotificationIntent {
        kind:            NotificationType::SalaryThresholdReached,
        event_date:      today,
        related_user_id: employee.employee_id,
        message:         format!("{name} has reached the salary threshold"),
      });
    }
    decision.raise = Some(Raise { new_salary, effective_on: today, intents });
  }

  decision
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, Utc};
  use uuid::Uuid;

  use super::*;
  use crate::employee::Role;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn employee(salary: f64, last_increase: Option<NaiveDate>, hire: Option<NaiveDate>) -> Employee {
    Employee {
      employee_id: Uuid::new_v4(),
      first_name: "Alan".into(),
      last_name: "Turing".into(),
      email: "alan@example.com".into(),
      role: Role::Employee,
      birth_date: None,
      hire_date: hire,
      salary,
      last_salary_increase_date: last_increase,
      created_at: Utc::now(),
    }
  }

  fn kinds(intents: &[NotificationIntent]) -> Vec<NotificationType> {
    intents.iter().map(|i| i.kind).collect()
  }

  #[test]
  fn six_months_rolls_past_short_month_end() {
    assert_eq!(next_increase_date(date(2024, 8, 31)), Some(date(2025, 3, 3)));
    assert_eq!(next_increase_date(date(2023, 8, 31)), Some(date(2024, 3, 2)));
    assert_eq!(next_increase_date(date(2024, 8, 29)), Some(date(2025, 3, 1)));
    assert_eq!(next_increase_date(date(2023, 8, 29)), Some(date(2024, 2, 29)));
    assert_eq!(next_increase_date(date(2024, 12, 31)), Some(date(2025, 7, 1)));
    assert_eq!(next_increase_date(date(2024, 1, 10)), Some(date(2024, 7, 10)));
  }

  #[test]
  fn month_end_basis_raises_after_the_rollover() {
    let basis = date(2024, 8, 31);
    assert!(evaluate(&employee(600.0, Some(basis), None), date(2025, 2, 28)).raise.is_none());
    assert!(evaluate(&employee(600.0, Some(basis), None), date(2025, 3, 2)).raise.is_none());
    let raise = evaluate(&employee(600.0, Some(basis), None), date(2025, 3, 3)).raise;
    assert_eq!(raise.map(|r| r.effective_on), Some(date(2025, 3, 3)));

    let reminder = evaluate(&employee(600.0, Some(basis), None), date(2025, 2, 1)).reminder;
    assert_eq!(reminder.map(|r| r.event_date), Some(date(2025, 3, 3)));
  }

  #[test]
  fn reminder_fires_thirty_days_before_without_raise() {
    let today = date(2025, 6, 1);
    let basis = date(2025, 1, 1); // next raise 2025-07-01, 30 days away
    let d = evaluate(&employee(600.0, Some(basis), None), today);
    let reminder = d.reminder.expect("reminder");
    assert_eq!(reminder.kind, NotificationType::SalaryIncreaseReminder);
    assert_eq!(reminder.event_date, date(2025, 7, 1));
    assert!(d.raise.is_none());

    assert!(evaluate(&employee(600.0, Some(basis), None), date(2025, 5, 31)).is_empty());
    assert!(evaluate(&employee(600.0, Some(basis), None), date(2025, 6, 2)).is_empty());
  }

  #[test]
  fn raise_fires_on_and_after_due_date() {
    let basis = date(2025, 1, 1);
    assert!(evaluate(&employee(600.0, Some(basis), None), date(2025, 6, 30)).raise.is_none());

    let on_day = evaluate(&employee(600.0, Some(basis), None), date(2025, 7, 1));
    let raise = on_day.raise.expect("raise on due date");
    assert_eq!(raise.new_salary, 800.0);
    assert_eq!(raise.effective_on, date(2025, 7, 1));
    assert_eq!(kinds(&raise.intents), vec![NotificationType::SalaryIncreased]);

    let overdue = evaluate(&employee(600.0, Some(basis), None), date(2026, 9, 1));
    assert_eq!(overdue.raise.expect("single overdue step").new_salary, 800.0);
  }

  #[test]
  fn hire_date_is_the_fallback_basis() {
    let d = evaluate(&employee(400.0, None, Some(date(2024, 1, 1))), date(2024, 7, 1));
    assert_eq!(d.raise.map(|r| r.new_salary), Some(600.0));
  }

  #[test]
  fn no_basis_means_no_decision() {
    assert!(evaluate(&employee(400.0, None, None), date(2030, 1, 1)).is_empty());
  }

  #[test]
  fn raise_is_capped_and_crosses_threshold() {
    let basis = date(2025, 1, 1);
    let today = date(2025, 8, 1);

    let d = evaluate(&employee(1450.0, Some(basis), None), today);
    let raise = d.raise.unwrap();
    assert_eq!(raise.new_salary, SALARY_CAP);
    assert_eq!(
      kinds(&raise.intents),
      vec![NotificationType::SalaryIncreased, NotificationType::SalaryThresholdReached],
    );
    assert!(raise.intents.iter().all(|i| i.event_date == today));
  }

  #[test]
  fn landing_exactly_on_threshold_sends_threshold_notice() {
    let raise = evaluate(&employee(1200.0, Some(date(2025, 1, 1)), None), date(2025, 7, 1))
      .raise
      .unwrap();
    assert_eq!(raise.new_salary, SALARY_THRESHOLD);
    assert_eq!(
      kinds(&raise.intents),
      vec![NotificationType::SalaryIncreased, NotificationType::SalaryThresholdReached],
    );
  }

  #[test]
  fn below_threshold_has_no_threshold_notice() {
    let raise = evaluate(&employee(1000.0, Some(date(2025, 1, 1)), None), date(2025, 7, 1))
      .raise
      .unwrap();
    assert_eq!(raise.new_salary, 1200.0);
    assert_eq!(kinds(&raise.intents), vec![NotificationType::SalaryIncreased]);

    let raise = evaluate(&employee(1199.0, Some(date(2025, 1, 1)), None), date(2025, 7, 1))
      .raise
      .unwrap();
    assert_eq!(raise.new_salary, 1399.0);
    assert_eq!(kinds(&raise.intents), vec![NotificationType::SalaryIncreased]);
  }

  #[test]
  fn capped_employee_never_changes() {
    let basis = date(2020, 1, 1);
    let mut today = date(2020, 1, 1);
    while today < date(2023, 1, 1) {
      assert!(evaluate(&employee(SALARY_CAP, Some(basis), None), today).raise.is_none());
      today += Duration::days(7);
    }
  }

  #[test]
  fn salary_never_exceeds_cap() {
    let mut salary = 0.0;
    for _ in 0..20 {
      salary = raised_salary(salary);
      assert!(salary <= SALARY_CAP);
    }
    assert_eq!(salary, SALARY_CAP);
    assert_eq!(raised_salary(1499.5), SALARY_CAP);
  }
}
