//! Birthday rule: a reminder thirty days ahead and a notice on the day.

use chrono::{Datelike, NaiveDate};

use super::REMINDER_LEAD_DAYS;
use crate::{
  employee::Employee,
  notification::{NotificationIntent, NotificationType},
};

/// The birthday's occurrence in `year`. A Feb 29 birthday falls on March 1 in
/// non-leap years.
fn occurrence_in(birth_date: NaiveDate, year: i32) -> Option<NaiveDate> {
  NaiveDate::from_ymd_opt(year, birth_date.month(), birth_date.day())
    .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

/// The first occurrence of the birthday on or after `today`.
///
/// Returns `None` only at the edges of the representable calendar.
pub fn next_occurrence(birth_date: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
  let this_year = occurrence_in(birth_date, today.year())?;
  if this_year < today {
    occurrence_in(birth_date, today.year() + 1)
  } else {
    Some(this_year)
  }
}

pub fn evaluate(employee: &Employee, today: NaiveDate) -> Option<NotificationIntent> {
  let birth_date = employee.birth_date?;
  let occurrence = next_occurrence(birth_date, today)?;
  let name = employee.full_name();

  let (kind, message) = match (occurrence - today).num_days() {
    REMINDER_LEAD_DAYS => (
      NotificationType::BirthdayReminder,
      format!("{name}'s birthday is in one month"),
    ),
    0 => (NotificationType::Birthday, format!("Today is {name}'s birthday")),
    _ => return None,
  };

  Some(NotificationIntent {
    kind,
    event_date: occurrence,
    related_user_id: employee.employee_id,
    message,
  })
}
