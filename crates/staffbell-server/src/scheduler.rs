//! Cron-driven trigger for the daily scan pass.
//!
//! The schedule is a 5-field cron expression evaluated in a configured
//! timezone. "Today" for each pass is the scheduled fire time's date in that
//! zone, so a pass that starts a little late still scans the intended day.

use std::{str::FromStr, sync::Arc};

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use cron::Schedule;
use staffbell_core::{scan::Scanner, store::StaffStore};
use thiserror::Error;

use crate::ScheduleConfig;

#[derive(Debug, Error)]
pub enum SchedulerError {
  #[error("invalid cron expression {expr:?}: {source}")]
  InvalidCron {
    expr:   String,
    #[source]
    source: cron::error::Error,
  },

  #[error("invalid timezone: {0:?}")]
  InvalidTimezone(String),
}

/// Parse a 5-field cron expression.
pub fn parse_cron(expr: &str) -> Result<Schedule, SchedulerError> {
  // The cron crate expects a leading seconds field.
  Schedule::from_str(&format!("0 {expr}")).map_err(|source| SchedulerError::InvalidCron {
    expr: expr.to_owned(),
    source,
  })
}

pub fn parse_timezone(name: &str) -> Result<Tz, SchedulerError> {
  name
    .parse::<Tz>()
    .map_err(|_| SchedulerError::InvalidTimezone(name.to_owned()))
}

pub struct Scheduler<S> {
  scanner:  Arc<Scanner<S>>,
  schedule: Schedule,
  timezone: Tz,
}

impl<S: StaffStore> Scheduler<S> {
  pub fn new(scanner: Arc<Scanner<S>>, config: &ScheduleConfig) -> Result<Self, SchedulerError> {
    Ok(Self {
      scanner,
      schedule: parse_cron(&config.cron)?,
      timezone: parse_timezone(&config.timezone)?,
    })
  }

  /// The first fire time strictly after `after`.
  pub fn next_fire(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
    self
      .schedule
      .after(&after.with_timezone(&self.timezone))
      .next()
      .map(|t| t.with_timezone(&Utc))
  }

  /// The calendar date of `at` in the configured zone.
  pub fn today_at(&self, at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&self.timezone).date_naive()
  }

  /// Run one pass for the date of `at`. Failures are logged, never returned.
  pub async fn fire(&self, at: DateTime<Utc>) {
    let today = self.today_at(at);
    match self.scanner.run(today).await {
      Ok(report) => tracing::info!(
        %today,
        employees = report.employees_scanned,
        raises = report.raises_applied,
        created = report.notifications_created,
        "scheduled scan pass complete"
      ),
      Err(e) => tracing::error!(%today, error = %e, "scheduled scan pass failed"),
    }
  }

  /// Sleep until each fire time and run a pass. Runs until the schedule has
  /// no further fire times.
  pub async fn run(self) {
    loop {
      let now = Utc::now();
      let Some(next) = self.next_fire(now) else {
        tracing::warn!("schedule has no upcoming fire times; scheduler stopping");
        return;
      };

      tracing::info!(next = %next, "next scan pass scheduled");
      let wait = (next - now).to_std().unwrap_or_default();
      tokio::time::sleep(wait).await;

      self.fire(next).await;
    }
  }
}
