//! Notification types.
//!
//! Every notification is addressed to an administrator and refers to the
//! employee it concerns through `related_user_id`. At most one notification
//! exists per `(recipient_id, kind, event_date)`; see [`crate::delivery`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use uuid::Uuid;

// ─── Type ────────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationType {
  BirthdayReminder,
  SalaryIncreaseReminder,
  SalaryIncreased,
  SalaryThresholdReached,
  Welcome,
  Birthday,
  UserUpdate,
  EmployeeCreated,
  General,
}

// ─── Intent ──────────────────────────────────────────────────────────────────

/// A candidate notification produced by a rule, not yet addressed to any
/// recipient and not yet checked against existing rows.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationIntent {
  pub kind:            NotificationType,
  /// The date the notice is about (the birthday, the raise), not the date it
  /// was produced.
  pub event_date:      NaiveDate,
  pub related_user_id: Uuid,
  pub message:         String,
}

impl NotificationIntent {
  /// Address this intent to a single recipient.
  pub fn to_recipient(&self, recipient_id: Uuid) -> NewNotification {
    NewNotification {
      recipient_id,
      related_user_id: self.related_user_id,
      kind: self.kind,
      message: self.message.clone(),
      event_date: self.event_date,
    }
  }
}

// ─── Persisted form ──────────────────────────────────────────────────────────

/// Input to [`crate::store::StaffStore::insert_notification`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
  pub recipient_id:    Uuid,
  pub related_user_id: Uuid,
  pub kind:            NotificationType,
  pub message:         String,
  pub event_date:      NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
  pub notification_id: Uuid,
  pub recipient_id:    Uuid,
  pub related_user_id: Uuid,
  #[serde(rename = "type")]
  pub kind:            NotificationType,
  pub message:         String,
  pub event_date:      NaiveDate,
  pub is_read:         bool,
  /// Audit timestamp; set by the store.
  pub created_at:      DateTime<Utc>,
}

/// Result of an insert attempt against the dedup key.
#[derive(Debug, Clone)]
pub enum InsertOutcome {
  Inserted(Notification),
  /// A row with the same `(recipient_id, kind, event_date)` already exists.
  AlreadyExists,
}

impl InsertOutcome {
  pub fn is_inserted(&self) -> bool { matches!(self, Self::Inserted(_)) }
}
