//! Deduplication gate and notification sink.
//!
//! Every intent fans out to all administrators. For each one the gate checks
//! the `(recipient_id, kind, event_date)` key before inserting; backends also
//! enforce the key on insert, so a check-then-insert race resolves to
//! [`InsertOutcome::AlreadyExists`] rather than a duplicate row.

use serde::Serialize;
use uuid::Uuid;

use crate::{
  employee::Employee,
  notification::{InsertOutcome, NotificationIntent},
  store::StaffStore,
};

/// Delivery counts for one intent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
  pub created:      usize,
  pub deduplicated: usize,
  pub failed:       usize,
}

/// Deliver `intent` to every admin in `admins`.
///
/// A failure for one recipient is logged and does not stop delivery to the
/// rest.
pub async fn deliver<S: StaffStore>(
  store: &S,
  admins: &[Employee],
  intent: &NotificationIntent,
) -> DeliveryReport {
  let mut report = DeliveryReport::default();

  for admin in admins {
    match deliver_one(store, admin.employee_id, intent).await {
      Ok(InsertOutcome::Inserted(n)) => {
        tracing::debug!(
          notification_id = %n.notification_id,
          recipient = %admin.employee_id,
          kind = %intent.kind,
          "notification created"
        );
        report.created += 1;
      }
      Ok(InsertOutcome::AlreadyExists) => report.deduplicated += 1,
      Err(e) => {
        tracing::warn!(
          recipient = %admin.employee_id,
          related = %intent.related_user_id,
          kind = %intent.kind,
          event_date = %intent.event_date,
          error = %e,
          "failed to deliver notification"
        );
        report.failed += 1;
      }
    }
  }

  report
}

async fn deliver_one<S: StaffStore>(
  store: &S,
  recipient_id: Uuid,
  intent: &NotificationIntent,
) -> Result<InsertOutcome, S::Error> {
  if store
    .notification_exists(recipient_id, intent.kind, intent.event_date)
    .await?
  {
    return Ok(InsertOutcome::AlreadyExists);
  }
  store.insert_notification(intent.to_recipient(recipient_id)).await
}
