//! Handlers for `/notifications` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/notifications` | `?recipient_id` required; newest first |
//! | `POST` | `/notifications/:id/read` | `?recipient_id` required; 404 if not theirs |
//!
//! Only administrators have an inbox; any other recipient gets 403.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use staffbell_core::{notification::Notification, store::StaffStore};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct RecipientParams {
  pub recipient_id: Uuid,
}

async fn require_admin<S: StaffStore>(store: &S, recipient_id: Uuid) -> Result<(), ApiError> {
  let recipient = store
    .get_employee(recipient_id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("employee {recipient_id} not found")))?;
  if !recipient.is_admin() {
    return Err(ApiError::Forbidden("only administrators receive notifications".into()));
  }
  Ok(())
}

/// `GET /notifications?recipient_id=<id>`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<RecipientParams>,
) -> Result<Json<Vec<Notification>>, ApiError>
where
  S: StaffStore,
{
  require_admin(state.store.as_ref(), params.recipient_id).await?;
  let notifications = state
    .store
    .list_notifications(params.recipient_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(notifications))
}

/// `POST /notifications/:id/read?recipient_id=<id>`
pub async fn mark_read<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Query(params): Query<RecipientParams>,
) -> Result<Json<Value>, ApiError>
where
  S: StaffStore,
{
  require_admin(state.store.as_ref(), params.recipient_id).await?;
  let found = state
    .store
    .mark_notification_read(params.recipient_id, id)
    .await
    .map_err(ApiError::store)?;
  if !found {
    return Err(ApiError::NotFound(format!("notification {id} not found")));
  }
  Ok(Json(json!({ "notification_id": id, "is_read": true })))
}
