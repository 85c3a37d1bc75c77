//! `POST /scan[?today=YYYY-MM-DD]`: run one pass now.
//!
//! The pass goes through the shared [`staffbell_core::scan::Scanner`], so it
//! waits for a scheduled pass that is already running instead of overlapping
//! it. Without `today`, the current date in the configured timezone is used.

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use staffbell_core::{scan::PassReport, store::StaffStore};

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ScanParams {
  pub today: Option<NaiveDate>,
}

pub async fn trigger<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ScanParams>,
) -> Result<Json<PassReport>, ApiError>
where
  S: StaffStore + 'static,
{
  let today = params
    .today
    .unwrap_or_else(|| Utc::now().with_timezone(&state.timezone).date_naive());

  tracing::info!(%today, "manual scan pass requested");
  let report = state.scanner.run(today).await.map_err(ApiError::store)?;
  Ok(Json(report))
}
