//! Handlers for `/employees` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/employees` | Optional `?role=employee\|admin` |
//! | `POST` | `/employees` | Body: [`NewEmployee`]; returns 201 + stored record |
//! | `GET`  | `/employees/:id` | 404 if not found |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use staffbell_core::{
  employee::{Employee, NewEmployee, Role},
  store::StaffStore,
};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub role: Option<Role>,
}

/// `GET /employees[?role=<role>]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Employee>>, ApiError>
where
  S: StaffStore,
{
  let employees = state
    .store
    .list_employees(params.role)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(employees))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /employees`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<NewEmployee>,
) -> Result<impl IntoResponse, ApiError>
where
  S: StaffStore,
{
  body
    .validate()
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let employee = state
    .store
    .add_employee(body)
    .await
    .map_err(ApiError::store)?;

  tracing::info!(
    employee = %employee.employee_id,
    role = %employee.role,
    "employee registered"
  );
  Ok((StatusCode::CREATED, Json(employee)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /employees/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Employee>, ApiError>
where
  S: StaffStore,
{
  let employee = state
    .store
    .get_employee(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("employee {id} not found")))?;
  Ok(Json(employee))
}
