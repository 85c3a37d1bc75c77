//! Server wiring for Staffbell: configuration, default-admin bootstrap, the
//! HTTP application and the daily scan scheduler.

pub mod scheduler;

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use chrono_tz::Tz;
use serde::Deserialize;
use staffbell_core::{
  employee::{Employee, NewEmployee, Role},
  scan::Scanner,
  store::StaffStore,
};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `STAFFBELL_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:            String,
  #[serde(default = "default_port")]
  pub port:            u16,
  #[serde(default = "default_store_path")]
  pub store_path:      PathBuf,
  #[serde(default)]
  pub schedule:        ScheduleConfig,
  /// Created at startup when no administrator exists yet.
  #[serde(default)]
  pub bootstrap_admin: Option<BootstrapAdmin>,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 3000 }

fn default_store_path() -> PathBuf { PathBuf::from("staffbell.db") }

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScheduleConfig {
  pub enabled:        bool,
  /// Five-field cron expression.
  pub cron:           String,
  /// IANA zone name; decides both fire times and the pass's "today".
  pub timezone:       String,
  /// Run one pass immediately at startup, before the first scheduled time.
  pub run_on_startup: bool,
}

impl Default for ScheduleConfig {
  fn default() -> Self {
    Self {
      enabled:        true,
      cron:           "0 0 * * *".to_string(),
      timezone:       "UTC".to_string(),
      run_on_startup: false,
    }
  }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BootstrapAdmin {
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
}

// ─── Bootstrap ────────────────────────────────────────────────────────────────

/// Create the configured administrator if the store has none.
///
/// Returns the created record, or `None` if an administrator already exists.
pub async fn ensure_admin<S: StaffStore>(
  store: &S,
  admin: &BootstrapAdmin,
) -> Result<Option<Employee>, S::Error> {
  if !store.list_employees(Some(Role::Admin)).await?.is_empty() {
    return Ok(None);
  }

  let created = store
    .add_employee(
      NewEmployee::new(&admin.first_name, &admin.last_name, &admin.email).with_role(Role::Admin),
    )
    .await?;
  tracing::info!(email = %created.email, "default administrator created");
  Ok(Some(created))
}

// ─── Application ──────────────────────────────────────────────────────────────

/// The full HTTP application: the JSON API under `/api` with request tracing.
pub fn app<S>(scanner: Arc<Scanner<S>>, timezone: Tz) -> Router
where
  S: StaffStore + 'static,
{
  Router::new()
    .nest("/api", staffbell_api::api_router(scanner, timezone))
    .layer(TraceLayer::new_for_http())
}
