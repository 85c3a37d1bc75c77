//! Error types for `staffbell-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown notification type: {0:?}")]
  UnknownNotificationType(String),

  #[error("unknown role: {0:?}")]
  UnknownRole(String),

  #[error("salary must be between 0 and 1500, got {0}")]
  InvalidSalary(f64),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box an arbitrary backend error into [`Error::Store`].
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
