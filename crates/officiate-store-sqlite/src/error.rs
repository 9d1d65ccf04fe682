//! Error type for `officiate-store-sqlite`.

use officiate_core::{Fault, store::StoreError};
use rusqlite::{ErrorCode, ffi};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] officiate_core::Error),

  #[error("database error: {0}")]
  Database(tokio_rusqlite::Error),

  #[error("{entity} not found: {id}")]
  NotFound { entity: &'static str, id: Uuid },

  /// A uniqueness constraint rejected the write.
  #[error("conflict: {0}")]
  Conflict(String),

  /// A foreign key, CHECK or NOT NULL constraint rejected the write.
  #[error("constraint failed: {0}")]
  Constraint(String),
}

impl From<tokio_rusqlite::Error> for Error {
  fn from(err: tokio_rusqlite::Error) -> Self {
    if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
      code,
      message,
    )) = &err
      && code.code == ErrorCode::ConstraintViolation
    {
      let message = message.clone().unwrap_or_else(|| code.to_string());
      return match code.extended_code {
        ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
          Error::Conflict(message)
        }
        _ => Error::Constraint(message),
      };
    }
    Error::Database(err)
  }
}

impl StoreError for Error {
  fn fault(&self) -> Fault {
    match self {
      Error::Core(e) => e.fault(),
      Error::Database(_) => Fault::Storage,
      Error::NotFound { .. } => Fault::NotFound,
      Error::Conflict(_) => Fault::Conflict,
      Error::Constraint(_) => Fault::Invalid,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
