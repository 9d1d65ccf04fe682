//! Error types for `officiate-core`.

use thiserror::Error;

use crate::classify::PositionKind;

#[derive(Debug, Error)]
pub enum Error {
  #[error("event number {0} is outside 1..=99")]
  EventNumberOutOfRange(u16),

  #[error("{0} must not be empty")]
  EmptyField(&'static str),

  #[error("certification abbreviation {0:?} is longer than 3 characters")]
  AbbreviationTooLong(String),

  /// None of the primary position kinds exist in the catalog, so no rule
  /// can run.
  #[error(
    "could not find the required positions ({}); create these positions first",
    kind_list(.missing)
  )]
  MissingPositions { missing: Vec<PositionKind> },
}

fn kind_list(kinds: &[PositionKind]) -> String {
  kinds
    .iter()
    .map(|k| k.label())
    .collect::<Vec<_>>()
    .join(", ")
}

impl Error {
  pub fn fault(&self) -> Fault {
    match self {
      Self::MissingPositions { .. } => Fault::Configuration,
      _ => Fault::Invalid,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── Fault ───────────────────────────────────────────────────────────────────

/// Backend-independent classification of a store failure, used by the HTTP
/// layer to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
  /// The addressed record does not exist.
  NotFound,
  /// A uniqueness constraint rejected the write.
  Conflict,
  /// The input was rejected before or by the storage layer.
  Invalid,
  /// The position catalog cannot support an auto-assignment run.
  Configuration,
  /// Anything else: connectivity, corruption, decoding.
  Storage,
}
