//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`,
//! UUIDs as hyphenated lowercase strings and enums as their lowercase names.
//! Decoding failures surface as [`rusqlite::Error::FromSqlConversionFailure`]
//! so row mappers can use `?` throughout.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Row, types::Type};
use uuid::Uuid;

// ─── Encoding ────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn encode_opt_uuid(id: Option<Uuid>) -> Option<String> { id.map(encode_uuid) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

// ─── Decoding ────────────────────────────────────────────────────────────────

fn conversion_failure<E>(idx: usize, err: E) -> rusqlite::Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

pub fn uuid_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
  let s: String = row.get(idx)?;
  Uuid::parse_str(&s).map_err(|e| conversion_failure(idx, e))
}

pub fn opt_uuid_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Uuid>> {
  let s: Option<String> = row.get(idx)?;
  s.map(|s| Uuid::parse_str(&s).map_err(|e| conversion_failure(idx, e)))
    .transpose()
}

pub fn dt_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
  let s: String = row.get(idx)?;
  DateTime::parse_from_rfc3339(&s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| conversion_failure(idx, e))
}

pub fn date_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
  let s: String = row.get(idx)?;
  NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|e| conversion_failure(idx, e))
}

/// Decode a column holding one of the strum-backed enums.
pub fn enum_at<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
  T: FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  let s: String = row.get(idx)?;
  s.parse().map_err(|e| conversion_failure(idx, e))
}

/// Wrap a `LIKE` needle for a case-insensitive contains match.
pub fn like_pattern(needle: &str) -> String {
  let escaped = needle
    .replace('\\', "\\\\")
    .replace('%', "\\%")
    .replace('_', "\\_");
  format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn like_pattern_escapes_wildcards() {
    assert_eq!(like_pattern("OOF"), "%OOF%");
    assert_eq!(like_pattern("50%_"), "%50\\%\\_%");
  }

  #[test]
  fn date_encoding() {
    let d = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
    assert_eq!(encode_date(d), "2025-06-14");
  }
}
