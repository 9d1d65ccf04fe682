//! The write side of auto-assignment.
//!
//! Both operations open a `BEGIN IMMEDIATE` transaction, which takes SQLite's
//! write lock up front. Concurrent runs, in this process or another one
//! sharing the file, therefore execute one after the other: the second run
//! reads the first run's rows in its snapshot and plans nothing. Inserts use
//! `ON CONFLICT DO NOTHING`, so a pair that appears between planning and
//! writing counts as already satisfied instead of failing the batch.

use chrono::Utc;
use rusqlite::{Connection, TransactionBehavior, params};
use uuid::Uuid;

use officiate_core::{
  catalog::{EventFilter, PositionFilter},
  engine::{self, AutoAssignReport, ExistingPairs, Plan},
};

use crate::{
  catalog::{list_events, list_positions},
  encode::{encode_dt, encode_uuid, uuid_at},
};

fn existing_pairs(conn: &Connection) -> rusqlite::Result<ExistingPairs> {
  let mut stmt = conn.prepare("SELECT event_id, position_id FROM event_positions")?;
  let pairs = stmt
    .query_map([], |row| Ok((uuid_at(row, 0)?, uuid_at(row, 1)?)))?
    .collect::<rusqlite::Result<ExistingPairs>>()?;
  Ok(pairs)
}

/// Plan and insert missing event positions. The outer `Result` carries
/// database failures, the inner one a catalog that cannot be planned; in
/// both cases the transaction rolls back.
pub fn auto_assign(
  conn: &mut Connection,
) -> rusqlite::Result<Result<AutoAssignReport, officiate_core::Error>> {
  let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

  let positions = list_positions(&tx, &PositionFilter::default())?;
  let events = list_events(&tx, &EventFilter::default())?;
  let existing = existing_pairs(&tx)?;

  let Plan { rows, catalog } = match engine::plan(&positions, &events, &existing) {
    Ok(plan) => plan,
    Err(e) => return Ok(Err(e)),
  };

  let mut report = AutoAssignReport::new(catalog);
  let now = encode_dt(Utc::now());
  {
    let mut stmt = tx.prepare(
      "INSERT INTO event_positions (
         event_position_id, event_id, position_id, is_mandatory, created_at, updated_at
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?5)
       ON CONFLICT (event_id, position_id) DO NOTHING",
    )?;
    for row in &rows {
      let inserted = stmt.execute(params![
        encode_uuid(Uuid::new_v4()),
        encode_uuid(row.event_id),
        encode_uuid(row.position_id),
        row.is_mandatory,
        now,
      ])?;
      if inserted > 0 {
        report.record(row.is_mandatory);
      }
    }
  }

  tx.commit()?;
  Ok(Ok(report))
}

/// Delete every event position; returns the number removed.
pub fn remove_all(conn: &mut Connection) -> rusqlite::Result<usize> {
  let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
  let removed = tx.execute("DELETE FROM event_positions", [])?;
  tx.commit()?;
  Ok(removed)
}
