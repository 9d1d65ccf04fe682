//! Statements for strategies, positions, events and event positions.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension as _, Row, params};
use uuid::Uuid;

use officiate_core::catalog::{
  Event, EventFilter, EventPosition, EventPositionDetail, NewStrategy, Position,
  PositionFilter, SetOutcome, Strategy,
};

use crate::encode::{
  dt_at, encode_dt, encode_opt_uuid, encode_uuid, enum_at, like_pattern, opt_uuid_at,
  uuid_at,
};

// ─── Strategies ──────────────────────────────────────────────────────────────

const STRATEGY_COLUMNS: &str = "strategy_id, name, description, created_at, updated_at";

fn strategy_row(row: &Row<'_>) -> rusqlite::Result<Strategy> {
  Ok(Strategy {
    strategy_id: uuid_at(row, 0)?,
    name:        row.get(1)?,
    description: row.get(2)?,
    created_at:  dt_at(row, 3)?,
    updated_at:  dt_at(row, 4)?,
  })
}

pub fn insert_strategy(conn: &Connection, s: &Strategy) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO strategies (strategy_id, name, description, created_at, updated_at)
     VALUES (?1, ?2, ?3, ?4, ?5)",
    params![
      encode_uuid(s.strategy_id),
      s.name,
      s.description,
      encode_dt(s.created_at),
      encode_dt(s.updated_at),
    ],
  )?;
  Ok(())
}

pub fn list_strategies(conn: &Connection) -> rusqlite::Result<Vec<Strategy>> {
  let mut stmt =
    conn.prepare(&format!("SELECT {STRATEGY_COLUMNS} FROM strategies ORDER BY name"))?;
  let rows = stmt
    .query_map([], strategy_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn get_strategy(conn: &Connection, id: Uuid) -> rusqlite::Result<Option<Strategy>> {
  conn
    .query_row(
      &format!("SELECT {STRATEGY_COLUMNS} FROM strategies WHERE strategy_id = ?1"),
      params![encode_uuid(id)],
      strategy_row,
    )
    .optional()
}

pub fn update_strategy(
  conn: &Connection,
  id: Uuid,
  input: &NewStrategy,
  now: DateTime<Utc>,
) -> rusqlite::Result<Option<Strategy>> {
  let changed = conn.execute(
    "UPDATE strategies SET name = ?2, description = ?3, updated_at = ?4
     WHERE strategy_id = ?1",
    params![encode_uuid(id), input.name, input.description, encode_dt(now)],
  )?;
  if changed == 0 {
    return Ok(None);
  }
  get_strategy(conn, id)
}

// ─── Positions ───────────────────────────────────────────────────────────────

const POSITION_COLUMNS: &str = "p.position_id, p.strategy_id, p.role, p.location,
  p.minimum_certification_id, p.created_at, p.updated_at";

fn position_row(row: &Row<'_>) -> rusqlite::Result<Position> {
  Ok(Position {
    position_id:              uuid_at(row, 0)?,
    strategy_id:              uuid_at(row, 1)?,
    role:                     row.get(2)?,
    location:                 row.get(3)?,
    minimum_certification_id: opt_uuid_at(row, 4)?,
    created_at:               dt_at(row, 5)?,
    updated_at:               dt_at(row, 6)?,
  })
}

pub fn insert_position(conn: &Connection, p: &Position) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO positions (
       position_id, strategy_id, role, location, minimum_certification_id,
       created_at, updated_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    params![
      encode_uuid(p.position_id),
      encode_uuid(p.strategy_id),
      p.role,
      p.location,
      encode_opt_uuid(p.minimum_certification_id),
      encode_dt(p.created_at),
      encode_dt(p.updated_at),
    ],
  )?;
  Ok(())
}

pub fn list_positions(conn: &Connection, filter: &PositionFilter) -> rusqlite::Result<Vec<Position>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {POSITION_COLUMNS}
     FROM positions p
     JOIN strategies s ON s.strategy_id = p.strategy_id
     WHERE (?1 IS NULL OR p.strategy_id = ?1)
       AND (?2 IS NULL OR p.role LIKE ?2 ESCAPE '\\')
       AND (?3 IS NULL OR p.location LIKE ?3 ESCAPE '\\')
     ORDER BY s.name, p.role, p.location"
  ))?;
  let rows = stmt
    .query_map(
      params![
        encode_opt_uuid(filter.strategy_id),
        filter.role.as_deref().map(like_pattern),
        filter.location.as_deref().map(like_pattern),
      ],
      position_row,
    )?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn get_position(conn: &Connection, id: Uuid) -> rusqlite::Result<Option<Position>> {
  conn
    .query_row(
      &format!("SELECT {POSITION_COLUMNS} FROM positions p WHERE p.position_id = ?1"),
      params![encode_uuid(id)],
      position_row,
    )
    .optional()
}

/// Overwrite the mutable columns of `p`; `None` when it does not exist.
pub fn update_position(conn: &Connection, p: &Position) -> rusqlite::Result<Option<Position>> {
  let changed = conn.execute(
    "UPDATE positions
     SET strategy_id = ?2, role = ?3, location = ?4, minimum_certification_id = ?5,
         updated_at = ?6
     WHERE position_id = ?1",
    params![
      encode_uuid(p.position_id),
      encode_uuid(p.strategy_id),
      p.role,
      p.location,
      encode_opt_uuid(p.minimum_certification_id),
      encode_dt(p.updated_at),
    ],
  )?;
  if changed == 0 {
    return Ok(None);
  }
  get_position(conn, p.position_id)
}

// ─── Events ──────────────────────────────────────────────────────────────────

const EVENT_COLUMNS: &str = "event_id, event_number, name, description, meet_type, gender,
  created_at, updated_at";

fn event_row(row: &Row<'_>) -> rusqlite::Result<Event> {
  Ok(Event {
    event_id:     uuid_at(row, 0)?,
    event_number: row.get(1)?,
    name:         row.get(2)?,
    description:  row.get(3)?,
    meet_type:    enum_at(row, 4)?,
    gender:       enum_at(row, 5)?,
    created_at:   dt_at(row, 6)?,
    updated_at:   dt_at(row, 7)?,
  })
}

pub fn insert_event(conn: &Connection, e: &Event) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO events (
       event_id, event_number, name, description, meet_type, gender,
       created_at, updated_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    params![
      encode_uuid(e.event_id),
      e.event_number,
      e.name,
      e.description,
      e.meet_type.as_ref(),
      e.gender.as_ref(),
      encode_dt(e.created_at),
      encode_dt(e.updated_at),
    ],
  )?;
  Ok(())
}

pub fn list_events(conn: &Connection, filter: &EventFilter) -> rusqlite::Result<Vec<Event>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {EVENT_COLUMNS}
     FROM events
     WHERE (?1 IS NULL OR event_number = ?1)
       AND (?2 IS NULL OR name LIKE ?2 ESCAPE '\\')
       AND (?3 IS NULL OR meet_type = ?3)
       AND (?4 IS NULL OR gender = ?4)
     ORDER BY event_number, meet_type"
  ))?;
  let rows = stmt
    .query_map(
      params![
        filter.event_number,
        filter.name.as_deref().map(like_pattern),
        filter.meet_type.map(|m| m.to_string()),
        filter.gender.map(|g| g.to_string()),
      ],
      event_row,
    )?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn get_event(conn: &Connection, id: Uuid) -> rusqlite::Result<Option<Event>> {
  conn
    .query_row(
      &format!("SELECT {EVENT_COLUMNS} FROM events WHERE event_id = ?1"),
      params![encode_uuid(id)],
      event_row,
    )
    .optional()
}

pub fn update_event(conn: &Connection, e: &Event) -> rusqlite::Result<Option<Event>> {
  let changed = conn.execute(
    "UPDATE events
     SET event_number = ?2, name = ?3, description = ?4, meet_type = ?5, gender = ?6,
         updated_at = ?7
     WHERE event_id = ?1",
    params![
      encode_uuid(e.event_id),
      e.event_number,
      e.name,
      e.description,
      e.meet_type.as_ref(),
      e.gender.as_ref(),
      encode_dt(e.updated_at),
    ],
  )?;
  if changed == 0 {
    return Ok(None);
  }
  get_event(conn, e.event_id)
}

/// Delete the listed events in one transaction; returns how many existed.
pub fn delete_events(conn: &mut Connection, ids: &[Uuid]) -> rusqlite::Result<usize> {
  let tx = conn.transaction()?;
  let mut removed = 0;
  {
    let mut stmt = tx.prepare("DELETE FROM events WHERE event_id = ?1")?;
    for id in ids {
      removed += stmt.execute(params![encode_uuid(*id)])?;
    }
  }
  tx.commit()?;
  Ok(removed)
}

pub fn delete_all_events(conn: &Connection) -> rusqlite::Result<usize> {
  conn.execute("DELETE FROM events", [])
}

// ─── Event positions ─────────────────────────────────────────────────────────

const EVENT_POSITION_COLUMNS: &str = "ep.event_position_id, ep.event_id, ep.position_id,
  ep.is_mandatory, ep.created_at, ep.updated_at";

fn event_position_row(row: &Row<'_>) -> rusqlite::Result<EventPosition> {
  Ok(EventPosition {
    event_position_id: uuid_at(row, 0)?,
    event_id:          uuid_at(row, 1)?,
    position_id:       uuid_at(row, 2)?,
    is_mandatory:      row.get(3)?,
    created_at:        dt_at(row, 4)?,
    updated_at:        dt_at(row, 5)?,
  })
}

fn event_position_detail_row(row: &Row<'_>) -> rusqlite::Result<EventPositionDetail> {
  Ok(EventPositionDetail {
    event_position: event_position_row(row)?,
    event_number:   row.get(6)?,
    event_name:     row.get(7)?,
    meet_type:      enum_at(row, 8)?,
    role:           row.get(9)?,
    location:       row.get(10)?,
  })
}

pub fn list_event_positions(
  conn: &Connection,
  event_id: Option<Uuid>,
) -> rusqlite::Result<Vec<EventPositionDetail>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {EVENT_POSITION_COLUMNS},
            e.event_number, e.name, e.meet_type, p.role, p.location
     FROM event_positions ep
     JOIN events    e ON e.event_id    = ep.event_id
     JOIN positions p ON p.position_id = ep.position_id
     WHERE ?1 IS NULL OR ep.event_id = ?1
     ORDER BY e.event_number, e.meet_type, p.role, p.location"
  ))?;
  let rows = stmt
    .query_map(params![encode_opt_uuid(event_id)], event_position_detail_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

fn get_event_position_by_pair(
  conn: &Connection,
  event_id: Uuid,
  position_id: Uuid,
) -> rusqlite::Result<Option<EventPosition>> {
  conn
    .query_row(
      &format!(
        "SELECT {EVENT_POSITION_COLUMNS} FROM event_positions ep
         WHERE ep.event_id = ?1 AND ep.position_id = ?2"
      ),
      params![encode_uuid(event_id), encode_uuid(position_id)],
      event_position_row,
    )
    .optional()
}

/// Result of [`set_event_position`].
pub enum SetResult {
  Done(EventPosition, SetOutcome),
  MissingEvent,
  MissingPosition,
}

fn exists(conn: &Connection, sql: &str, id: Uuid) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(sql, params![encode_uuid(id)], |_| Ok(()))
      .optional()?
      .is_some(),
  )
}

/// Create the pair, or update the mandatory flag of an existing pair.
pub fn set_event_position(
  conn: &mut Connection,
  event_id: Uuid,
  position_id: Uuid,
  is_mandatory: bool,
  now: DateTime<Utc>,
) -> rusqlite::Result<SetResult> {
  let tx = conn.transaction()?;

  if !exists(&tx, "SELECT 1 FROM events WHERE event_id = ?1", event_id)? {
    return Ok(SetResult::MissingEvent);
  }
  if !exists(&tx, "SELECT 1 FROM positions WHERE position_id = ?1", position_id)? {
    return Ok(SetResult::MissingPosition);
  }

  let result = match get_event_position_by_pair(&tx, event_id, position_id)? {
    Some(mut ep) => {
      tx.execute(
        "UPDATE event_positions SET is_mandatory = ?2, updated_at = ?3
         WHERE event_position_id = ?1",
        params![encode_uuid(ep.event_position_id), is_mandatory, encode_dt(now)],
      )?;
      ep.is_mandatory = is_mandatory;
      ep.updated_at = now;
      SetResult::Done(ep, SetOutcome::Updated)
    }
    None => {
      let ep = EventPosition {
        event_position_id: Uuid::new_v4(),
        event_id,
        position_id,
        is_mandatory,
        created_at: now,
        updated_at: now,
      };
      insert_event_position(&tx, &ep)?;
      SetResult::Done(ep, SetOutcome::Created)
    }
  };

  tx.commit()?;
  Ok(result)
}

fn insert_event_position(conn: &Connection, ep: &EventPosition) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO event_positions (
       event_position_id, event_id, position_id, is_mandatory, created_at, updated_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    params![
      encode_uuid(ep.event_position_id),
      encode_uuid(ep.event_id),
      encode_uuid(ep.position_id),
      ep.is_mandatory,
      encode_dt(ep.created_at),
      encode_dt(ep.updated_at),
    ],
  )?;
  Ok(())
}
