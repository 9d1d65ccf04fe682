//! Statements for meets, their participating teams, and assignments.

use std::collections::HashMap;

use rusqlite::{Connection, OptionalExtension as _, Row, params};
use uuid::Uuid;

use officiate_core::meet::{Assignment, Meet};

use crate::encode::{
  date_at, dt_at, encode_date, encode_dt, encode_opt_uuid, encode_uuid, enum_at,
  opt_uuid_at, uuid_at,
};

// ─── Meets ───────────────────────────────────────────────────────────────────

const MEET_COLUMNS: &str =
  "meet_id, name, date, league_id, host_team_id, pool_id, meet_type, created_at";

fn meet_row(row: &Row<'_>) -> rusqlite::Result<Meet> {
  Ok(Meet {
    meet_id:             uuid_at(row, 0)?,
    name:                row.get(1)?,
    date:                date_at(row, 2)?,
    league_id:           uuid_at(row, 3)?,
    host_team_id:        uuid_at(row, 4)?,
    pool_id:             opt_uuid_at(row, 5)?,
    meet_type:           enum_at(row, 6)?,
    participating_teams: Vec::new(),
    created_at:          dt_at(row, 7)?,
  })
}

/// Insert the meet and its participating teams in one transaction.
pub fn insert_meet(conn: &mut Connection, m: &Meet) -> rusqlite::Result<()> {
  let tx = conn.transaction()?;
  tx.execute(
    "INSERT INTO meets (
       meet_id, name, date, league_id, host_team_id, pool_id, meet_type, created_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    params![
      encode_uuid(m.meet_id),
      m.name,
      encode_date(m.date),
      encode_uuid(m.league_id),
      encode_uuid(m.host_team_id),
      encode_opt_uuid(m.pool_id),
      m.meet_type.as_ref(),
      encode_dt(m.created_at),
    ],
  )?;
  insert_teams(&tx, m.meet_id, &m.participating_teams)?;
  tx.commit()
}

fn insert_teams(conn: &Connection, meet_id: Uuid, teams: &[Uuid]) -> rusqlite::Result<()> {
  let mut stmt =
    conn.prepare("INSERT OR IGNORE INTO meet_teams (meet_id, team_id) VALUES (?1, ?2)")?;
  for team_id in teams {
    stmt.execute(params![encode_uuid(meet_id), encode_uuid(*team_id)])?;
  }
  Ok(())
}

/// Overwrite the meet's columns and replace its participating teams in one
/// transaction; `None` when the meet does not exist.
pub fn update_meet(conn: &mut Connection, m: &Meet) -> rusqlite::Result<Option<Meet>> {
  let tx = conn.transaction()?;
  let changed = tx.execute(
    "UPDATE meets
     SET name = ?2, date = ?3, league_id = ?4, host_team_id = ?5, pool_id = ?6,
         meet_type = ?7
     WHERE meet_id = ?1",
    params![
      encode_uuid(m.meet_id),
      m.name,
      encode_date(m.date),
      encode_uuid(m.league_id),
      encode_uuid(m.host_team_id),
      encode_opt_uuid(m.pool_id),
      m.meet_type.as_ref(),
    ],
  )?;
  if changed == 0 {
    return Ok(None);
  }
  tx.execute(
    "DELETE FROM meet_teams WHERE meet_id = ?1",
    params![encode_uuid(m.meet_id)],
  )?;
  insert_teams(&tx, m.meet_id, &m.participating_teams)?;
  tx.commit()?;
  get_meet(conn, m.meet_id)
}

fn participating_teams(
  conn: &Connection,
  meet_id: Option<Uuid>,
) -> rusqlite::Result<HashMap<Uuid, Vec<Uuid>>> {
  let mut stmt = conn.prepare(
    "SELECT mt.meet_id, mt.team_id
     FROM meet_teams mt
     JOIN teams t ON t.team_id = mt.team_id
     WHERE ?1 IS NULL OR mt.meet_id = ?1
     ORDER BY t.name",
  )?;
  let pairs = stmt
    .query_map(params![encode_opt_uuid(meet_id)], |row| {
      Ok((uuid_at(row, 0)?, uuid_at(row, 1)?))
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let mut by_meet: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
  for (meet, team) in pairs {
    by_meet.entry(meet).or_default().push(team);
  }
  Ok(by_meet)
}

pub fn list_meets(conn: &Connection, league_id: Option<Uuid>) -> rusqlite::Result<Vec<Meet>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {MEET_COLUMNS} FROM meets
     WHERE ?1 IS NULL OR league_id = ?1
     ORDER BY date, name"
  ))?;
  let mut meets = stmt
    .query_map(params![encode_opt_uuid(league_id)], meet_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let mut teams = participating_teams(conn, None)?;
  for meet in &mut meets {
    meet.participating_teams = teams.remove(&meet.meet_id).unwrap_or_default();
  }
  Ok(meets)
}

pub fn get_meet(conn: &Connection, id: Uuid) -> rusqlite::Result<Option<Meet>> {
  let meet = conn
    .query_row(
      &format!("SELECT {MEET_COLUMNS} FROM meets WHERE meet_id = ?1"),
      params![encode_uuid(id)],
      meet_row,
    )
    .optional()?;

  let Some(mut meet) = meet else { return Ok(None) };
  meet.participating_teams = participating_teams(conn, Some(id))?
    .remove(&id)
    .unwrap_or_default();
  Ok(Some(meet))
}

// ─── Assignments ─────────────────────────────────────────────────────────────

const ASSIGNMENT_COLUMNS: &str =
  "assignment_id, meet_id, official_id, role, notes, confirmed, assigned_at";

fn assignment_row(row: &Row<'_>) -> rusqlite::Result<Assignment> {
  Ok(Assignment {
    assignment_id: uuid_at(row, 0)?,
    meet_id:       uuid_at(row, 1)?,
    official_id:   uuid_at(row, 2)?,
    role:          row.get(3)?,
    notes:         row.get(4)?,
    confirmed:     row.get(5)?,
    assigned_at:   dt_at(row, 6)?,
  })
}

pub fn insert_assignment(conn: &Connection, a: &Assignment) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO assignments (
       assignment_id, meet_id, official_id, role, notes, confirmed, assigned_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    params![
      encode_uuid(a.assignment_id),
      encode_uuid(a.meet_id),
      encode_uuid(a.official_id),
      a.role,
      a.notes,
      a.confirmed,
      encode_dt(a.assigned_at),
    ],
  )?;
  Ok(())
}

pub fn list_assignments(
  conn: &Connection,
  meet_id: Option<Uuid>,
) -> rusqlite::Result<Vec<Assignment>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {ASSIGNMENT_COLUMNS} FROM assignments
     WHERE ?1 IS NULL OR meet_id = ?1
     ORDER BY assigned_at, role"
  ))?;
  let rows = stmt
    .query_map(params![encode_opt_uuid(meet_id)], assignment_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn get_assignment(conn: &Connection, id: Uuid) -> rusqlite::Result<Option<Assignment>> {
  conn
    .query_row(
      &format!("SELECT {ASSIGNMENT_COLUMNS} FROM assignments WHERE assignment_id = ?1"),
      params![encode_uuid(id)],
      assignment_row,
    )
    .optional()
}

/// Overwrite everything but `assigned_at`; `None` when the assignment does
/// not exist.
pub fn update_assignment(
  conn: &Connection,
  a: &Assignment,
) -> rusqlite::Result<Option<Assignment>> {
  let changed = conn.execute(
    "UPDATE assignments
     SET meet_id = ?2, official_id = ?3, role = ?4, notes = ?5, confirmed = ?6
     WHERE assignment_id = ?1",
    params![
      encode_uuid(a.assignment_id),
      encode_uuid(a.meet_id),
      encode_uuid(a.official_id),
      a.role,
      a.notes,
      a.confirmed,
    ],
  )?;
  if changed == 0 {
    return Ok(None);
  }
  get_assignment(conn, a.assignment_id)
}

/// The official's name and whether they hold any certification.
pub fn official_certification(
  conn: &Connection,
  official_id: Uuid,
) -> rusqlite::Result<Option<(String, bool)>> {
  conn
    .query_row(
      "SELECT name, certification_id IS NOT NULL FROM officials WHERE official_id = ?1",
      params![encode_uuid(official_id)],
      |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .optional()
}
