//! Statements for certifications, officials and the league hierarchy.
//!
//! Every function runs synchronously on the connection thread; the async
//! wrappers live in [`crate::store`].

use rusqlite::{Connection, OptionalExtension as _, Row, params};
use uuid::Uuid;

use officiate_core::{
  official::{Certification, NewCertification, Official},
  organization::{
    Division, League, NewDivision, NewLeague, NewPool, NewTeam, Pool, Team,
  },
};

use crate::encode::{
  dt_at, encode_dt, encode_opt_uuid, encode_uuid, enum_at, opt_uuid_at, uuid_at,
};

// ─── Certifications ──────────────────────────────────────────────────────────

const CERTIFICATION_COLUMNS: &str =
  "certification_id, name, abbreviation, description, level";

fn certification_row(row: &Row<'_>) -> rusqlite::Result<Certification> {
  Ok(Certification {
    certification_id: uuid_at(row, 0)?,
    name:             row.get(1)?,
    abbreviation:     row.get(2)?,
    description:      row.get(3)?,
    level:            row.get(4)?,
  })
}

pub fn insert_certification(conn: &Connection, c: &Certification) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO certifications (certification_id, name, abbreviation, description, level)
     VALUES (?1, ?2, ?3, ?4, ?5)",
    params![encode_uuid(c.certification_id), c.name, c.abbreviation, c.description, c.level],
  )?;
  Ok(())
}

pub fn list_certifications(conn: &Connection) -> rusqlite::Result<Vec<Certification>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {CERTIFICATION_COLUMNS} FROM certifications ORDER BY level, name"
  ))?;
  let rows = stmt
    .query_map([], certification_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn get_certification(conn: &Connection, id: Uuid) -> rusqlite::Result<Option<Certification>> {
  conn
    .query_row(
      &format!("SELECT {CERTIFICATION_COLUMNS} FROM certifications WHERE certification_id = ?1"),
      params![encode_uuid(id)],
      certification_row,
    )
    .optional()
}

pub fn update_certification(
  conn: &Connection,
  id: Uuid,
  input: &NewCertification,
) -> rusqlite::Result<Option<Certification>> {
  let changed = conn.execute(
    "UPDATE certifications SET name = ?2, abbreviation = ?3, description = ?4, level = ?5
     WHERE certification_id = ?1",
    params![encode_uuid(id), input.name, input.abbreviation, input.description, input.level],
  )?;
  if changed == 0 {
    return Ok(None);
  }
  get_certification(conn, id)
}

// ─── Leagues ─────────────────────────────────────────────────────────────────

const LEAGUE_COLUMNS: &str = "league_id, name, description, founded_year, created_at";

fn league_row(row: &Row<'_>) -> rusqlite::Result<League> {
  Ok(League {
    league_id:    uuid_at(row, 0)?,
    name:         row.get(1)?,
    description:  row.get(2)?,
    founded_year: row.get(3)?,
    created_at:   dt_at(row, 4)?,
  })
}

pub fn insert_league(conn: &Connection, l: &League) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO leagues (league_id, name, description, founded_year, created_at)
     VALUES (?1, ?2, ?3, ?4, ?5)",
    params![
      encode_uuid(l.league_id),
      l.name,
      l.description,
      l.founded_year,
      encode_dt(l.created_at),
    ],
  )?;
  Ok(())
}

pub fn list_leagues(conn: &Connection) -> rusqlite::Result<Vec<League>> {
  let mut stmt = conn.prepare(&format!("SELECT {LEAGUE_COLUMNS} FROM leagues ORDER BY name"))?;
  let rows = stmt
    .query_map([], league_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn get_league(conn: &Connection, id: Uuid) -> rusqlite::Result<Option<League>> {
  conn
    .query_row(
      &format!("SELECT {LEAGUE_COLUMNS} FROM leagues WHERE league_id = ?1"),
      params![encode_uuid(id)],
      league_row,
    )
    .optional()
}

pub fn update_league(
  conn: &Connection,
  id: Uuid,
  input: &NewLeague,
) -> rusqlite::Result<Option<League>> {
  let changed = conn.execute(
    "UPDATE leagues SET name = ?2, description = ?3, founded_year = ?4 WHERE league_id = ?1",
    params![encode_uuid(id), input.name, input.description, input.founded_year],
  )?;
  if changed == 0 {
    return Ok(None);
  }
  get_league(conn, id)
}

// ─── Divisions ───────────────────────────────────────────────────────────────

const DIVISION_COLUMNS: &str = "division_id, league_id, name, description, created_at";

fn division_row(row: &Row<'_>) -> rusqlite::Result<Division> {
  Ok(Division {
    division_id: uuid_at(row, 0)?,
    league_id:   uuid_at(row, 1)?,
    name:        row.get(2)?,
    description: row.get(3)?,
    created_at:  dt_at(row, 4)?,
  })
}

pub fn insert_division(conn: &Connection, d: &Division) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO divisions (division_id, league_id, name, description, created_at)
     VALUES (?1, ?2, ?3, ?4, ?5)",
    params![
      encode_uuid(d.division_id),
      encode_uuid(d.league_id),
      d.name,
      d.description,
      encode_dt(d.created_at),
    ],
  )?;
  Ok(())
}

pub fn list_divisions(conn: &Connection, league_id: Option<Uuid>) -> rusqlite::Result<Vec<Division>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {DIVISION_COLUMNS} FROM divisions
     WHERE ?1 IS NULL OR league_id = ?1
     ORDER BY name"
  ))?;
  let rows = stmt
    .query_map(params![encode_opt_uuid(league_id)], division_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn get_division(conn: &Connection, id: Uuid) -> rusqlite::Result<Option<Division>> {
  conn
    .query_row(
      &format!("SELECT {DIVISION_COLUMNS} FROM divisions WHERE division_id = ?1"),
      params![encode_uuid(id)],
      division_row,
    )
    .optional()
}

/// Moving a division to another league is allowed.
pub fn update_division(
  conn: &Connection,
  id: Uuid,
  input: &NewDivision,
) -> rusqlite::Result<Option<Division>> {
  let changed = conn.execute(
    "UPDATE divisions SET league_id = ?2, name = ?3, description = ?4 WHERE division_id = ?1",
    params![encode_uuid(id), encode_uuid(input.league_id), input.name, input.description],
  )?;
  if changed == 0 {
    return Ok(None);
  }
  get_division(conn, id)
}

// ─── Teams ───────────────────────────────────────────────────────────────────

const TEAM_COLUMNS: &str =
  "team_id, division_id, name, abbreviation, mascot, address, website, created_at";

fn team_row(row: &Row<'_>) -> rusqlite::Result<Team> {
  Ok(Team {
    team_id:      uuid_at(row, 0)?,
    division_id:  uuid_at(row, 1)?,
    name:         row.get(2)?,
    abbreviation: row.get(3)?,
    mascot:       row.get(4)?,
    address:      row.get(5)?,
    website:      row.get(6)?,
    created_at:   dt_at(row, 7)?,
  })
}

pub fn insert_team(conn: &Connection, t: &Team) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO teams (
       team_id, division_id, name, abbreviation, mascot, address, website, created_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    params![
      encode_uuid(t.team_id),
      encode_uuid(t.division_id),
      t.name,
      t.abbreviation,
      t.mascot,
      t.address,
      t.website,
      encode_dt(t.created_at),
    ],
  )?;
  Ok(())
}

pub fn list_teams(conn: &Connection, division_id: Option<Uuid>) -> rusqlite::Result<Vec<Team>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {TEAM_COLUMNS} FROM teams
     WHERE ?1 IS NULL OR division_id = ?1
     ORDER BY name"
  ))?;
  let rows = stmt
    .query_map(params![encode_opt_uuid(division_id)], team_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn get_team(conn: &Connection, id: Uuid) -> rusqlite::Result<Option<Team>> {
  conn
    .query_row(
      &format!("SELECT {TEAM_COLUMNS} FROM teams WHERE team_id = ?1"),
      params![encode_uuid(id)],
      team_row,
    )
    .optional()
}

pub fn update_team(
  conn: &Connection,
  id: Uuid,
  input: &NewTeam,
) -> rusqlite::Result<Option<Team>> {
  let changed = conn.execute(
    "UPDATE teams
     SET division_id = ?2, name = ?3, abbreviation = ?4, mascot = ?5, address = ?6,
         website = ?7
     WHERE team_id = ?1",
    params![
      encode_uuid(id),
      encode_uuid(input.division_id),
      input.name,
      input.abbreviation,
      input.mascot,
      input.address,
      input.website,
    ],
  )?;
  if changed == 0 {
    return Ok(None);
  }
  get_team(conn, id)
}

// ─── Pools ───────────────────────────────────────────────────────────────────

const POOL_COLUMNS: &str =
  "pool_id, team_id, name, address, length, units, lanes, bidirectional, created_at";

fn pool_row(row: &Row<'_>) -> rusqlite::Result<Pool> {
  Ok(Pool {
    pool_id:       uuid_at(row, 0)?,
    team_id:       uuid_at(row, 1)?,
    name:          row.get(2)?,
    address:       row.get(3)?,
    length:        row.get(4)?,
    units:         enum_at(row, 5)?,
    lanes:         row.get(6)?,
    bidirectional: row.get(7)?,
    created_at:    dt_at(row, 8)?,
  })
}

pub fn insert_pool(conn: &Connection, p: &Pool) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO pools (
       pool_id, team_id, name, address, length, units, lanes, bidirectional, created_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    params![
      encode_uuid(p.pool_id),
      encode_uuid(p.team_id),
      p.name,
      p.address,
      p.length,
      p.units.as_ref(),
      p.lanes,
      p.bidirectional,
      encode_dt(p.created_at),
    ],
  )?;
  Ok(())
}

pub fn list_pools(conn: &Connection, team_id: Option<Uuid>) -> rusqlite::Result<Vec<Pool>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {POOL_COLUMNS} FROM pools
     WHERE ?1 IS NULL OR team_id = ?1
     ORDER BY name"
  ))?;
  let rows = stmt
    .query_map(params![encode_opt_uuid(team_id)], pool_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn get_pool(conn: &Connection, id: Uuid) -> rusqlite::Result<Option<Pool>> {
  conn
    .query_row(
      &format!("SELECT {POOL_COLUMNS} FROM pools WHERE pool_id = ?1"),
      params![encode_uuid(id)],
      pool_row,
    )
    .optional()
}

pub fn update_pool(
  conn: &Connection,
  id: Uuid,
  input: &NewPool,
) -> rusqlite::Result<Option<Pool>> {
  let changed = conn.execute(
    "UPDATE pools
     SET team_id = ?2, name = ?3, address = ?4, length = ?5, units = ?6, lanes = ?7,
         bidirectional = ?8
     WHERE pool_id = ?1",
    params![
      encode_uuid(id),
      encode_uuid(input.team_id),
      input.name,
      input.address,
      input.length,
      input.units.as_ref(),
      input.lanes,
      input.bidirectional,
    ],
  )?;
  if changed == 0 {
    return Ok(None);
  }
  get_pool(conn, id)
}

// ─── Officials ───────────────────────────────────────────────────────────────

const OFFICIAL_COLUMNS: &str =
  "official_id, team_id, name, email, phone, certification_id, active, proficiency, created_at";

fn official_row(row: &Row<'_>) -> rusqlite::Result<Official> {
  Ok(Official {
    official_id:      uuid_at(row, 0)?,
    team_id:          uuid_at(row, 1)?,
    name:             row.get(2)?,
    email:            row.get(3)?,
    phone:            row.get(4)?,
    certification_id: opt_uuid_at(row, 5)?,
    active:           row.get(6)?,
    proficiency:      enum_at(row, 7)?,
    created_at:       dt_at(row, 8)?,
  })
}

pub fn insert_official(conn: &Connection, o: &Official) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO officials (
       official_id, team_id, name, email, phone, certification_id,
       active, proficiency, created_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    params![
      encode_uuid(o.official_id),
      encode_uuid(o.team_id),
      o.name,
      o.email,
      o.phone,
      encode_opt_uuid(o.certification_id),
      o.active,
      o.proficiency.as_ref(),
      encode_dt(o.created_at),
    ],
  )?;
  Ok(())
}

pub fn list_officials(conn: &Connection, team_id: Option<Uuid>) -> rusqlite::Result<Vec<Official>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {OFFICIAL_COLUMNS} FROM officials
     WHERE ?1 IS NULL OR team_id = ?1
     ORDER BY name"
  ))?;
  let rows = stmt
    .query_map(params![encode_opt_uuid(team_id)], official_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn get_official(conn: &Connection, id: Uuid) -> rusqlite::Result<Option<Official>> {
  conn
    .query_row(
      &format!("SELECT {OFFICIAL_COLUMNS} FROM officials WHERE official_id = ?1"),
      params![encode_uuid(id)],
      official_row,
    )
    .optional()
}

/// Overwrite every mutable column; `None` when the official does not exist.
pub fn update_official(conn: &Connection, o: &Official) -> rusqlite::Result<Option<Official>> {
  let changed = conn.execute(
    "UPDATE officials
     SET team_id = ?2, name = ?3, email = ?4, phone = ?5, certification_id = ?6,
         active = ?7, proficiency = ?8
     WHERE official_id = ?1",
    params![
      encode_uuid(o.official_id),
      encode_uuid(o.team_id),
      o.name,
      o.email,
      o.phone,
      encode_opt_uuid(o.certification_id),
      o.active,
      o.proficiency.as_ref(),
    ],
  )?;
  if changed == 0 {
    return Ok(None);
  }
  get_official(conn, o.official_id)
}

// ─── Shared ──────────────────────────────────────────────────────────────────

/// Delete one row by primary key. `table` and `key` are compile-time
/// constants, never user input.
pub fn delete_by_id(
  conn: &Connection,
  table: &'static str,
  key: &'static str,
  id: Uuid,
) -> rusqlite::Result<usize> {
  conn.execute(
    &format!("DELETE FROM {table} WHERE {key} = ?1"),
    params![encode_uuid(id)],
  )
}
