//! [`SqliteStore`], the SQLite implementation of [`OfficiatingStore`].

use std::{collections::HashSet, path::Path};

use chrono::Utc;
use uuid::Uuid;

use officiate_core::{
  catalog::{
    Event, EventFilter, EventPosition, EventPositionDetail, NewEvent, NewPosition,
    NewStrategy, Position, PositionFilter, SetOutcome, Strategy,
  },
  engine::AutoAssignReport,
  meet::{Assignment, AssignmentReceipt, Meet, NewAssignment, NewMeet},
  official::{Certification, NewCertification, NewOfficial, Official},
  organization::{
    Division, League, NewDivision, NewLeague, NewPool, NewTeam, Pool, Team,
  },
  store::OfficiatingStore,
};

use crate::{
  Error, Result,
  catalog::{self, SetResult},
  meets, org, reconcile,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An officiating store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .with_conn(|conn| conn.execute_batch(SCHEMA))
      .await
  }

  /// Run `f` on the connection thread.
  async fn with_conn<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&mut rusqlite::Connection) -> rusqlite::Result<T> + Send + 'static,
    T: Send + 'static,
  {
    Ok(self.conn.call(move |conn| Ok(f(conn)?)).await?)
  }

  /// Delete by primary key, mapping "no row" to [`Error::NotFound`].
  async fn delete_row(
    &self,
    entity: &'static str,
    table: &'static str,
    key: &'static str,
    id: Uuid,
  ) -> Result<()> {
    let removed = self
      .with_conn(move |conn| org::delete_by_id(conn, table, key, id))
      .await?;
    if removed == 0 {
      return Err(Error::NotFound { entity, id });
    }
    Ok(())
  }
}

/// Drop repeated ids, keeping the first occurrence of each.
fn distinct(ids: Vec<Uuid>) -> Vec<Uuid> {
  let mut seen = HashSet::new();
  ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

fn found<T>(entity: &'static str, id: Uuid, value: Option<T>) -> Result<T> {
  value.ok_or(Error::NotFound { entity, id })
}

// ─── OfficiatingStore impl ───────────────────────────────────────────────────

impl OfficiatingStore for SqliteStore {
  type Error = Error;

  // ── Certifications ────────────────────────────────────────────────────────

  async fn create_certification(&self, input: NewCertification) -> Result<Certification> {
    input.validate()?;
    let cert = Certification {
      certification_id: Uuid::new_v4(),
      name:             input.name,
      abbreviation:     input.abbreviation,
      description:      input.description,
      level:            input.level,
    };
    let row = cert.clone();
    self
      .with_conn(move |conn| org::insert_certification(conn, &row))
      .await?;
    Ok(cert)
  }

  async fn list_certifications(&self) -> Result<Vec<Certification>> {
    self.with_conn(|conn| org::list_certifications(conn)).await
  }

  async fn get_certification(&self, id: Uuid) -> Result<Option<Certification>> {
    self.with_conn(move |conn| org::get_certification(conn, id)).await
  }

  async fn update_certification(
    &self,
    id: Uuid,
    input: NewCertification,
  ) -> Result<Certification> {
    input.validate()?;
    let updated = self
      .with_conn(move |conn| org::update_certification(conn, id, &input))
      .await?;
    found("certification", id, updated)
  }

  async fn delete_certification(&self, id: Uuid) -> Result<()> {
    self
      .delete_row("certification", "certifications", "certification_id", id)
      .await
  }

  // ── Leagues, divisions, teams, pools ──────────────────────────────────────

  async fn create_league(&self, input: NewLeague) -> Result<League> {
    input.validate()?;
    let league = League {
      league_id:    Uuid::new_v4(),
      name:         input.name,
      description:  input.description,
      founded_year: input.founded_year,
      created_at:   Utc::now(),
    };
    let row = league.clone();
    self.with_conn(move |conn| org::insert_league(conn, &row)).await?;
    Ok(league)
  }

  async fn list_leagues(&self) -> Result<Vec<League>> {
    self.with_conn(|conn| org::list_leagues(conn)).await
  }

  async fn get_league(&self, id: Uuid) -> Result<Option<League>> {
    self.with_conn(move |conn| org::get_league(conn, id)).await
  }

  async fn update_league(&self, id: Uuid, input: NewLeague) -> Result<League> {
    input.validate()?;
    let updated = self
      .with_conn(move |conn| org::update_league(conn, id, &input))
      .await?;
    found("league", id, updated)
  }

  async fn delete_league(&self, id: Uuid) -> Result<()> {
    self.delete_row("league", "leagues", "league_id", id).await
  }

  async fn create_division(&self, input: NewDivision) -> Result<Division> {
    input.validate()?;
    let division = Division {
      division_id: Uuid::new_v4(),
      league_id:   input.league_id,
      name:        input.name,
      description: input.description,
      created_at:  Utc::now(),
    };
    let row = division.clone();
    self.with_conn(move |conn| org::insert_division(conn, &row)).await?;
    Ok(division)
  }

  async fn list_divisions(&self, league_id: Option<Uuid>) -> Result<Vec<Division>> {
    self
      .with_conn(move |conn| org::list_divisions(conn, league_id))
      .await
  }

  async fn get_division(&self, id: Uuid) -> Result<Option<Division>> {
    self.with_conn(move |conn| org::get_division(conn, id)).await
  }

  async fn update_division(&self, id: Uuid, input: NewDivision) -> Result<Division> {
    input.validate()?;
    let updated = self
      .with_conn(move |conn| org::update_division(conn, id, &input))
      .await?;
    found("division", id, updated)
  }

  async fn delete_division(&self, id: Uuid) -> Result<()> {
    self.delete_row("division", "divisions", "division_id", id).await
  }

  async fn create_team(&self, input: NewTeam) -> Result<Team> {
    input.validate()?;
    let team = Team {
      team_id:      Uuid::new_v4(),
      division_id:  input.division_id,
      name:         input.name,
      abbreviation: input.abbreviation,
      mascot:       input.mascot,
      address:      input.address,
      website:      input.website,
      created_at:   Utc::now(),
    };
    let row = team.clone();
    self.with_conn(move |conn| org::insert_team(conn, &row)).await?;
    Ok(team)
  }

  async fn list_teams(&self, division_id: Option<Uuid>) -> Result<Vec<Team>> {
    self
      .with_conn(move |conn| org::list_teams(conn, division_id))
      .await
  }

  async fn get_team(&self, id: Uuid) -> Result<Option<Team>> {
    self.with_conn(move |conn| org::get_team(conn, id)).await
  }

  async fn update_team(&self, id: Uuid, input: NewTeam) -> Result<Team> {
    input.validate()?;
    let updated = self
      .with_conn(move |conn| org::update_team(conn, id, &input))
      .await?;
    found("team", id, updated)
  }

  async fn delete_team(&self, id: Uuid) -> Result<()> {
    self.delete_row("team", "teams", "team_id", id).await
  }

  async fn create_pool(&self, input: NewPool) -> Result<Pool> {
    input.validate()?;
    let pool = Pool {
      pool_id:       Uuid::new_v4(),
      team_id:       input.team_id,
      name:          input.name,
      address:       input.address,
      length:        input.length,
      units:         input.units,
      lanes:         input.lanes,
      bidirectional: input.bidirectional,
      created_at:    Utc::now(),
    };
    let row = pool.clone();
    self.with_conn(move |conn| org::insert_pool(conn, &row)).await?;
    Ok(pool)
  }

  async fn list_pools(&self, team_id: Option<Uuid>) -> Result<Vec<Pool>> {
    self.with_conn(move |conn| org::list_pools(conn, team_id)).await
  }

  async fn get_pool(&self, id: Uuid) -> Result<Option<Pool>> {
    self.with_conn(move |conn| org::get_pool(conn, id)).await
  }

  async fn update_pool(&self, id: Uuid, input: NewPool) -> Result<Pool> {
    input.validate()?;
    let updated = self
      .with_conn(move |conn| org::update_pool(conn, id, &input))
      .await?;
    found("pool", id, updated)
  }

  async fn delete_pool(&self, id: Uuid) -> Result<()> {
    self.delete_row("pool", "pools", "pool_id", id).await
  }

  // ── Officials ─────────────────────────────────────────────────────────────

  async fn create_official(&self, input: NewOfficial) -> Result<Official> {
    input.validate()?;
    let official = Official {
      official_id:      Uuid::new_v4(),
      team_id:          input.team_id,
      name:             input.name,
      email:            input.email,
      phone:            input.phone,
      certification_id: input.certification_id,
      active:           input.active,
      proficiency:      input.proficiency,
      created_at:       Utc::now(),
    };
    let row = official.clone();
    self.with_conn(move |conn| org::insert_official(conn, &row)).await?;
    Ok(official)
  }

  async fn list_officials(&self, team_id: Option<Uuid>) -> Result<Vec<Official>> {
    self
      .with_conn(move |conn| org::list_officials(conn, team_id))
      .await
  }

  async fn get_official(&self, id: Uuid) -> Result<Option<Official>> {
    self.with_conn(move |conn| org::get_official(conn, id)).await
  }

  async fn update_official(&self, id: Uuid, input: NewOfficial) -> Result<Official> {
    input.validate()?;
    let official = Official {
      official_id:      id,
      team_id:          input.team_id,
      name:             input.name,
      email:            input.email,
      phone:            input.phone,
      certification_id: input.certification_id,
      active:           input.active,
      proficiency:      input.proficiency,
      // Not written by the update; replaced by the stored value on re-read.
      created_at:       Utc::now(),
    };
    let updated = self
      .with_conn(move |conn| org::update_official(conn, &official))
      .await?;
    found("official", id, updated)
  }

  async fn delete_official(&self, id: Uuid) -> Result<()> {
    self.delete_row("official", "officials", "official_id", id).await
  }

  // ── Strategies and positions ──────────────────────────────────────────────

  async fn create_strategy(&self, input: NewStrategy) -> Result<Strategy> {
    input.validate()?;
    let now = Utc::now();
    let strategy = Strategy {
      strategy_id: Uuid::new_v4(),
      name:        input.name,
      description: input.description,
      created_at:  now,
      updated_at:  now,
    };
    let row = strategy.clone();
    self
      .with_conn(move |conn| catalog::insert_strategy(conn, &row))
      .await?;
    Ok(strategy)
  }

  async fn list_strategies(&self) -> Result<Vec<Strategy>> {
    self.with_conn(|conn| catalog::list_strategies(conn)).await
  }

  async fn get_strategy(&self, id: Uuid) -> Result<Option<Strategy>> {
    self.with_conn(move |conn| catalog::get_strategy(conn, id)).await
  }

  async fn update_strategy(&self, id: Uuid, input: NewStrategy) -> Result<Strategy> {
    input.validate()?;
    let now = Utc::now();
    let updated = self
      .with_conn(move |conn| catalog::update_strategy(conn, id, &input, now))
      .await?;
    found("strategy", id, updated)
  }

  async fn delete_strategy(&self, id: Uuid) -> Result<()> {
    self.delete_row("strategy", "strategies", "strategy_id", id).await
  }

  async fn create_position(&self, input: NewPosition) -> Result<Position> {
    input.validate()?;
    let now = Utc::now();
    let position = Position {
      position_id:              Uuid::new_v4(),
      strategy_id:              input.strategy_id,
      role:                     input.role,
      location:                 input.location,
      minimum_certification_id: input.minimum_certification_id,
      created_at:               now,
      updated_at:               now,
    };
    let row = position.clone();
    self
      .with_conn(move |conn| catalog::insert_position(conn, &row))
      .await?;
    Ok(position)
  }

  async fn list_positions(&self, filter: &PositionFilter) -> Result<Vec<Position>> {
    let filter = filter.clone();
    self
      .with_conn(move |conn| catalog::list_positions(conn, &filter))
      .await
  }

  async fn get_position(&self, id: Uuid) -> Result<Option<Position>> {
    self.with_conn(move |conn| catalog::get_position(conn, id)).await
  }

  async fn update_position(&self, id: Uuid, input: NewPosition) -> Result<Position> {
    input.validate()?;
    let now = Utc::now();
    let position = Position {
      position_id:              id,
      strategy_id:              input.strategy_id,
      role:                     input.role,
      location:                 input.location,
      minimum_certification_id: input.minimum_certification_id,
      created_at:               now,
      updated_at:               now,
    };
    let updated = self
      .with_conn(move |conn| catalog::update_position(conn, &position))
      .await?;
    found("position", id, updated)
  }

  async fn delete_position(&self, id: Uuid) -> Result<()> {
    self.delete_row("position", "positions", "position_id", id).await
  }

  // ── Events ────────────────────────────────────────────────────────────────

  async fn create_event(&self, input: NewEvent) -> Result<Event> {
    input.validate()?;
    let now = Utc::now();
    let event = Event {
      event_id:     Uuid::new_v4(),
      event_number: input.event_number,
      name:         input.name,
      description:  input.description,
      meet_type:    input.meet_type,
      gender:       input.gender,
      created_at:   now,
      updated_at:   now,
    };
    let row = event.clone();
    self
      .with_conn(move |conn| catalog::insert_event(conn, &row))
      .await?;
    Ok(event)
  }

  async fn list_events(&self, filter: &EventFilter) -> Result<Vec<Event>> {
    let filter = filter.clone();
    self
      .with_conn(move |conn| catalog::list_events(conn, &filter))
      .await
  }

  async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
    self.with_conn(move |conn| catalog::get_event(conn, id)).await
  }

  async fn update_event(&self, id: Uuid, input: NewEvent) -> Result<Event> {
    input.validate()?;
    let now = Utc::now();
    let event = Event {
      event_id:     id,
      event_number: input.event_number,
      name:         input.name,
      description:  input.description,
      meet_type:    input.meet_type,
      gender:       input.gender,
      created_at:   now,
      updated_at:   now,
    };
    let updated = self
      .with_conn(move |conn| catalog::update_event(conn, &event))
      .await?;
    found("event", id, updated)
  }

  async fn delete_event(&self, id: Uuid) -> Result<()> {
    self.delete_row("event", "events", "event_id", id).await
  }

  async fn delete_events(&self, ids: Vec<Uuid>) -> Result<usize> {
    self
      .with_conn(move |conn| catalog::delete_events(conn, &ids))
      .await
  }

  async fn delete_all_events(&self) -> Result<usize> {
    self.with_conn(|conn| catalog::delete_all_events(conn)).await
  }

  // ── Event positions ───────────────────────────────────────────────────────

  async fn list_event_positions(
    &self,
    event_id: Option<Uuid>,
  ) -> Result<Vec<EventPositionDetail>> {
    self
      .with_conn(move |conn| catalog::list_event_positions(conn, event_id))
      .await
  }

  async fn set_event_position(
    &self,
    event_id: Uuid,
    position_id: Uuid,
    is_mandatory: bool,
  ) -> Result<(EventPosition, SetOutcome)> {
    let now = Utc::now();
    let result = self
      .with_conn(move |conn| {
        catalog::set_event_position(conn, event_id, position_id, is_mandatory, now)
      })
      .await?;
    match result {
      SetResult::Done(ep, outcome) => Ok((ep, outcome)),
      SetResult::MissingEvent => Err(Error::NotFound { entity: "event", id: event_id }),
      SetResult::MissingPosition => {
        Err(Error::NotFound { entity: "position", id: position_id })
      }
    }
  }

  async fn delete_event_position(&self, id: Uuid) -> Result<()> {
    self
      .delete_row("event position", "event_positions", "event_position_id", id)
      .await
  }

  async fn auto_assign_positions(&self) -> Result<AutoAssignReport> {
    let report = self.with_conn(reconcile::auto_assign).await?;
    match report {
      Ok(report) => {
        tracing::info!(
          created = report.created,
          mandatory = report.mandatory,
          optional = report.optional,
          catalog = %report.catalog,
          "auto-assigned event positions"
        );
        let gaps = report.catalog_gaps();
        if !gaps.is_empty() {
          tracing::warn!(
            missing = %gaps.join(", "),
            "catalog has no positions for some primary kinds"
          );
        }
        Ok(report)
      }
      Err(e) => {
        tracing::warn!(error = %e, "auto-assignment aborted");
        Err(e.into())
      }
    }
  }

  async fn remove_all_event_positions(&self) -> Result<usize> {
    let removed = self.with_conn(reconcile::remove_all).await?;
    tracing::info!(removed, "removed all event positions");
    Ok(removed)
  }

  // ── Meets and assignments ─────────────────────────────────────────────────

  async fn create_meet(&self, input: NewMeet) -> Result<Meet> {
    input.validate()?;
    let participating_teams = distinct(input.participating_teams);
    let meet = Meet {
      meet_id: Uuid::new_v4(),
      name: input.name,
      date: input.date,
      league_id: input.league_id,
      host_team_id: input.host_team_id,
      pool_id: input.pool_id,
      meet_type: input.meet_type,
      participating_teams,
      created_at: Utc::now(),
    };
    let row = meet.clone();
    self.with_conn(move |conn| meets::insert_meet(conn, &row)).await?;
    Ok(meet)
  }

  async fn list_meets(&self, league_id: Option<Uuid>) -> Result<Vec<Meet>> {
    self
      .with_conn(move |conn| meets::list_meets(conn, league_id))
      .await
  }

  async fn get_meet(&self, id: Uuid) -> Result<Option<Meet>> {
    self.with_conn(move |conn| meets::get_meet(conn, id)).await
  }

  async fn update_meet(&self, id: Uuid, input: NewMeet) -> Result<Meet> {
    input.validate()?;
    let meet = Meet {
      meet_id: id,
      name: input.name,
      date: input.date,
      league_id: input.league_id,
      host_team_id: input.host_team_id,
      pool_id: input.pool_id,
      meet_type: input.meet_type,
      participating_teams: distinct(input.participating_teams),
      // Not written by the update; replaced by the stored value on re-read.
      created_at: Utc::now(),
    };
    let updated = self
      .with_conn(move |conn| meets::update_meet(conn, &meet))
      .await?;
    found("meet", id, updated)
  }

  async fn delete_meet(&self, id: Uuid) -> Result<()> {
    self.delete_row("meet", "meets", "meet_id", id).await
  }

  async fn create_assignment(&self, input: NewAssignment) -> Result<AssignmentReceipt> {
    input.validate()?;
    let assignment = Assignment {
      assignment_id: Uuid::new_v4(),
      meet_id:       input.meet_id,
      official_id:   input.official_id,
      role:          input.role,
      notes:         input.notes,
      confirmed:     input.confirmed,
      assigned_at:   Utc::now(),
    };
    let row = assignment.clone();
    let official = self
      .with_conn(move |conn| {
        let official = meets::official_certification(conn, row.official_id)?;
        if official.is_some() {
          meets::insert_assignment(conn, &row)?;
        }
        Ok(official)
      })
      .await?;

    let (name, certified) = found("official", assignment.official_id, official)?;
    let mut warnings = Vec::new();
    if !certified {
      warnings.push(format!("Note: {name} has no certification."));
    }
    Ok(AssignmentReceipt { assignment, warnings })
  }

  async fn list_assignments(&self, meet_id: Option<Uuid>) -> Result<Vec<Assignment>> {
    self
      .with_conn(move |conn| meets::list_assignments(conn, meet_id))
      .await
  }

  async fn get_assignment(&self, id: Uuid) -> Result<Option<Assignment>> {
    self.with_conn(move |conn| meets::get_assignment(conn, id)).await
  }

  async fn update_assignment(&self, id: Uuid, input: NewAssignment) -> Result<Assignment> {
    input.validate()?;
    let assignment = Assignment {
      assignment_id: id,
      meet_id:       input.meet_id,
      official_id:   input.official_id,
      role:          input.role,
      notes:         input.notes,
      confirmed:     input.confirmed,
      assigned_at:   Utc::now(),
    };
    let updated = self
      .with_conn(move |conn| meets::update_assignment(conn, &assignment))
      .await?;
    found("assignment", id, updated)
  }

  async fn delete_assignment(&self, id: Uuid) -> Result<()> {
    self
      .delete_row("assignment", "assignments", "assignment_id", id)
      .await
  }
}
