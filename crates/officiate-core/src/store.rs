//! The `OfficiatingStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `officiate-store-sqlite`). Higher layers (`officiate-api`,
//! `officiate-server`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Fault,
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
};

/// Errors a backend returns must say which broad class of failure they are.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn fault(&self) -> Fault;
}

/// Abstraction over an officiating store backend.
///
/// Getters return `None` for unknown ids; updates and deletes of unknown ids
/// fail with a [`Fault::NotFound`] error.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait OfficiatingStore: Send + Sync {
  type Error: StoreError;

  // ── Certifications ────────────────────────────────────────────────────

  fn create_certification(
    &self,
    input: NewCertification,
  ) -> impl Future<Output = Result<Certification, Self::Error>> + Send + '_;

  /// All certifications ordered by `(level, name)`.
  fn list_certifications(
    &self,
  ) -> impl Future<Output = Result<Vec<Certification>, Self::Error>> + Send + '_;

  fn get_certification(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Certification>, Self::Error>> + Send + '_;

  fn update_certification(
    &self,
    id: Uuid,
    input: NewCertification,
  ) -> impl Future<Output = Result<Certification, Self::Error>> + Send + '_;

  fn delete_certification(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Leagues, divisions, teams, pools ──────────────────────────────────

  fn create_league(
    &self,
    input: NewLeague,
  ) -> impl Future<Output = Result<League, Self::Error>> + Send + '_;

  fn list_leagues(
    &self,
  ) -> impl Future<Output = Result<Vec<League>, Self::Error>> + Send + '_;

  fn get_league(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<League>, Self::Error>> + Send + '_;

  fn update_league(
    &self,
    id: Uuid,
    input: NewLeague,
  ) -> impl Future<Output = Result<League, Self::Error>> + Send + '_;

  /// Cascades to the league's divisions, teams, pools, officials and meets.
  fn delete_league(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn create_division(
    &self,
    input: NewDivision,
  ) -> impl Future<Output = Result<Division, Self::Error>> + Send + '_;

  fn list_divisions(
    &self,
    league_id: Option<Uuid>,
  ) -> impl Future<Output = Result<Vec<Division>, Self::Error>> + Send + '_;

  fn get_division(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Division>, Self::Error>> + Send + '_;

  fn update_division(
    &self,
    id: Uuid,
    input: NewDivision,
  ) -> impl Future<Output = Result<Division, Self::Error>> + Send + '_;

  fn delete_division(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn create_team(
    &self,
    input: NewTeam,
  ) -> impl Future<Output = Result<Team, Self::Error>> + Send + '_;

  fn list_teams(
    &self,
    division_id: Option<Uuid>,
  ) -> impl Future<Output = Result<Vec<Team>, Self::Error>> + Send + '_;

  fn get_team(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Team>, Self::Error>> + Send + '_;

  fn update_team(
    &self,
    id: Uuid,
    input: NewTeam,
  ) -> impl Future<Output = Result<Team, Self::Error>> + Send + '_;

  fn delete_team(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn create_pool(
    &self,
    input: NewPool,
  ) -> impl Future<Output = Result<Pool, Self::Error>> + Send + '_;

  fn list_pools(
    &self,
    team_id: Option<Uuid>,
  ) -> impl Future<Output = Result<Vec<Pool>, Self::Error>> + Send + '_;

  fn get_pool(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Pool>, Self::Error>> + Send + '_;

  fn update_pool(
    &self,
    id: Uuid,
    input: NewPool,
  ) -> impl Future<Output = Result<Pool, Self::Error>> + Send + '_;

  fn delete_pool(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Officials ─────────────────────────────────────────────────────────

  fn create_official(
    &self,
    input: NewOfficial,
  ) -> impl Future<Output = Result<Official, Self::Error>> + Send + '_;

  fn list_officials(
    &self,
    team_id: Option<Uuid>,
  ) -> impl Future<Output = Result<Vec<Official>, Self::Error>> + Send + '_;

  fn get_official(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Official>, Self::Error>> + Send + '_;

  fn update_official(
    &self,
    id: Uuid,
    input: NewOfficial,
  ) -> impl Future<Output = Result<Official, Self::Error>> + Send + '_;

  fn delete_official(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Strategies and positions ──────────────────────────────────────────

  fn create_strategy(
    &self,
    input: NewStrategy,
  ) -> impl Future<Output = Result<Strategy, Self::Error>> + Send + '_;

  /// All strategies ordered by name.
  fn list_strategies(
    &self,
  ) -> impl Future<Output = Result<Vec<Strategy>, Self::Error>> + Send + '_;

  fn get_strategy(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Strategy>, Self::Error>> + Send + '_;

  /// Fails with [`Fault::Conflict`] if another strategy has the new name.
  fn update_strategy(
    &self,
    id: Uuid,
    input: NewStrategy,
  ) -> impl Future<Output = Result<Strategy, Self::Error>> + Send + '_;

  /// Cascades to the strategy's positions and their event positions.
  fn delete_strategy(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Fails with [`Fault::Conflict`] if `(role, strategy, location)` is taken.
  fn create_position(
    &self,
    input: NewPosition,
  ) -> impl Future<Output = Result<Position, Self::Error>> + Send + '_;

  /// Positions ordered by strategy name, then role.
  fn list_positions<'a>(
    &'a self,
    filter: &'a PositionFilter,
  ) -> impl Future<Output = Result<Vec<Position>, Self::Error>> + Send + 'a;

  fn get_position(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Position>, Self::Error>> + Send + '_;

  fn update_position(
    &self,
    id: Uuid,
    input: NewPosition,
  ) -> impl Future<Output = Result<Position, Self::Error>> + Send + '_;

  fn delete_position(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Events ────────────────────────────────────────────────────────────

  /// Fails with [`Fault::Conflict`] if `(event_number, meet_type)` is taken.
  fn create_event(
    &self,
    input: NewEvent,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + '_;

  /// Events ordered by event number, then meet type.
  fn list_events<'a>(
    &'a self,
    filter: &'a EventFilter,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + 'a;

  fn get_event(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Event>, Self::Error>> + Send + '_;

  fn update_event(
    &self,
    id: Uuid,
    input: NewEvent,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + '_;

  fn delete_event(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete the listed events; unknown ids are ignored. Returns the number
  /// removed.
  fn delete_events(
    &self,
    ids: Vec<Uuid>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  fn delete_all_events(
    &self,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── Event positions ───────────────────────────────────────────────────

  /// Event positions joined with their event and position, ordered by event
  /// number then role.
  fn list_event_positions(
    &self,
    event_id: Option<Uuid>,
  ) -> impl Future<Output = Result<Vec<EventPositionDetail>, Self::Error>> + Send + '_;

  /// Create the pair, or update its mandatory flag if it exists.
  fn set_event_position(
    &self,
    event_id: Uuid,
    position_id: Uuid,
    is_mandatory: bool,
  ) -> impl Future<Output = Result<(EventPosition, SetOutcome), Self::Error>> + Send + '_;

  fn delete_event_position(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Run the auto-assignment rules over the whole catalog and insert the
  /// missing rows atomically. Existing rows are never modified. Fails with
  /// [`Fault::Configuration`] when no primary positions exist, in which case
  /// nothing is written.
  ///
  /// Runs are serialized against each other and against
  /// [`remove_all_event_positions`](Self::remove_all_event_positions).
  fn auto_assign_positions(
    &self,
  ) -> impl Future<Output = Result<AutoAssignReport, Self::Error>> + Send + '_;

  /// Delete every event position. Returns the number removed.
  fn remove_all_event_positions(
    &self,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  // ── Meets and assignments ─────────────────────────────────────────────

  fn create_meet(
    &self,
    input: NewMeet,
  ) -> impl Future<Output = Result<Meet, Self::Error>> + Send + '_;

  /// Meets ordered by date.
  fn list_meets(
    &self,
    league_id: Option<Uuid>,
  ) -> impl Future<Output = Result<Vec<Meet>, Self::Error>> + Send + '_;

  fn get_meet(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Meet>, Self::Error>> + Send + '_;

  /// Replaces every field, including the participating teams.
  fn update_meet(
    &self,
    id: Uuid,
    input: NewMeet,
  ) -> impl Future<Output = Result<Meet, Self::Error>> + Send + '_;

  fn delete_meet(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Fails with [`Fault::Conflict`] if the official already holds `role` at
  /// the meet. Warns, without failing, when the official is uncertified.
  fn create_assignment(
    &self,
    input: NewAssignment,
  ) -> impl Future<Output = Result<AssignmentReceipt, Self::Error>> + Send + '_;

  fn list_assignments(
    &self,
    meet_id: Option<Uuid>,
  ) -> impl Future<Output = Result<Vec<Assignment>, Self::Error>> + Send + '_;

  fn get_assignment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Assignment>, Self::Error>> + Send + '_;

  /// Fails with [`Fault::Conflict`] if the change collides with another
  /// assignment of the same official and role at the meet.
  fn update_assignment(
    &self,
    id: Uuid,
    input: NewAssignment,
  ) -> impl Future<Output = Result<Assignment, Self::Error>> + Send + '_;

  fn delete_assignment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
