//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use officiate_core::{
  Fault,
  catalog::{
    EventFilter, Gender, MeetType, NewEvent, NewPosition, NewStrategy, PositionFilter,
    SetOutcome,
  },
  classify::PositionKind,
  meet::{NewAssignment, NewMeet},
  official::{NewCertification, NewOfficial, Proficiency},
  organization::{NewDivision, NewLeague, NewPool, NewTeam, PoolUnits},
  store::{OfficiatingStore, StoreError as _},
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn strategy(s: &SqliteStore, name: &str) -> Uuid {
  s.create_strategy(NewStrategy { name: name.into(), description: String::new() })
    .await
    .unwrap()
    .strategy_id
}

async fn position(s: &SqliteStore, strategy_id: Uuid, role: &str, location: &str) -> Uuid {
  s.create_position(NewPosition {
    strategy_id,
    role: role.into(),
    location: location.into(),
    minimum_certification_id: None,
  })
  .await
  .unwrap()
  .position_id
}

async fn event(s: &SqliteStore, number: u16, name: &str) -> Uuid {
  s.create_event(NewEvent {
    event_number: number,
    name:         name.into(),
    description:  String::new(),
    meet_type:    MeetType::Dual,
    gender:       Gender::Mixed,
  })
  .await
  .unwrap()
  .event_id
}

/// The standard catalog: eight positions and three dual-meet events.
struct Catalog {
  deck:        Uuid,
  starter:     Uuid,
  dq:          Uuid,
  rto:         Uuid,
  oof_finish:  Uuid,
  oof_turn:    Uuid,
  snt_judge:   Uuid,
  snt_referee: Uuid,
  free50:      Uuid,
  relay:       Uuid,
  fly25:       Uuid,
}

async fn standard_catalog(s: &SqliteStore) -> Catalog {
  let st = strategy(s, "Standard").await;
  Catalog {
    deck:        position(s, st, "Deck Referee", "Pool Deck").await,
    starter:     position(s, st, "Starter", "Start End").await,
    dq:          position(s, st, "DQ Writer", "Admin Table").await,
    rto:         position(s, st, "RTO", "Start End").await,
    oof_finish:  position(s, st, "OOF", "Finish End In").await,
    oof_turn:    position(s, st, "OOF", "Turn End").await,
    snt_judge:   position(s, st, "SNT Judge", "Turn End").await,
    snt_referee: position(s, st, "SNT Referee", "Start End").await,
    free50:      event(s, 1, "Freestyle 50m").await,
    relay:       event(s, 2, "Freestyle Relay 4x100m").await,
    fly25:       event(s, 3, "Butterfly 25m").await,
  }
}

async fn rows_for(s: &SqliteStore, event_id: Uuid) -> BTreeMap<Uuid, bool> {
  s.list_event_positions(Some(event_id))
    .await
    .unwrap()
    .into_iter()
    .map(|d| (d.event_position.position_id, d.event_position.is_mandatory))
    .collect()
}

async fn team(s: &SqliteStore) -> (Uuid, Uuid) {
  let league = s
    .create_league(NewLeague {
      name:         "Summer League".into(),
      description:  String::new(),
      founded_year: Some(1998),
    })
    .await
    .unwrap();
  let division = s
    .create_division(NewDivision {
      league_id:   league.league_id,
      name:        "North".into(),
      description: String::new(),
    })
    .await
    .unwrap();
  let team = s
    .create_team(NewTeam {
      division_id:  division.division_id,
      name:         "Marlins".into(),
      abbreviation: "MAR".into(),
      mascot:       String::new(),
      address:      String::new(),
      website:      String::new(),
    })
    .await
    .unwrap();
  (league.league_id, team.team_id)
}

fn official(team_id: Uuid, name: &str, certification_id: Option<Uuid>) -> NewOfficial {
  NewOfficial {
    team_id,
    name: name.into(),
    email: String::new(),
    phone: String::new(),
    certification_id,
    active: true,
    proficiency: Proficiency::Intermediate,
  }
}

// ─── Auto-assignment ─────────────────────────────────────────────────────────

#[tokio::test]
async fn auto_assign_standard_catalog() {
  let s = store().await;
  let c = standard_catalog(&s).await;

  let report = s.auto_assign_positions().await.unwrap();
  assert_eq!(report.created, 21);
  assert_eq!(report.mandatory + report.optional, 21);
  assert_eq!(report.catalog.count(PositionKind::Oof), 2);
  assert_eq!(report.catalog_gaps(), vec!["Verifier"]);

  let free50 = rows_for(&s, c.free50).await;
  assert_eq!(free50.len(), 7);
  assert!(free50[&c.deck]);
  assert!(free50[&c.starter]);
  assert!(free50[&c.dq]);
  assert!(!free50[&c.oof_finish]);
  assert!(!free50[&c.oof_turn]);
  assert!(free50[&c.snt_judge]);
  assert!(free50[&c.snt_referee]);
  assert!(!free50.contains_key(&c.rto));

  let relay = rows_for(&s, c.relay).await;
  assert_eq!(relay.len(), 8);
  assert!(relay[&c.rto]);

  let fly25 = rows_for(&s, c.fly25).await;
  assert_eq!(fly25.len(), 6);
  assert!(fly25[&c.oof_finish]);
  assert!(!fly25[&c.oof_turn]);
  assert!(fly25[&c.snt_judge]);
  assert!(!fly25.contains_key(&c.snt_referee));
  assert!(!fly25.contains_key(&c.rto));
}

#[tokio::test]
async fn auto_assign_is_idempotent() {
  let s = store().await;
  standard_catalog(&s).await;

  s.auto_assign_positions().await.unwrap();
  let before = s.list_event_positions(None).await.unwrap();

  let again = s.auto_assign_positions().await.unwrap();
  assert_eq!(again.created, 0);
  assert_eq!(
    again.message(),
    "All events already have the required positions assigned."
  );

  let after = s.list_event_positions(None).await.unwrap();
  assert_eq!(before, after);
}

#[tokio::test]
async fn auto_assign_fills_only_the_gap() {
  let s = store().await;
  let c = standard_catalog(&s).await;

  s.set_event_position(c.free50, c.deck, false).await.unwrap();
  let report = s.auto_assign_positions().await.unwrap();
  assert_eq!(report.created, 20);

  // The hand-made row keeps its flag.
  let free50 = rows_for(&s, c.free50).await;
  assert_eq!(free50.len(), 7);
  assert!(!free50[&c.deck]);
}

#[tokio::test]
async fn manual_flag_survives_a_rerun() {
  let s = store().await;
  let c = standard_catalog(&s).await;
  s.auto_assign_positions().await.unwrap();

  let (ep, outcome) = s.set_event_position(c.relay, c.oof_turn, true).await.unwrap();
  assert_eq!(outcome, SetOutcome::Updated);
  assert!(ep.is_mandatory);

  s.auto_assign_positions().await.unwrap();
  assert!(rows_for(&s, c.relay).await[&c.oof_turn]);
}

#[tokio::test]
async fn concurrent_runs_never_duplicate() {
  let s = store().await;
  standard_catalog(&s).await;

  let other = s.clone();
  let (a, b) = tokio::join!(s.auto_assign_positions(), other.auto_assign_positions());
  let (a, b) = (a.unwrap(), b.unwrap());
  assert_eq!(a.created + b.created, 21);
  assert_eq!(s.list_event_positions(None).await.unwrap().len(), 21);
}

#[tokio::test]
async fn remove_all_then_rerun_is_deterministic() {
  let s = store().await;
  let c = standard_catalog(&s).await;

  s.auto_assign_positions().await.unwrap();
  let first = rows_for(&s, c.fly25).await;

  let removed = s.remove_all_event_positions().await.unwrap();
  assert_eq!(removed, 21);
  assert!(s.list_event_positions(None).await.unwrap().is_empty());

  let report = s.auto_assign_positions().await.unwrap();
  assert_eq!(report.created, 21);
  assert_eq!(rows_for(&s, c.fly25).await, first);
}

#[tokio::test]
async fn remove_all_on_empty_store() {
  let s = store().await;
  assert_eq!(s.remove_all_event_positions().await.unwrap(), 0);
}

#[tokio::test]
async fn missing_primary_positions_write_nothing() {
  let s = store().await;
  let st = strategy(&s, "SNT only").await;
  position(&s, st, "SNT Judge", "Turn End").await;
  event(&s, 1, "Freestyle 50m").await;

  let err = s.auto_assign_positions().await.unwrap_err();
  assert!(matches!(err, Error::Core(officiate_core::Error::MissingPositions { .. })));
  assert_eq!(err.fault(), Fault::Configuration);
  assert!(s.list_event_positions(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn middle_rto_is_optional_on_relays() {
  let s = store().await;
  let c = standard_catalog(&s).await;
  let st = strategy(&s, "Wide").await;
  let middle = position(&s, st, "RTO", "Middle Lane").await;

  s.auto_assign_positions().await.unwrap();
  let relay = rows_for(&s, c.relay).await;
  assert!(!relay[&middle]);
  assert!(relay[&c.rto]);
}

// ─── Event positions ─────────────────────────────────────────────────────────

#[tokio::test]
async fn set_event_position_creates_then_updates() {
  let s = store().await;
  let c = standard_catalog(&s).await;

  let (created, outcome) = s.set_event_position(c.free50, c.rto, true).await.unwrap();
  assert_eq!(outcome, SetOutcome::Created);

  let (updated, outcome) = s.set_event_position(c.free50, c.rto, false).await.unwrap();
  assert_eq!(outcome, SetOutcome::Updated);
  assert_eq!(updated.event_position_id, created.event_position_id);
  assert!(!updated.is_mandatory);
  assert_eq!(s.list_event_positions(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn set_event_position_unknown_event() {
  let s = store().await;
  let c = standard_catalog(&s).await;
  let err = s.set_event_position(Uuid::new_v4(), c.deck, true).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { entity: "event", .. }));
}

#[tokio::test]
async fn event_position_detail_is_joined() {
  let s = store().await;
  let c = standard_catalog(&s).await;
  s.set_event_position(c.relay, c.starter, true).await.unwrap();

  let rows = s.list_event_positions(Some(c.relay)).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].event_number, 2);
  assert_eq!(rows[0].event_name, "Freestyle Relay 4x100m");
  assert_eq!(rows[0].role, "Starter");
  assert_eq!(rows[0].location, "Start End");
}

#[tokio::test]
async fn deleting_a_position_cascades() {
  let s = store().await;
  let c = standard_catalog(&s).await;
  s.auto_assign_positions().await.unwrap();

  s.delete_position(c.deck).await.unwrap();
  let remaining = s.list_event_positions(None).await.unwrap();
  assert_eq!(remaining.len(), 18);
  assert!(remaining.iter().all(|d| d.event_position.position_id != c.deck));
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_position_is_a_conflict() {
  let s = store().await;
  let st = strategy(&s, "Standard").await;
  position(&s, st, "Starter", "Start End").await;

  let err = s
    .create_position(NewPosition {
      strategy_id:              st,
      role:                     "Starter".into(),
      location:                 "Start End".into(),
      minimum_certification_id: None,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Conflict(_)));
  assert_eq!(err.fault(), Fault::Conflict);
}

#[tokio::test]
async fn same_role_in_two_strategies_is_allowed() {
  let s = store().await;
  let a = strategy(&s, "A").await;
  let b = strategy(&s, "B").await;
  position(&s, a, "Starter", "Start End").await;
  position(&s, b, "Starter", "Start End").await;

  let filter = PositionFilter { strategy_id: Some(b), ..Default::default() };
  assert_eq!(s.list_positions(&filter).await.unwrap().len(), 1);
  assert_eq!(s.list_positions(&PositionFilter::default()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn position_filters_are_substring_matches() {
  let s = store().await;
  standard_catalog(&s).await;

  let filter = PositionFilter { role: Some("snt".into()), ..Default::default() };
  assert_eq!(s.list_positions(&filter).await.unwrap().len(), 2);

  let filter = PositionFilter { location: Some("100%".into()), ..Default::default() };
  assert!(s.list_positions(&filter).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_event_number_per_meet_type_is_a_conflict() {
  let s = store().await;
  event(&s, 4, "Backstroke 50m").await;

  let err = s
    .create_event(NewEvent {
      event_number: 4,
      name:         "Breaststroke 50m".into(),
      description:  String::new(),
      meet_type:    MeetType::Dual,
      gender:       Gender::Female,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Conflict(_)));

  // Same number under another meet type is fine.
  s.create_event(NewEvent {
    event_number: 4,
    name:         "Breaststroke 50m".into(),
    description:  String::new(),
    meet_type:    MeetType::Divisional,
    gender:       Gender::Female,
  })
  .await
  .unwrap();
}

#[tokio::test]
async fn event_number_out_of_range_is_rejected() {
  let s = store().await;
  for number in [0, 100] {
    let err = s
      .create_event(NewEvent {
        event_number: number,
        name:         "Medley".into(),
        description:  String::new(),
        meet_type:    MeetType::Dual,
        gender:       Gender::Male,
      })
      .await
      .unwrap_err();
    assert_eq!(err.fault(), Fault::Invalid);
  }
}

#[tokio::test]
async fn events_list_in_number_order_with_filters() {
  let s = store().await;
  event(&s, 9, "Butterfly 25m").await;
  event(&s, 2, "Freestyle 50m").await;
  event(&s, 5, "Freestyle Relay 4x100m").await;

  let all = s.list_events(&EventFilter::default()).await.unwrap();
  let numbers: Vec<u16> = all.iter().map(|e| e.event_number).collect();
  assert_eq!(numbers, vec![2, 5, 9]);

  let filter = EventFilter { name: Some("free".into()), ..Default::default() };
  assert_eq!(s.list_events(&filter).await.unwrap().len(), 2);

  let filter = EventFilter { meet_type: Some(MeetType::Invitational), ..Default::default() };
  assert!(s.list_events(&filter).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_event_keeps_identity() {
  let s = store().await;
  let id = event(&s, 1, "Freestyle 50m").await;

  let updated = s
    .update_event(id, NewEvent {
      event_number: 7,
      name:         "Freestyle 100m".into(),
      description:  "Long course".into(),
      meet_type:    MeetType::Dual,
      gender:       Gender::Female,
    })
    .await
    .unwrap();
  assert_eq!(updated.event_id, id);
  assert_eq!(updated.event_number, 7);
  assert_eq!(updated.gender, Gender::Female);

  let err = s
    .update_event(Uuid::new_v4(), NewEvent {
      event_number: 8,
      name:         "Ghost".into(),
      description:  String::new(),
      meet_type:    MeetType::Dual,
      gender:       Gender::Male,
    })
    .await
    .unwrap_err();
  assert_eq!(err.fault(), Fault::NotFound);
}

#[tokio::test]
async fn bulk_event_deletes_report_counts() {
  let s = store().await;
  let c = standard_catalog(&s).await;
  s.auto_assign_positions().await.unwrap();

  let removed = s
    .delete_events(vec![c.free50, c.relay, Uuid::new_v4()])
    .await
    .unwrap();
  assert_eq!(removed, 2);
  assert_eq!(s.list_event_positions(None).await.unwrap().len(), 6);

  assert_eq!(s.delete_all_events().await.unwrap(), 1);
  assert!(s.list_event_positions(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_unknown_strategy_is_not_found() {
  let s = store().await;
  let err = s.delete_strategy(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { entity: "strategy", .. }));
}

#[tokio::test]
async fn update_strategy_renames_and_guards_uniqueness() {
  let s = store().await;
  let standard = strategy(&s, "Standard").await;
  strategy(&s, "Championship").await;

  let renamed = s
    .update_strategy(standard, NewStrategy {
      name:        "Standard Dual".into(),
      description: "Two-team meets".into(),
    })
    .await
    .unwrap();
  assert_eq!(renamed.name, "Standard Dual");
  assert_eq!(renamed.description, "Two-team meets");
  assert!(renamed.updated_at >= renamed.created_at);

  let err = s
    .update_strategy(standard, NewStrategy {
      name:        "Championship".into(),
      description: String::new(),
    })
    .await
    .unwrap_err();
  assert_eq!(err.fault(), Fault::Conflict);

  let err = s
    .update_strategy(Uuid::new_v4(), NewStrategy {
      name:        "Other".into(),
      description: String::new(),
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound { entity: "strategy", .. }));
}

// ─── Organization and officials ──────────────────────────────────────────────

#[tokio::test]
async fn league_delete_cascades_to_teams() {
  let s = store().await;
  let (league_id, team_id) = team(&s).await;
  s.create_pool(NewPool {
    team_id,
    name: "Community Pool".into(),
    address: String::new(),
    length: 25,
    units: PoolUnits::Yards,
    lanes: 6,
    bidirectional: false,
  })
  .await
  .unwrap();

  s.delete_league(league_id).await.unwrap();
  assert!(s.get_team(team_id).await.unwrap().is_none());
  assert!(s.list_pools(None).await.unwrap().is_empty());
  assert!(s.list_divisions(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn certification_abbreviation_is_limited() {
  let s = store().await;
  let err = s
    .create_certification(NewCertification {
      name:         "Stroke and Turn".into(),
      abbreviation: "SNTJ".into(),
      description:  String::new(),
      level:        1,
    })
    .await
    .unwrap_err();
  assert_eq!(err.fault(), Fault::Invalid);
}

#[tokio::test]
async fn deleting_a_certification_clears_officials() {
  let s = store().await;
  let (_, team_id) = team(&s).await;
  let cert = s
    .create_certification(NewCertification {
      name:         "Referee".into(),
      abbreviation: "R".into(),
      description:  String::new(),
      level:        3,
    })
    .await
    .unwrap();
  let o = s
    .create_official(official(team_id, "Dana", Some(cert.certification_id)))
    .await
    .unwrap();

  s.delete_certification(cert.certification_id).await.unwrap();
  let o = s.get_official(o.official_id).await.unwrap().unwrap();
  assert_eq!(o.certification_id, None);
}

#[tokio::test]
async fn update_official_round_trips() {
  let s = store().await;
  let (_, team_id) = team(&s).await;
  let o = s.create_official(official(team_id, "Dana", None)).await.unwrap();

  let mut input = official(team_id, "Dana Reyes", None);
  input.active = false;
  let updated = s.update_official(o.official_id, input).await.unwrap();
  assert_eq!(updated.name, "Dana Reyes");
  assert!(!updated.active);
  assert_eq!(updated.created_at, o.created_at);
}

#[tokio::test]
async fn league_hierarchy_updates_round_trip() {
  let s = store().await;
  let (league_id, team_id) = team(&s).await;
  let league = s
    .update_league(league_id, NewLeague {
      name:         "Summer Swim League".into(),
      description:  "Outdoor pools".into(),
      founded_year: None,
    })
    .await
    .unwrap();
  assert_eq!(league.name, "Summer Swim League");
  assert_eq!(league.founded_year, None);
  assert_eq!(s.get_league(league_id).await.unwrap().unwrap().description, "Outdoor pools");

  let division_id = s.get_team(team_id).await.unwrap().unwrap().division_id;
  let division = s
    .update_division(division_id, NewDivision {
      league_id,
      name:        "South".into(),
      description: String::new(),
    })
    .await
    .unwrap();
  assert_eq!(division.name, "South");

  let team = s
    .update_team(team_id, NewTeam {
      division_id,
      name:         "Marlins Swim Club".into(),
      abbreviation: "MSC".into(),
      mascot:       "Marlin".into(),
      address:      String::new(),
      website:      String::new(),
    })
    .await
    .unwrap();
  assert_eq!(team.abbreviation, "MSC");
  assert_eq!(s.get_team(team_id).await.unwrap().unwrap().mascot, "Marlin");

  let err = s
    .update_team(team_id, NewTeam {
      division_id,
      name:         " ".into(),
      abbreviation: String::new(),
      mascot:       String::new(),
      address:      String::new(),
      website:      String::new(),
    })
    .await
    .unwrap_err();
  assert_eq!(err.fault(), Fault::Invalid);
}

#[tokio::test]
async fn pool_get_and_update() {
  let s = store().await;
  let (_, team_id) = team(&s).await;
  let pool = s
    .create_pool(NewPool {
      team_id,
      name: "Community Pool".into(),
      address: String::new(),
      length: 25,
      units: PoolUnits::Yards,
      lanes: 6,
      bidirectional: false,
    })
    .await
    .unwrap();
  assert_eq!(s.get_pool(pool.pool_id).await.unwrap().unwrap().lanes, 6);

  let updated = s
    .update_pool(pool.pool_id, NewPool {
      team_id,
      name: "Community Pool".into(),
      address: "12 Lake Rd".into(),
      length: 50,
      units: PoolUnits::Meters,
      lanes: 8,
      bidirectional: true,
    })
    .await
    .unwrap();
  assert_eq!(updated.length, 50);
  assert_eq!(updated.units, PoolUnits::Meters);
  assert!(updated.bidirectional);
  assert_eq!(updated.created_at, pool.created_at);

  assert!(s.get_pool(Uuid::new_v4()).await.unwrap().is_none());
}

// ─── Meets and assignments ───────────────────────────────────────────────────

#[tokio::test]
async fn assignment_warns_when_uncertified() {
  let s = store().await;
  let (league_id, team_id) = team(&s).await;
  let meet = s
    .create_meet(NewMeet {
      name:                "Opening Meet".into(),
      date:                NaiveDate::from_ymd_opt(2026, 6, 13).unwrap(),
      league_id,
      host_team_id:        team_id,
      pool_id:             None,
      meet_type:           MeetType::Dual,
      participating_teams: vec![team_id],
    })
    .await
    .unwrap();
  let o = s.create_official(official(team_id, "Sam", None)).await.unwrap();

  let receipt = s
    .create_assignment(NewAssignment {
      meet_id:     meet.meet_id,
      official_id: o.official_id,
      role:        "Starter".into(),
      notes:       String::new(),
      confirmed:   false,
    })
    .await
    .unwrap();
  assert_eq!(receipt.warnings, vec!["Note: Sam has no certification.".to_string()]);

  let err = s
    .create_assignment(NewAssignment {
      meet_id:     meet.meet_id,
      official_id: o.official_id,
      role:        "Starter".into(),
      notes:       String::new(),
      confirmed:   true,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Conflict(_)));

  let fetched = s.get_meet(meet.meet_id).await.unwrap().unwrap();
  assert_eq!(fetched.participating_teams, vec![team_id]);
  assert_eq!(s.list_assignments(Some(meet.meet_id)).await.unwrap().len(), 1);
}

#[tokio::test]
async fn assignment_for_unknown_official_is_not_found() {
  let s = store().await;
  let err = s
    .create_assignment(NewAssignment {
      meet_id:     Uuid::new_v4(),
      official_id: Uuid::new_v4(),
      role:        "Starter".into(),
      notes:       String::new(),
      confirmed:   false,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound { entity: "official", .. }));
}

fn meet(league_id: Uuid, host_team_id: Uuid, teams: Vec<Uuid>) -> NewMeet {
  NewMeet {
    name: "Opening Meet".into(),
    date: NaiveDate::from_ymd_opt(2026, 6, 13).unwrap(),
    league_id,
    host_team_id,
    pool_id: None,
    meet_type: MeetType::Dual,
    participating_teams: teams,
  }
}

async fn second_team(s: &SqliteStore, team_id: Uuid) -> Uuid {
  let division_id = s.get_team(team_id).await.unwrap().unwrap().division_id;
  s.create_team(NewTeam {
    division_id,
    name:         "Barracudas".into(),
    abbreviation: "BAR".into(),
    mascot:       String::new(),
    address:      String::new(),
    website:      String::new(),
  })
  .await
  .unwrap()
  .team_id
}

#[tokio::test]
async fn meet_teams_are_distinct_even_when_repeats_are_apart() {
  let s = store().await;
  let (league_id, team_id) = team(&s).await;
  let other = second_team(&s, team_id).await;

  let created = s
    .create_meet(meet(league_id, team_id, vec![team_id, other, team_id]))
    .await
    .unwrap();
  assert_eq!(created.participating_teams, vec![team_id, other]);

  let fetched = s.get_meet(created.meet_id).await.unwrap().unwrap();
  assert_eq!(fetched.participating_teams.len(), created.participating_teams.len());
}

#[tokio::test]
async fn update_meet_replaces_teams() {
  let s = store().await;
  let (league_id, team_id) = team(&s).await;
  let other = second_team(&s, team_id).await;
  let created = s
    .create_meet(meet(league_id, team_id, vec![team_id]))
    .await
    .unwrap();

  let mut input = meet(league_id, other, vec![other, other]);
  input.name = "Rescheduled Meet".into();
  input.date = NaiveDate::from_ymd_opt(2026, 6, 20).unwrap();
  let updated = s.update_meet(created.meet_id, input).await.unwrap();
  assert_eq!(updated.name, "Rescheduled Meet");
  assert_eq!(updated.host_team_id, other);
  assert_eq!(updated.participating_teams, vec![other]);
  assert_eq!(updated.created_at, created.created_at);

  let err = s
    .update_meet(Uuid::new_v4(), meet(league_id, team_id, vec![]))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound { entity: "meet", .. }));
}

#[tokio::test]
async fn assignment_get_and_update() {
  let s = store().await;
  let (league_id, team_id) = team(&s).await;
  let m = s.create_meet(meet(league_id, team_id, vec![team_id])).await.unwrap();
  let o = s.create_official(official(team_id, "Sam", None)).await.unwrap();
  let assign = |role: &str, confirmed: bool| NewAssignment {
    meet_id: m.meet_id,
    official_id: o.official_id,
    role: role.into(),
    notes: String::new(),
    confirmed,
  };

  let starter = s.create_assignment(assign("Starter", false)).await.unwrap().assignment;
  s.create_assignment(assign("Timer", false)).await.unwrap();

  let updated = s
    .update_assignment(starter.assignment_id, assign("Starter", true))
    .await
    .unwrap();
  assert!(updated.confirmed);
  assert_eq!(updated.assigned_at, starter.assigned_at);
  assert_eq!(
    s.get_assignment(starter.assignment_id).await.unwrap(),
    Some(updated)
  );

  let err = s
    .update_assignment(starter.assignment_id, assign("Timer", true))
    .await
    .unwrap_err();
  assert_eq!(err.fault(), Fault::Conflict);
}
