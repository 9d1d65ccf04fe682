//! The position auto-assignment planner.
//!
//! [`plan`] is a pure function of the position catalog, the event catalog and
//! the set of `(event, position)` pairs that already have a row. It returns
//! the rows that should be inserted; persisting them is the store's job.
//!
//! Every rule in [`RULES`] proposes a mandatory flag for some pairs. Proposals
//! are reduced with "mandatory wins": if any rule marks a pair mandatory the
//! pair is mandatory, regardless of rule order. Pairs that already exist are
//! never proposed again, so a second run over an unchanged catalog plans
//! nothing.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  catalog::{Event, Position},
  classify::{CatalogSummary, EventProfile, LocationTag, PositionKind, PositionProfile},
};

// ─── Rules ───────────────────────────────────────────────────────────────────

/// Which events a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventScope {
  All,
  Relay,
  Short,
  NotShort,
}

impl EventScope {
  fn admits(self, event: &EventProfile) -> bool {
    match self {
      Self::All => true,
      Self::Relay => event.relay,
      Self::Short => event.short,
      Self::NotShort => !event.short,
    }
  }
}

/// The mandatory flag a rule proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
  Mandatory,
  Optional,
  /// Mandatory unless the position's location mentions "Middle".
  MandatoryExceptMiddle,
}

impl Requirement {
  fn is_mandatory(self, position: &PositionProfile) -> bool {
    match self {
      Self::Mandatory => true,
      Self::Optional => false,
      Self::MandatoryExceptMiddle => !position.at(LocationTag::Middle),
    }
  }
}

/// One assignment rule: positions of `kind` (optionally only those at
/// `location`) go on every event in `events`.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
  pub name:        &'static str,
  pub kind:        PositionKind,
  pub location:    Option<LocationTag>,
  pub events:      EventScope,
  pub requirement: Requirement,
}

impl Rule {
  fn matches_position(&self, position: &PositionProfile) -> bool {
    position.is(self.kind) && self.location.is_none_or(|tag| position.at(tag))
  }
}

pub const RULES: &[Rule] = &[
  Rule {
    name:        "deck referee on every event",
    kind:        PositionKind::DeckReferee,
    location:    None,
    events:      EventScope::All,
    requirement: Requirement::Mandatory,
  },
  Rule {
    name:        "starter on every event",
    kind:        PositionKind::Starter,
    location:    None,
    events:      EventScope::All,
    requirement: Requirement::Mandatory,
  },
  Rule {
    name:        "dq writer on every event",
    kind:        PositionKind::DqWriter,
    location:    None,
    events:      EventScope::All,
    requirement: Requirement::Mandatory,
  },
  Rule {
    name:        "rto on relays",
    kind:        PositionKind::Rto,
    location:    None,
    events:      EventScope::Relay,
    requirement: Requirement::MandatoryExceptMiddle,
  },
  Rule {
    name:        "finish-end oof on short events",
    kind:        PositionKind::Oof,
    location:    Some(LocationTag::FinishEndIn),
    events:      EventScope::Short,
    requirement: Requirement::Mandatory,
  },
  Rule {
    name:        "oof optional on every event",
    kind:        PositionKind::Oof,
    location:    None,
    events:      EventScope::All,
    requirement: Requirement::Optional,
  },
  Rule {
    name:        "verifier optional on every event",
    kind:        PositionKind::Verifier,
    location:    None,
    events:      EventScope::All,
    requirement: Requirement::Optional,
  },
  Rule {
    name:        "snt turn on every event",
    kind:        PositionKind::SntTurn,
    location:    None,
    events:      EventScope::All,
    requirement: Requirement::Mandatory,
  },
  Rule {
    name:        "snt start on events that are not short",
    kind:        PositionKind::SntStart,
    location:    None,
    events:      EventScope::NotShort,
    requirement: Requirement::Mandatory,
  },
];

// ─── Plan ────────────────────────────────────────────────────────────────────

/// `(event_id, position_id)` pairs that already have an event-position row.
pub type ExistingPairs = HashSet<(Uuid, Uuid)>;

/// A row the store should insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedPosition {
  pub event_id:     Uuid,
  pub position_id:  Uuid,
  pub is_mandatory: bool,
}

#[derive(Debug, Clone)]
pub struct Plan {
  /// New rows, ordered by event then position in catalog order.
  pub rows:    Vec<PlannedPosition>,
  pub catalog: CatalogSummary,
}

/// Compute the rows missing from `existing` under [`RULES`].
///
/// Fails with [`Error::MissingPositions`] when the catalog has none of the
/// primary position kinds.
pub fn plan(
  positions: &[Position],
  events: &[Event],
  existing: &ExistingPairs,
) -> Result<Plan> {
  let position_profiles: Vec<PositionProfile> =
    positions.iter().map(PositionProfile::of_position).collect();
  let event_profiles: Vec<EventProfile> =
    events.iter().map(EventProfile::of_event).collect();

  let catalog = CatalogSummary::from_profiles(&position_profiles);
  if !catalog.has_any_primary() {
    return Err(Error::MissingPositions { missing: catalog.missing_primary() });
  }

  let proposals = propose(&position_profiles, &event_profiles, RULES);

  let rows = proposals
    .into_iter()
    .map(|((ei, pi), is_mandatory)| PlannedPosition {
      event_id: events[ei].event_id,
      position_id: positions[pi].position_id,
      is_mandatory,
    })
    .filter(|row| !existing.contains(&(row.event_id, row.position_id)))
    .collect();

  Ok(Plan { rows, catalog })
}

/// Apply every rule and reduce per pair with "mandatory wins". Keys are
/// `(event index, position index)`.
fn propose(
  positions: &[PositionProfile],
  events: &[EventProfile],
  rules: &[Rule],
) -> BTreeMap<(usize, usize), bool> {
  let mut proposals = BTreeMap::new();
  for rule in rules {
    for (pi, position) in positions.iter().enumerate() {
      if !rule.matches_position(position) {
        continue;
      }
      let is_mandatory = rule.requirement.is_mandatory(position);
      for (ei, event) in events.iter().enumerate() {
        if !rule.events.admits(event) {
          continue;
        }
        proposals
          .entry((ei, pi))
          .and_modify(|m: &mut bool| *m |= is_mandatory)
          .or_insert(is_mandatory);
      }
    }
  }
  proposals
}

// ─── Report ──────────────────────────────────────────────────────────────────

/// The outcome of one auto-assignment run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoAssignReport {
  pub created:   usize,
  pub mandatory: usize,
  pub optional:  usize,
  pub catalog:   CatalogSummary,
}

impl AutoAssignReport {
  pub fn new(catalog: CatalogSummary) -> Self {
    Self { catalog, ..Self::default() }
  }

  /// Count one inserted row.
  pub fn record(&mut self, is_mandatory: bool) {
    self.created += 1;
    if is_mandatory {
      self.mandatory += 1;
    } else {
      self.optional += 1;
    }
  }

  /// Labels of the primary kinds the catalog has no positions for. A run can
  /// succeed with gaps as long as at least one primary kind is present.
  pub fn catalog_gaps(&self) -> Vec<&'static str> {
    self
      .catalog
      .missing_primary()
      .into_iter()
      .map(PositionKind::label)
      .collect()
  }

  pub fn message(&self) -> String {
    if self.created > 0 {
      format!(
        "Successfully assigned positions to events. {} new assignments created.",
        self.created
      )
    } else {
      "All events already have the required positions assigned.".to_owned()
    }
  }
}

/// Summary line for a remove-all run.
pub fn removal_message(removed: usize) -> String {
  if removed == 0 {
    return "There were no event positions to remove.".to_owned();
  }
  format!(
    "Successfully removed all positions from all events. {removed} assignments were deleted."
  )
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::catalog::{Gender, MeetType};

  fn position(role: &str, location: &str) -> Position {
    let now = Utc::now();
    Position {
      position_id:              Uuid::new_v4(),
      strategy_id:              Uuid::nil(),
      role:                     role.into(),
      location:                 location.into(),
      minimum_certification_id: None,
      created_at:               now,
      updated_at:               now,
    }
  }

  fn event(number: u16, name: &str) -> Event {
    let now = Utc::now();
    Event {
      event_id:     Uuid::new_v4(),
      event_number: number,
      name:         name.into(),
      description:  String::new(),
      meet_type:    MeetType::Dual,
      gender:       Gender::Mixed,
      created_at:   now,
      updated_at:   now,
    }
  }

  struct Fixture {
    positions: Vec<Position>,
    events:    Vec<Event>,
  }

  impl Fixture {
    fn standard() -> Self {
      Self {
        positions: vec![
          position("Deck Referee", "Pool Deck"),
          position("Starter", "Start End"),
          position("DQ Writer", "Admin Table"),
          position("RTO", "Start End"),
          position("OOF", "Finish End In"),
          position("OOF", "Turn End"),
          position("SNT Judge", "Turn End"),
          position("SNT Referee", "Start End"),
        ],
        events:    vec![
          event(1, "Freestyle 50m"),
          event(2, "Freestyle Relay 4x100m"),
          event(3, "Butterfly 25m"),
        ],
      }
    }

    fn pos(&self, role: &str, location: &str) -> Uuid {
      self
        .positions
        .iter()
        .find(|p| p.role == role && p.location == location)
        .map(|p| p.position_id)
        .unwrap()
    }

    fn rows_for(&self, plan: &Plan, event_idx: usize) -> BTreeMap<Uuid, bool> {
      let event_id = self.events[event_idx].event_id;
      plan
        .rows
        .iter()
        .filter(|r| r.event_id == event_id)
        .map(|r| (r.position_id, r.is_mandatory))
        .collect()
    }
  }

  #[test]
  fn standard_catalog_end_to_end() {
    let f = Fixture::standard();
    let plan = plan(&f.positions, &f.events, &ExistingPairs::new()).unwrap();

    let deck = f.pos("Deck Referee", "Pool Deck");
    let starter = f.pos("Starter", "Start End");
    let dq = f.pos("DQ Writer", "Admin Table");
    let rto = f.pos("RTO", "Start End");
    let oof_finish = f.pos("OOF", "Finish End In");
    let oof_turn = f.pos("OOF", "Turn End");
    let snt_judge = f.pos("SNT Judge", "Turn End");
    let snt_referee = f.pos("SNT Referee", "Start End");

    let free50 = f.rows_for(&plan, 0);
    assert_eq!(free50.len(), 7);
    assert_eq!(free50[&deck], true);
    assert_eq!(free50[&starter], true);
    assert_eq!(free50[&dq], true);
    assert_eq!(free50[&oof_finish], false);
    assert_eq!(free50[&oof_turn], false);
    assert_eq!(free50[&snt_judge], true);
    assert_eq!(free50[&snt_referee], true);
    assert!(!free50.contains_key(&rto));

    let relay = f.rows_for(&plan, 1);
    assert_eq!(relay.len(), 8);
    assert_eq!(relay[&rto], true);

    let fly25 = f.rows_for(&plan, 2);
    assert_eq!(fly25.len(), 6);
    assert_eq!(fly25[&oof_finish], true);
    assert_eq!(fly25[&oof_turn], false);
    assert_eq!(fly25[&snt_judge], true);
    assert!(!fly25.contains_key(&snt_referee));
    assert!(!fly25.contains_key(&rto));

    assert_eq!(plan.rows.len(), 21);
  }

  #[test]
  fn existing_pairs_are_not_planned_again() {
    let f = Fixture::standard();
    let first = plan(&f.positions, &f.events, &ExistingPairs::new()).unwrap();
    let existing: ExistingPairs = first
      .rows
      .iter()
      .map(|r| (r.event_id, r.position_id))
      .collect();

    let second = plan(&f.positions, &f.events, &existing).unwrap();
    assert!(second.rows.is_empty());
  }

  #[test]
  fn partially_existing_pairs_only_fill_the_gap() {
    let f = Fixture::standard();
    let deck = f.pos("Deck Referee", "Pool Deck");
    let existing: ExistingPairs =
      f.events.iter().map(|e| (e.event_id, deck)).collect();

    let plan = plan(&f.positions, &f.events, &existing).unwrap();
    assert_eq!(plan.rows.len(), 18);
    assert!(plan.rows.iter().all(|r| r.position_id != deck));
  }

  #[test]
  fn middle_rto_is_optional_on_relays() {
    let positions = vec![
      position("RTO", "Start End"),
      position("RTO", "Middle of Pool"),
    ];
    let events = vec![event(1, "Medley Relay 4x50")];
    let plan = plan(&positions, &events, &ExistingPairs::new()).unwrap();

    let flag = |pid: Uuid| {
      plan.rows.iter().find(|r| r.position_id == pid).unwrap().is_mandatory
    };
    assert!(flag(positions[0].position_id));
    assert!(!flag(positions[1].position_id));
  }

  #[test]
  fn mandatory_wins_regardless_of_rule_order() {
    let positions = vec![position("OOF", "Finish End In")];
    let events = vec![event(1, "Backstroke 25")];
    let profiles: Vec<_> =
      positions.iter().map(PositionProfile::of_position).collect();
    let event_profiles: Vec<_> = events.iter().map(EventProfile::of_event).collect();

    let mut reversed: Vec<Rule> = RULES.to_vec();
    reversed.reverse();

    let forward = propose(&profiles, &event_profiles, RULES);
    let backward = propose(&profiles, &event_profiles, &reversed);
    assert_eq!(forward, backward);
    assert_eq!(forward[&(0, 0)], true);
  }

  #[test]
  fn snt_only_catalog_is_a_configuration_error() {
    let positions = vec![
      position("SNT Judge", "Turn End"),
      position("Timer", "Lane 1"),
    ];
    let events = vec![event(1, "Freestyle 50m")];
    let err = plan(&positions, &events, &ExistingPairs::new()).unwrap_err();
    match err {
      Error::MissingPositions { missing } => {
        assert_eq!(missing.len(), PositionKind::PRIMARY.len());
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn empty_event_catalog_plans_nothing() {
    let f = Fixture::standard();
    let plan = plan(&f.positions, &[], &ExistingPairs::new()).unwrap();
    assert!(plan.rows.is_empty());
    assert_eq!(plan.catalog.count(PositionKind::Oof), 2);
  }

  #[test]
  fn report_messages() {
    let mut report = AutoAssignReport::default();
    assert!(report.message().contains("already"));
    report.record(true);
    report.record(false);
    assert_eq!((report.created, report.mandatory, report.optional), (2, 1, 1));
    assert!(report.message().contains("2 new assignments created"));
  }

  #[test]
  fn removal_messages() {
    assert_eq!(removal_message(0), "There were no event positions to remove.");
    assert_eq!(
      removal_message(3),
      "Successfully removed all positions from all events. 3 assignments were deleted."
    );
  }
}
