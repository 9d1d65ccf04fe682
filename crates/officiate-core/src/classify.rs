//! Classification of free-text catalog entries into known kinds.
//!
//! Positions carry free-text `role` and `location` fields so administrators
//! can add catalog entries without schema changes. The assignment rules need
//! to know which entries are, say, an OOF at the finish end, so each entry is
//! classified once into a [`PositionProfile`] by case-insensitive keyword
//! matching. Events get the same treatment via [`EventProfile`].

use std::{collections::BTreeMap, collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::catalog::{Event, Position};

// ─── Kinds ───────────────────────────────────────────────────────────────────

/// A position kind recognised by the assignment rules.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PositionKind {
  DeckReferee,
  Starter,
  DqWriter,
  Rto,
  Oof,
  Verifier,
  /// Stroke-and-turn official working the turn end.
  SntTurn,
  /// Stroke-and-turn official working the start end.
  SntStart,
}

impl PositionKind {
  /// Kinds of which at least one must exist for an auto-assignment run.
  pub const PRIMARY: [PositionKind; 6] = [
    Self::DeckReferee,
    Self::Starter,
    Self::Rto,
    Self::DqWriter,
    Self::Oof,
    Self::Verifier,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Self::DeckReferee => "Deck Referee",
      Self::Starter => "Starter",
      Self::DqWriter => "DQ Writer",
      Self::Rto => "RTO",
      Self::Oof => "OOF",
      Self::Verifier => "Verifier",
      Self::SntTurn => "SNT Turn",
      Self::SntStart => "SNT Start",
    }
  }
}

/// A location keyword recognised by the assignment rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LocationTag {
  FinishEndIn,
  Turn,
  Start,
  Middle,
}

const ROLE_KEYWORDS: [(PositionKind, &str); 6] = [
  (PositionKind::DeckReferee, "deck referee"),
  (PositionKind::Starter, "starter"),
  (PositionKind::DqWriter, "dq writer"),
  (PositionKind::Rto, "rto"),
  (PositionKind::Oof, "oof"),
  (PositionKind::Verifier, "verifier"),
];

const LOCATION_KEYWORDS: [(LocationTag, &str); 4] = [
  (LocationTag::FinishEndIn, "finish end in"),
  (LocationTag::Turn, "turn"),
  (LocationTag::Start, "start"),
  (LocationTag::Middle, "middle"),
];

const SNT_KEYWORD: &str = "snt";

// ─── Position profile ────────────────────────────────────────────────────────

/// Every kind and location tag a single position matches. One position may
/// match several kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionProfile {
  kinds:     BTreeSet<PositionKind>,
  locations: BTreeSet<LocationTag>,
}

impl PositionProfile {
  pub fn of(role: &str, location: &str) -> Self {
    let role = role.to_lowercase();
    let location = location.to_lowercase();

    let locations: BTreeSet<LocationTag> = LOCATION_KEYWORDS
      .iter()
      .filter(|(_, kw)| location.contains(kw))
      .map(|(tag, _)| *tag)
      .collect();

    let mut kinds: BTreeSet<PositionKind> = ROLE_KEYWORDS
      .iter()
      .filter(|(_, kw)| role.contains(kw))
      .map(|(kind, _)| *kind)
      .collect();

    if role.contains(SNT_KEYWORD) {
      if locations.contains(&LocationTag::Turn) {
        kinds.insert(PositionKind::SntTurn);
      }
      if locations.contains(&LocationTag::Start) {
        kinds.insert(PositionKind::SntStart);
      }
    }

    Self { kinds, locations }
  }

  pub fn of_position(position: &Position) -> Self {
    Self::of(&position.role, &position.location)
  }

  pub fn is(&self, kind: PositionKind) -> bool { self.kinds.contains(&kind) }

  pub fn at(&self, tag: LocationTag) -> bool { self.locations.contains(&tag) }

  pub fn kinds(&self) -> impl Iterator<Item = PositionKind> + '_ {
    self.kinds.iter().copied()
  }
}

// ─── Event profile ───────────────────────────────────────────────────────────

/// The event attributes the assignment rules branch on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventProfile {
  /// Name contains "relay", any case.
  pub relay: bool,
  /// Name contains "25": a single-length event.
  pub short: bool,
}

impl EventProfile {
  pub fn of(name: &str) -> Self {
    Self {
      relay: name.to_lowercase().contains("relay"),
      short: name.contains("25"),
    }
  }

  pub fn of_event(event: &Event) -> Self { Self::of(&event.name) }
}

// ─── Catalog summary ─────────────────────────────────────────────────────────

/// How many catalog positions matched each kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
  pub kinds:             BTreeMap<PositionKind, usize>,
  /// OOF positions located at the finish end, inside.
  pub oof_finish_end_in: usize,
}

impl CatalogSummary {
  pub fn from_profiles<'a>(
    profiles: impl IntoIterator<Item = &'a PositionProfile>,
  ) -> Self {
    let mut summary = Self::default();
    for profile in profiles {
      for kind in profile.kinds() {
        *summary.kinds.entry(kind).or_default() += 1;
      }
      if profile.is(PositionKind::Oof) && profile.at(LocationTag::FinishEndIn) {
        summary.oof_finish_end_in += 1;
      }
    }
    summary
  }

  pub fn count(&self, kind: PositionKind) -> usize {
    self.kinds.get(&kind).copied().unwrap_or(0)
  }

  /// Primary kinds with no catalog entries.
  pub fn missing_primary(&self) -> Vec<PositionKind> {
    PositionKind::PRIMARY
      .into_iter()
      .filter(|k| self.count(*k) == 0)
      .collect()
  }

  pub fn has_any_primary(&self) -> bool {
    PositionKind::PRIMARY.iter().any(|k| self.count(*k) > 0)
  }
}

impl fmt::Display for CatalogSummary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut parts = Vec::new();
    for (kind, n) in &self.kinds {
      parts.push(format!("{} ({n} positions)", kind.label()));
      if *kind == PositionKind::Oof && self.oof_finish_end_in > 0 {
        parts.push(format!(
          "{} at Finish End In ({} positions)",
          kind.label(),
          self.oof_finish_end_in
        ));
      }
    }
    if parts.is_empty() {
      f.write_str("no recognised positions")
    } else {
      f.write_str(&parts.join(", "))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn role_keywords_are_case_insensitive() {
    let p = PositionProfile::of("deck REFEREE", "Pool Deck");
    assert!(p.is(PositionKind::DeckReferee));
    assert!(!p.is(PositionKind::Starter));
  }

  #[test]
  fn oof_finish_end_in_is_a_location_refinement() {
    let finish = PositionProfile::of("OOF", "Finish End In");
    let turn = PositionProfile::of("OOF", "Turn End");
    assert!(finish.is(PositionKind::Oof) && finish.at(LocationTag::FinishEndIn));
    assert!(turn.is(PositionKind::Oof) && !turn.at(LocationTag::FinishEndIn));
  }

  #[test]
  fn snt_kind_depends_on_location() {
    let judge = PositionProfile::of("SNT Judge", "Turn End");
    let referee = PositionProfile::of("SNT Referee", "Start End");
    assert!(judge.is(PositionKind::SntTurn));
    assert!(!judge.is(PositionKind::SntStart));
    assert!(referee.is(PositionKind::SntStart));
    assert!(!referee.is(PositionKind::SntTurn));
    // "SNT Referee" is not a deck referee.
    assert!(!referee.is(PositionKind::DeckReferee));
  }

  #[test]
  fn snt_without_known_location_has_no_snt_kind() {
    let p = PositionProfile::of("SNT Judge", "Lane 3");
    assert!(p.kinds().next().is_none());
  }

  #[test]
  fn event_profiles() {
    assert_eq!(
      EventProfile::of("Freestyle Relay 4x100m"),
      EventProfile { relay: true, short: false }
    );
    assert_eq!(
      EventProfile::of("Butterfly 25m"),
      EventProfile { relay: false, short: true }
    );
    assert_eq!(EventProfile::of("Freestyle 50m"), EventProfile::default());
    assert!(EventProfile::of("medley RELAY 4x25").relay);
  }

  #[test]
  fn summary_counts_and_missing() {
    let profiles = [
      PositionProfile::of("OOF", "Finish End In"),
      PositionProfile::of("OOF", "Turn End"),
      PositionProfile::of("Starter", "Start End"),
    ];
    let summary = CatalogSummary::from_profiles(&profiles);
    assert_eq!(summary.count(PositionKind::Oof), 2);
    assert_eq!(summary.oof_finish_end_in, 1);
    assert!(summary.has_any_primary());
    assert_eq!(
      summary.missing_primary(),
      vec![
        PositionKind::DeckReferee,
        PositionKind::Rto,
        PositionKind::DqWriter,
        PositionKind::Verifier,
      ]
    );
  }
}
