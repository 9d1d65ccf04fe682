//! The position and event catalogs, and the join between them.
//!
//! Positions belong to a [`Strategy`] and are unique on `(role, strategy,
//! location)`. Events are unique on `(event_number, meet_type)`. An
//! [`EventPosition`] marks a position as mandatory or optional for one event;
//! there is at most one per `(event, position)` pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Strategy ────────────────────────────────────────────────────────────────

/// A named officiating scheme grouping related positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Strategy {
  pub strategy_id: Uuid,
  pub name:        String,
  pub description: String,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewStrategy {
  pub name:        String,
  #[serde(default)]
  pub description: String,
}

impl NewStrategy {
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::EmptyField("strategy name"));
    }
    Ok(())
  }
}

// ─── Position ────────────────────────────────────────────────────────────────

/// An officiating role at a location, e.g. "OOF" at "Finish End In".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
  pub position_id:              Uuid,
  pub strategy_id:              Uuid,
  pub role:                     String,
  pub location:                 String,
  /// Requirement metadata only; auto-assignment does not consult it.
  pub minimum_certification_id: Option<Uuid>,
  pub created_at:               DateTime<Utc>,
  pub updated_at:               DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPosition {
  pub strategy_id:              Uuid,
  pub role:                     String,
  #[serde(default)]
  pub location:                 String,
  pub minimum_certification_id: Option<Uuid>,
}

impl NewPosition {
  pub fn validate(&self) -> Result<()> {
    if self.role.trim().is_empty() {
      return Err(Error::EmptyField("position role"));
    }
    Ok(())
  }
}

/// Filters for listing positions. Text filters are case-insensitive
/// substring matches.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PositionFilter {
  pub strategy_id: Option<Uuid>,
  pub role:        Option<String>,
  pub location:    Option<String>,
}

// ─── Event ───────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MeetType {
  #[default]
  Dual,
  Divisional,
  Invitational,
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
  #[default]
  Male,
  Female,
  Mixed,
}

pub const EVENT_NUMBERS: std::ops::RangeInclusive<u16> = 1..=99;

/// A single competitive event, identified by number within a meet type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
  pub event_id:     Uuid,
  pub event_number: u16,
  pub name:         String,
  pub description:  String,
  pub meet_type:    MeetType,
  pub gender:       Gender,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
  pub event_number: u16,
  pub name:         String,
  #[serde(default)]
  pub description:  String,
  #[serde(default)]
  pub meet_type:    MeetType,
  #[serde(default)]
  pub gender:       Gender,
}

impl NewEvent {
  pub fn validate(&self) -> Result<()> {
    if !EVENT_NUMBERS.contains(&self.event_number) {
      return Err(Error::EventNumberOutOfRange(self.event_number));
    }
    if self.name.trim().is_empty() {
      return Err(Error::EmptyField("event name"));
    }
    Ok(())
  }
}

/// Filters for listing events; `name` is a case-insensitive substring match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilter {
  pub event_number: Option<u16>,
  pub name:         Option<String>,
  pub meet_type:    Option<MeetType>,
  pub gender:       Option<Gender>,
}

// ─── EventPosition ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPosition {
  pub event_position_id: Uuid,
  pub event_id:          Uuid,
  pub position_id:       Uuid,
  pub is_mandatory:      bool,
  pub created_at:        DateTime<Utc>,
  pub updated_at:        DateTime<Utc>,
}

/// An event position joined with the fields its readers display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPositionDetail {
  #[serde(flatten)]
  pub event_position: EventPosition,
  pub event_number:   u16,
  pub event_name:     String,
  pub meet_type:      MeetType,
  pub role:           String,
  pub location:       String,
}

/// Whether a manual set created a new row or changed an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetOutcome {
  Created,
  Updated,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn new_event(number: u16) -> NewEvent {
    NewEvent {
      event_number: number,
      name:         "Freestyle 50m".into(),
      description:  String::new(),
      meet_type:    MeetType::Dual,
      gender:       Gender::Mixed,
    }
  }

  #[test]
  fn event_number_bounds() {
    assert!(new_event(1).validate().is_ok());
    assert!(new_event(99).validate().is_ok());
    assert!(matches!(
      new_event(0).validate(),
      Err(Error::EventNumberOutOfRange(0))
    ));
    assert!(matches!(
      new_event(100).validate(),
      Err(Error::EventNumberOutOfRange(100))
    ));
  }

  #[test]
  fn meet_type_strings() {
    assert_eq!(MeetType::Divisional.as_ref(), "divisional");
    assert_eq!("dual".parse::<MeetType>().unwrap(), MeetType::Dual);
  }
}
