//! Officials and the certifications they hold.
//!
//! A certification's `level` is an ordinal: higher is more advanced. Positions
//! may name a minimum certification; [`qualifies`] is the single comparison
//! used anywhere an official is checked against such a minimum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Certification ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
  pub certification_id: Uuid,
  pub name:             String,
  /// Up to three characters, e.g. "L2".
  pub abbreviation:     String,
  pub description:      String,
  pub level:            u16,
}

impl Certification {
  /// True if this certification is at least as advanced as `minimum`.
  pub fn satisfies(&self, minimum: &Certification) -> bool {
    self.level >= minimum.level
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCertification {
  pub name:         String,
  #[serde(default)]
  pub abbreviation: String,
  #[serde(default)]
  pub description:  String,
  #[serde(default = "default_level")]
  pub level:        u16,
}

fn default_level() -> u16 { 1 }

impl NewCertification {
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::EmptyField("certification name"));
    }
    if self.abbreviation.chars().count() > 3 {
      return Err(Error::AbbreviationTooLong(self.abbreviation.clone()));
    }
    Ok(())
  }
}

/// Whether an official holding `held` may fill a position requiring
/// `minimum`. No minimum admits everyone; no certification fails any minimum.
pub fn qualifies(
  held: Option<&Certification>,
  minimum: Option<&Certification>,
) -> bool {
  match (held, minimum) {
    (_, None) => true,
    (None, Some(_)) => false,
    (Some(held), Some(min)) => held.satisfies(min),
  }
}

// ─── Official ────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Default,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Proficiency {
  Provisional,
  #[default]
  Beginner,
  Intermediate,
  Advanced,
  Expert,
}

/// A person who officiates meets on behalf of a team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Official {
  pub official_id:      Uuid,
  pub team_id:          Uuid,
  pub name:             String,
  pub email:            String,
  pub phone:            String,
  pub certification_id: Option<Uuid>,
  pub active:           bool,
  pub proficiency:      Proficiency,
  pub created_at:       DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewOfficial {
  pub team_id:          Uuid,
  pub name:             String,
  #[serde(default)]
  pub email:            String,
  #[serde(default)]
  pub phone:            String,
  pub certification_id: Option<Uuid>,
  #[serde(default = "default_active")]
  pub active:           bool,
  #[serde(default)]
  pub proficiency:      Proficiency,
}

fn default_active() -> bool { true }

impl NewOfficial {
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::EmptyField("official name"));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn cert(level: u16) -> Certification {
    Certification {
      certification_id: Uuid::new_v4(),
      name:             format!("Level {level}"),
      abbreviation:     format!("L{level}"),
      description:      String::new(),
      level,
    }
  }

  #[test]
  fn no_minimum_admits_uncertified() {
    assert!(qualifies(None, None));
    assert!(qualifies(Some(&cert(1)), None));
  }

  #[test]
  fn uncertified_fails_any_minimum() {
    assert!(!qualifies(None, Some(&cert(1))));
  }

  #[test]
  fn level_comparison_is_inclusive() {
    assert!(qualifies(Some(&cert(3)), Some(&cert(3))));
    assert!(qualifies(Some(&cert(4)), Some(&cert(2))));
    assert!(!qualifies(Some(&cert(2)), Some(&cert(3))));
  }

  #[test]
  fn abbreviation_longer_than_three_is_rejected() {
    let input = NewCertification {
      name:         "Stroke and Turn".into(),
      abbreviation: "S&TJ".into(),
      description:  String::new(),
      level:        2,
    };
    assert!(matches!(input.validate(), Err(Error::AbbreviationTooLong(_))));
  }
}
