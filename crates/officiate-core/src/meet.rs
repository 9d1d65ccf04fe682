//! Meets and the assignment of officials to roles at them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, catalog::MeetType};

// ─── Meet ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meet {
  pub meet_id:             Uuid,
  pub name:                String,
  pub date:                NaiveDate,
  pub league_id:           Uuid,
  pub host_team_id:        Uuid,
  pub pool_id:             Option<Uuid>,
  pub meet_type:           MeetType,
  pub participating_teams: Vec<Uuid>,
  pub created_at:          DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMeet {
  pub name:                String,
  pub date:                NaiveDate,
  pub league_id:           Uuid,
  pub host_team_id:        Uuid,
  pub pool_id:             Option<Uuid>,
  #[serde(default)]
  pub meet_type:           MeetType,
  #[serde(default)]
  pub participating_teams: Vec<Uuid>,
}

impl NewMeet {
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::EmptyField("meet name"));
    }
    Ok(())
  }
}

// ─── Assignment ──────────────────────────────────────────────────────────────

/// An official working a named role at a meet. Unique on
/// `(meet, official, role)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
  pub assignment_id: Uuid,
  pub meet_id:       Uuid,
  pub official_id:   Uuid,
  pub role:          String,
  pub notes:         String,
  pub confirmed:     bool,
  pub assigned_at:   DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAssignment {
  pub meet_id:     Uuid,
  pub official_id: Uuid,
  pub role:        String,
  #[serde(default)]
  pub notes:       String,
  #[serde(default)]
  pub confirmed:   bool,
}

impl NewAssignment {
  pub fn validate(&self) -> Result<()> {
    if self.role.trim().is_empty() {
      return Err(Error::EmptyField("assignment role"));
    }
    Ok(())
  }
}

/// A stored assignment plus non-fatal notes for whoever created it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentReceipt {
  pub assignment: Assignment,
  pub warnings:   Vec<String>,
}
