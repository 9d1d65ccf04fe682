//! Leagues, divisions, teams and pools: the organisational structure that
//! officials and meets hang off.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::{Error, Result};

// ─── League ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct League {
  pub league_id:    Uuid,
  pub name:         String,
  pub description:  String,
  pub founded_year: Option<u16>,
  pub created_at:   DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewLeague {
  pub name:         String,
  #[serde(default)]
  pub description:  String,
  pub founded_year: Option<u16>,
}

impl NewLeague {
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::EmptyField("league name"));
    }
    Ok(())
  }
}

// ─── Division ────────────────────────────────────────────────────────────────

/// A division within a league. Deleted together with its league.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Division {
  pub division_id: Uuid,
  pub league_id:   Uuid,
  pub name:        String,
  pub description: String,
  pub created_at:  DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDivision {
  pub league_id:   Uuid,
  pub name:        String,
  #[serde(default)]
  pub description: String,
}

impl NewDivision {
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::EmptyField("division name"));
    }
    Ok(())
  }
}

// ─── Team ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
  pub team_id:      Uuid,
  pub division_id:  Uuid,
  pub name:         String,
  pub abbreviation: String,
  pub mascot:       String,
  pub address:      String,
  pub website:      String,
  pub created_at:   DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTeam {
  pub division_id:  Uuid,
  pub name:         String,
  #[serde(default)]
  pub abbreviation: String,
  #[serde(default)]
  pub mascot:       String,
  #[serde(default)]
  pub address:      String,
  #[serde(default)]
  pub website:      String,
}

impl NewTeam {
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::EmptyField("team name"));
    }
    Ok(())
  }
}

// ─── Pool ────────────────────────────────────────────────────────────────────

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
pub enum PoolUnits {
  #[default]
  Yards,
  Meters,
}

/// A pool owned by a team; meets are optionally held at one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool {
  pub pool_id:       Uuid,
  pub team_id:       Uuid,
  pub name:          String,
  pub address:       String,
  pub length:        u16,
  pub units:         PoolUnits,
  pub lanes:         u16,
  /// Whether events start at both ends of the pool.
  pub bidirectional: bool,
  pub created_at:    DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPool {
  pub team_id:       Uuid,
  pub name:          String,
  #[serde(default)]
  pub address:       String,
  #[serde(default = "default_pool_length")]
  pub length:        u16,
  #[serde(default)]
  pub units:         PoolUnits,
  #[serde(default = "default_pool_lanes")]
  pub lanes:         u16,
  #[serde(default)]
  pub bidirectional: bool,
}

impl NewPool {
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::EmptyField("pool name"));
    }
    Ok(())
  }
}

fn default_pool_length() -> u16 { 50 }

fn default_pool_lanes() -> u16 { 6 }
